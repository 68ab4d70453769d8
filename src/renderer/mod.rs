//! Sprite rendering
//!
//! `batch` defines the backend-neutral `SpriteBatch` interface the simulation
//! draws through; `pipeline` implements it on WebGPU.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::{Color, DrawParams, RecordedFrame, RecordingBatch, SpriteBatch};
pub use pipeline::SpriteRenderer;
pub use vertex::SpriteVertex;
