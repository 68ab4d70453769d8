//! Frame-stepped simulation module
//!
//! All demo logic lives here:
//! - One tick = one fixed displacement per moving entity
//! - Stable iteration order (insertion order)
//! - No rendering backend or platform dependencies; drawing goes through
//!   the `SpriteBatch` trait

pub mod entity;
pub mod input;
pub mod state;
pub mod tick;
pub mod viewport;

pub use entity::{Draw, Entity, MovingEntity, Player, SPRITE_LAYER};
pub use input::{FrameInput, Key, KeyboardState};
pub use state::{SetupError, SimPhase, Simulation};
pub use tick::{render, tick};
pub use viewport::Viewport;
