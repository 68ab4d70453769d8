//! Bounce Demo - a player sprite among bouncing sprites
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, bounce rule, tick/render pass)
//! - `renderer`: Sprite batch abstraction and the WebGPU sprite renderer
//! - `assets`: Named sprite loading and caching
//! - `platform`: Frame clock and browser input mapping
//! - `config`: Data-driven viewport and scene layout

pub mod assets;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use assets::{AssetCatalog, AssetError, AssetSource, SpriteHandle};
pub use config::{ConfigError, DemoConfig, SceneLayout};

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one unit of displacement per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta fed to the frame clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical viewport used for bounce checks
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;

    /// Player movement per tick
    pub const PLAYER_SPEED: f32 = 6.0;

    /// Frame clear colour (CornflowerBlue)
    pub const BACKGROUND_RGB: [u8; 3] = [100, 149, 237];
}
