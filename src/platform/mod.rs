//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (fixed-timestep frame clock)
//! - Input events (DOM key names, gamepad buttons)

pub mod clock;
pub mod keys;

pub use clock::FrameClock;
pub use keys::{GAMEPAD_BACK_BUTTON, key_from_dom, key_from_event};
