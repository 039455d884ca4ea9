//! Event handlers for the chart view
//!
//! Keyboard and mouse input become playback commands.

pub mod keyboard;
pub mod mouse;
