//! Shared tuning values for the model viewer.
//!
//! Keeps lifecycle timing, placeholder styling, and camera limits in one
//! place so the engine crate and tests agree on the same numbers.

pub mod path;
pub mod viewer_settings;
