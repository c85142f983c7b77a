//! Browser-based 3D model viewer built on Bevy.
//!
//! Shows a locally constructed placeholder cube immediately, attempts one
//! bounded glTF load, and reconciles the scene and status surfaces from the
//! outcome. The load lifecycle lives in [`engine::loading::lifecycle`];
//! rendering, camera projection, shadows, and glTF parsing are Bevy's.

pub mod engine;
pub mod rpc;
pub mod tools;

pub use engine::core::app_setup::create_app;
