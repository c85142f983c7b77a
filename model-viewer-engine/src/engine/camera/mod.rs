//! Interactive camera control around the displayed content.

/// Drag-orbit and wheel-zoom camera with damping and auto-rotate.
pub mod orbit_camera;
