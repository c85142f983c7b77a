//! Locally constructed scene content: the placeholder cube, the ground
//! plane, and the lighting rig. Everything here is fixed-parameter geometry
//! that never depends on external input.

/// Placeholder cube with six coloured faces and its spin system.
pub mod fallback;

/// Shadow-receiving ground plane.
pub mod ground;

/// Ambient, key, fill, and accent lights.
pub mod lighting;
