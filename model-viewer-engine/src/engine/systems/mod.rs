//! Cross-cutting runtime systems.

/// Status surfaces: frontend notifications and the native text overlay.
pub mod status;
