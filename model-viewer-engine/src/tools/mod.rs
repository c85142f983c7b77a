//! Interactive viewer tools: click-to-inspect with ray picking and
//! keyboard shortcuts for camera and retry control.

/// Click-to-inspect: cursor ray, nearest-hit reporting, click effect.
pub mod inspect;

/// Ray–AABB intersection and nearest-first pick ordering.
pub mod ray;

/// Keyboard shortcuts for camera reset, auto-rotate, and retry.
pub mod shortcuts;
