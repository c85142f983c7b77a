//! Asset-loading lifecycle: placeholder first, one bounded model request,
//! then either the normalised model or the placeholder plus a warning.
//!
//! The pure state machine lives in [`lifecycle`]; the other modules are the
//! Bevy systems that feed it asset-server results and apply its decisions.

/// Viewer configuration loading with compiled-in defaults.
pub mod config_loader;

/// The lifecycle state machine itself: phases, tickets, timeout, banner.
pub mod lifecycle;

/// Scene measurement, normalisation, shadow flags, and the content swap.
pub mod model_finalizer;

/// Asset-server polling, request issue, and failure classification.
pub mod model_loader;

/// Retry-after-failure teardown.
pub mod retry;
