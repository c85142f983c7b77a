use bevy::prelude::*;
use constants::viewer_settings::{ERROR_BANNER_DURATION_MS, MODEL_TARGET_SIZE};
use thiserror::Error;

/// Why a load attempt ended without a displayable model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("no asset loader registered for this model format: {0}")]
    LoaderUnavailable(String),
    #[error("failed to fetch or parse the model: {0}")]
    NetworkOrParse(String),
    #[error("model load timed out after {0} ms")]
    Timeout(u64),
    #[error("model has a zero-extent bounding volume")]
    DegenerateAsset,
}

/// Misuse of the lifecycle itself, as opposed to a failed load.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("placeholder has not been shown yet")]
    NotInitialised,
    #[error("a load request is already in flight")]
    LoadInFlight,
    #[error("lifecycle is terminal; reset before loading again")]
    AlreadyResolved,
}

/// Severity of the status line shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Success,
    Warning,
}

impl StatusSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

/// Normalisation transform derived from the loaded model's bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    /// Uniform scale bringing the largest extent to `MODEL_TARGET_SIZE`.
    pub scale: f32,
    /// Root translation moving the scaled bounding centre onto the origin.
    pub offset: Vec3,
}

/// Current phase of the asset lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Empty,
    FallbackShown,
    Loading {
        /// Last reported download ratio in [0, 1], `None` while indeterminate.
        progress: Option<f32>,
    },
    Loaded {
        placement: ModelPlacement,
    },
    Failed {
        error: LoadError,
    },
}

/// What the user currently sees as top-level scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleContent {
    Nothing,
    Placeholder,
    Model,
}

/// Proof that a callback belongs to a specific `start_load` request.
/// Callbacks carrying a ticket from a superseded request are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Status line fed to the UI surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub severity: StatusSeverity,
}

/// Transient error banner. Lives beside the phase so it expires on its own
/// clock even when the lifecycle is reset or restarted underneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub text: String,
    pub expires_ms: f64,
}

/// The asset-loading lifecycle: placeholder first, one bounded load attempt,
/// then either the real model or the placeholder plus a warning.
///
/// Pure state; Bevy systems feed it timestamps and asset-server results and
/// apply its decisions to the scene graph. Exactly one of success, failure,
/// or timeout resolves each request; the generation carried by [`LoadTicket`]
/// makes late callbacks from cancelled requests no-ops.
#[derive(Resource, Debug)]
pub struct LoadLifecycle {
    phase: LoadPhase,
    generation: u64,
    deadline_ms: Option<f64>,
    timeout_ms: u64,
    status: StatusLine,
    loading_text: String,
    banner: Option<ErrorBanner>,
}

impl Default for LoadLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadLifecycle {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Empty,
            generation: 0,
            deadline_ms: None,
            timeout_ms: 0,
            status: StatusLine {
                text: String::from("Initialising viewer"),
                severity: StatusSeverity::Info,
            },
            loading_text: String::new(),
            banner: None,
        }
    }

    /// Show the placeholder. Only meaningful from `Empty`; returns `true`
    /// when the placeholder content should actually be spawned.
    pub fn initialize(&mut self) -> bool {
        if !matches!(self.phase, LoadPhase::Empty) {
            return false;
        }
        self.phase = LoadPhase::FallbackShown;
        self.set_status("Fallback cube ready", StatusSeverity::Info);
        true
    }

    /// Begin the single load attempt for this generation.
    pub fn start_load(
        &mut self,
        path: &str,
        timeout_ms: u64,
        now_ms: f64,
    ) -> Result<LoadTicket, LifecycleError> {
        match self.phase {
            LoadPhase::Empty => return Err(LifecycleError::NotInitialised),
            LoadPhase::Loading { .. } => return Err(LifecycleError::LoadInFlight),
            LoadPhase::Loaded { .. } | LoadPhase::Failed { .. } => {
                return Err(LifecycleError::AlreadyResolved);
            }
            LoadPhase::FallbackShown => {}
        }

        self.phase = LoadPhase::Loading { progress: None };
        self.deadline_ms = Some(now_ms + timeout_ms as f64);
        self.timeout_ms = timeout_ms;
        self.loading_text = format!("Loading 3D model: {path}");
        self.set_status("Loading 3D model", StatusSeverity::Info);
        Ok(LoadTicket(self.generation))
    }

    /// Update the displayed download ratio. Never changes the phase tag;
    /// repeated and out-of-order calls are fine, the last value wins.
    pub fn on_progress(&mut self, ticket: LoadTicket, ratio: Option<f32>) {
        if !self.ticket_is_current(ticket) {
            return;
        }
        if let LoadPhase::Loading { ref mut progress } = self.phase {
            *progress = ratio.map(|r| r.clamp(0.0, 1.0));
            self.loading_text = match *progress {
                Some(r) => format!("Loading 3D model: {:.0}%", r * 100.0),
                None => String::from("Loading 3D model"),
            };
        }
    }

    /// Resolve the request with a loaded bounding volume. Returns the
    /// placement the scene driver must apply, or `None` when the callback
    /// was stale or the asset was degenerate (which fails the load instead).
    pub fn on_success(
        &mut self,
        ticket: LoadTicket,
        extents: Vec3,
        centre: Vec3,
        now_ms: f64,
    ) -> Option<ModelPlacement> {
        if !self.ticket_is_current(ticket) || !matches!(self.phase, LoadPhase::Loading { .. }) {
            return None;
        }

        let max_extent = extents.x.max(extents.y).max(extents.z);
        if !(max_extent > 0.0) {
            // Zero or NaN extent: scaling would poison the transform.
            warn!("loaded model has degenerate bounds {extents:?}, keeping placeholder");
            self.fail(LoadError::DegenerateAsset, now_ms);
            return None;
        }

        let scale = MODEL_TARGET_SIZE / max_extent;
        let placement = ModelPlacement {
            scale,
            offset: -(centre * scale),
        };
        self.phase = LoadPhase::Loaded { placement };
        self.deadline_ms = None;
        self.set_status("Model loaded", StatusSeverity::Success);
        Some(placement)
    }

    /// Resolve the request with a failure. The placeholder stays visible.
    /// Returns `true` when the failure took effect (the banner should show).
    pub fn on_failure(&mut self, ticket: LoadTicket, error: LoadError, now_ms: f64) -> bool {
        if !self.ticket_is_current(ticket) || !matches!(self.phase, LoadPhase::Loading { .. }) {
            return false;
        }
        self.fail(error, now_ms);
        true
    }

    /// Advance time. Synthesises a timeout failure once the deadline passes
    /// while still loading; later transport callbacks then find the phase
    /// resolved and do nothing.
    pub fn tick(&mut self, now_ms: f64) -> Option<LoadError> {
        if let LoadPhase::Loading { .. } = self.phase {
            if let Some(deadline) = self.deadline_ms {
                if now_ms >= deadline {
                    let error = LoadError::Timeout(self.timeout_ms);
                    self.fail(error.clone(), now_ms);
                    return Some(error);
                }
            }
        }
        None
    }

    /// Abandon the current generation: any in-flight callback becomes stale.
    /// The banner is left to expire on its own clock.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = LoadPhase::Empty;
        self.deadline_ms = None;
        self.loading_text.clear();
        self.set_status("Viewer reset", StatusSeverity::Info);
    }

    fn fail(&mut self, error: LoadError, now_ms: f64) {
        let banner_text = match error {
            LoadError::Timeout(_) => {
                String::from("Model loading timed out. Showing the fallback cube instead.")
            }
            _ => String::from("Could not load the model file. Showing the fallback cube instead."),
        };
        self.banner = Some(ErrorBanner {
            text: banner_text,
            expires_ms: now_ms + ERROR_BANNER_DURATION_MS as f64,
        });
        self.phase = LoadPhase::Failed { error };
        self.deadline_ms = None;
        self.set_status("Showing fallback cube", StatusSeverity::Warning);
    }

    fn ticket_is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    fn set_status(&mut self, text: &str, severity: StatusSeverity) {
        self.status = StatusLine {
            text: String::from(text),
            severity,
        };
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn loading_text(&self) -> &str {
        &self.loading_text
    }

    /// The one thing the user must always see after initialisation: the
    /// placeholder or the model, never both, never neither.
    pub fn visible_content(&self) -> VisibleContent {
        match self.phase {
            LoadPhase::Empty => VisibleContent::Nothing,
            LoadPhase::FallbackShown | LoadPhase::Loading { .. } | LoadPhase::Failed { .. } => {
                VisibleContent::Placeholder
            }
            LoadPhase::Loaded { .. } => VisibleContent::Model,
        }
    }

    pub fn banner(&self) -> Option<&ErrorBanner> {
        self.banner.as_ref()
    }

    /// Whether the transient error banner is still on screen at `now_ms`.
    pub fn banner_visible(&self, now_ms: f64) -> bool {
        self.banner
            .as_ref()
            .is_some_and(|banner| now_ms < banner.expires_ms)
    }
}
