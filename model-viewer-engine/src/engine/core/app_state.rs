use bevy::prelude::*;

use crate::engine::loading::config_loader::ActiveConfig;

/// Coarse application state: scene setup and config resolution first, then
/// the interactive viewer. The asset lifecycle itself is tracked separately
/// by `LoadLifecycle`; the placeholder is already on screen in
/// `Initialising` so there is never a blank canvas.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Initialising,
    Running,
}

// Transition once the viewer config has resolved (file or defaults)
pub fn transition_to_running(
    config: Option<Res<ActiveConfig>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if config.is_some() {
        println!("→ Config resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
