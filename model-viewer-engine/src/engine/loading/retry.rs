use bevy::prelude::*;

use crate::engine::loading::lifecycle::LoadLifecycle;
use crate::engine::loading::model_loader::{ModelLoader, ModelRoot, PendingModel};
use crate::engine::scene::fallback::FallbackRoot;
use crate::tools::inspect::ClickEffect;

/// Requested by the frontend (or the `L` key natively) after a failed load.
#[derive(Event)]
pub struct RetryLoadEvent;

/// Tear everything down and let the regular systems rebuild: the placeholder
/// respawns first, then a fresh load request is issued under a new
/// generation, so any straggling callback from the old request is ignored.
pub fn handle_retry_load(
    mut events: EventReader<RetryLoadEvent>,
    mut lifecycle: ResMut<LoadLifecycle>,
    mut loader: ResMut<ModelLoader>,
    content: Query<
        Entity,
        Or<(
            With<ModelRoot>,
            With<PendingModel>,
            With<FallbackRoot>,
            With<ClickEffect>,
        )>,
    >,
    mut commands: Commands,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    for entity in &content {
        commands.entity(entity).despawn();
    }
    loader.clear();
    lifecycle.reset();
    info!("viewer reset, retrying model load");
}
