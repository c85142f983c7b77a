use bevy::asset::{AssetLoadError, LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::loading::config_loader::ActiveConfig;
use crate::engine::loading::lifecycle::{LoadError, LoadLifecycle, LoadPhase, LoadTicket};

/// Marker for a spawned glTF scene that is not yet measured or visible.
#[derive(Component)]
pub struct PendingModel;

/// Marker for the displayed model subtree.
#[derive(Component)]
pub struct ModelRoot;

/// Owns the in-flight (or displayed) glTF handle and its request ticket.
/// Dropping the handle releases the asset once nothing references it.
#[derive(Resource, Default)]
pub struct ModelLoader {
    pub handle: Option<Handle<Gltf>>,
    pub ticket: Option<LoadTicket>,
}

impl ModelLoader {
    pub fn clear(&mut self) {
        self.handle = None;
        self.ticket = None;
    }
}

/// Issue the load request once the placeholder is up and config is resolved.
pub fn begin_model_load(
    time: Res<Time>,
    config: Option<Res<ActiveConfig>>,
    mut lifecycle: ResMut<LoadLifecycle>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
) {
    let Some(config) = config else {
        return;
    };
    if loader.ticket.is_some() || !matches!(lifecycle.phase(), LoadPhase::FallbackShown) {
        return;
    }

    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    let path = config.0.model_path.clone();
    match lifecycle.start_load(&path, config.0.load_timeout_ms, now_ms) {
        Ok(ticket) => {
            println!("Loading model from: {path}");
            loader.handle = Some(asset_server.load::<Gltf>(&path));
            loader.ticket = Some(ticket);
        }
        Err(err) => warn!("model load not started: {err}"),
    }
}

/// Poll the asset server while a request is outstanding. The first of
/// {loaded, failed, timeout} resolves the request; the timeout stops being
/// checked once the transport has answered and the scene is spawning.
pub fn poll_model_load(
    time: Res<Time>,
    mut lifecycle: ResMut<LoadLifecycle>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    pending: Query<Entity, With<PendingModel>>,
    mut commands: Commands,
) {
    let (Some(handle), Some(ticket)) = (loader.handle.clone(), loader.ticket) else {
        return;
    };
    if !matches!(lifecycle.phase(), LoadPhase::Loading { .. }) {
        return;
    }

    // Scene spawned, waiting on instancing. The transport has answered, so
    // the timeout is disarmed exactly like the original clearTimeout.
    if !pending.is_empty() {
        return;
    }

    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    if let Some(error) = lifecycle.tick(now_ms) {
        warn!("model load failed: {error}");
        loader.clear();
        return;
    }

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Failed(err)) => {
            let error = classify_load_error(&err);
            warn!("model load failed: {error}");
            lifecycle.on_failure(ticket, error, now_ms);
            loader.clear();
            return;
        }
        Some(LoadState::Loaded) => {}
        _ => {
            lifecycle.on_progress(ticket, None);
            return;
        }
    }

    // Root asset parsed; wait for meshes, textures, and animations too.
    match asset_server.get_recursive_dependency_load_state(&handle) {
        Some(RecursiveDependencyLoadState::Loaded) => {}
        Some(RecursiveDependencyLoadState::Failed(err)) => {
            let error = classify_load_error(&err);
            warn!("model dependency failed: {error}");
            lifecycle.on_failure(ticket, error, now_ms);
            loader.clear();
            return;
        }
        _ => {
            lifecycle.on_progress(ticket, None);
            return;
        }
    }

    let Some(gltf) = gltf_assets.get(&handle) else {
        return;
    };
    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        lifecycle.on_failure(
            ticket,
            LoadError::NetworkOrParse(String::from("model contains no scenes")),
            now_ms,
        );
        loader.clear();
        return;
    };

    println!("✓ Model data loaded, spawning scene");
    // Spawned hidden: it becomes visible only when the placeholder goes,
    // so the scene never shows both at once.
    commands.spawn((
        SceneRoot(scene),
        Transform::default(),
        Visibility::Hidden,
        PendingModel,
    ));
}

fn classify_load_error(err: &AssetLoadError) -> LoadError {
    match err {
        AssetLoadError::MissingAssetLoaderForExtension(_)
        | AssetLoadError::MissingAssetLoaderForTypeName(_) => {
            LoadError::LoaderUnavailable(err.to_string())
        }
        _ => LoadError::NetworkOrParse(err.to_string()),
    }
}
