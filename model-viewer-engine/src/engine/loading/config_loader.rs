use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::{DEFAULT_MODEL_PATH, VIEWER_CONFIG_PATH};
use constants::viewer_settings::DEFAULT_LOAD_TIMEOUT_MS;
use serde::Deserialize;

/// External viewer configuration: the model path and load timeout are the
/// only tunables exposed outside the binary.
#[derive(Asset, TypePath, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub model_path: String,
    #[serde(default = "default_timeout_ms")]
    pub load_timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_LOAD_TIMEOUT_MS
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: String::from(DEFAULT_MODEL_PATH),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
        }
    }
}

/// Resource holding the active configuration once resolved.
#[derive(Resource, Clone, Debug, Default)]
pub struct ActiveConfig(pub ViewerConfig);

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ViewerConfig>>,
}

/// Kick off the config request before anything else loads.
pub fn start_config_load(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(VIEWER_CONFIG_PATH));
}

/// Resolve the configuration: use the JSON file when it parses, otherwise
/// fall back to compiled-in defaults so the viewer always starts.
pub fn resolve_config_system(
    mut loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    mut commands: Commands,
) {
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            if let Some(config) = configs.get(&handle) {
                info!(
                    "viewer config loaded: model={} timeout={}ms",
                    config.model_path, config.load_timeout_ms
                );
                commands.insert_resource(ActiveConfig(config.clone()));
                loader.handle = None;
            }
        }
        Some(LoadState::Failed(err)) => {
            warn!("viewer config unavailable ({err}), using defaults");
            commands.insert_resource(ActiveConfig(ViewerConfig::default()));
            loader.handle = None;
        }
        _ => {}
    }
}
