use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::viewer_settings::{CAMERA_START_POSITION, background_colour};

use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, ViewerConfig, resolve_config_system, start_config_load,
};
use crate::engine::loading::lifecycle::LoadLifecycle;
use crate::engine::loading::model_finalizer::finalize_loaded_model;
use crate::engine::loading::model_loader::{ModelLoader, begin_model_load, poll_model_load};
use crate::engine::loading::retry::{RetryLoadEvent, handle_retry_load};
use crate::engine::scene::fallback::{ensure_placeholder, spin_fallback};
use crate::engine::scene::ground::spawn_ground;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::systems::status::{push_status_updates, update_status_overlay};
use crate::rpc::web_rpc::ViewerRpcPlugin;
use crate::tools::inspect::{handle_canvas_click, update_click_effects};
use crate::tools::shortcuts::handle_keyboard_shortcuts;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::status::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(ViewerRpcPlugin)
        .init_state::<AppState>()
        .insert_resource(ClearColor(background_colour()));

    // Initialise resources early
    app.init_resource::<LoadLifecycle>()
        .init_resource::<ModelLoader>()
        .init_resource::<ConfigLoader>()
        .init_resource::<OrbitCamera>()
        .add_event::<RetryLoadEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_config_load).chain())
        .add_systems(
            Update,
            (
                // Placeholder-first, then wait for config before loading
                ensure_placeholder,
                resolve_config_system,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Initialising)),
        )
        .add_systems(
            Update,
            (
                // Loading pipeline; order matters within a frame
                ensure_placeholder,
                begin_model_load,
                poll_model_load,
                finalize_loaded_model,
                handle_retry_load,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

    // Interactive systems run in both states: the viewer is usable the
    // moment the placeholder appears.
    app.add_systems(
        Update,
        (
            camera_controller,
            spin_fallback,
            handle_canvas_click,
            update_click_effects,
            handle_keyboard_shortcuts,
            push_status_updates,
            update_status_overlay,
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system: camera, lights, ground, and the native overlay. The
// placeholder itself is spawned by `ensure_placeholder` so retry reuses
// the same path.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    println!("=== 3D MODEL VIEWER ===");

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_START_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: background_colour(),
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 50.0,
            },
            ..default()
        },
    ));

    spawn_lighting(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        crate::engine::systems::status::spawn_status_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
