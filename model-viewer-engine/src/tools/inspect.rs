use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::viewer_settings::{
    CLICK_EFFECT_GROWTH, CLICK_EFFECT_LIFETIME_MS, CLICK_EFFECT_RADIUS, accent_colour,
};

use crate::engine::loading::lifecycle::{LoadLifecycle, VisibleContent};
use crate::rpc::web_rpc::ViewerRpc;
use crate::tools::ray::pick_ordered;

/// Mesh entities the click ray may hit: placeholder faces and model meshes.
#[derive(Component)]
pub struct Inspectable;

/// Expanding, fading sphere spawned at a click hit point.
#[derive(Component)]
pub struct ClickEffect {
    spawned_ms: f64,
}

/// Cast a ray from the cursor on left click and report the nearest hit.
pub fn handle_canvas_click(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    targets: Query<(Entity, &GlobalTransform, &Aabb), With<Inspectable>>,
    lifecycle: Res<LoadLifecycle>,
    mut rpc: ResMut<ViewerRpc>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };

    let origin = ray.origin;
    let dir = ray.direction.as_vec3();
    let candidates = targets.iter().map(|(e, xf, aabb)| (e, *xf, *aabb));
    let Some(hit) = pick_ordered(origin, dir, candidates).into_iter().next() else {
        return;
    };

    let content = match lifecycle.visible_content() {
        VisibleContent::Model => "model",
        _ => "fallback",
    };
    info!(
        "{} clicked at ({:.2}, {:.2}, {:.2})",
        content, hit.point.x, hit.point.y, hit.point.z
    );
    rpc.send_notification(
        "model_inspected",
        serde_json::json!({
            "content": content,
            "x": hit.point.x,
            "y": hit.point.y,
            "z": hit.point.z,
        }),
    );

    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(CLICK_EFFECT_RADIUS).mesh().uv(16, 16))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: accent_colour(),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(hit.point),
        ClickEffect { spawned_ms: now_ms },
    ));
}

/// Grow and fade each click effect, despawning it after its lifetime. The
/// material handle is per-effect, so the fade never bleeds across effects.
pub fn update_click_effects(
    time: Res<Time>,
    mut effects: Query<(
        Entity,
        &ClickEffect,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    for (entity, effect, mut transform, material) in &mut effects {
        let progress = ((now_ms - effect.spawned_ms) / CLICK_EFFECT_LIFETIME_MS as f64) as f32;
        if progress >= 1.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.scale = Vec3::splat(1.0 + progress * CLICK_EFFECT_GROWTH);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = material.base_color.with_alpha(1.0 - progress);
        }
    }
}
