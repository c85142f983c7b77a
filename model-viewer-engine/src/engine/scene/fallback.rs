use bevy::prelude::*;
use constants::viewer_settings::{FALLBACK_CUBE_SIZE, FALLBACK_SPIN_SPEED, fallback_face_colours};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::engine::loading::lifecycle::{LoadLifecycle, VisibleContent};
use crate::tools::inspect::Inspectable;

/// Root of the placeholder content. Despawned as one unit when the real
/// model takes over.
#[derive(Component)]
pub struct FallbackRoot;

/// Slow continuous rotation applied while the placeholder is on screen.
#[derive(Component)]
pub struct FallbackSpinner;

/// Spawn the placeholder whenever the lifecycle asks for it: at startup and
/// again after a retry reset. Construction is purely local fixed-parameter
/// geometry, so unlike the model load it cannot fail.
pub fn ensure_placeholder(
    mut lifecycle: ResMut<LoadLifecycle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if !lifecycle.initialize() {
        return;
    }

    println!("✓ Placeholder cube spawned");
    let half = FALLBACK_CUBE_SIZE / 2.0;
    let face_mesh = meshes.add(Rectangle::new(FALLBACK_CUBE_SIZE, FALLBACK_CUBE_SIZE));

    // One quad per face, +X −X +Y −Y +Z −Z, each with its own colour.
    let faces = [
        (Vec3::X * half, Quat::from_rotation_y(FRAC_PI_2)),
        (Vec3::NEG_X * half, Quat::from_rotation_y(-FRAC_PI_2)),
        (Vec3::Y * half, Quat::from_rotation_x(-FRAC_PI_2)),
        (Vec3::NEG_Y * half, Quat::from_rotation_x(FRAC_PI_2)),
        (Vec3::Z * half, Quat::IDENTITY),
        (Vec3::NEG_Z * half, Quat::from_rotation_y(PI)),
    ];

    commands
        .spawn((
            Transform::default(),
            Visibility::Visible,
            FallbackRoot,
            FallbackSpinner,
        ))
        .with_children(|parent| {
            for ((translation, rotation), colour) in faces.into_iter().zip(fallback_face_colours())
            {
                parent.spawn((
                    Mesh3d(face_mesh.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: colour,
                        perceptual_roughness: 0.9,
                        ..default()
                    })),
                    Transform::from_translation(translation).with_rotation(rotation),
                    Inspectable,
                ));
            }
        });
}

/// Spin the placeholder while it is the visible content. Reads the lifecycle
/// only; render-tick systems never write load state.
pub fn spin_fallback(
    time: Res<Time>,
    lifecycle: Res<LoadLifecycle>,
    mut spinners: Query<&mut Transform, With<FallbackSpinner>>,
) {
    if lifecycle.visible_content() != VisibleContent::Placeholder {
        return;
    }
    let angle = FALLBACK_SPIN_SPEED * time.delta_secs();
    for mut transform in &mut spinners {
        transform.rotate_x(angle);
        transform.rotate_y(angle);
    }
}
