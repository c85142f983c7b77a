use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use constants::viewer_settings::{GROUND_PLANE_SIZE, GROUND_PLANE_Y};

/// Ground plane under both the placeholder and the model. Scene furniture:
/// it stays put across load outcomes and retries, so it is spawned once at
/// startup rather than as part of the swappable content.
pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_PLANE_SIZE, GROUND_PLANE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.08, 0.08, 0.14, 0.6),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, GROUND_PLANE_Y, 0.0),
        NotShadowCaster,
    ));
}
