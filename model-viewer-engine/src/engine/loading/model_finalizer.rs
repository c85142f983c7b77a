use bevy::animation::AnimationPlayer;
use bevy::gltf::Gltf;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::{SceneInstance, SceneSpawner};

use crate::engine::loading::lifecycle::LoadLifecycle;
use crate::engine::loading::model_loader::{ModelLoader, ModelRoot, PendingModel};
use crate::engine::scene::fallback::FallbackRoot;
use crate::tools::inspect::Inspectable;

/// Once the spawned glTF scene is fully instanced: measure it, normalise its
/// transform, flag every mesh for shadows, swap out the placeholder, and
/// start any animations. This is the success callback of the lifecycle.
pub fn finalize_loaded_model(
    time: Res<Time>,
    mut lifecycle: ResMut<LoadLifecycle>,
    mut loader: ResMut<ModelLoader>,
    scene_spawner: Res<SceneSpawner>,
    gltf_assets: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    pending: Query<(Entity, &SceneInstance), With<PendingModel>>,
    children: Query<&Children>,
    mesh_bounds: Query<(&GlobalTransform, &Aabb), With<Mesh3d>>,
    mut players: Query<&mut AnimationPlayer>,
    fallback_roots: Query<Entity, With<FallbackRoot>>,
    mut commands: Commands,
) {
    let Some(ticket) = loader.ticket else {
        return;
    };

    for (root, instance) in &pending {
        if !scene_spawner.instance_is_ready(**instance) {
            continue;
        }

        let now_ms = time.elapsed().as_secs_f64() * 1000.0;
        let Some((centre, extents)) = merged_world_bounds(root, &children, &mesh_bounds) else {
            // Instanced but no measurable meshes: degenerate by definition.
            let _ = lifecycle.on_success(ticket, Vec3::ZERO, Vec3::ZERO, now_ms);
            commands.entity(root).despawn();
            loader.clear();
            continue;
        };

        let Some(placement) = lifecycle.on_success(ticket, extents, centre, now_ms) else {
            // Degenerate bounds; the lifecycle has already failed the load.
            commands.entity(root).despawn();
            loader.clear();
            continue;
        };

        // Flat traversal: every mesh node casts and receives, individually.
        let mut mesh_count = 0usize;
        for entity in children.iter_descendants(root) {
            if mesh_bounds.contains(entity) {
                commands
                    .entity(entity)
                    .remove::<(NotShadowCaster, NotShadowReceiver)>()
                    .insert(Inspectable);
                mesh_count += 1;
            }
        }

        // Defensive removal: the swap must leave exactly one content root.
        for fallback in &fallback_roots {
            commands.entity(fallback).despawn();
        }

        commands
            .entity(root)
            .insert((
                Transform {
                    translation: placement.offset,
                    scale: Vec3::splat(placement.scale),
                    ..default()
                },
                Visibility::Visible,
                ModelRoot,
            ))
            .remove::<PendingModel>();

        println!(
            "✓ Model displayed: scale {:.3}, {} mesh nodes",
            placement.scale, mesh_count
        );

        if let Some(gltf) = loader.handle.as_ref().and_then(|h| gltf_assets.get(h)) {
            play_all_animations(gltf, root, &children, &mut players, &mut graphs, &mut commands);
        }

        loader.ticket = None;
    }
}

/// Merge the world-space bounds of every mesh under `root`. The root sits at
/// the origin with identity scale here, so world space is model space.
fn merged_world_bounds(
    root: Entity,
    children: &Query<&Children>,
    mesh_bounds: &Query<(&GlobalTransform, &Aabb), With<Mesh3d>>,
) -> Option<(Vec3, Vec3)> {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    let mut found = false;

    for entity in children.iter_descendants(root) {
        let Ok((transform, aabb)) = mesh_bounds.get(entity) else {
            continue;
        };
        found = true;
        let local_min = Vec3::from(aabb.min());
        let local_max = Vec3::from(aabb.max());
        for corner in [
            Vec3::new(local_min.x, local_min.y, local_min.z),
            Vec3::new(local_min.x, local_min.y, local_max.z),
            Vec3::new(local_min.x, local_max.y, local_min.z),
            Vec3::new(local_min.x, local_max.y, local_max.z),
            Vec3::new(local_max.x, local_min.y, local_min.z),
            Vec3::new(local_max.x, local_min.y, local_max.z),
            Vec3::new(local_max.x, local_max.y, local_min.z),
            Vec3::new(local_max.x, local_max.y, local_max.z),
        ] {
            let world = transform.transform_point(corner);
            min = min.min(world);
            max = max.max(world);
        }
    }

    found.then(|| ((min + max) * 0.5, max - min))
}

/// Bind every clip in the glTF to the scene's animation players and loop
/// them all, matching the original viewer's play-everything behaviour.
fn play_all_animations(
    gltf: &Gltf,
    root: Entity,
    children: &Query<&Children>,
    players: &mut Query<&mut AnimationPlayer>,
    graphs: &mut Assets<AnimationGraph>,
    commands: &mut Commands,
) {
    if gltf.animations.is_empty() {
        return;
    }

    let (graph, nodes) = AnimationGraph::from_clips(gltf.animations.iter().cloned());
    let graph_handle = graphs.add(graph);

    let mut bound = 0usize;
    for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
        let Ok(mut player) = players.get_mut(entity) else {
            continue;
        };
        for node in &nodes {
            player.play(*node).repeat();
        }
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(graph_handle.clone()));
        bound += 1;
    }

    if bound > 0 {
        info!("started {} animation clips", gltf.animations.len());
    }
}
