use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use model_viewer_engine::tools::ray::{pick_ordered, ray_aabb_hit_t, ray_hits_aabb};

fn unit_aabb() -> Aabb {
    Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0))
}

#[test]
fn ray_hits_box_front_face() {
    let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::splat(1.0))
        .expect("hit");
    assert!((t - 4.0).abs() < 1e-6);
}

#[test]
fn ray_from_inside_hits_exit_face() {
    let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::splat(1.0))
        .expect("hit");
    assert!((t - 1.0).abs() < 1e-6);
}

#[test]
fn ray_misses_offset_box() {
    assert!(
        ray_aabb_hit_t(
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0)
        )
        .is_none()
    );
}

#[test]
fn box_behind_ray_is_not_hit() {
    assert!(
        ray_aabb_hit_t(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::splat(1.0))
            .is_none()
    );
}

#[test]
fn transformed_box_hit_accounts_for_scale() {
    let xf = GlobalTransform::from(
        Transform::from_xyz(0.0, 0.0, -10.0).with_scale(Vec3::splat(2.0)),
    );
    let t = ray_hits_aabb(Vec3::ZERO, Vec3::NEG_Z, &xf, &unit_aabb()).expect("hit");
    // Near face sits at z = -8 after the 2x scale.
    assert!((t - 8.0).abs() < 1e-4);
}

#[test]
fn pick_is_ordered_nearest_first() {
    let near = Entity::from_raw(1);
    let far = Entity::from_raw(2);
    let candidates = [
        (
            far,
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -10.0)),
            unit_aabb(),
        ),
        (
            near,
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0)),
            unit_aabb(),
        ),
    ];

    let hits = pick_ordered(Vec3::ZERO, Vec3::NEG_Z, candidates);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].entity, near);
    assert_eq!(hits[1].entity, far);
    assert!(hits[0].distance < hits[1].distance);
    assert!((hits[0].point.z - -4.0).abs() < 1e-4);
}

#[test]
fn pick_skips_misses() {
    let aside = Entity::from_raw(3);
    let ahead = Entity::from_raw(4);
    let candidates = [
        (
            aside,
            GlobalTransform::from(Transform::from_xyz(10.0, 0.0, -5.0)),
            unit_aabb(),
        ),
        (
            ahead,
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0)),
            unit_aabb(),
        ),
    ];

    let hits = pick_ordered(Vec3::ZERO, Vec3::NEG_Z, candidates);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, ahead);
}
