use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// A pick result: the hit entity, the world-space hit point, and the ray
/// parameter used for nearest-first ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Intersect a world-space ray with an entity's local AABB, returning the
/// ray parameter of the nearest hit. Affine transforms preserve the ray
/// parameter, so `t` is valid in world space too.
pub fn ray_hits_aabb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, aabb: &Aabb) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    ray_aabb_hit_t(o_local, d_local, aabb.min().into(), aabb.max().into())
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Test every candidate against the ray and return the hits nearest-first.
pub fn pick_ordered(
    origin: Vec3,
    dir: Vec3,
    candidates: impl IntoIterator<Item = (Entity, GlobalTransform, Aabb)>,
) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = candidates
        .into_iter()
        .filter_map(|(entity, xf, aabb)| {
            ray_hits_aabb(origin, dir, &xf, &aabb).map(|t| PickHit {
                entity,
                point: origin + dir * t,
                distance: t,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
