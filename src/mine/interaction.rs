//! Ray interaction resolver — which rocks does the cursor ray touch?
//!
//! Each cell is modeled as a bounding sphere centered at its grid (x, y)
//! with z receding by the cell's excavation depth relative to the rig.
//! A hit only counts if the intersection point stays inside the playable
//! window and the sphere has not scrolled out of reach behind the face.

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

use crate::shared::*;
use super::grid::rock_coord;

/// Result of resolving one pointer ray against the rock face.
/// `impact` is meaningful only when `candidates` is non-empty.
#[derive(Debug, Clone)]
pub struct InteractionInfo {
    pub candidates: Vec<usize>,
    pub impact: Vec3,
}

impl InteractionInfo {
    pub fn is_hit(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Resolve `ray` against all 16 cells at their current depths.
/// Deterministic; mutates nothing.
pub fn interaction_info(ray: Ray3d, depths: &[u32; ROCK_COUNT], rig_z: f32) -> InteractionInfo {
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    let mut candidates = Vec::new();
    let mut impact_sum = Vec3::ZERO;

    for (i, depth) in depths.iter().enumerate() {
        let coord = rock_coord(i);
        let center = Vec3::new(coord.x, coord.y, rig_z - *depth as f32);
        let sphere = BoundingSphere::new(center, ROCK_RADIUS);
        if let Some(distance) = cast.sphere_intersection_at(&sphere) {
            let point = ray.origin + *ray.direction * distance;
            if point.x.abs() < HIT_BOUND_X
                && point.y.abs() < HIT_BOUND_Y
                && center.z > HIT_MIN_CENTER_Z
            {
                candidates.push(i);
                impact_sum += point;
            }
        }
    }

    let mut impact = impact_sum / candidates.len() as f32;
    // Pull the flash point toward the camera-relative center.
    impact.z -= 5.0;
    impact *= 0.9;
    impact.z += 5.0;

    InteractionInfo { candidates, impact }
}
