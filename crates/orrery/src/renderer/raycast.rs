//! Ray casting against sphere meshes for hover picking.

use glam::Vec3;

use crate::api::types::EntityId;
use crate::bodies::BodyId;
use crate::components::entity::Entity;

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point along the ray at distance t.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first intersection with a sphere in front of the
    /// origin. An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }
}

/// One ray/mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub body: Option<BodyId>,
    pub distance: f32,
}

/// Intersect every active sphere mesh, nearest first.
pub fn intersect_objects<'a>(ray: &Ray, entities: impl Iterator<Item = &'a Entity>) -> Vec<Hit> {
    let mut hits: Vec<Hit> = entities
        .filter(|e| e.active)
        .filter_map(|e| {
            let radius = e.mesh.as_ref()?.sphere_radius()?;
            let distance = ray.intersect_sphere(e.pos, radius)?;
            Some(Hit {
                entity: e.id,
                body: e.body,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
