//! Decorative background starfield.
//!
//! Stars are scattered once from a seeded generator, then the whole field
//! turns slowly about the Y axis. They are projected to point sprites every
//! frame and never hit-tested.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::api::config::StarfieldConfig;
use crate::core::rng::Rng;
use crate::renderer::camera::Projector;

/// A star point sprite.
///
/// Wire format (4 floats / 16 bytes): `[x, y, size, alpha]`
///
/// Stars carry no color; the host draws every sprite white.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarPoint {
    pub x: f32,
    pub y: f32,
    /// Point diameter in pixels.
    pub size: f32,
    pub alpha: f32,
}

impl StarPoint {
    pub const FLOATS: usize = 4;
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    points: Vec<Vec3>,
    /// Radians about world Y.
    pub rotation: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Starfield {
    /// Scatter `config.count` stars uniformly in a cube of half-width
    /// `config.half_width` centred on the origin.
    pub fn generate(config: &StarfieldConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let h = config.half_width;
        let points = (0..config.count)
            .map(|_| Vec3::new(rng.symmetric(h), rng.symmetric(h), rng.symmetric(h)))
            .collect();
        Self {
            points,
            rotation: 0.0,
            size: config.size,
            opacity: config.opacity,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Star positions with the current rotation applied.
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let turn = Quat::from_rotation_y(self.rotation);
        self.points.iter().map(move |p| turn * *p)
    }
}

/// Project the starfield into point sprites, skipping stars behind the eye
/// or off the surface.
pub fn build_star_buffer(starfield: &Starfield, projector: &Projector, out: &mut Vec<StarPoint>) {
    out.clear();
    for world in starfield.world_points() {
        let Some(p) = projector.project(world) else {
            continue;
        };
        if !projector.on_surface(p.pos) {
            continue;
        }
        out.push(StarPoint {
            x: p.pos.x,
            y: p.pos.y,
            size: starfield.size * p.scale,
            alpha: starfield.opacity,
        });
    }
}
