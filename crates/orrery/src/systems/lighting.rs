//! Point light system.
//!
//! Lights live in world space and are persistent. Each frame the active
//! lights are projected onto the render surface and serialized for the
//! renderer's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::mesh::Color;
use crate::renderer::camera::Projector;

/// A world-space point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub pos: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance in world units.
    pub range: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            pos,
            color,
            intensity,
            range,
        }
    }
}

/// Screen-space light handed to the renderer.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, r, g, b, intensity, radius, depth]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff radius in pixels at the light's depth.
    pub radius: f32,
    pub depth: f32,
}

impl LightInstance {
    pub const FLOATS: usize = 8;
}

/// Manages active lights and the ambient term for the scene.
///
/// The ambient color defaults to white at full intensity, which produces
/// unlit output when no lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    /// Ambient color premultiplied by its intensity.
    pub fn ambient(&self) -> Color {
        self.ambient.scaled(self.ambient_intensity)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Project lights onto the surface. Lights behind the eye are dropped, and at
/// most `max` are written.
pub fn build_light_buffer(
    lights: &LightState,
    projector: &Projector,
    max: usize,
    out: &mut Vec<LightInstance>,
) {
    out.clear();
    for light in lights.iter() {
        if out.len() >= max {
            break;
        }
        let Some(p) = projector.project(light.pos) else {
            continue;
        };
        out.push(LightInstance {
            x: p.pos.x,
            y: p.pos.y,
            r: light.color.r,
            g: light.color.g,
            b: light.color.b,
            intensity: light.intensity,
            radius: light.range * p.scale,
            depth: p.depth,
        });
    }
}
