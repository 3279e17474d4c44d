use serde::{Deserialize, Serialize};

use crate::api::error::OrreryError;

/// Tunables for the orrery, provided by the host page as JSON.
///
/// Every field has a default, so `{}` is a valid config and reproduces the
/// stock scene. Partial configs only override what they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub camera: CameraConfig,
    pub controls: ControlConfig,
    pub starfield: StarfieldConfig,
    pub capacity: CapacityConfig,
    /// Fixed animation step in seconds. `None` advances exactly one animation
    /// frame per host tick, which ties visual speed to the display refresh rate.
    pub frame_dt: Option<f32>,
    /// Viewport size assumed until the host sends its first resize.
    pub initial_viewport: [f32; 2],
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            controls: ControlConfig::default(),
            starfield: StarfieldConfig::default(),
            capacity: CapacityConfig::default(),
            frame_dt: Some(1.0 / 60.0),
            initial_viewport: [800.0, 600.0],
        }
    }
}

impl OrreryConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Perspective camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Starting eye position. The camera always looks at the origin.
    pub initial_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_position: [0.0, 30.0, 60.0],
        }
    }
}

/// Input sensitivities and UI control ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Radians of yaw/pitch per pixel of drag.
    pub orbit_sensitivity: f32,
    /// Camera distance that drag and arrow-key orbiting place the eye at.
    /// `None` keeps whatever distance zoom last left.
    pub orbit_radius: Option<f32>,
    /// Fractional change of camera distance per wheel tick.
    pub zoom_step: f32,
    /// Closest allowed camera distance. `None` leaves zoom unbounded.
    pub min_distance: Option<f32>,
    /// Farthest allowed camera distance. `None` leaves zoom unbounded.
    pub max_distance: Option<f32>,
    /// Upper end of the per-planet speed sliders.
    pub max_speed_multiplier: f32,
    /// Pixels of simulated drag per arrow-key press.
    pub key_orbit_pixels: f32,
    /// Label anchor offset from the pointer, in client pixels.
    pub label_offset: [f32; 2],
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.01,
            orbit_radius: Some(60.0),
            zoom_step: 0.1,
            min_distance: None,
            max_distance: None,
            max_speed_multiplier: 5.0,
            key_orbit_pixels: 10.0,
            label_offset: [10.0, -10.0],
        }
    }
}

/// Background starfield generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Half-width of the cube the stars are scattered in.
    pub half_width: f32,
    pub seed: u64,
    /// Point size in world units (attenuated by distance).
    pub size: f32,
    pub opacity: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            half_width: 200.0,
            seed: 42,
            size: 0.5,
            opacity: 0.8,
        }
    }
}

/// Shared buffer capacities, mirrored into the protocol header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_lights: usize,
    pub max_events: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_sdf_instances: 32,
            max_vector_vertices: 65_536,
            max_lights: 4,
            max_events: 32,
        }
    }
}
