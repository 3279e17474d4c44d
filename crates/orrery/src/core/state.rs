use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::api::types::{EntityId, UiEvent};
use crate::bodies::BodyId;
use crate::core::scene::Scene;
use crate::overlay::HoverState;
use crate::renderer::camera::OrbitCamera;
use crate::systems::builder::{build_scene, World};

/// Orbital progress of one planet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub body: BodyId,
    /// The planet's sphere entity.
    pub entity: EntityId,
    /// Radians.
    pub angle: f32,
    /// Multiplies the base angular speed; 1.0 by default.
    pub speed_multiplier: f32,
}

/// Toggled only by explicit UI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub paused: bool,
    pub dark_mode: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            paused: false,
            dark_mode: true,
        }
    }
}

/// Output surface size in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    pub width: f32,
    pub height: f32,
    /// Set on resize until the change is reported to the host.
    pub(crate) resized: bool,
}

impl RenderSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            resized: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.resized = true;
    }

    /// Client pixels to normalized device coordinates (Y up).
    pub fn to_ndc(&self, client: Vec2) -> Vec2 {
        Vec2::new(
            client.x / self.width * 2.0 - 1.0,
            -(client.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// State shared by the input controller, control handlers, and the
/// animation driver. Every mutation runs to completion on one thread.
pub struct SharedState {
    pub scene: Scene,
    /// The sun's sphere entity.
    pub sun: EntityId,
    /// Exactly one per planet, in registry order.
    pub orbits: Vec<OrbitState>,
    pub camera: OrbitCamera,
    pub view: ViewState,
    pub hover: HoverState,
    pub surface: RenderSurface,
    /// UI events raised this frame, read by the host.
    pub events: Vec<UiEvent>,
}

impl SharedState {
    /// Build the scene and place the camera for the configured viewport.
    pub fn new(config: &OrreryConfig) -> Self {
        let view = ViewState::default();
        let World { scene, sun, orbits } = build_scene(config, view.dark_mode);
        let [width, height] = config.initial_viewport;
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self {
            scene,
            sun,
            orbits,
            camera: OrbitCamera::new(&config.camera, aspect),
            view,
            hover: HoverState::default(),
            surface: RenderSurface::new(width, height),
            events: Vec::new(),
        }
    }

    pub fn orbit(&self, body: BodyId) -> Option<&OrbitState> {
        self.orbits.iter().find(|o| o.body == body)
    }

    pub fn orbit_mut(&mut self, body: BodyId) -> Option<&mut OrbitState> {
        self.orbits.iter_mut().find(|o| o.body == body)
    }

    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}
