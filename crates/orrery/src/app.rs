//! The orrery: shared state plus the per-frame pipeline that turns it into
//! render buffers.

use log::{info, warn};

use crate::api::config::OrreryConfig;
use crate::api::error::OrreryError;
use crate::api::types::{flag, ui_event, UiEvent};
use crate::bodies::PLANET_COUNT;
use crate::bridge::protocol::{self, ProtocolLayout, HEADER_FLOATS};
use crate::core::state::SharedState;
use crate::core::time::FrameClock;
use crate::input::controller::InputController;
use crate::input::controls::{ControlEffect, ControlEvent, ControlRegistry};
use crate::input::queue::InputEvent;
use crate::overlay;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};
use crate::systems::animation;
use crate::systems::lighting::{build_light_buffer, LightInstance};
use crate::systems::sdf_render::build_sdf_buffer;
use crate::systems::starfield::{build_star_buffer, StarPoint};
#[cfg(feature = "vectors")]
use crate::systems::vector::{build_vector_buffer, VectorState};

pub struct Orrery {
    config: OrreryConfig,
    state: SharedState,
    controls: ControlRegistry,
    input: InputController,
    clock: FrameClock,
    sdf: SDFBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    stars: Vec<StarPoint>,
    lights: Vec<LightInstance>,
    ready_sent: bool,
    /// Animation frames advanced (paused frames excluded).
    animation_frames: u64,
}

impl Orrery {
    pub fn new(config: OrreryConfig) -> Self {
        let state = SharedState::new(&config);
        let controls = ControlRegistry::with_defaults(config.controls.max_speed_multiplier);
        let input = InputController::new(config.controls.clone());
        let clock = FrameClock::new(config.frame_dt);
        info!(
            "orrery ready: {} planets, viewport {}x{}",
            state.orbits.len(),
            state.surface.width,
            state.surface.height
        );
        Self {
            sdf: SDFBuffer::with_capacity(config.capacity.max_sdf_instances),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.capacity.max_vector_vertices),
            stars: Vec::with_capacity(config.starfield.count),
            lights: Vec::with_capacity(config.capacity.max_lights),
            config,
            state,
            controls,
            input,
            clock,
            ready_sent: false,
            animation_frames: 0,
        }
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Drop last frame's UI events. Call before dispatching this frame's input.
    pub fn begin_frame(&mut self) {
        self.state.events.clear();
    }

    /// Apply one input event. Rejected control values are logged and leave
    /// state untouched.
    pub fn dispatch(&mut self, event: InputEvent) {
        if let Some(control) = self.input.handle(&mut self.state, event) {
            if let Err(err) = self.notify(control) {
                warn!("ignoring {:?}: {err}", control.id);
            }
        }
    }

    /// Run the subscribed handlers for a control change.
    pub fn notify(&mut self, control: ControlEvent) -> Result<(), OrreryError> {
        let effects = self.controls.notify(&mut self.state, &control)?;
        for effect in effects {
            let event = match effect {
                ControlEffect::ViewChanged => UiEvent::new(
                    ui_event::VIEW,
                    flag(self.state.view.paused),
                    flag(self.state.view.dark_mode),
                    0.0,
                ),
                ControlEffect::SpeedChanged { planet, value } => {
                    UiEvent::new(ui_event::SPEED, planet as f32, value, 0.0)
                }
            };
            self.state.push_event(event);
        }
        Ok(())
    }

    /// Advance the animation for `dt` seconds of wall time and rebuild the
    /// render buffers. Returns the number of animation frames run.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.ready_sent {
            self.state.push_event(UiEvent::new(ui_event::READY, 0.0, 0.0, 0.0));
            self.ready_sent = true;
        }
        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.advance_frame();
        }
        self.render();
        steps
    }

    /// One animation frame; a no-op while paused.
    pub fn advance_frame(&mut self) -> bool {
        let moved = animation::advance_frame(&mut self.state);
        if moved {
            self.animation_frames += 1;
        }
        moved
    }

    /// Rebuild every render buffer from the current state. Runs even while
    /// paused so camera motion stays visible.
    pub fn render(&mut self) {
        let projector = self.state.camera.projector(self.state.surface.size());
        build_sdf_buffer(self.state.scene.iter(), &projector, &mut self.sdf);
        #[cfg(feature = "vectors")]
        build_vector_buffer(self.state.scene.iter(), &projector, &mut self.vectors);
        build_star_buffer(&self.state.scene.starfield, &projector, &mut self.stars);
        build_light_buffer(
            &self.state.scene.lights,
            &projector,
            self.config.capacity.max_lights,
            &mut self.lights,
        );
        self.flush_pending_events();
    }

    fn flush_pending_events(&mut self) {
        if self.state.hover.take_dirty() {
            let anchor = self.state.hover.anchor();
            let visible = flag(self.state.hover.is_visible());
            self.state
                .push_event(UiEvent::new(ui_event::LABEL, visible, anchor.x, anchor.y));
        }
        if std::mem::take(&mut self.state.surface.resized) {
            let surface = self.state.surface;
            self.state
                .push_event(UiEvent::new(ui_event::RESIZE, surface.width, surface.height, 0.0));
        }
        let max = self.config.capacity.max_events;
        if self.state.events.len() > max {
            warn!("dropping {} UI events over capacity", self.state.events.len() - max);
            self.state.events.truncate(max);
        }
    }

    pub fn animation_frames(&self) -> u64 {
        self.animation_frames
    }

    // ---- Render buffer accessors ----

    pub fn sdf_instances(&self) -> &[SDFInstance] {
        self.sdf.instances()
    }

    pub fn sdf_ptr(&self) -> *const f32 {
        self.sdf.instances_ptr()
    }

    pub fn sdf_count(&self) -> usize {
        self.sdf.instance_count()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> usize {
        self.vectors.vertex_count()
    }

    #[cfg(not(feature = "vectors"))]
    pub fn vector_ptr(&self) -> *const f32 {
        std::ptr::null()
    }

    #[cfg(not(feature = "vectors"))]
    pub fn vector_vertex_count(&self) -> usize {
        0
    }

    pub fn stars(&self) -> &[StarPoint] {
        &self.stars
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }

    pub fn lights(&self) -> &[LightInstance] {
        &self.lights
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.state.events
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.state.events.as_ptr() as *const f32
    }

    /// Header for the current frame.
    pub fn header(&self, layout: &ProtocolLayout, frame: u64) -> [f32; HEADER_FLOATS] {
        let mut header = layout.header();
        let background = self.state.scene.background;
        let ambient = self.state.scene.lights.ambient();
        header[protocol::HEADER_FRAME_COUNTER] = frame as f32;
        header[protocol::HEADER_SDF_INSTANCE_COUNT] = self.sdf_count() as f32;
        header[protocol::HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count() as f32;
        header[protocol::HEADER_STAR_COUNT] = self.stars.len() as f32;
        header[protocol::HEADER_LIGHT_COUNT] = self.lights.len() as f32;
        header[protocol::HEADER_EVENT_COUNT] = self.state.events.len() as f32;
        header[protocol::HEADER_SURFACE_WIDTH] = self.state.surface.width;
        header[protocol::HEADER_SURFACE_HEIGHT] = self.state.surface.height;
        header[protocol::HEADER_BACKGROUND_R] = background.r;
        header[protocol::HEADER_BACKGROUND_G] = background.g;
        header[protocol::HEADER_BACKGROUND_B] = background.b;
        header[protocol::HEADER_AMBIENT_R] = ambient.r;
        header[protocol::HEADER_AMBIENT_G] = ambient.g;
        header[protocol::HEADER_AMBIENT_B] = ambient.b;
        header[protocol::HEADER_PAUSED] = flag(self.state.view.paused);
        header[protocol::HEADER_DARK_MODE] = flag(self.state.view.dark_mode);
        header
    }

    // ---- Page text ----

    pub fn pause_label(&self) -> &'static str {
        overlay::pause_label(self.state.view.paused)
    }

    pub fn theme_label(&self) -> &'static str {
        overlay::theme_label(self.state.view.dark_mode)
    }

    pub fn page_gradient(&self) -> &'static str {
        overlay::page_gradient(self.state.view.dark_mode)
    }

    /// Readouts for every speed slider, in registry order.
    pub fn speed_labels(&self) -> Vec<String> {
        self.state
            .orbits
            .iter()
            .take(PLANET_COUNT)
            .map(|o| overlay::speed_label(o.speed_multiplier))
            .collect()
    }
}
