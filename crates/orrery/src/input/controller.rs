use glam::Vec2;

use crate::api::config::ControlConfig;
use crate::core::state::SharedState;
use crate::input::controls::{ControlEvent, ControlId};
use crate::input::queue::{keys, InputEvent};
use crate::renderer::raycast::intersect_objects;

/// Turns raw pointer, touch, wheel, key, and resize input into camera
/// motion, hover lookups, and control events.
pub struct InputController {
    settings: ControlConfig,
    dragging: bool,
    last_pointer: Vec2,
    /// Finger separation at the previous two-touch event, 0 if none yet.
    last_pinch_distance: f32,
}

impl InputController {
    pub fn new(settings: ControlConfig) -> Self {
        Self {
            settings,
            dragging: false,
            last_pointer: Vec2::ZERO,
            last_pinch_distance: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one event. Events that map to a page control (control changes
    /// and their keyboard shortcuts) are returned for the control registry.
    pub fn handle(&mut self, state: &mut SharedState, event: InputEvent) -> Option<ControlEvent> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.last_pointer = Vec2::new(x, y);
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = false;
            }
            InputEvent::PointerMove { x, y } => {
                let pointer = Vec2::new(x, y);
                self.update_hover(state, pointer);
                if self.dragging {
                    self.drag_to(state, pointer);
                }
            }
            InputEvent::PointerLeave => {
                state.hover.hide();
            }
            InputEvent::Wheel { delta_y } => {
                self.wheel(state, delta_y);
            }
            InputEvent::TouchStart { count, x0, y0, x1, y1 } => match count {
                1 => {
                    self.dragging = true;
                    self.last_pointer = Vec2::new(x0, y0);
                }
                2 => {
                    self.last_pinch_distance = Vec2::new(x0, y0).distance(Vec2::new(x1, y1));
                }
                _ => {}
            },
            InputEvent::TouchMove { count, x0, y0, x1, y1 } => match count {
                1 if self.dragging => self.drag_to(state, Vec2::new(x0, y0)),
                2 => {
                    let distance = Vec2::new(x0, y0).distance(Vec2::new(x1, y1));
                    if self.last_pinch_distance > 0.0 {
                        self.zoom(state, self.last_pinch_distance / distance);
                    }
                    self.last_pinch_distance = distance;
                }
                _ => {}
            },
            InputEvent::TouchEnd => {
                self.dragging = false;
                state.hover.hide();
            }
            InputEvent::KeyDown { key_code } => return self.key(state, key_code),
            InputEvent::Resize { width, height } => {
                state.surface.resize(width, height);
                if height > 0.0 {
                    state.camera.set_aspect(width / height);
                }
            }
            InputEvent::Control(control) => return Some(control),
        }
        None
    }

    fn drag_to(&mut self, state: &mut SharedState, pointer: Vec2) {
        let delta = pointer - self.last_pointer;
        state
            .camera
            .orbit(delta.x, delta.y, self.settings.orbit_sensitivity, self.settings.orbit_radius);
        self.last_pointer = pointer;
    }

    fn wheel(&mut self, state: &mut SharedState, delta_y: f32) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        self.zoom(state, 1.0 + delta_y.signum() * self.settings.zoom_step);
    }

    fn zoom(&mut self, state: &mut SharedState, factor: f32) {
        state.camera.scale_distance(
            factor,
            self.settings.min_distance,
            self.settings.max_distance,
        );
    }

    fn key(&mut self, state: &mut SharedState, key_code: u32) -> Option<ControlEvent> {
        let step = self.settings.key_orbit_pixels;
        let sensitivity = self.settings.orbit_sensitivity;
        let radius = self.settings.orbit_radius;
        match key_code {
            keys::SPACE => return Some(ControlEvent::click(ControlId::PauseButton)),
            keys::LEFT => state.camera.orbit(-step, 0.0, sensitivity, radius),
            keys::RIGHT => state.camera.orbit(step, 0.0, sensitivity, radius),
            keys::UP => state.camera.orbit(0.0, -step, sensitivity, radius),
            keys::DOWN => state.camera.orbit(0.0, step, sensitivity, radius),
            keys::EQUALS | keys::NUMPAD_PLUS => self.wheel(state, -1.0),
            keys::MINUS | keys::NUMPAD_MINUS => self.wheel(state, 1.0),
            _ => {}
        }
        None
    }

    /// Cast from the eye through the pointer and show the nearest body's
    /// fact, or hide the label on a miss.
    fn update_hover(&self, state: &mut SharedState, pointer: Vec2) {
        if state.surface.width <= 0.0 || state.surface.height <= 0.0 {
            state.hover.hide();
            return;
        }
        let ray = state.camera.ray_from_ndc(state.surface.to_ndc(pointer));
        let hit = intersect_objects(&ray, state.scene.pickables())
            .into_iter()
            .find_map(|hit| hit.body);
        match hit {
            Some(body) => {
                let anchor = pointer + Vec2::from_array(self.settings.label_offset);
                state.hover.show(body, anchor);
            }
            None => state.hover.hide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{OrreryConfig, StarfieldConfig};
    use crate::bodies::{BodyId, SUN};
    use std::f32::consts::FRAC_PI_2;

    fn setup() -> (InputController, SharedState) {
        let config = OrreryConfig {
            starfield: StarfieldConfig {
                count: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        (
            InputController::new(config.controls.clone()),
            SharedState::new(&config),
        )
    }

    fn center_move() -> InputEvent {
        InputEvent::PointerMove { x: 400.0, y: 300.0 }
    }

    #[test]
    fn hover_over_sun_shows_its_fact() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, center_move());
        assert_eq!(state.hover.body(), Some(BodyId::Sun));
        assert_eq!(state.hover.fact(), SUN.fact);
        assert_eq!(state.hover.anchor(), Vec2::new(410.0, 290.0));
    }

    #[test]
    fn hover_miss_and_leave_hide_label() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, center_move());
        input.handle(&mut state, InputEvent::PointerMove { x: 5.0, y: 5.0 });
        assert!(!state.hover.is_visible());

        input.handle(&mut state, center_move());
        input.handle(&mut state, InputEvent::PointerLeave);
        assert!(!state.hover.is_visible());

        input.handle(&mut state, center_move());
        input.handle(&mut state, InputEvent::TouchEnd);
        assert!(!state.hover.is_visible());
    }

    #[test]
    fn hover_runs_while_dragging() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, InputEvent::PointerDown { x: 400.0, y: 300.0 });
        input.handle(&mut state, center_move());
        assert!(input.is_dragging());
        assert_eq!(state.hover.body(), Some(BodyId::Sun));
    }

    #[test]
    fn drag_orbits_only_while_held() {
        let (mut input, mut state) = setup();
        let yaw = state.camera.yaw;
        input.handle(&mut state, InputEvent::PointerMove { x: 500.0, y: 300.0 });
        assert_eq!(state.camera.yaw, yaw);

        input.handle(&mut state, InputEvent::PointerDown { x: 500.0, y: 300.0 });
        input.handle(&mut state, InputEvent::PointerMove { x: 600.0, y: 300.0 });
        assert!((state.camera.yaw - (yaw + 1.0)).abs() < 1e-5);

        input.handle(&mut state, InputEvent::PointerUp { x: 600.0, y: 300.0 });
        input.handle(&mut state, InputEvent::PointerMove { x: 700.0, y: 300.0 });
        assert!((state.camera.yaw - (yaw + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn repeated_upward_drag_clamps_pitch() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, InputEvent::PointerDown { x: 0.0, y: 0.0 });
        for i in 1..=200 {
            input.handle(&mut state, InputEvent::PointerMove { x: 0.0, y: i as f32 * 40.0 });
            assert!(state.camera.pitch <= FRAC_PI_2);
        }
        assert_eq!(state.camera.pitch, FRAC_PI_2);
    }

    #[test]
    fn drag_returns_to_orbit_sphere_after_zoom() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, InputEvent::PointerDown { x: 0.0, y: 0.0 });
        input.handle(&mut state, InputEvent::PointerMove { x: 10.0, y: 0.0 });
        assert!((state.camera.position().length() - 60.0).abs() < 1e-3);

        for _ in 0..5 {
            input.handle(&mut state, InputEvent::Wheel { delta_y: 1.0 });
        }
        assert!((state.camera.radius - 60.0 * 1.1f32.powi(5)).abs() < 1e-2);

        input.handle(&mut state, InputEvent::PointerMove { x: 20.0, y: 0.0 });
        assert!((state.camera.position().length() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn drag_keeps_zoom_without_orbit_radius() {
        let config = OrreryConfig {
            starfield: StarfieldConfig {
                count: 0,
                ..Default::default()
            },
            controls: ControlConfig {
                orbit_radius: None,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut input = InputController::new(config.controls.clone());
        let mut state = SharedState::new(&config);
        input.handle(&mut state, InputEvent::Wheel { delta_y: 1.0 });
        let radius = state.camera.radius;
        input.handle(&mut state, InputEvent::PointerDown { x: 0.0, y: 0.0 });
        input.handle(&mut state, InputEvent::PointerMove { x: 10.0, y: 0.0 });
        assert!((state.camera.position().length() - radius).abs() < 1e-3);
    }

    #[test]
    fn wheel_zooms_by_one_step() {
        let (mut input, mut state) = setup();
        let radius = state.camera.radius;
        input.handle(&mut state, InputEvent::Wheel { delta_y: 120.0 });
        assert!((state.camera.radius - radius * 1.1).abs() < 1e-3);
        input.handle(&mut state, InputEvent::Wheel { delta_y: -3.0 });
        assert!((state.camera.radius - radius * 1.1 * 0.9).abs() < 1e-3);
        input.handle(&mut state, InputEvent::Wheel { delta_y: 0.0 });
        assert!((state.camera.radius - radius * 1.1 * 0.9).abs() < 1e-3);
    }

    #[test]
    fn pinch_scales_by_distance_ratio() {
        let (mut input, mut state) = setup();
        let radius = state.camera.radius;
        let touch = |d: f32| (2, 0.0, 0.0, d, 0.0);

        // No previous distance recorded yet: no zoom.
        let (count, x0, y0, x1, y1) = touch(100.0);
        input.handle(&mut state, InputEvent::TouchMove { count, x0, y0, x1, y1 });
        assert!((state.camera.radius - radius).abs() < 1e-4);

        // Fingers spread from 100 to 200: halve the distance.
        let (count, x0, y0, x1, y1) = touch(200.0);
        input.handle(&mut state, InputEvent::TouchMove { count, x0, y0, x1, y1 });
        assert!((state.camera.radius - radius * 0.5).abs() < 1e-3);
    }

    #[test]
    fn pinch_after_touch_start_uses_recorded_distance() {
        let (mut input, mut state) = setup();
        let radius = state.camera.radius;
        input.handle(&mut state, InputEvent::TouchStart { count: 2, x0: 0.0, y0: 0.0, x1: 0.0, y1: 50.0 });
        input.handle(&mut state, InputEvent::TouchMove { count: 2, x0: 0.0, y0: 0.0, x1: 0.0, y1: 25.0 });
        assert!((state.camera.radius - radius * 2.0).abs() < 1e-3);
    }

    #[test]
    fn single_touch_drags() {
        let (mut input, mut state) = setup();
        let pitch = state.camera.pitch;
        input.handle(&mut state, InputEvent::TouchStart { count: 1, x0: 10.0, y0: 10.0, x1: 0.0, y1: 0.0 });
        input.handle(&mut state, InputEvent::TouchMove { count: 1, x0: 10.0, y0: 20.0, x1: 0.0, y1: 0.0 });
        assert!((state.camera.pitch - (pitch + 0.1)).abs() < 1e-5);
        input.handle(&mut state, InputEvent::TouchEnd);
        assert!(!input.is_dragging());
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let (mut input, mut state) = setup();
        input.handle(&mut state, InputEvent::Resize { width: 1920.0, height: 1080.0 });
        assert_eq!(state.camera.aspect, 1920.0 / 1080.0);
        assert_eq!(state.surface.size(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn keyboard_shortcuts() {
        let (mut input, mut state) = setup();
        let yaw = state.camera.yaw;
        assert_eq!(
            input.handle(&mut state, InputEvent::KeyDown { key_code: keys::SPACE }),
            Some(ControlEvent::click(ControlId::PauseButton))
        );
        input.handle(&mut state, InputEvent::KeyDown { key_code: keys::RIGHT });
        assert!((state.camera.yaw - (yaw + 0.1)).abs() < 1e-5);
        assert_eq!(state.camera.radius, 60.0);
        let radius = state.camera.radius;
        input.handle(&mut state, InputEvent::KeyDown { key_code: keys::NUMPAD_PLUS });
        assert!((state.camera.radius - radius * 0.9).abs() < 1e-3);
        assert_eq!(input.handle(&mut state, InputEvent::KeyDown { key_code: 65 }), None);
    }
}
