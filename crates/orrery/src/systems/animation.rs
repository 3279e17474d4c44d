use glam::Vec3;

use crate::bodies;
use crate::core::state::SharedState;

/// Radians per animation frame.
pub const SUN_SPIN: f32 = 0.01;
pub const PLANET_SPIN: f32 = 0.02;
pub const STARFIELD_SPIN: f32 = 0.0005;

/// Position on a circular orbit of radius `distance` in the XZ plane.
pub fn orbital_position(angle: f32, distance: f32) -> Vec3 {
    Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Advance one animation frame. Does nothing while paused; returns whether
/// anything moved.
pub fn advance_frame(state: &mut SharedState) -> bool {
    if state.view.paused {
        return false;
    }

    if let Some(sun) = state.scene.get_mut(state.sun) {
        sun.rotation += SUN_SPIN;
    }

    for orbit in &mut state.orbits {
        let planet = bodies::body(orbit.body);
        orbit.angle += planet.base_angular_speed * orbit.speed_multiplier;
        if let Some(entity) = state.scene.get_mut(orbit.entity) {
            entity.pos = orbital_position(orbit.angle, planet.orbital_distance);
            entity.rotation += PLANET_SPIN;
        }
    }

    state.scene.starfield.rotation += STARFIELD_SPIN;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{OrreryConfig, StarfieldConfig};
    use crate::bodies::BodyId;
    use std::f32::consts::FRAC_PI_2;

    fn state() -> SharedState {
        SharedState::new(&OrreryConfig {
            starfield: StarfieldConfig {
                count: 10,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn rotation(state: &SharedState, tag: &str) -> f32 {
        state.scene.find_by_tag(tag).map(|e| e.rotation).unwrap()
    }

    #[test]
    fn frames_spin_sun_and_starfield() {
        let mut state = state();
        for _ in 0..50 {
            assert!(advance_frame(&mut state));
        }
        assert!((rotation(&state, "Sun") - 50.0 * SUN_SPIN).abs() < 1e-5);
        assert!((state.scene.starfield.rotation - 50.0 * STARFIELD_SPIN).abs() < 1e-6);
        assert!((rotation(&state, "Earth") - 50.0 * PLANET_SPIN).abs() < 1e-5);
        assert_eq!(rotation(&state, "Sun glow"), 0.0);
    }

    #[test]
    fn paused_frames_spin_nothing() {
        let mut state = state();
        state.view.paused = true;
        for _ in 0..10 {
            assert!(!advance_frame(&mut state));
        }
        assert_eq!(rotation(&state, "Sun"), 0.0);
        assert_eq!(state.scene.starfield.rotation, 0.0);
        assert_eq!(state.orbit(BodyId::Earth).unwrap().angle, 0.0);
    }

    #[test]
    fn orbital_position_on_axes() {
        assert_eq!(orbital_position(0.0, 20.0), Vec3::new(20.0, 0.0, 0.0));
        let quarter = orbital_position(FRAC_PI_2, 20.0);
        assert!(quarter.x.abs() < 1e-5);
        assert!((quarter.z - 20.0).abs() < 1e-5);
        assert_eq!(quarter.y, 0.0);
    }

    #[test]
    fn orbital_position_stays_on_circle() {
        for i in 0..64 {
            let p = orbital_position(i as f32 * 0.1, 36.0);
            assert!((p.length() - 36.0).abs() < 1e-4);
        }
    }
}
