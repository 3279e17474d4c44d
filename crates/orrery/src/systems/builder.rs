//! One-time construction of the orrery scene.

use glam::Vec3;
use log::info;

use crate::api::config::OrreryConfig;
use crate::api::types::EntityId;
use crate::bodies::{self, SUN, SUN_EMISSIVE_COLOR, SUN_EMISSIVE_INTENSITY};
use crate::components::entity::Entity;
use crate::components::mesh::{Color, MeshComponent};
use crate::core::scene::{background_for, Scene};
use crate::core::state::OrbitState;
use crate::systems::animation::orbital_position;
use crate::systems::lighting::PointLight;
use crate::systems::starfield::Starfield;

pub const GLOW_RADIUS: f32 = 4.0;
pub const GLOW_OPACITY: f32 = 0.3;
pub const PLANET_SHININESS: f32 = 30.0;
/// Orbit guides span `distance ± RING_HALF_WIDTH`.
pub const RING_HALF_WIDTH: f32 = 0.1;
pub const RING_COLOR: u32 = 0x333333;
pub const RING_OPACITY: f32 = 0.3;

pub const SUN_LIGHT_COLOR: u32 = 0xFFFFAA;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_RANGE: f32 = 200.0;
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f32 = 0.3;

/// Output of [`build_scene`].
pub struct World {
    pub scene: Scene,
    /// The sun's sphere, which spins each frame.
    pub sun: EntityId,
    pub orbits: Vec<OrbitState>,
}

/// Build background, lights, starfield, sun with halo, planets with their
/// orbit guides, and the hit-test list.
pub fn build_scene(config: &OrreryConfig, dark_mode: bool) -> World {
    let mut scene = Scene::with_capacity(2 + bodies::PLANETS.len() * 2);
    scene.background = background_for(dark_mode);

    scene.lights.add(PointLight::new(
        Vec3::ZERO,
        Color::from_hex(SUN_LIGHT_COLOR),
        SUN_LIGHT_INTENSITY,
        SUN_LIGHT_RANGE,
    ));
    scene
        .lights
        .set_ambient(Color::from_hex(AMBIENT_COLOR), AMBIENT_INTENSITY);

    scene.starfield = Starfield::generate(&config.starfield);

    // The sun is self-lit: its emissive tint is folded into the base color.
    let sun_color = Color::from_hex(SUN.color)
        .saturating_add(Color::from_hex(SUN_EMISSIVE_COLOR).scaled(SUN_EMISSIVE_INTENSITY));
    let sun = scene.next_id();
    scene.spawn_pickable(
        Entity::new(sun)
            .with_tag(SUN.display_name)
            .with_body(SUN.id)
            .with_mesh(MeshComponent::sphere(SUN.radius, sun_color).with_emissive(SUN_EMISSIVE_INTENSITY)),
    );
    // Spawned after the sun so the stable depth sort draws it on top.
    let id = scene.next_id();
    scene.spawn(
        Entity::new(id)
            .with_tag("Sun glow")
            .with_body(SUN.id)
            .with_mesh(
                MeshComponent::sphere(GLOW_RADIUS, Color::from_hex(SUN.color))
                    .with_opacity(GLOW_OPACITY)
                    .with_emissive(SUN_EMISSIVE_INTENSITY),
            ),
    );

    let mut orbits = Vec::with_capacity(bodies::PLANETS.len());
    for planet in &bodies::PLANETS {
        let entity = scene.next_id();
        scene.spawn_pickable(
            Entity::new(entity)
                .with_tag(planet.display_name)
                .with_body(planet.id)
                .with_pos(orbital_position(0.0, planet.orbital_distance))
                .with_mesh(
                    MeshComponent::sphere(planet.radius, Color::from_hex(planet.color))
                        .with_shininess(PLANET_SHININESS),
                ),
        );

        let ring = scene.next_id();
        scene.spawn(
            Entity::new(ring)
                .with_tag(format!("{} orbit", planet.display_name))
                .with_body(planet.id)
                .with_mesh(
                    MeshComponent::ring(
                        planet.orbital_distance - RING_HALF_WIDTH,
                        planet.orbital_distance + RING_HALF_WIDTH,
                        Color::from_hex(RING_COLOR),
                    )
                    .with_opacity(RING_OPACITY),
                ),
        );

        orbits.push(OrbitState {
            body: planet.id,
            entity,
            angle: 0.0,
            speed_multiplier: 1.0,
        });
    }

    info!(
        "scene built: {} entities, {} stars, {} lights",
        scene.len(),
        scene.starfield.len(),
        scene.lights.count()
    );
    World { scene, sun, orbits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::StarfieldConfig;
    use crate::bodies::{BodyId, PLANET_COUNT, PLANET_IDS};
    use crate::components::mesh::Shape;

    fn small_config() -> OrreryConfig {
        OrreryConfig {
            starfield: StarfieldConfig {
                count: 100,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn every_body_has_exactly_one_pickable_sphere() {
        let world = build_scene(&small_config(), true);
        let picked: Vec<_> = world.scene.pickables().filter_map(|e| e.body).collect();
        assert_eq!(picked.len(), PLANET_COUNT + 1);
        assert_eq!(picked[0], BodyId::Sun);
        assert_eq!(world.scene.get(world.sun).map(|e| e.tag.as_str()), Some("Sun"));
        assert_eq!(&picked[1..], &PLANET_IDS[..]);
    }

    #[test]
    fn every_planet_has_one_ring_guide() {
        let world = build_scene(&small_config(), true);
        for planet in &bodies::PLANETS {
            let rings: Vec<_> = world
                .scene
                .find_by_body(planet.id)
                .filter_map(|e| e.mesh.map(|m| m.shape))
                .filter(|s| matches!(s, Shape::Ring { .. }))
                .collect();
            assert_eq!(rings.len(), 1, "{}", planet.display_name);
            let Shape::Ring { inner, outer } = rings[0] else { unreachable!() };
            assert!((inner - (planet.orbital_distance - 0.1)).abs() < 1e-5);
            assert!((outer - (planet.orbital_distance + 0.1)).abs() < 1e-5);
        }
    }

    #[test]
    fn planets_start_on_positive_x() {
        let world = build_scene(&small_config(), true);
        let mars = world.scene.find_by_tag("Mars").unwrap();
        assert_eq!(mars.pos, Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(mars.mesh.unwrap().shininess, PLANET_SHININESS);
        assert_eq!(world.orbits.len(), PLANET_COUNT);
        assert!(world.orbits.iter().all(|o| o.angle == 0.0 && o.speed_multiplier == 1.0));
    }

    #[test]
    fn sun_glow_is_translucent_and_not_pickable() {
        let world = build_scene(&small_config(), true);
        let glow = world.scene.find_by_tag("Sun glow").unwrap();
        let mesh = glow.mesh.unwrap();
        assert_eq!(mesh.sphere_radius(), Some(GLOW_RADIUS));
        assert_eq!(mesh.opacity, GLOW_OPACITY);
        assert!(world.scene.pickables().all(|e| e.id != glow.id));
    }

    #[test]
    fn background_lights_and_stars() {
        let world = build_scene(&small_config(), false);
        assert_eq!(world.scene.background, Color::from_hex(0x87CEEB));
        assert_eq!(world.scene.lights.count(), 1);
        assert_eq!(world.scene.starfield.len(), 100);
    }
}
