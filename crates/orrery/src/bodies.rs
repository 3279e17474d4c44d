//! Body registry: the sun and eight planets.
//!
//! Radii and distances are compressed relative to true scale so every body
//! stays on screen; speeds are radians per animation frame.

/// Identifies a celestial body. Planets are ordered outward from the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

pub const PLANET_COUNT: usize = 8;

/// Planet ids in registry order.
pub const PLANET_IDS: [BodyId; PLANET_COUNT] = [
    BodyId::Mercury,
    BodyId::Venus,
    BodyId::Earth,
    BodyId::Mars,
    BodyId::Jupiter,
    BodyId::Saturn,
    BodyId::Uranus,
    BodyId::Neptune,
];

impl BodyId {
    /// Index into [`PLANETS`], or `None` for the sun.
    pub fn planet_index(self) -> Option<usize> {
        PLANET_IDS.iter().position(|&id| id == self)
    }

    /// Planet at the given registry index.
    pub fn planet(index: usize) -> Option<Self> {
        PLANET_IDS.get(index).copied()
    }

    pub fn is_sun(self) -> bool {
        self == BodyId::Sun
    }
}

/// Immutable description of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    pub display_name: &'static str,
    /// Lowercase key used by the host page for control ids (`"mars-speed"`).
    pub key: &'static str,
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Circular orbit radius in scene units (0 for the sun).
    pub orbital_distance: f32,
    /// Radians per frame at speed multiplier 1.0 (0 for the sun).
    pub base_angular_speed: f32,
    /// 0xRRGGBB surface color.
    pub color: u32,
    pub fact: &'static str,
}

/// Sun material: emissive tint and strength on top of the base color.
pub const SUN_EMISSIVE_COLOR: u32 = 0xFFAA00;
pub const SUN_EMISSIVE_INTENSITY: f32 = 0.5;

pub const SUN: CelestialBody = CelestialBody {
    id: BodyId::Sun,
    display_name: "Sun",
    key: "sun",
    radius: 3.0,
    orbital_distance: 0.0,
    base_angular_speed: 0.0,
    color: 0xFFDD00,
    fact: "The Sun is a massive ball of hot plasma that contains 99.86% of the Solar System's mass.",
};

pub const PLANETS: [CelestialBody; PLANET_COUNT] = [
    CelestialBody {
        id: BodyId::Mercury,
        display_name: "Mercury",
        key: "mercury",
        radius: 0.4,
        orbital_distance: 8.0,
        base_angular_speed: 0.04,
        color: 0x8C7853,
        fact: "Mercury is the smallest planet and closest to the Sun, with extreme temperature variations.",
    },
    CelestialBody {
        id: BodyId::Venus,
        display_name: "Venus",
        key: "venus",
        radius: 0.9,
        orbital_distance: 12.0,
        base_angular_speed: 0.03,
        color: 0xFFC649,
        fact: "Venus is the hottest planet in our solar system with surface temperatures of 900°F (475°C).",
    },
    CelestialBody {
        id: BodyId::Earth,
        display_name: "Earth",
        key: "earth",
        radius: 1.0,
        orbital_distance: 16.0,
        base_angular_speed: 0.02,
        color: 0x6B93D6,
        fact: "Earth is the only known planet with life and has liquid water covering 71% of its surface.",
    },
    CelestialBody {
        id: BodyId::Mars,
        display_name: "Mars",
        key: "mars",
        radius: 0.5,
        orbital_distance: 20.0,
        base_angular_speed: 0.018,
        color: 0xC1440E,
        fact: "Mars is known as the Red Planet due to iron oxide (rust) on its surface.",
    },
    CelestialBody {
        id: BodyId::Jupiter,
        display_name: "Jupiter",
        key: "jupiter",
        radius: 3.0,
        orbital_distance: 28.0,
        base_angular_speed: 0.013,
        color: 0xD8CA9D,
        fact: "Jupiter is the largest planet and has over 80 moons, including the four largest discovered by Galileo.",
    },
    CelestialBody {
        id: BodyId::Saturn,
        display_name: "Saturn",
        key: "saturn",
        radius: 2.5,
        orbital_distance: 36.0,
        base_angular_speed: 0.01,
        color: 0xFAD5A5,
        fact: "Saturn is famous for its beautiful ring system made of ice and rock particles.",
    },
    CelestialBody {
        id: BodyId::Uranus,
        display_name: "Uranus",
        key: "uranus",
        radius: 1.8,
        orbital_distance: 44.0,
        base_angular_speed: 0.007,
        color: 0x4FD0E7,
        fact: "Uranus rotates on its side and has a unique blue-green color due to methane in its atmosphere.",
    },
    CelestialBody {
        id: BodyId::Neptune,
        display_name: "Neptune",
        key: "neptune",
        radius: 1.7,
        orbital_distance: 52.0,
        base_angular_speed: 0.006,
        color: 0x4B70DD,
        fact: "Neptune is the windiest planet with storms reaching speeds of up to 1,200 mph (2,000 km/h).",
    },
];

/// Look up any body, sun included.
pub fn body(id: BodyId) -> &'static CelestialBody {
    match id.planet_index() {
        Some(i) => &PLANETS[i],
        None => &SUN,
    }
}

/// Look up a body by its display name (the tag stored on its mesh).
pub fn by_name(name: &str) -> Option<&'static CelestialBody> {
    std::iter::once(&SUN)
        .chain(PLANETS.iter())
        .find(|b| b.display_name == name)
}
