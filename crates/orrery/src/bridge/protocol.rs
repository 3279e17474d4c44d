//! Shared frame buffer layout.
//! Must stay in sync with the host renderer's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 24 floats]
//! [SDF spheres: max_sdf_instances × 12 floats]
//! [Vectors: max_vector_vertices × 6 floats]
//! [Stars: max_stars × 4 floats]
//! [Lights: max_lights × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Star records are `[x, y, size, alpha]` and always drawn white.
//!
//! Capacities are written into the header every frame so the host can
//! compute offsets without a second source of truth.

use crate::api::config::OrreryConfig;
use crate::api::types::UiEvent;
use crate::renderer::sdf_instance::SDFInstance;
use crate::systems::lighting::LightInstance;
use crate::systems::starfield::StarPoint;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SDF_INSTANCES: usize = 2;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 4;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_STARS: usize = 6;
pub const HEADER_STAR_COUNT: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_SURFACE_WIDTH: usize = 12;
pub const HEADER_SURFACE_HEIGHT: usize = 13;
pub const HEADER_BACKGROUND_R: usize = 14;
pub const HEADER_BACKGROUND_G: usize = 15;
pub const HEADER_BACKGROUND_B: usize = 16;
pub const HEADER_AMBIENT_R: usize = 17;
pub const HEADER_AMBIENT_G: usize = 18;
pub const HEADER_AMBIENT_B: usize = 19;
pub const HEADER_PAUSED: usize = 20;
pub const HEADER_DARK_MODE: usize = 21;

/// Floats per vector vertex: x, y, r, g, b, a (fixed wire format).
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_stars: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Size of each section in floats.
    pub sdf_data_floats: usize,
    pub vector_data_floats: usize,
    pub star_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where each section begins.
    pub sdf_data_offset: usize,
    pub vector_data_offset: usize,
    pub star_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_sdf_instances: usize,
        max_vector_vertices: usize,
        max_stars: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        let sdf_data_floats = max_sdf_instances * SDFInstance::FLOATS;
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let star_data_floats = max_stars * StarPoint::FLOATS;
        let light_data_floats = max_lights * LightInstance::FLOATS;
        let event_data_floats = max_events * UiEvent::FLOATS;

        let sdf_data_offset = HEADER_FLOATS;
        let vector_data_offset = sdf_data_offset + sdf_data_floats;
        let star_data_offset = vector_data_offset + vector_data_floats;
        let light_data_offset = star_data_offset + star_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_sdf_instances,
            max_vector_vertices,
            max_stars,
            max_lights,
            max_events,
            sdf_data_floats,
            vector_data_floats,
            star_data_floats,
            light_data_floats,
            event_data_floats,
            sdf_data_offset,
            vector_data_offset,
            star_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from an OrreryConfig. Every star may be visible, so
    /// the star section holds the whole field.
    pub fn from_config(config: &OrreryConfig) -> Self {
        let capacity = &config.capacity;
        Self::new(
            capacity.max_sdf_instances,
            capacity.max_vector_vertices,
            config.starfield.count,
            capacity.max_lights,
            capacity.max_events,
        )
    }

    /// Header with the capacity fields filled in.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_SDF_INSTANCES] = self.max_sdf_instances as f32;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_MAX_STARS] = self.max_stars as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&OrreryConfig::default());

        assert_eq!(layout.max_sdf_instances, 32);
        assert_eq!(layout.max_stars, 10_000);
        assert_eq!(layout.sdf_data_floats, 32 * 12);
        assert_eq!(layout.star_data_floats, 10_000 * 4);
        assert_eq!(layout.light_data_floats, 4 * 8);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.sdf_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(16, 1024, 500, 2, 8);
        let expected_total = HEADER_FLOATS
            + 16 * 12
            + 1024 * VECTOR_VERTEX_FLOATS
            + 500 * 4
            + 2 * 8
            + 8 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 30, 4, 5);
        assert_eq!(layout.vector_data_offset, layout.sdf_data_offset + layout.sdf_data_floats);
        assert_eq!(layout.star_data_offset, layout.vector_data_offset + layout.vector_data_floats);
        assert_eq!(layout.light_data_offset, layout.star_data_offset + layout.star_data_floats);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_capacities() {
        let header = ProtocolLayout::new(10, 20, 30, 4, 5).header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_SDF_INSTANCES], 10.0);
        assert_eq!(header[HEADER_MAX_STARS], 30.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 5.0);
        assert_eq!(header[HEADER_FRAME_COUNTER], 0.0);
    }
}
