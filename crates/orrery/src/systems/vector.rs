//! Lyon-based tessellation for the orbit guides.
//!
//! Rings are projected to surface pixels on the CPU and tessellated into a
//! flat triangle list that the host draws with alpha blending.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::bridge::protocol::VECTOR_VERTEX_FLOATS;
use crate::components::entity::Entity;
use crate::components::mesh::{Color, Shape};
use crate::renderer::camera::Projector;

/// Samples per ring edge.
const RING_SEGMENTS: usize = 128;

/// Line width used when a ring crosses behind the eye and only its
/// visible arcs can be drawn.
const PARTIAL_RING_WIDTH: f32 = 1.0;

/// Per-vertex data for vector/polygon rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = VECTOR_VERTEX_FLOATS;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_color(color: Color, a: f32) -> Self {
        Self::new(color.r, color.g, color.b, a)
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// State for vector rendering.
///
/// Holds lyon tessellators and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat float buffer, `FLOATS` per vertex.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as a triangle list. Whole
    /// shapes that would overflow the capacity are dropped.
    fn flush_geometry(&mut self) {
        if self.vertex_count() + self.geometry.indices.len() <= self.max_vertices {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fill the region between two closed outlines (even-odd rule).
    pub fn fill_annulus(&mut self, outer: &[Vec2], inner: &[Vec2], color: VectorColor) {
        if outer.len() < 3 || inner.len() < 3 {
            return;
        }
        let mut builder = Path::builder();
        for outline in [outer, inner] {
            builder.begin(point(outline[0].x, outline[0].y));
            for p in &outline[1..] {
                builder.line_to(point(p.x, p.y));
            }
            builder.close();
        }
        let path = builder.build();

        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5).with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate a stroked polyline (open path).
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

/// Point on a circle of radius `r` in the XZ plane around `center`.
fn ring_point(center: Vec3, r: f32, i: usize) -> Vec3 {
    let theta = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
    center + Vec3::new(theta.cos() * r, 0.0, theta.sin() * r)
}

/// Draw one flat ring. Fully visible rings are filled as an annulus;
/// rings crossing behind the eye are stroked along their visible arcs.
pub fn draw_ring(
    vectors: &mut VectorState,
    projector: &Projector,
    center: Vec3,
    inner: f32,
    outer: f32,
    color: VectorColor,
) {
    let project = |r: f32| -> Vec<Option<Vec2>> {
        (0..RING_SEGMENTS)
            .map(|i| projector.project(ring_point(center, r, i)).map(|p| p.pos))
            .collect()
    };
    let outer_pts = project(outer);
    let inner_pts = project(inner);

    if outer_pts.iter().chain(&inner_pts).all(Option::is_some) {
        let outer_pts: Vec<Vec2> = outer_pts.into_iter().flatten().collect();
        let inner_pts: Vec<Vec2> = inner_pts.into_iter().flatten().collect();
        vectors.fill_annulus(&outer_pts, &inner_pts, color);
        return;
    }

    let mid = project((inner + outer) * 0.5);
    let Some(start) = mid.iter().position(Option::is_none) else {
        return;
    };
    // Walk once around starting just after a culled sample so arcs never
    // wrap across the seam.
    let mut run: Vec<Vec2> = Vec::new();
    for k in 1..=RING_SEGMENTS {
        match mid[(start + k) % RING_SEGMENTS] {
            Some(p) => run.push(p),
            None => {
                vectors.stroke_polyline(&run, PARTIAL_RING_WIDTH, color);
                run.clear();
            }
        }
    }
    vectors.stroke_polyline(&run, PARTIAL_RING_WIDTH, color);
}

/// Rebuild the vector buffer from every active ring mesh.
pub fn build_vector_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    projector: &Projector,
    vectors: &mut VectorState,
) {
    vectors.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        if let Shape::Ring { inner, outer } = mesh.shape {
            let color = VectorColor::from_color(mesh.color, mesh.opacity);
            draw_ring(vectors, projector, entity.pos, inner, outer, color);
        }
    }
}
