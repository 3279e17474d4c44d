/// Linear RGB color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Per-channel sum, saturating at 1.0.
    pub fn saturating_add(self, other: Self) -> Self {
        Self::new(
            (self.r + other.r).min(1.0),
            (self.g + other.g).min(1.0),
            (self.b + other.b).min(1.0),
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Renderable primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centred on the entity, drawn as an SDF instance.
    Sphere { radius: f32 },
    /// Flat annulus in the XZ plane centred on the entity, drawn as vectors.
    Ring { inner: f32, outer: f32 },
}

/// Component for meshes attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    /// 1.0 = opaque.
    pub opacity: f32,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// Glow multiplier (default: 0.0, values > 0 push into EDR range).
    pub emissive: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 1.0 },
            color: Color::default(),
            opacity: 1.0,
            shininess: 32.0,
            emissive: 0.0,
        }
    }
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: Color) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            color,
            ..Default::default()
        }
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self {
            shape: Shape::Ring { inner, outer },
            color,
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    /// Radius if this is a sphere.
    pub fn sphere_radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => Some(radius),
            Shape::Ring { .. } => None,
        }
    }
}
