use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Event kinds written into the UI event section.
pub mod ui_event {
    /// Scene built, host may hide its loading screen. No payload.
    pub const READY: f32 = 1.0;
    /// Fact label changed. `a` = visible (0/1), `b` = left, `c` = top (client px).
    pub const LABEL: f32 = 2.0;
    /// View toggles changed. `a` = paused (0/1), `b` = dark mode (0/1).
    pub const VIEW: f32 = 3.0;
    /// Speed multiplier changed. `a` = planet index, `b` = new multiplier.
    pub const SPEED: f32 = 4.0;
    /// Render surface resized. `a` = width, `b` = height.
    pub const RESIZE: f32 = 5.0;
}

/// An event communicated from Rust to the host page via the shared buffer.
/// `kind` is one of the [`ui_event`] constants, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UiEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl UiEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Converts a flag into the 0/1 float encoding used on the wire.
pub(crate) fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}
