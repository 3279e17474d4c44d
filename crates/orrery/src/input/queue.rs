use crate::input::controls::ControlEvent;

/// Input event types the orrery understands. Coordinates are client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { x: f32, y: f32 },
    /// Primary button released.
    PointerUp { x: f32, y: f32 },
    /// Cursor moved.
    PointerMove { x: f32, y: f32 },
    /// Cursor left the render surface.
    PointerLeave,
    /// Wheel scrolled; only the sign of `delta_y` matters.
    Wheel { delta_y: f32 },
    /// Touches began. The second point is ignored unless `count == 2`.
    TouchStart { count: u32, x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Touches moved. Same layout as `TouchStart`.
    TouchMove { count: u32, x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Last touch lifted.
    TouchEnd,
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// Viewport changed size.
    Resize { width: f32, height: f32 },
    /// A page control (button or slider) changed.
    Control(ControlEvent),
}

/// Key codes with a binding.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const EQUALS: u32 = 187;
    pub const NUMPAD_PLUS: u32 = 107;
    pub const MINUS: u32 = 189;
    pub const NUMPAD_MINUS: u32 = 109;
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
