pub mod controller;
pub mod controls;
pub mod queue;

pub use controller::InputController;
pub use controls::{ControlEffect, ControlEvent, ControlId, ControlKind, ControlRegistry};
pub use queue::{InputEvent, InputQueue};
