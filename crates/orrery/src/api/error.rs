use thiserror::Error;

use crate::input::controls::ControlId;

/// Errors raised at the configuration and UI-control boundary.
///
/// None of these are fatal: the runner logs them and leaves state untouched.
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("malformed orrery config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("control refers to unknown planet index {0}")]
    UnknownPlanet(usize),

    #[error("{0:?} delivered to a handler subscribed to another control")]
    UnexpectedControl(ControlId),

    #[error("speed value {value:?} is not a number")]
    UnparsableSpeed { value: String },

    #[error("speed multiplier {value} outside [0, {max}]")]
    SpeedOutOfRange { value: f32, max: f32 },
}
