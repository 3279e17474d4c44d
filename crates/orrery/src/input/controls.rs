//! Page controls as explicit subscriptions.
//!
//! Each control kind has a list of handlers. A notification runs them in
//! subscription order against the shared state and collects what changed.

use log::debug;

use crate::api::error::OrreryError;
use crate::bodies::BodyId;
use crate::core::scene::background_for;
use crate::core::state::SharedState;

/// Which control fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    PauseButton,
    ThemeButton,
    /// Speed slider for the planet at this registry index.
    Speed(usize),
}

/// Subscription key: a control id without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Pause,
    Theme,
    Speed,
}

impl ControlId {
    pub fn kind(self) -> ControlKind {
        match self {
            ControlId::PauseButton => ControlKind::Pause,
            ControlId::ThemeButton => ControlKind::Theme,
            ControlId::Speed(_) => ControlKind::Speed,
        }
    }
}

/// A control change. Buttons ignore `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEvent {
    pub id: ControlId,
    pub value: f32,
}

impl ControlEvent {
    pub fn new(id: ControlId, value: f32) -> Self {
        Self { id, value }
    }

    pub fn click(id: ControlId) -> Self {
        Self { id, value: 0.0 }
    }
}

/// What a handler changed, so the caller can tell the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEffect {
    ViewChanged,
    SpeedChanged { planet: usize, value: f32 },
}

pub type ControlHandler =
    Box<dyn Fn(&mut SharedState, &ControlEvent) -> Result<ControlEffect, OrreryError>>;

/// Handlers keyed by control kind.
#[derive(Default)]
pub struct ControlRegistry {
    subscriptions: Vec<(ControlKind, ControlHandler)>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the pause, theme, and speed handlers installed.
    pub fn with_defaults(max_speed_multiplier: f32) -> Self {
        let mut registry = Self::new();
        registry.subscribe(ControlKind::Pause, Box::new(toggle_pause));
        registry.subscribe(ControlKind::Theme, Box::new(toggle_theme));
        registry.subscribe(
            ControlKind::Speed,
            Box::new(move |state, event| set_speed(state, event, max_speed_multiplier)),
        );
        registry
    }

    pub fn subscribe(&mut self, kind: ControlKind, handler: ControlHandler) {
        self.subscriptions.push((kind, handler));
    }

    /// Run every handler subscribed to the event's kind. Stops at the first
    /// error; handlers validate before mutating, so a rejected value leaves
    /// the state as it was.
    pub fn notify(
        &self,
        state: &mut SharedState,
        event: &ControlEvent,
    ) -> Result<Vec<ControlEffect>, OrreryError> {
        let kind = event.id.kind();
        self.subscriptions
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, handler)| handler(state, event))
            .collect()
    }
}

fn toggle_pause(state: &mut SharedState, _event: &ControlEvent) -> Result<ControlEffect, OrreryError> {
    state.view.paused = !state.view.paused;
    debug!("paused = {}", state.view.paused);
    Ok(ControlEffect::ViewChanged)
}

fn toggle_theme(state: &mut SharedState, _event: &ControlEvent) -> Result<ControlEffect, OrreryError> {
    state.view.dark_mode = !state.view.dark_mode;
    state.scene.background = background_for(state.view.dark_mode);
    debug!("dark_mode = {}", state.view.dark_mode);
    Ok(ControlEffect::ViewChanged)
}

fn set_speed(
    state: &mut SharedState,
    event: &ControlEvent,
    max: f32,
) -> Result<ControlEffect, OrreryError> {
    let ControlId::Speed(planet) = event.id else {
        return Err(OrreryError::UnexpectedControl(event.id));
    };
    let body = BodyId::planet(planet).ok_or(OrreryError::UnknownPlanet(planet))?;
    let value = event.value;
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(OrreryError::SpeedOutOfRange { value, max });
    }
    let orbit = state
        .orbit_mut(body)
        .ok_or(OrreryError::UnknownPlanet(planet))?;
    orbit.speed_multiplier = value;
    debug!("{body:?} speed = {value}");
    Ok(ControlEffect::SpeedChanged { planet, value })
}

/// Parse slider text the way the page reports it, e.g. `"1.5"`.
pub fn parse_speed(text: &str) -> Result<f32, OrreryError> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| OrreryError::UnparsableSpeed {
            value: text.to_string(),
        })
}
