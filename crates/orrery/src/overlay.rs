//! Text and placement for the host page's controls and fact label.

use glam::Vec2;

use crate::bodies::{self, BodyId};

pub const PAUSE_LABEL: &str = "Pause";
pub const RESUME_LABEL: &str = "Resume";
/// Shown while the dark theme is active: the action the button performs.
pub const LIGHT_MODE_LABEL: &str = "Light Mode";
pub const DARK_MODE_LABEL: &str = "Dark Mode";

pub const DARK_PAGE_GRADIENT: &str =
    "linear-gradient(135deg, #0c0c0c 0%, #1a1a2e 50%, #16213e 100%)";
pub const LIGHT_PAGE_GRADIENT: &str =
    "linear-gradient(135deg, #87CEEB 0%, #98D8E8 50%, #B0E0E6 100%)";

pub fn pause_label(paused: bool) -> &'static str {
    if paused {
        RESUME_LABEL
    } else {
        PAUSE_LABEL
    }
}

pub fn theme_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        LIGHT_MODE_LABEL
    } else {
        DARK_MODE_LABEL
    }
}

pub fn page_gradient(dark_mode: bool) -> &'static str {
    if dark_mode {
        DARK_PAGE_GRADIENT
    } else {
        LIGHT_PAGE_GRADIENT
    }
}

/// Readout next to a speed slider, e.g. `"2.0x"`.
pub fn speed_label(multiplier: f32) -> String {
    format!("{multiplier:.1}x")
}

/// Which body the pointer is over and where its fact label goes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    body: Option<BodyId>,
    /// Label top-left in client pixels.
    anchor: Vec2,
    /// Set whenever visibility, target, or anchor changes.
    dirty: bool,
}

impl HoverState {
    pub fn show(&mut self, body: BodyId, anchor: Vec2) {
        if self.body != Some(body) || self.anchor != anchor {
            self.body = Some(body);
            self.anchor = anchor;
            self.dirty = true;
        }
    }

    pub fn hide(&mut self) {
        if self.body.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    pub fn is_visible(&self) -> bool {
        self.body.is_some()
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Label heading, empty when hidden.
    pub fn name(&self) -> &'static str {
        self.body.map_or("", |b| bodies::body(b).display_name)
    }

    /// Label body text, empty when hidden.
    pub fn fact(&self) -> &'static str {
        self.body.map_or("", |b| bodies::body(b).fact)
    }

    /// Returns whether the label changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_labels_track_state() {
        assert_eq!(pause_label(false), "Pause");
        assert_eq!(pause_label(true), "Resume");
        assert_eq!(theme_label(true), "Light Mode");
        assert_eq!(theme_label(false), "Dark Mode");
        assert!(page_gradient(true).contains("#1a1a2e"));
        assert!(page_gradient(false).contains("#98D8E8"));
    }

    #[test]
    fn speed_label_has_one_decimal() {
        assert_eq!(speed_label(1.0), "1.0x");
        assert_eq!(speed_label(2.26), "2.3x");
        assert_eq!(speed_label(0.0), "0.0x");
    }

    #[test]
    fn hover_show_and_hide() {
        let mut hover = HoverState::default();
        assert!(!hover.is_visible());
        assert_eq!(hover.name(), "");
        hover.show(BodyId::Sun, Vec2::new(110.0, 90.0));
        assert!(hover.take_dirty());
        assert_eq!(hover.name(), "Sun");
        assert_eq!(hover.fact(), bodies::SUN.fact);
        hover.show(BodyId::Sun, Vec2::new(110.0, 90.0));
        assert!(!hover.take_dirty());
        hover.hide();
        assert!(hover.take_dirty());
        hover.hide();
        assert!(!hover.take_dirty());
    }
}
