use log::info;
use orrery::bridge::protocol::HEADER_FLOATS;
use orrery::{
    parse_speed, ControlEvent, ControlId, FrameLoop, InputEvent, InputQueue, Orrery, OrreryConfig,
    OrreryError, ProtocolLayout,
};

/// Owns the orrery, its input queue, and the frame loop.
///
/// The bridge keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// stateful structs with borrowed buffers directly.
pub struct OrreryRunner {
    orrery: Orrery,
    input: InputQueue,
    frame_loop: FrameLoop,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
}

impl OrreryRunner {
    pub fn new(config: OrreryConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let header = layout.header();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        Self {
            orrery: Orrery::new(config),
            input: InputQueue::new(),
            frame_loop,
            layout,
            header,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a slider change from its raw text value.
    pub fn set_speed(&mut self, planet: usize, text: &str) -> Result<(), OrreryError> {
        let value = parse_speed(text)?;
        self.push_input(InputEvent::Control(ControlEvent::new(ControlId::Speed(planet), value)));
        Ok(())
    }

    /// Run one frame: apply queued input, advance the animation, rebuild the
    /// buffers and header. Returns `false` once the loop has stopped.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.frame_loop.begin_frame() {
            return false;
        }
        self.orrery.begin_frame();
        for event in self.input.drain() {
            self.orrery.dispatch(event);
        }
        self.orrery.tick(dt);
        self.header = self.orrery.header(&self.layout, self.frame_loop.frames());
        true
    }

    /// Stop the loop. Later ticks are no-ops and pending input is dropped.
    pub fn shutdown(&mut self) {
        if self.frame_loop.is_running() {
            info!("orrery: shut down after {} frames", self.frame_loop.frames());
        }
        self.frame_loop.shutdown();
        self.input.drain();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::api::config::StarfieldConfig;
    use orrery::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_PAUSED};
    use orrery::{ui_event, BodyId};

    fn runner() -> OrreryRunner {
        OrreryRunner::new(OrreryConfig {
            starfield: StarfieldConfig {
                count: 100,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn tick_applies_queued_input() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        assert!(r.tick(1.0 / 60.0));
        assert!(r.orrery().state().view.paused);
        assert_eq!(r.header()[HEADER_PAUSED], 1.0);
        assert_eq!(r.header()[HEADER_FRAME_COUNTER], 1.0);
    }

    #[test]
    fn set_speed_parses_then_queues() {
        let mut r = runner();
        r.set_speed(3, "2.5").unwrap();
        assert_eq!(r.orrery().state().orbit(BodyId::Mars).unwrap().speed_multiplier, 1.0);
        r.tick(0.0);
        assert_eq!(r.orrery().state().orbit(BodyId::Mars).unwrap().speed_multiplier, 2.5);
        assert!(r.orrery().events().iter().any(|e| e.kind == ui_event::SPEED));
        assert!(matches!(r.set_speed(3, "warp"), Err(OrreryError::UnparsableSpeed { .. })));
    }

    #[test]
    fn shutdown_stops_ticking() {
        let mut r = runner();
        assert!(r.tick(0.0));
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        r.shutdown();
        assert!(!r.is_running());
        assert!(!r.tick(1.0 / 60.0));
        assert!(!r.orrery().state().view.paused);
    }
}
