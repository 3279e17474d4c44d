use log::warn;

/// Frame pacing for the animation driver.
///
/// With a fixed step, wall time accumulates and is converted into whole
/// animation frames, so orbital speed no longer depends on the display refresh
/// rate. Without one, every host tick advances exactly one frame.
pub struct FrameClock {
    /// The fixed delta time per animation frame, if any.
    step: Option<f32>,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FrameClock {
    /// Cap to prevent spiral of death after a long stall (tab in background).
    pub const MAX_STEPS: u32 = 10;

    pub fn new(step: Option<f32>) -> Self {
        let step = match step {
            Some(dt) if dt.is_finite() && dt > 0.0 => Some(dt),
            Some(dt) => {
                warn!("ignoring invalid frame_dt {dt}, advancing one frame per tick");
                None
            }
            None => None,
        };
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of animation
    /// frames to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let Some(dt) = self.step else {
            return 1;
        };
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / dt) as u32;
        self.accumulator -= steps as f32 * dt;
        steps
    }

    pub fn step(&self) -> Option<f32> {
        self.step
    }
}

/// Lifecycle of the host-driven frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Explicit frame loop handle. The host keeps scheduling ticks while
/// [`FrameLoop::begin_frame`] returns `true`.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Idle → Running. A stopped loop cannot be restarted.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    /// Returns whether this frame should run, counting it if so.
    pub fn begin_frame(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn shutdown(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames run since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
