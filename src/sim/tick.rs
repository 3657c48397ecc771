use std::collections::VecDeque;
use std::time::Instant;

/// Fixed physics rate: 60 steps per second.
pub const STEP_DT: f64 = 1.0 / 60.0;

/// Longest frame we simulate in full; anything slower is truncated so a
/// stall does not turn into a burst of catch-up steps.
const MAX_FRAME_TIME: f64 = 0.25;

const FPS_WINDOW: usize = 60;

/// Splits wall-clock frames into fixed scroll-physics steps.
pub struct FrameLoop {
    accumulator: f64,
    pub steps: u64,
    last_frame: Option<Instant>,
    frame_times: VecDeque<f64>,
    pub fps: f64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            steps: 0,
            last_frame: None,
            frame_times: VecDeque::with_capacity(FPS_WINDOW),
            fps: 0.0,
        }
    }

    /// Returns the capped frame time, or None on the very first frame.
    pub fn begin_frame(&mut self) -> Option<f64> {
        let now = Instant::now();
        let dt = self.last_frame.map(|last| {
            let raw = now.duration_since(last).as_secs_f64();
            self.record_frame_time(raw);
            raw.min(MAX_FRAME_TIME)
        });
        self.last_frame = Some(now);
        dt
    }

    fn record_frame_time(&mut self, raw: f64) {
        if raw <= 0.0 {
            return;
        }
        if self.frame_times.len() == FPS_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(raw);
        let avg = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        self.fps = 1.0 / avg;
    }

    /// Accumulate frame time and return how many physics steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.min(MAX_FRAME_TIME);
        let mut steps = 0u32;
        while self.accumulator >= STEP_DT {
            self.accumulator -= STEP_DT;
            steps += 1;
        }
        self.steps += u64::from(steps);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps() {
        let mut frames = FrameLoop::new();
        assert_eq!(frames.accumulate(STEP_DT * 3.5), 3);
        assert_eq!(frames.accumulate(STEP_DT * 0.6), 1);
        assert_eq!(frames.steps, 4);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut frames = FrameLoop::new();
        let steps = frames.accumulate(5.0);
        assert!(steps <= (MAX_FRAME_TIME / STEP_DT).ceil() as u32);
    }

    #[test]
    fn test_first_frame_has_no_dt() {
        let mut frames = FrameLoop::new();
        assert!(frames.begin_frame().is_none());
        assert!(frames.begin_frame().is_some());
    }
}
