use crate::street::config::ScrollingConfig;
use crate::street::input::{InputState, ScrollAction};

/// Below this speed (points per second) momentum stops outright.
const REST_SPEED: f64 = 4.0;

/// Host scroll container: owns the scroll offset over the backing surface
/// and the momentum physics driving it.
///
/// The offset is clamped to `[0, content_width - viewport_width]`. Layout may
/// re-base the offset through [`ScrollView::set_offset`] without disturbing
/// momentum, so a recenter is never felt.
#[derive(Clone, Debug)]
pub struct ScrollView {
    offset: f64,
    velocity: f64,
    viewport_width: f64,
    content_width: f64,
    dragging: bool,
}

impl ScrollView {
    pub fn new(content_width: f64) -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            viewport_width: 0.0,
            content_width,
            dragging: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Adopt an offset chosen by layout. Momentum carries over.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Move the offset immediately (wheel, trackpad), cancelling momentum.
    pub fn scroll_by(&mut self, delta: f64) {
        self.velocity = 0.0;
        self.move_by(delta);
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.velocity = 0.0;
    }

    /// Content follows the pointer: dragging right reveals what lies left.
    pub fn drag_by(&mut self, pointer_dx: f64) {
        if self.dragging {
            self.move_by(-pointer_dx);
        }
    }

    /// Let go with the pointer moving at `pointer_vx` points per second.
    pub fn end_drag(&mut self, pointer_vx: f64) {
        if self.dragging {
            self.dragging = false;
            self.velocity = -pointer_vx;
        }
    }

    pub fn fling(&mut self, velocity: f64) {
        self.velocity += velocity;
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Apply keyboard actions once per frame.
    pub fn process_input(&mut self, input: &InputState, cfg: &ScrollingConfig) {
        if self.dragging {
            return;
        }
        if input.just_pressed(ScrollAction::Stop) {
            self.stop();
        }
        if input.just_pressed(ScrollAction::FlingLeft) {
            self.fling(-cfg.fling_speed);
        }
        if input.just_pressed(ScrollAction::FlingRight) {
            self.fling(cfg.fling_speed);
        }

        let held = match (
            input.is_active(ScrollAction::ScrollLeft),
            input.is_active(ScrollAction::ScrollRight),
        ) {
            (true, false) => -cfg.key_speed,
            (false, true) => cfg.key_speed,
            _ => 0.0,
        };
        if held != 0.0 {
            self.velocity = held;
        }
    }

    /// Advance momentum by one fixed step.
    pub fn step(&mut self, dt: f64, friction: f64) {
        if self.dragging || self.velocity == 0.0 {
            return;
        }
        let moved = self.move_by(self.velocity * dt);
        if !moved {
            self.velocity = 0.0;
            return;
        }
        self.velocity *= (-friction * dt).exp();
        if self.velocity.abs() < REST_SPEED {
            self.velocity = 0.0;
        }
    }

    /// Returns false when clamping swallowed the whole move.
    fn move_by(&mut self, delta: f64) -> bool {
        let target = (self.offset + delta).clamp(0.0, self.max_offset());
        let moved = target != self.offset;
        self.offset = target;
        moved
    }
}
