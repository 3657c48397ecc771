use glam::DVec2;

/// Height of the tile container relative to the viewport height.
pub const CONTAINER_HEIGHT_FRACTION: f64 = 0.5;

/// The tile container's placement inside the scroll surface.
///
/// Tiles live in container space; the viewport offset lives in surface space.
/// Positions cross between the two only when the visible range is computed
/// and when a recenter shifts every tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentFrame {
    pub origin: DVec2,
    pub height: f64,
}

impl ContentFrame {
    pub fn new(origin: DVec2, height: f64) -> Self {
        Self { origin, height }
    }

    pub fn to_container(&self, surface: DVec2) -> DVec2 {
        surface - self.origin
    }

    pub fn to_surface(&self, container: DVec2) -> DVec2 {
        container + self.origin
    }

    /// Container-space `[min_x, max_x)` seen by a viewport at `offset`.
    pub fn visible_range(&self, offset: f64, viewport_width: f64) -> (f64, f64) {
        let min = self.to_container(DVec2::new(offset, self.origin.y));
        let max = self.to_container(DVec2::new(offset + viewport_width, self.origin.y));
        (min.x, max.x)
    }
}

impl Default for ContentFrame {
    fn default() -> Self {
        Self::new(DVec2::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_frame_range() {
        let frame = ContentFrame::default();
        assert_eq!(frame.visible_range(2350.0, 300.0), (2350.0, 2650.0));
    }

    #[test]
    fn test_offset_frame_range() {
        let frame = ContentFrame::new(DVec2::new(100.0, 20.0), 200.0);
        assert_eq!(frame.visible_range(400.0, 300.0), (300.0, 600.0));
    }

    #[test]
    fn test_transform_inverse() {
        let frame = ContentFrame::new(DVec2::new(-64.0, 12.0), 40.0);
        let p = DVec2::new(1234.0, 5.0);
        assert_eq!(frame.to_surface(frame.to_container(p)), p);
    }
}
