use glam::DVec2;

use super::error::ScrollError;
use super::frame::ContentFrame;
use super::tiling::{TileFactory, TileStrip};

/// Default drift allowed before recentering, as a fraction of the backing width.
pub const DEFAULT_RECENTER_FRACTION: f64 = 0.25;

/// Record of one re-basing of the scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recentering {
    pub from: f64,
    pub to: f64,
    /// `to - from`; every tile moved by exactly this amount.
    pub delta: f64,
}

/// Keeps the viewport offset near the middle of a finite backing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recenterer {
    total_width: f64,
    fraction: f64,
}

impl Recenterer {
    pub fn new(total_width: f64, fraction: f64) -> Result<Self, ScrollError> {
        if !total_width.is_finite() || total_width <= 0.0 {
            return Err(ScrollError::InvalidTotalWidth(total_width));
        }
        if !(fraction > 0.0 && fraction <= 0.5) {
            return Err(ScrollError::InvalidRecenterFraction(fraction));
        }
        Ok(Self { total_width, fraction })
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Never negative: a viewport wider than the surface pins to offset 0,
    /// the only offset a clamped host container can show.
    pub fn center_offset(&self, viewport_width: f64) -> f64 {
        ((self.total_width - viewport_width) / 2.0).max(0.0)
    }

    pub fn threshold(&self) -> f64 {
        self.total_width * self.fraction
    }

    /// Decide whether `offset` has drifted far enough to re-base.
    pub fn check(&self, offset: f64, viewport_width: f64) -> Option<Recentering> {
        let center = self.center_offset(viewport_width);
        let drift = (offset - center).abs();
        (drift > self.threshold()).then(|| Recentering {
            from: offset,
            to: center,
            delta: center - offset,
        })
    }

    /// Re-base `offset` to the center when it drifted too far and move every
    /// tile by the same delta so nothing on screen appears to move.
    pub fn recenter_if_necessary<F: TileFactory>(
        &self,
        offset: f64,
        viewport_width: f64,
        frame: &ContentFrame,
        strip: &mut TileStrip<F>,
    ) -> Option<Recentering> {
        let recentering = self.check(offset, viewport_width)?;
        let shift = DVec2::new(recentering.delta, 0.0);
        for tile in strip.tiles_mut() {
            let surface = frame.to_surface(DVec2::new(tile.x, tile.y)) + shift;
            tile.x = frame.to_container(surface).x;
        }
        log::debug!(
            "recentered offset {:.1} -> {:.1} (delta {:.1}, {} tiles)",
            recentering.from,
            recentering.to,
            recentering.delta,
            strip.len()
        );
        Some(recentering)
    }
}
