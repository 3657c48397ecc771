use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::error::ScrollError;
use super::frame::{ContentFrame, CONTAINER_HEIGHT_FRACTION};
use super::recenter::{Recenterer, Recentering, DEFAULT_RECENTER_FRACTION};
use super::tiling::{TileChurn, TileFactory, TileId, TileStrip};

/// Backing surface parameters, fixed for the lifetime of a scroller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripConfig {
    pub tile_width: f64,
    pub tile_height: f64,
    pub total_width: f64,
    pub recenter_fraction: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            tile_width: 500.0,
            tile_height: 80.0,
            total_width: 5000.0,
            recenter_fraction: DEFAULT_RECENTER_FRACTION,
        }
    }
}

/// What the most recent layout pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutPass {
    pub offset: f64,
    pub min_x: f64,
    pub max_x: f64,
    pub recentered: Option<Recentering>,
    pub churn: TileChurn,
}

/// A tile positioned on the scroll surface, ready for painting.
#[derive(Clone, Copy, Debug)]
pub struct TilePlacement<'a, C> {
    pub id: TileId,
    pub min: DVec2,
    pub size: DVec2,
    pub content: &'a C,
}

/// Infinite horizontal scrolling over a finite backing surface.
///
/// The host calls [`InfiniteScroll::on_layout`] whenever it lays out (scroll,
/// resize, creation) and must adopt the returned offset as its own.
pub struct InfiniteScroll<F: TileFactory> {
    recenterer: Recenterer,
    strip: TileStrip<F>,
    frame: ContentFrame,
    last_pass: LayoutPass,
    recenter_count: u64,
    warned_wide: bool,
}

impl<F: TileFactory> InfiniteScroll<F> {
    pub fn new(config: &StripConfig, viewport_width: f64, factory: F) -> Result<Self, ScrollError> {
        let recenterer = Recenterer::new(config.total_width, config.recenter_fraction)?;
        if viewport_width > config.total_width {
            return Err(ScrollError::ViewportTooWide {
                viewport: viewport_width,
                total: config.total_width,
            });
        }
        let strip = TileStrip::new(factory)?;
        log::info!(
            "infinite scroll: {:.0}px backing, {:.0}x{:.0} tiles, recenter past {:.0}px drift",
            config.total_width,
            strip.tile_size().x,
            strip.tile_size().y,
            recenterer.threshold()
        );
        Ok(Self {
            recenterer,
            strip,
            frame: ContentFrame::default(),
            last_pass: LayoutPass::default(),
            recenter_count: 0,
            warned_wide: false,
        })
    }

    pub fn total_width(&self) -> f64 {
        self.recenterer.total_width()
    }

    pub fn frame(&self) -> &ContentFrame {
        &self.frame
    }

    pub fn strip(&self) -> &TileStrip<F> {
        &self.strip
    }

    pub fn last_pass(&self) -> &LayoutPass {
        &self.last_pass
    }

    pub fn recenter_count(&self) -> u64 {
        self.recenter_count
    }

    /// Run one layout pass: recenter if needed, then converge the tiles onto
    /// the visible range. Returns the offset the host must scroll to.
    pub fn on_layout(&mut self, offset: f64, viewport_width: f64, viewport_height: f64) -> f64 {
        if viewport_width > self.total_width() && !self.warned_wide {
            log::warn!(
                "viewport {viewport_width:.0}px is wider than the {:.0}px backing surface",
                self.total_width()
            );
            self.warned_wide = true;
        }

        self.frame.height = viewport_height * CONTAINER_HEIGHT_FRACTION;
        self.strip.set_baseline(self.frame.height);

        let recentered = self.recenterer.recenter_if_necessary(
            offset,
            viewport_width,
            &self.frame,
            &mut self.strip,
        );
        let offset = recentered.map_or(offset, |r| r.to);
        if recentered.is_some() {
            self.recenter_count += 1;
        }

        let (min_x, max_x) = self.frame.visible_range(offset, viewport_width);
        let churn = self.strip.tile(min_x, max_x);
        if !churn.is_quiet() {
            log::trace!(
                "tiled [{min_x:.1}, {max_x:.1}): +{} -{} -> {} tiles",
                churn.placed,
                churn.removed,
                self.strip.len()
            );
        }

        self.last_pass = LayoutPass {
            offset,
            min_x,
            max_x,
            recentered,
            churn,
        };
        offset
    }

    /// Tiles in scroll-surface coordinates, left to right.
    pub fn placements(&self) -> impl Iterator<Item = TilePlacement<'_, F::Content>> + '_ {
        self.strip.iter().map(move |tile| TilePlacement {
            id: tile.id,
            min: self.frame.to_surface(DVec2::new(tile.x, tile.y)),
            size: DVec2::new(tile.width, tile.height),
            content: &tile.content,
        })
    }
}
