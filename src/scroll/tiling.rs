use std::collections::VecDeque;

use glam::DVec2;
use slotmap::{new_key_type, SlotMap};

use super::error::ScrollError;

new_key_type! {
    /// Stable handle for a placed tile. Generational, so a handle to a
    /// trimmed tile never aliases a newly placed one.
    pub struct TileId;
}

/// Supplies tile content. The strip asks for one content value per
/// materialized tile and hands it back when the tile is trimmed.
pub trait TileFactory {
    type Content;

    /// Fixed tile size, read once when the strip is built.
    fn tile_size(&self) -> DVec2;

    fn create_tile(&mut self) -> Self::Content;

    fn release_tile(&mut self, _content: Self::Content) {}
}

/// A placed tile in container space.
#[derive(Clone, Debug)]
pub struct Tile<C> {
    pub id: TileId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: C,
}

impl<C> Tile<C> {
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Tiles created and destroyed by one tiling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileChurn {
    pub placed: usize,
    pub removed: usize,
}

impl TileChurn {
    pub fn is_quiet(&self) -> bool {
        self.placed == 0 && self.removed == 0
    }
}

/// Contiguous left-to-right run of tiles covering the visible range.
///
/// Tile records live in a slotmap; `order` holds their ids left to right so
/// both ends can grow and shrink in O(1).
pub struct TileStrip<F: TileFactory> {
    factory: F,
    size: DVec2,
    baseline: f64,
    tiles: SlotMap<TileId, Tile<F::Content>>,
    order: VecDeque<TileId>,
}

impl<F: TileFactory> TileStrip<F> {
    pub fn new(factory: F) -> Result<Self, ScrollError> {
        let size = factory.tile_size();
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(size.x) || !valid(size.y) {
            return Err(ScrollError::InvalidTileSize {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self {
            factory,
            size,
            baseline: size.y,
            tiles: SlotMap::with_key(),
            order: VecDeque::new(),
        })
    }

    pub fn tile_size(&self) -> DVec2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn get(&self, id: TileId) -> Option<&Tile<F::Content>> {
        self.tiles.get(id)
    }

    /// Tiles in left-to-right order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile<F::Content>> + '_ {
        self.order.iter().filter_map(|&id| self.tiles.get(id))
    }

    pub fn first(&self) -> Option<&Tile<F::Content>> {
        self.order.front().and_then(|&id| self.tiles.get(id))
    }

    pub fn last(&self) -> Option<&Tile<F::Content>> {
        self.order.back().and_then(|&id| self.tiles.get(id))
    }

    pub fn left_edge(&self) -> Option<f64> {
        self.first().map(Tile::left)
    }

    pub fn right_edge(&self) -> Option<f64> {
        self.last().map(Tile::right)
    }

    /// Order is unspecified; callers must move every tile by the same amount.
    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile<F::Content>> + '_ {
        self.tiles.values_mut()
    }

    /// Bottom-align tiles in a container of height `baseline`.
    pub fn set_baseline(&mut self, baseline: f64) {
        if baseline == self.baseline {
            return;
        }
        self.baseline = baseline;
        let y = self.tile_y();
        for tile in self.tiles.values_mut() {
            tile.y = y;
        }
    }

    fn tile_y(&self) -> f64 {
        self.baseline - self.size.y
    }

    fn insert_tile(&mut self, x: f64) -> TileId {
        let content = self.factory.create_tile();
        let y = self.tile_y();
        let size = self.size;
        self.tiles.insert_with_key(|id| Tile {
            id,
            x,
            y,
            width: size.x,
            height: size.y,
            content,
        })
    }

    /// Append a tile whose left edge sits at `edge`. Returns its right edge.
    pub fn place_right(&mut self, edge: f64) -> f64 {
        let id = self.insert_tile(edge);
        self.order.push_back(id);
        edge + self.size.x
    }

    /// Prepend a tile whose right edge sits at `edge`. Returns its left edge.
    pub fn place_left(&mut self, edge: f64) -> f64 {
        let x = edge - self.size.x;
        let id = self.insert_tile(x);
        self.order.push_front(id);
        x
    }

    /// Drop the rightmost tile. Returns false on an empty strip.
    pub fn remove_right(&mut self) -> bool {
        match self.order.pop_back() {
            Some(id) => {
                self.release(id);
                true
            }
            None => false,
        }
    }

    /// Drop the leftmost tile. Returns false on an empty strip.
    pub fn remove_left(&mut self) -> bool {
        match self.order.pop_front() {
            Some(id) => {
                self.release(id);
                true
            }
            None => false,
        }
    }

    fn release(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.remove(id) {
            self.factory.release_tile(tile.content);
        }
    }

    /// Converge the strip onto `[min_x, max_x)`: extend both ends until the
    /// range is covered, then trim tiles that lie fully outside it.
    pub fn tile(&mut self, min_x: f64, max_x: f64) -> TileChurn {
        let mut churn = TileChurn::default();
        if !min_x.is_finite() || !max_x.is_finite() || max_x < min_x {
            log::warn!("ignoring malformed visible range [{min_x}, {max_x})");
            return churn;
        }

        // extension below needs a reference tile
        if self.is_empty() {
            self.place_right(min_x);
            churn.placed += 1;
        }

        if let Some(mut right_edge) = self.right_edge() {
            while right_edge < max_x {
                right_edge = self.place_right(right_edge);
                churn.placed += 1;
            }
        }

        if let Some(mut left_edge) = self.left_edge() {
            while left_edge > min_x {
                left_edge = self.place_left(left_edge);
                churn.placed += 1;
            }
        }

        while self.last().is_some_and(|t| t.left() > max_x) {
            self.remove_right();
            churn.removed += 1;
        }

        while self.first().is_some_and(|t| t.right() < min_x) {
            self.remove_left();
            churn.removed += 1;
        }

        churn
    }
}

impl<F: TileFactory> Drop for TileStrip<F> {
    fn drop(&mut self) {
        while self.remove_left() {}
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Counts live tiles so tests can check release bookkeeping.
    pub(crate) struct CountingFactory {
        pub size: DVec2,
        pub created: usize,
        pub released: usize,
    }

    impl CountingFactory {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                size: DVec2::new(width, height),
                created: 0,
                released: 0,
            }
        }

        pub fn live(&self) -> usize {
            self.created - self.released
        }
    }

    impl TileFactory for CountingFactory {
        type Content = usize;

        fn tile_size(&self) -> DVec2 {
            self.size
        }

        fn create_tile(&mut self) -> usize {
            self.created += 1;
            self.created
        }

        fn release_tile(&mut self, _content: usize) {
            self.released += 1;
        }
    }

    fn strip() -> TileStrip<CountingFactory> {
        TileStrip::new(CountingFactory::new(500.0, 80.0)).expect("valid size")
    }

    fn spans(strip: &TileStrip<CountingFactory>) -> Vec<(f64, f64)> {
        strip.iter().map(|t| (t.left(), t.right())).collect()
    }

    fn assert_converged(strip: &TileStrip<CountingFactory>, min_x: f64, max_x: f64) {
        let tiles: Vec<_> = strip.iter().collect();
        assert!(!tiles.is_empty());
        for pair in tiles.windows(2) {
            assert_eq!(pair[0].right(), pair[1].left(), "gap or overlap in strip");
        }
        assert!(tiles[0].left() <= min_x, "left side uncovered");
        assert!(tiles[tiles.len() - 1].right() >= max_x, "right side uncovered");
        let bound = ((max_x - min_x) / strip.tile_size().x).ceil() as usize + 2;
        assert!(tiles.len() <= bound, "{} tiles exceeds bound {bound}", tiles.len());
    }

    #[test]
    fn test_rejects_bad_tile_size() {
        assert!(TileStrip::new(CountingFactory::new(0.0, 80.0)).is_err());
        assert!(TileStrip::new(CountingFactory::new(500.0, -1.0)).is_err());
        assert!(TileStrip::new(CountingFactory::new(f64::NAN, 80.0)).is_err());
    }

    #[test]
    fn test_bootstrap_single_tile() {
        let mut strip = strip();
        let churn = strip.tile(0.0, 300.0);
        assert_eq!(spans(&strip), vec![(0.0, 500.0)]);
        assert_eq!(churn, TileChurn { placed: 1, removed: 0 });
    }

    #[test]
    fn test_place_returns_far_edge() {
        let mut strip = strip();
        assert_eq!(strip.place_right(100.0), 600.0);
        assert_eq!(strip.place_left(100.0), -400.0);
        assert_eq!(spans(&strip), vec![(-400.0, 100.0), (100.0, 600.0)]);
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut strip = strip();
        assert!(!strip.remove_left());
        assert!(!strip.remove_right());
        assert!(strip.is_empty());
    }

    #[test]
    fn test_extends_both_sides() {
        let mut strip = strip();
        strip.tile(1000.0, 1300.0);
        strip.tile(900.0, 1700.0);
        assert_eq!(
            spans(&strip),
            vec![(500.0, 1000.0), (1000.0, 1500.0), (1500.0, 2000.0)]
        );
        assert_converged(&strip, 900.0, 1700.0);
    }

    #[test]
    fn test_idempotent_when_converged() {
        let mut strip = strip();
        strip.tile(2350.0, 2650.0);
        let before = spans(&strip);
        let churn = strip.tile(2350.0, 2650.0);
        assert!(churn.is_quiet());
        assert_eq!(spans(&strip), before);
    }

    #[test]
    fn test_scrolling_right_trims_left() {
        let mut strip = strip();
        strip.tile(0.0, 300.0);
        for step in 1..=40 {
            let min_x = step as f64 * 75.0;
            strip.tile(min_x, min_x + 300.0);
            assert_converged(&strip, min_x, min_x + 300.0);
        }
        assert!(strip.len() <= 3);
        assert_eq!(strip.factory().live(), strip.len());
    }

    #[test]
    fn test_scrolling_left_trims_right() {
        let mut strip = strip();
        strip.tile(0.0, 300.0);
        for step in 1..=40 {
            let min_x = -(step as f64) * 130.0;
            strip.tile(min_x, min_x + 300.0);
            assert_converged(&strip, min_x, min_x + 300.0);
        }
        assert_eq!(strip.factory().live(), strip.len());
    }

    #[test]
    fn test_jump_far_away_converges() {
        let mut strip = strip();
        strip.tile(0.0, 300.0);
        strip.tile(10_000.0, 10_300.0);
        assert_converged(&strip, 10_000.0, 10_300.0);
        strip.tile(-7_777.0, -7_477.0);
        assert_converged(&strip, -7_777.0, -7_477.0);
        assert_eq!(strip.factory().live(), strip.len());
    }

    #[test]
    fn test_shrinking_range_trims_right_once() {
        let mut strip = strip();
        strip.tile(0.0, 1200.0);
        assert_eq!(spans(&strip).last(), Some(&(1000.0, 1500.0)));

        let churn = strip.tile(0.0, 900.0);
        assert_eq!(churn, TileChurn { placed: 0, removed: 1 });
        assert_eq!(spans(&strip), vec![(0.0, 500.0), (500.0, 1000.0)]);

        let churn = strip.tile(0.0, 900.0);
        assert!(churn.is_quiet());
    }

    #[test]
    fn test_tile_touching_edge_is_kept() {
        let mut strip = strip();
        strip.tile(0.0, 1000.0);
        // right edge of the leftmost tile equals min_x
        strip.tile(500.0, 1000.0);
        assert_eq!(spans(&strip), vec![(0.0, 500.0), (500.0, 1000.0)]);
    }

    #[test]
    fn test_malformed_range_is_ignored() {
        let mut strip = strip();
        assert!(strip.tile(0.0, f64::INFINITY).is_quiet());
        assert!(strip.tile(f64::NAN, 10.0).is_quiet());
        assert!(strip.tile(300.0, 0.0).is_quiet());
        assert!(strip.is_empty());
    }

    #[test]
    fn test_baseline_bottom_aligns() {
        let mut strip = strip();
        strip.tile(0.0, 300.0);
        strip.set_baseline(400.0);
        assert!(strip.iter().all(|t| t.y == 320.0));
        strip.tile(0.0, 900.0);
        assert!(strip.iter().all(|t| t.y == 320.0));
    }

    #[test]
    fn test_ids_stay_stable_while_visible() {
        let mut strip = strip();
        strip.tile(0.0, 300.0);
        let first = strip.first().map(|t| t.id).expect("bootstrapped");
        strip.tile(100.0, 400.0);
        assert_eq!(strip.first().map(|t| t.id), Some(first));
        strip.tile(600.0, 900.0);
        assert!(strip.get(first).is_none());
    }

    #[test]
    fn test_removal_releases_content() {
        let mut strip = strip();
        strip.tile(0.0, 2000.0);
        let placed = strip.len();
        assert!(placed >= 4);
        while strip.remove_right() {}
        assert_eq!(strip.factory().released, placed);
    }
}
