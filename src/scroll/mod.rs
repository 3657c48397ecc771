//! Infinite horizontal scrolling over a finite backing surface.
//!
//! [`TileStrip`] keeps a contiguous run of fixed-width tiles over the visible
//! range; [`Recenterer`] re-bases the scroll offset toward the middle of the
//! backing surface and moves every tile by the same delta.
//! [`InfiniteScroll`] runs both, in that order, once per layout event.

pub mod error;
pub mod frame;
pub mod infinite;
pub mod recenter;
pub mod tiling;

pub use error::ScrollError;
pub use infinite::{InfiniteScroll, StripConfig};
pub use tiling::TileFactory;
