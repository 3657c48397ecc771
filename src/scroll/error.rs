use thiserror::Error;

/// Construction-time contract violations. Layout passes themselves never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollError {
    #[error("tile size must be positive and finite, got {width}x{height}")]
    InvalidTileSize { width: f64, height: f64 },
    #[error("backing surface width must be positive and finite, got {0}")]
    InvalidTotalWidth(f64),
    #[error("recenter fraction must be in (0, 0.5], got {0}")]
    InvalidRecenterFraction(f64),
    #[error("viewport width {viewport} exceeds backing surface width {total}")]
    ViewportTooWide { viewport: f64, total: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size_display() {
        let err = ScrollError::InvalidTileSize { width: 0.0, height: 80.0 };
        assert!(err.to_string().contains("0x80"));
    }

    #[test]
    fn test_viewport_too_wide_display() {
        let err = ScrollError::ViewportTooWide { viewport: 6000.0, total: 5000.0 };
        let msg = err.to_string();
        assert!(msg.contains("6000"));
        assert!(msg.contains("5000"));
    }
}
