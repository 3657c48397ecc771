use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::scroll::{StripConfig, TileFactory};

/// Text printed on every street tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub lines: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "1024 Block Street".to_string(),
                "Shaffer, CA".to_string(),
                "95014".to_string(),
            ],
        }
    }
}

/// Content of one street tile.
#[derive(Clone, Debug, PartialEq)]
pub struct AddressLabel {
    pub serial: u64,
    pub text: String,
}

/// Builds address labels for the tile strip and tracks how many are alive.
pub struct AddressLabelFactory {
    size: DVec2,
    text: String,
    next_serial: u64,
    live: usize,
}

impl AddressLabelFactory {
    pub fn new(strip: &StripConfig, labels: &LabelConfig) -> Self {
        Self {
            size: DVec2::new(strip.tile_width, strip.tile_height),
            text: labels.lines.join("\n"),
            next_serial: 0,
            live: 0,
        }
    }

    pub fn live(&self) -> usize {
        self.live
    }

    pub fn created(&self) -> u64 {
        self.next_serial
    }
}

impl TileFactory for AddressLabelFactory {
    type Content = AddressLabel;

    fn tile_size(&self) -> DVec2 {
        self.size
    }

    fn create_tile(&mut self) -> AddressLabel {
        self.next_serial += 1;
        self.live += 1;
        AddressLabel {
            serial: self.next_serial,
            text: self.text.clone(),
        }
    }

    fn release_tile(&mut self, _label: AddressLabel) {
        self.live = self.live.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::InfiniteScroll;

    #[test]
    fn test_default_text() {
        let mut factory = AddressLabelFactory::new(&StripConfig::default(), &LabelConfig::default());
        let label = factory.create_tile();
        assert_eq!(label.text, "1024 Block Street\nShaffer, CA\n95014");
        assert_eq!(label.serial, 1);
        assert_eq!(factory.tile_size(), DVec2::new(500.0, 80.0));
    }

    #[test]
    fn test_serials_increase() {
        let mut factory = AddressLabelFactory::new(&StripConfig::default(), &LabelConfig::default());
        let a = factory.create_tile();
        let b = factory.create_tile();
        assert!(b.serial > a.serial);
        factory.release_tile(a);
        assert_eq!(factory.live(), 1);
        assert_eq!(factory.created(), 2);
    }

    #[test]
    fn test_live_count_tracks_strip() {
        let config = StripConfig::default();
        let factory = AddressLabelFactory::new(&config, &LabelConfig::default());
        let mut scroll = InfiniteScroll::new(&config, 800.0, factory).expect("valid");
        let mut offset = scroll.on_layout(0.0, 800.0, 600.0);
        for _ in 0..300 {
            offset = scroll.on_layout(offset - 35.0, 800.0, 600.0);
        }
        assert_eq!(scroll.strip().factory().live(), scroll.strip().len());
        assert!(scroll.strip().factory().created() > scroll.strip().len() as u64);
    }
}
