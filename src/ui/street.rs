use glam::DVec2;

use crate::scroll::tiling::TileId;
use crate::scroll::{InfiniteScroll, ScrollError};
use crate::sim::scroll_view::ScrollView;
use crate::street::config::{DebugConfig, ScrollerConfig, ScrollingConfig};
use crate::street::labels::{AddressLabelFactory, AddressLabel};

const CURB_HEIGHT: f32 = 6.0;
const LABEL_FONT_SIZE: f32 = 18.0;

/// The scrolling street: host scroll container plus the infinite tile core.
pub struct StreetView {
    pub scroll: InfiniteScroll<AddressLabelFactory>,
    pub view: ScrollView,
    /// Tile under the pointer after the latest layout.
    pub hovered: Option<TileId>,
}

impl StreetView {
    pub fn new(config: &ScrollerConfig, viewport_width: f64) -> Result<Self, ScrollError> {
        let factory = AddressLabelFactory::new(&config.strip, &config.labels);
        let scroll = InfiniteScroll::new(&config.strip, viewport_width, factory)?;
        let mut view = ScrollView::new(scroll.total_width());
        view.set_viewport_width(viewport_width);
        Ok(Self {
            scroll,
            view,
            hovered: None,
        })
    }

    /// One layout event: hand the container's offset to the core and adopt
    /// whatever offset it settles on.
    pub fn layout(&mut self, viewport_width: f64, viewport_height: f64, debug: &DebugConfig) {
        self.view.set_viewport_width(viewport_width);
        let offset = self
            .scroll
            .on_layout(self.view.offset(), viewport_width, viewport_height);
        self.view.set_offset(offset);

        if let Some(rc) = self.scroll.last_pass().recentered {
            if debug.log_recenters {
                log::info!("recentered {:.0} -> {:.0}", rc.from, rc.to);
            }
        }
    }

    /// Route pointer input to the scroll container, lay out, and paint.
    pub fn show(&mut self, ui: &mut egui::Ui, config: &ScrollerConfig) {
        let rect = ui.max_rect();
        let response = ui.interact(rect, ui.id().with("street"), egui::Sense::drag());
        self.handle_pointer(ui, &response, &config.scrolling);

        self.layout(f64::from(rect.width()), f64::from(rect.height()), &config.debug);
        self.hovered = response.hover_pos().and_then(|pos| {
            let local = pos - rect.min;
            self.tile_at(DVec2::new(
                self.view.offset() + f64::from(local.x),
                f64::from(local.y),
            ))
        });
        self.paint(ui.painter_at(rect), rect, config.debug.show_hud);
    }

    /// The placed tile containing `point`, in scroll-surface coordinates.
    pub fn tile_at(&self, point: DVec2) -> Option<TileId> {
        self.scroll
            .placements()
            .find(|p| {
                let max = p.min + p.size;
                point.x >= p.min.x && point.x < max.x && point.y >= p.min.y && point.y < max.y
            })
            .map(|p| p.id)
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, cfg: &ScrollingConfig) {
        if response.drag_started() {
            self.view.begin_drag();
        }
        if response.dragged() {
            self.view.drag_by(f64::from(response.drag_delta().x));
        }
        if response.drag_stopped() {
            let vx = ui.input(|i| i.pointer.velocity().x);
            self.view.end_drag(f64::from(vx));
        }

        if response.hovered() {
            let wheel = ui.input(|i| i.smooth_scroll_delta);
            let delta = f64::from(wheel.x + wheel.y);
            if delta != 0.0 {
                self.view.scroll_by(-delta * cfg.wheel_scale);
            }
        }
    }

    fn paint(&self, painter: egui::Painter, rect: egui::Rect, show_serials: bool) {
        let offset = self.view.offset();
        let floor = rect.top() + self.scroll.frame().height as f32;
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(rect.left(), floor),
                egui::pos2(rect.right(), floor + CURB_HEIGHT),
            ),
            0.0,
            egui::Color32::from_gray(90),
        );

        for placement in self.scroll.placements() {
            let min = egui::pos2(
                rect.left() + (placement.min.x - offset) as f32,
                rect.top() + placement.min.y as f32,
            );
            let tile = egui::Rect::from_min_size(
                min,
                egui::vec2(placement.size.x as f32, placement.size.y as f32),
            );
            let hovered = self.hovered == Some(placement.id);
            paint_label(&painter, tile, placement.content, hovered, show_serials);
        }
    }
}

fn paint_label(
    painter: &egui::Painter,
    tile: egui::Rect,
    label: &AddressLabel,
    hovered: bool,
    show_serial: bool,
) {
    if hovered {
        painter.rect_filled(tile.shrink(1.0), 2.0, egui::Color32::from_white_alpha(60));
    }
    painter.rect_stroke(
        tile.shrink(1.0),
        2.0,
        egui::Stroke::new(1.0, egui::Color32::from_black_alpha(40)),
        egui::StrokeKind::Inside,
    );
    painter.text(
        tile.left_center() + egui::vec2(12.0, 0.0),
        egui::Align2::LEFT_CENTER,
        &label.text,
        egui::FontId::proportional(LABEL_FONT_SIZE),
        egui::Color32::from_rgb(30, 30, 30),
    );
    if show_serial {
        painter.text(
            tile.right_top() + egui::vec2(-6.0, 4.0),
            egui::Align2::RIGHT_TOP,
            format!("#{}", label.serial),
            egui::FontId::monospace(10.0),
            egui::Color32::from_black_alpha(120),
        );
    }
}
