use super::street::StreetView;
use crate::sim::tick::FrameLoop;

/// Debug overlay: where the offset sits on the backing surface and how many
/// tiles the strip holds.
pub fn debug_hud(ctx: &egui::Context, street: &StreetView, frames: &FrameLoop) {
    let pass = street.scroll.last_pass();
    let factory = street.scroll.strip().factory();

    egui::Area::new(egui::Id::new("debug_hud"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let mono = |text: String| egui::RichText::new(text).monospace().size(12.0);
                ui.label(mono(format!("{:5.1} fps  {} steps", frames.fps, frames.steps)));
                ui.label(mono(format!(
                    "offset {:8.1} / {:.0}  v {:7.1}{}",
                    pass.offset,
                    street.scroll.total_width(),
                    street.view.velocity(),
                    if street.view.is_dragging() { "  drag" } else { "" }
                )));
                ui.label(mono(format!("visible [{:.1}, {:.1})", pass.min_x, pass.max_x)));
                ui.label(mono(format!(
                    "tiles {}  live labels {}  made {}",
                    street.scroll.strip().len(),
                    factory.live(),
                    factory.created()
                )));
                ui.label(mono(format!(
                    "recenters {}  last pass +{} -{}",
                    street.scroll.recenter_count(),
                    pass.churn.placed,
                    pass.churn.removed
                )));
                if let Some(tile) = street.hovered.and_then(|id| street.scroll.strip().get(id)) {
                    ui.label(mono(format!(
                        "hover #{} at {:.1}",
                        tile.content.serial, tile.x
                    )));
                }
            });
        });
}
