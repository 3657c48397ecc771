/// Light, flat look for the settings window and HUD so they read over the sky.
pub fn apply_street_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgba_unmultiplied(245, 242, 232, 235);
    let accent = egui::Color32::from_rgb(196, 120, 48);
    let ink = egui::Color32::from_rgb(40, 36, 32);

    style.visuals = egui::Visuals::light();
    style.visuals.window_fill = panel;
    style.visuals.panel_fill = egui::Color32::TRANSPARENT;
    style.visuals.window_corner_radius = egui::CornerRadius::same(4);
    style.visuals.window_stroke = egui::Stroke::new(1.0, ink.gamma_multiply(0.4));
    style.visuals.window_shadow = egui::epaint::Shadow::NONE;

    style.visuals.widgets.hovered.bg_fill = accent.gamma_multiply(0.35);
    style.visuals.widgets.active.bg_fill = accent.gamma_multiply(0.6);
    style.visuals.selection.bg_fill = accent.gamma_multiply(0.45);
    style.visuals.override_text_color = Some(ink);

    ctx.set_style(style);
}
