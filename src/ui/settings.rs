use crate::street::config::ScrollerConfig;
use crate::street::input::{InputState, ScrollAction};

#[derive(Clone, Copy, PartialEq, Eq)]
enum SettingsTab {
    Scrolling,
    KeyBindings,
    Street,
    Debug,
}

pub fn settings_menu(
    ctx: &egui::Context,
    open: &mut bool,
    config: &mut ScrollerConfig,
    input_state: &InputState,
    rebinding: &mut Option<ScrollAction>,
) {
    if !*open {
        return;
    }

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(380.0)
        .show(ctx, |ui| {
            let tab_id = ui.id().with("settings_tab");
            let mut tab: SettingsTab =
                ui.data_mut(|d| *d.get_temp_mut_or(tab_id, SettingsTab::Scrolling));

            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, SettingsTab::Scrolling, "Scrolling");
                ui.selectable_value(&mut tab, SettingsTab::KeyBindings, "Key Bindings");
                ui.selectable_value(&mut tab, SettingsTab::Street, "Street");
                ui.selectable_value(&mut tab, SettingsTab::Debug, "Debug");
            });
            ui.data_mut(|d| d.insert_temp(tab_id, tab));
            ui.separator();

            match tab {
                SettingsTab::Scrolling => {
                    let s = &mut config.scrolling;
                    ui.add(egui::Slider::new(&mut s.key_speed, 100.0..=2000.0).text("Key speed"));
                    ui.add(egui::Slider::new(&mut s.fling_speed, 500.0..=8000.0).text("Fling speed"));
                    ui.add(egui::Slider::new(&mut s.friction, 0.5..=10.0).text("Friction"));
                    ui.add(egui::Slider::new(&mut s.wheel_scale, 0.1..=4.0).text("Wheel scale"));
                    ui.add(
                        egui::Slider::new(&mut config.graphics.frame_rate_cap, 30..=144)
                            .text("Frame rate cap"),
                    );
                }
                SettingsTab::KeyBindings => {
                    for &action in ScrollAction::all() {
                        ui.horizontal(|ui| {
                            ui.label(action.display_name());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if *rebinding == Some(action) {
                                    ui.label("Press a key...");
                                    return;
                                }
                                let key_name = input_state
                                    .bindings
                                    .get(&action)
                                    .map(|b| b.display_name())
                                    .unwrap_or_else(|| "Unbound".to_string());
                                if ui.button(key_name).clicked() {
                                    *rebinding = Some(action);
                                }
                            });
                        });
                    }
                }
                SettingsTab::Street => {
                    let strip = &config.strip;
                    ui.label(format!("Tile size: {:.0} x {:.0}", strip.tile_width, strip.tile_height));
                    ui.label(format!("Backing width: {:.0}", strip.total_width));
                    ui.label(format!("Recenter past: {:.0}% of width", strip.recenter_fraction * 100.0));
                    ui.label(
                        egui::RichText::new("Edit settings.toml and restart to change these.")
                            .small()
                            .weak(),
                    );
                }
                SettingsTab::Debug => {
                    ui.checkbox(&mut config.debug.show_hud, "Show debug HUD");
                    ui.checkbox(&mut config.debug.log_recenters, "Log recenters to console");
                }
            }

            ui.separator();

            if ui.button("Close").clicked() {
                *open = false;
                *rebinding = None;
                config.save();
            }
        });
}
