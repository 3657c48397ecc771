use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::render::engine::RenderEngine;
use crate::sim::tick::{FrameLoop, STEP_DT};
use crate::street::config::ScrollerConfig;
use crate::street::input::{InputState, KeyBind, ScrollAction};
use crate::ui::hud::debug_hud;
use crate::ui::settings::settings_menu;
use crate::ui::street::StreetView;

struct RunningState {
    engine: RenderEngine,
    street: StreetView,
}

pub struct App {
    running: Option<RunningState>,
    config: ScrollerConfig,
    input: InputState,
    frames: FrameLoop,
    settings_open: bool,
    rebinding: Option<ScrollAction>,
}

impl App {
    pub fn new(config: ScrollerConfig) -> Self {
        let input = InputState::new(config.key_bindings.clone());
        Self {
            running: None,
            config,
            input,
            frames: FrameLoop::new(),
            settings_open: false,
            rebinding: None,
        }
    }

    fn on_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(action) = self.rebinding {
            if matches!(code, KeyCode::ShiftLeft | KeyCode::ShiftRight) {
                self.input.on_key_event(code, pressed);
                return;
            }
            if pressed {
                let bind = if self.input.shift_held {
                    KeyBind::with_shift(code)
                } else {
                    KeyBind::new(code)
                };
                if !bind.is_storable() {
                    log::warn!("{} cannot be bound", bind.display_name());
                    return;
                }
                log::info!("bound {} to {}", action.display_name(), bind.display_name());
                self.input.rebind(action, bind);
                self.config.key_bindings.insert(action, bind);
                self.rebinding = None;
            }
            return;
        }
        self.input.on_key_event(code, pressed);
    }

    fn handle_actions(&mut self) {
        if self.input.just_pressed(ScrollAction::OpenSettings) {
            self.settings_open = !self.settings_open;
            if !self.settings_open {
                self.config.save();
            }
        }
        if self.input.just_pressed(ScrollAction::ToggleHud) {
            self.config.debug.show_hud = !self.config.debug.show_hud;
        }
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.handle_actions();
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        let frame_dt = self.frames.begin_frame().unwrap_or(0.0);
        running.street.view.process_input(&self.input, &self.config.scrolling);
        for _ in 0..self.frames.accumulate(frame_dt) {
            running.street.view.step(STEP_DT, self.config.scrolling.friction);
        }

        let frames = &self.frames;
        let config = &mut self.config;
        let input = &self.input;
        let settings_open = &mut self.settings_open;
        let rebinding = &mut self.rebinding;
        let street = &mut running.street;

        let output = running.engine.egui.run(&running.engine.gpu.window, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| street.show(ui, config));
            if config.debug.show_hud {
                debug_hud(ctx, street, frames);
            }
            settings_menu(ctx, settings_open, config, input, rebinding);
        });
        self.input.end_frame();

        let frame = running.engine.draw_and_submit(&output)?;
        running.engine.window().pre_present_notify();
        frame.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Street Scroller")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 480));
        let window = Arc::new(event_loop.create_window(window_attrs).expect("create window"));

        let logical_width = window.inner_size().to_logical::<f64>(window.scale_factor()).width;
        let street = match StreetView::new(&self.config, logical_width) {
            Ok(street) => street,
            Err(e) => {
                log::error!("cannot build street: {e}");
                event_loop.exit();
                return;
            }
        };

        let engine = RenderEngine::new(window);
        self.running = Some(RunningState { engine, street });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let consumed = running
            .engine
            .egui
            .on_window_event(&running.engine.gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                self.config.save();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.engine.gpu.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let wants_keys = running.engine.egui.wants_keyboard_input();
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state.is_pressed();
                    // releases always go through so held scrolls never stick
                    if !pressed || !(consumed && wants_keys) || self.rebinding.is_some() {
                        self.on_key(code, pressed);
                    }
                }
            }
            WindowEvent::RedrawRequested => match self.render_frame() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(running) = &self.running {
                        running.engine.gpu.reconfigure();
                    }
                }
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => log::error!("render error: {e:?}"),
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &self.running else {
            return;
        };
        let cap = self.config.graphics.frame_rate_cap.max(1);
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(cap));
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + frame_time));
        running.engine.window().request_redraw();
    }
}
