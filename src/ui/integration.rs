use std::sync::Arc;
use winit::window::Window;

/// egui glue: winit input in, wgpu paint jobs out.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    pub renderer: egui_wgpu::Renderer,
}

impl EguiIntegration {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: Arc<Window>) -> Self {
        let ctx = egui::Context::default();
        let viewport_id = ctx.viewport_id();
        let state = egui_winit::State::new(ctx.clone(), viewport_id, &window, None, None, None);
        let renderer =
            egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());
        Self { ctx, state, renderer }
    }

    /// Returns true when egui consumed the event.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Run one egui pass over `build` and hand platform output back to winit.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, build);
        self.state
            .handle_platform_output(window, output.platform_output.clone());
        output
    }

    /// Tessellate and upload textures and buffers; returns the paint jobs.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        screen: &egui_wgpu::ScreenDescriptor,
        output: &egui::FullOutput,
    ) -> Vec<egui::ClippedPrimitive> {
        let jobs = self.ctx.tessellate(output.shapes.clone(), output.pixels_per_point);
        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer.update_buffers(device, queue, encoder, &jobs, screen);
        jobs
    }

    pub fn cleanup(&mut self, output: &egui::FullOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
