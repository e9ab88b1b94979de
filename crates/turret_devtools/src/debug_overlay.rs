//! Debug overlay rendered via egui on top of the sprite scene.
//!
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>` while
//! `begin_render_pass` borrows the encoder, so a frame is split into phases:
//!
//!   1. `prepare()` runs the UI and tessellates
//!   2. `upload()` pushes textures and buffers (borrows the encoder)
//!   3. `paint()` draws into a pass created with `forget_lifetime()`
//!   4. `cleanup()` frees textures egui dropped
//!
//! Events are always fed to egui so the panel can swallow clicks while shown.

use turret_core::time::TimeState;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub live_animations: usize,
    pub sprites_ready: usize,
    pub sprites_pending: usize,
    pub sprites_failed: usize,
    pub aim_degrees: f32,
    pub snowpile_frame: u32,
    /// Human readable snowpile phase, e.g. "Ready".
    pub snowpile_phase: String,
    /// Pointer position in logical scene units, if inside the window.
    pub pointer: Option<(f32, f32)>,
    pub grid_visible: bool,
    pub show_coordinates: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayActions {
    pub toggle_grid: bool,
    pub toggle_coordinates: bool,
    pub reset_aim: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: Option<OverlayStats>,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if self.visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Frame: {}", time.frame_count));
                        let Some(stats) = stats.as_ref() else {
                            return;
                        };

                        ui.separator();
                        ui.label(format!("Live animations: {}", stats.live_animations));
                        ui.label(format!(
                            "Sprites: {} ready, {} pending, {} failed",
                            stats.sprites_ready, stats.sprites_pending, stats.sprites_failed
                        ));

                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.label(format!("Aim: {:.1}\u{00b0}", stats.aim_degrees));
                            if ui.button("Reset").clicked() {
                                actions.reset_aim = true;
                            }
                        });
                        ui.label(format!(
                            "Snowpile: frame {} ({})",
                            stats.snowpile_frame, stats.snowpile_phase
                        ));

                        ui.separator();
                        let grid_label = if stats.grid_visible { "Hide grid" } else { "Show grid" };
                        if ui.button(grid_label).clicked() {
                            actions.toggle_grid = true;
                        }
                        let mut show_coordinates = stats.show_coordinates;
                        if ui.checkbox(&mut show_coordinates, "Pointer coordinates").changed() {
                            actions.toggle_coordinates = true;
                        }
                        if stats.show_coordinates {
                            match stats.pointer {
                                Some((x, y)) => ui.label(format!("Pointer: ({x:.0}, {y:.0})")),
                                None => ui.label("Pointer: outside"),
                            };
                        }
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
