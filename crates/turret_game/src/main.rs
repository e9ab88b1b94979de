//! Turret practice sandbox: main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Each `RedrawRequested`
//! runs one variable-length frame:
//!
//!   1. `begin_frame()` measures the wall-clock delta (capped at 250 ms)
//!   2. decoded sprites from the loader thread are uploaded to the GPU
//!   3. edge-triggered keys become scene actions, then the scene advances
//!   4. the draw list is built, batched by texture and clip, and submitted
//!      inside the letterboxed viewport, followed by the egui overlay
//!
//! Pointer events are applied to the aim drag as they arrive, after mapping
//! window pixels into logical scene coordinates.

mod animation;
mod bindings;
mod controller;
mod layout;
mod loader;
mod render;
#[cfg(test)]
mod replay;
mod scene;
mod sprites;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowId};

use turret_core::input::{InputState, Key};
use turret_core::time::TimeState;
use turret_devtools::{DebugOverlay, OverlayStats};
use turret_platform::{create_window, PlatformConfig};
use turret_render::{
    Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture, QUAD_INDICES,
};

use animation::AnimationManager;
use bindings::{action_for, apply_action};
use controller::{AimDrag, CursorFeedback};
use layout::{load_layout_or_default, SceneLayout};
use loader::AssetLoader;
use render::{build_frame, ClipRect, DrawItem};
use scene::SceneState;
use sprites::{Drawable, SpriteRegistry};

const LAYOUT_PATH: &str = "assets/config/scene_layout.json";
const ANIMATION_PATH: &str = "assets/animations/turret_demo.json";

/// Keys checked for edge-triggered presses every frame.
const SCENE_KEYS: [Key; 15] = [
    Key::Space,
    Key::R,
    Key::M,
    Key::S,
    Key::T,
    Key::I,
    Key::G,
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
    Key::Digit8,
];

/// Key for the 1x1 white texture that solid fills are drawn with.
const SOLID_TEXTURE_KEY: &str = "<solid>";

/// A contiguous run of indices that share a texture and a clip rectangle.
/// Consecutive quads with the same pair collapse into one `draw_indexed`.
#[derive(Debug, Clone)]
struct DrawCall {
    texture_key: Arc<str>,
    clip: Option<ClipRect>,
    index_start: u32,
    index_count: u32,
}

struct GpuSprite {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

impl Drawable for GpuSprite {
    fn size_px(&self) -> (u32, u32) {
        self.texture.size
    }
}

/// Content loaded before the window exists.
struct StartupContent {
    layout: SceneLayout,
    animations: AnimationManager,
}

/// All mutable engine state. Constructed in `ApplicationHandler::resumed`
/// once the window and GPU surface are available.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    debug_overlay: DebugOverlay,

    layout: SceneLayout,
    scene: SceneState,
    aim_drag: AimDrag,
    cursor: CursorFeedback,
    sprites: SpriteRegistry<GpuSprite>,
    loader: AssetLoader,
    solid: GpuSprite,

    // The draw list is rebuilt on the CPU each frame and streamed into these
    // buffers. Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
}

impl EngineState {
    fn new(window: Arc<Window>, content: StartupContent) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);
        let StartupContent { layout, animations } = content;

        let mut sprites = SpriteRegistry::new();
        let mut keys = Vec::new();
        for key in layout
            .still_image_keys()
            .into_iter()
            .chain(animations.frame_keys())
        {
            if sprites.request(&key) {
                keys.push(key);
            }
        }
        let loader = AssetLoader::spawn(PathBuf::from(&layout.asset_root), keys)
            .map_err(|e| format!("Failed to start sprite loader: {e}"))?;

        let solid_texture = Texture::from_rgba8(
            &gpu.device,
            &gpu.queue,
            &[255, 255, 255, 255],
            1,
            1,
            SOLID_TEXTURE_KEY,
        );
        let solid = GpuSprite {
            bind_group: sprite_pipeline.create_texture_bind_group(&gpu.device, &solid_texture),
            texture: solid_texture,
        };

        let camera = Camera2D::new(layout.logical_width, layout.logical_height, gpu.size);
        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut scene = SceneState::new(&layout, animations);
        scene.start_snowpile();

        Ok(Self {
            window,
            gpu,
            time: TimeState::new(),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            debug_overlay,
            layout,
            scene,
            aim_drag: AimDrag::new(),
            cursor: CursorFeedback::Default,
            sprites,
            loader,
            solid,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
        })
    }

    /// Upload everything the loader thread finished since the last frame.
    fn receive_sprites(&mut self) {
        if self.loader.is_finished() {
            return;
        }
        for (key, result) in self.loader.drain() {
            match result {
                Ok(decoded) => {
                    let texture = Texture::from_rgba8(
                        &self.gpu.device,
                        &self.gpu.queue,
                        &decoded.rgba,
                        decoded.width,
                        decoded.height,
                        &key,
                    );
                    let bind_group = self
                        .sprite_pipeline
                        .create_texture_bind_group(&self.gpu.device, &texture);
                    self.sprites
                        .mark_ready(&key, GpuSprite { texture, bind_group });
                }
                Err(err) => self.sprites.mark_failed(&key, err.to_string()),
            }
        }
    }

    fn apply_key_actions(&mut self) {
        for key in SCENE_KEYS {
            if !self.input.is_just_pressed(key) {
                continue;
            }
            if let Some(action) = action_for(key) {
                let accepted = apply_action(&mut self.scene, action);
                log::debug!("{:?} -> {:?} accepted={}", key, action, accepted);
            }
        }
    }

    fn pointer_moved(&mut self, physical_x: f64, physical_y: f64) {
        let logical = self.camera.window_to_logical(physical_x, physical_y);
        self.input.mouse_position = Some((logical.x, logical.y));
        self.aim_drag.pointer_move(&mut self.scene, logical);
        self.update_cursor();
    }

    fn pointer_button(&mut self, pressed: bool) {
        if pressed {
            if let Some((x, y)) = self.input.mouse_position {
                self.aim_drag.pointer_down(&self.scene, Vec2::new(x, y));
            }
        } else {
            self.aim_drag.pointer_up();
        }
        self.update_cursor();
    }

    fn pointer_left(&mut self) {
        self.input.mouse_left();
        self.aim_drag.pointer_leave();
        self.update_cursor();
    }

    fn update_cursor(&mut self) {
        let feedback = self.aim_drag.cursor();
        if feedback == self.cursor {
            return;
        }
        self.cursor = feedback;
        let icon = match feedback {
            CursorFeedback::Default => CursorIcon::Default,
            CursorFeedback::Grab => CursorIcon::Grab,
            CursorFeedback::Grabbing => CursorIcon::Grabbing,
        };
        self.window.set_cursor(icon);
    }

    fn rebuild_mesh(&mut self) {
        let items = build_frame(&self.scene, &self.layout, &self.sprites);
        let (vertices, indices, draw_calls) = build_mesh(&items);
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }
        self.draw_calls = draw_calls;
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn texture_for(&self, key: &str) -> Option<&GpuSprite> {
        if key == SOLID_TEXTURE_KEY {
            Some(&self.solid)
        } else {
            self.sprites.get(key)
        }
    }

    fn overlay_stats(&self) -> OverlayStats {
        let counts = self.sprites.counts();
        OverlayStats {
            live_animations: self.scene.animations.live_count(),
            sprites_ready: counts.ready,
            sprites_pending: counts.pending,
            sprites_failed: counts.failed,
            aim_degrees: self.scene.aim.degrees(),
            snowpile_frame: self.scene.snowpile.current_frame,
            snowpile_phase: self.scene.snowpile_phase().label().to_string(),
            pointer: self.input.mouse_position,
            grid_visible: self.scene.show_grid,
            show_coordinates: self.scene.show_coordinates,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }

        self.time.begin_frame();
        self.receive_sprites();

        if self.input.is_just_pressed(Key::Escape) {
            event_loop.exit();
            return;
        }
        if self.input.is_just_pressed(Key::F3) {
            self.debug_overlay.toggle();
        }
        self.apply_key_actions();
        self.scene.update(self.time.delta_us());
        self.input.end_frame();

        self.rebuild_mesh();

        let camera_uniform = self.camera.build_uniform();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.overlay_stats();
        let (egui_primitives, egui_textures_delta, overlay_actions) =
            self.debug_overlay
                .prepare(&self.window, &self.time, Some(stats));

        if overlay_actions.toggle_grid {
            self.scene.toggle_grid();
        }
        if overlay_actions.toggle_coordinates {
            self.scene.toggle_coordinates();
        }
        if overlay_actions.reset_aim {
            self.scene.reset_aim();
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let fit = self.camera.fit();
            let full = self
                .camera
                .scissor_for(0.0, 0.0, self.layout.logical_width, self.layout.logical_height);

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_viewport(fit.x, fit.y, fit.width, fit.height, 0.0, 1.0);
            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for draw in &self.draw_calls {
                let Some(sprite) = self.texture_for(&draw.texture_key) else {
                    continue;
                };
                let scissor = match draw.clip {
                    Some(clip) => self
                        .camera
                        .scissor_for(clip.x, clip.y, clip.width, clip.height),
                    None => full,
                };
                if scissor.width == 0 || scissor.height == 0 {
                    continue;
                }
                render_pass.set_scissor_rect(scissor.x, scissor.y, scissor.width, scissor.height);
                render_pass.set_bind_group(1, &sprite.bind_group, &[]);
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: PlatformConfig,
    content: Option<StartupContent>,
    state: Option<EngineState>,
}

impl App {
    fn new(content: StartupContent) -> Self {
        let layout = &content.layout;
        let config = PlatformConfig {
            width: (layout.logical_width * layout.view_scale).round() as u32,
            height: (layout.logical_height * layout.view_scale).round() as u32,
            ..PlatformConfig::default()
        };
        Self {
            config,
            content: Some(content),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(content) = self.content.take() else {
            return;
        };
        let window = match create_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };
        match EngineState::new(window, content) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Failed to initialise renderer: {}", err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.pointer_moved(position.x, position.y);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } if !egui_consumed || button_state == ElementState::Released => {
                state.pointer_button(button_state == ElementState::Pressed);
            }

            WindowEvent::CursorLeft { .. } => state.pointer_left(),

            WindowEvent::RedrawRequested => state.redraw(event_loop),

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Flatten the draw list into one vertex/index stream plus batched draw calls.
fn build_mesh(items: &[DrawItem]) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
    let mut vertices = Vec::with_capacity(items.len() * 4);
    let mut indices = Vec::with_capacity(items.len() * 6);
    let mut draw_calls: Vec<DrawCall> = Vec::new();

    for item in items {
        let base_index = vertices.len() as u32;
        vertices.extend_from_slice(&item.quad.vertices());
        let draw_start = indices.len() as u32;
        indices.extend(QUAD_INDICES.iter().map(|i| base_index + i));

        let key = item.image_key().unwrap_or(SOLID_TEXTURE_KEY);
        push_draw_call(&mut draw_calls, key, item.clip, draw_start, 6);
    }

    (vertices, indices, draw_calls)
}

/// Append a draw call, merging with the previous one when texture and clip
/// match and the indices are contiguous.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture_key: &str,
    clip: Option<ClipRect>,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if &*last.texture_key == texture_key && last.clip == clip && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture_key: Arc::from(texture_key),
        clip,
        index_start,
        index_count,
    });
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::KeyG => Some(Key::G),
        KeyCode::KeyI => Some(Key::I),
        KeyCode::KeyM => Some(Key::M),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyT => Some(Key::T),
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(Key::Digit1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(Key::Digit2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Some(Key::Digit3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Some(Key::Digit4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Some(Key::Digit5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Some(Key::Digit6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Some(Key::Digit7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Some(Key::Digit8),
        _ => None,
    }
}

fn load_content(layout_path: &Path, animation_path: &Path) -> Result<StartupContent, String> {
    let layout = load_layout_or_default(layout_path)?;
    let animations = AnimationManager::load(animation_path)?;
    log::info!(
        "Loaded layout ({}x{} logical, x{} view) and animation table '{}'",
        layout.logical_width,
        layout.logical_height,
        layout.view_scale,
        animation_path.display()
    );
    Ok(StartupContent { layout, animations })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Turret practice starting...");

    let content = match load_content(Path::new(LAYOUT_PATH), Path::new(ANIMATION_PATH)) {
        Ok(content) => content,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(content);
    event_loop.run_app(&mut app).expect("Event loop error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use turret_render::SpriteQuad;

    fn item(key: Option<&str>, clip: Option<ClipRect>) -> DrawItem {
        DrawItem {
            fill: match key {
                Some(key) => render::Fill::Image(key.to_string()),
                None => render::Fill::Solid,
            },
            quad: SpriteQuad {
                x: 0.0,
                y: 0.0,
                width: 2.0,
                height: 2.0,
                pivot: None,
                flip_x: false,
                color: [1.0; 4],
            },
            clip,
        }
    }

    #[test]
    fn consecutive_quads_sharing_texture_merge() {
        let items = [item(Some("a.png"), None), item(Some("a.png"), None), item(Some("b.png"), None)];
        let (vertices, indices, calls) = build_mesh(&items);
        assert_eq!(vertices.len(), 12);
        assert_eq!(indices.len(), 18);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].index_count, 12);
        assert_eq!(&indices[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn clip_change_splits_batch() {
        let clip = Some(ClipRect {
            x: 0.0,
            y: 0.0,
            width: 600.0,
            height: 385.0,
        });
        let items = [item(Some("a.png"), None), item(Some("a.png"), clip)];
        let (_, _, calls) = build_mesh(&items);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].clip, clip);
    }

    #[test]
    fn solid_fills_use_white_texture() {
        let items = [item(None, None), item(None, None)];
        let (_, _, calls) = build_mesh(&items);
        assert_eq!(calls.len(), 1);
        assert_eq!(&*calls[0].texture_key, SOLID_TEXTURE_KEY);
    }

    #[test]
    fn scene_keys_all_have_actions() {
        for key in SCENE_KEYS {
            assert!(action_for(key).is_some(), "{:?} has no action", key);
        }
    }
}
