pub mod camera;
pub mod gpu_context;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use camera::{Camera2D, CameraUniform, ScissorRect, ViewportRect};
pub use gpu_context::{clear_color_from_srgb, GpuContext};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use vertex::{Pivot, SpriteQuad, SpriteVertex, QUAD_INDICES};
