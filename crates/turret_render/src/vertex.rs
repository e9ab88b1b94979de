use glam::Vec2;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, color) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Index pattern for one quad built by [`SpriteQuad::vertices`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Rotation of a quad about an arbitrary pivot in logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub center: Vec2,
    pub radians: f32,
}

/// A textured rectangle placed by its top-left corner in y-down logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub pivot: Option<Pivot>,
    pub flip_x: bool,
    pub color: [f32; 4],
}

impl SpriteQuad {
    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let mut corners = [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
            Vec2::new(self.x, self.y + self.height),
        ];
        if let Some(pivot) = self.pivot {
            if pivot.radians != 0.0 {
                // With y pointing down a positive angle turns clockwise on screen.
                let rot = Vec2::from_angle(pivot.radians);
                for c in &mut corners {
                    *c = pivot.center + rot.rotate(*c - pivot.center);
                }
            }
        }
        corners
    }

    pub fn vertices(&self) -> [SpriteVertex; 4] {
        let (u0, u1) = if self.flip_x { (1.0, 0.0) } else { (0.0, 1.0) };
        let uvs = [[u0, 0.0], [u1, 0.0], [u1, 1.0], [u0, 1.0]];
        let corners = self.corners();
        std::array::from_fn(|i| SpriteVertex {
            position: corners[i].to_array(),
            tex_coords: uvs[i],
            color: self.color,
        })
    }
}
