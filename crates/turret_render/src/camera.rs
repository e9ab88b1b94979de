use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Pixel rectangle of the window the logical surface is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Physical pixels per logical unit.
    pub scale: f32,
}

/// Scissor rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fixed-resolution screen-space camera.
///
/// The scene is authored in logical units with the origin at the top-left and
/// y growing downward. The logical surface is scaled uniformly to fit the
/// window and centered, leaving bars on the longer axis.
pub struct Camera2D {
    pub logical_size: Vec2,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(logical_width: f32, logical_height: f32, viewport: (u32, u32)) -> Self {
        Self {
            logical_size: Vec2::new(logical_width, logical_height),
            viewport,
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let proj = Mat4::orthographic_rh(
            0.0,
            self.logical_size.x,
            self.logical_size.y,
            0.0,
            -1.0,
            1.0,
        );

        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }

    pub fn fit(&self) -> ViewportRect {
        let (vw, vh) = (self.viewport.0 as f32, self.viewport.1 as f32);
        let scale = (vw / self.logical_size.x)
            .min(vh / self.logical_size.y)
            .max(f32::EPSILON);
        let width = self.logical_size.x * scale;
        let height = self.logical_size.y * scale;
        ViewportRect {
            x: ((vw - width) * 0.5).max(0.0),
            y: ((vh - height) * 0.5).max(0.0),
            width,
            height,
            scale,
        }
    }

    /// Map a window position in physical pixels to logical coordinates.
    pub fn window_to_logical(&self, physical_x: f64, physical_y: f64) -> Vec2 {
        let fit = self.fit();
        Vec2::new(
            (physical_x as f32 - fit.x) / fit.scale,
            (physical_y as f32 - fit.y) / fit.scale,
        )
    }

    /// Convert a logical clip rectangle to a scissor rectangle, clamped to the
    /// window so the GPU never sees an out-of-bounds scissor.
    pub fn scissor_for(&self, x: f32, y: f32, width: f32, height: f32) -> ScissorRect {
        let fit = self.fit();
        let (vw, vh) = (self.viewport.0, self.viewport.1);
        let left = (fit.x + x * fit.scale).floor().clamp(0.0, vw as f32) as u32;
        let top = (fit.y + y * fit.scale).floor().clamp(0.0, vh as f32) as u32;
        let right = (fit.x + (x + width) * fit.scale).ceil().clamp(0.0, vw as f32) as u32;
        let bottom = (fit.y + (y + height) * fit.scale).ceil().clamp(0.0, vh as f32) as u32;
        ScissorRect {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_fills_window() {
        let camera = Camera2D::new(600.0, 400.0, (1200, 800));
        let fit = camera.fit();
        assert_eq!(fit.scale, 2.0);
        assert_eq!((fit.x, fit.y), (0.0, 0.0));
        assert_eq!((fit.width, fit.height), (1200.0, 800.0));
    }

    #[test]
    fn wide_window_letterboxes_horizontally() {
        let camera = Camera2D::new(600.0, 400.0, (1600, 800));
        let fit = camera.fit();
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.x, 200.0);
        assert_eq!(fit.y, 0.0);
    }

    #[test]
    fn window_to_logical_inverts_fit() {
        let camera = Camera2D::new(600.0, 400.0, (1600, 800));
        let p = camera.window_to_logical(200.0 + 334.0, 740.0);
        assert_eq!(p, Vec2::new(167.0, 370.0));
    }

    #[test]
    fn scissor_scales_and_clamps() {
        let camera = Camera2D::new(600.0, 400.0, (1200, 800));
        let s = camera.scissor_for(0.0, 0.0, 600.0, 385.0);
        assert_eq!(s, ScissorRect { x: 0, y: 0, width: 1200, height: 770 });

        let s = camera.scissor_for(-50.0, -50.0, 1000.0, 1000.0);
        assert_eq!(s, ScissorRect { x: 0, y: 0, width: 1200, height: 800 });
    }

    #[test]
    fn projection_maps_corners_to_clip_space() {
        let camera = Camera2D::new(600.0, 400.0, (1200, 800));
        let m = Mat4::from_cols_array_2d(&camera.build_uniform().view_proj);
        let top_left = m.project_point3(glam::Vec3::new(0.0, 0.0, 0.0));
        let bottom_right = m.project_point3(glam::Vec3::new(600.0, 400.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-5 && (top_left.y - 1.0).abs() < 1e-5);
        assert!((bottom_right.x - 1.0).abs() < 1e-5 && (bottom_right.y + 1.0).abs() < 1e-5);
    }
}
