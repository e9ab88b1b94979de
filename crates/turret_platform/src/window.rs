use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for PlatformConfig {
    /// Twice the 600x400 logical scene so the pixel art lands on whole pixels.
    fn default() -> Self {
        Self {
            title: "Turret Practice".to_string(),
            width: 1200,
            height: 800,
            min_width: 300,
            min_height: 200,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, winit::error::OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_min_inner_size(winit::dpi::LogicalSize::new(
            config.min_width,
            config.min_height,
        ));

    let window = event_loop.create_window(attrs)?;
    log::info!(
        "Window created: {}x{} \"{}\"",
        config.width,
        config.height,
        config.title
    );
    Ok(Arc::new(window))
}
