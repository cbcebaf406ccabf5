use winit::dpi::LogicalSize;

/// Session configuration.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Window title.
    pub title: String,

    /// Initial window size in logical pixels. Must be positive.
    pub initial_size: LogicalSize<f64>,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported; presentation may block on vertical sync
    /// under it, which is the platform's policy rather than ours.
    pub present_mode: wgpu::PresentMode,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size_matches_tutorial_window() {
        let config = SessionConfig::default();
        assert_eq!(config.initial_size.width, 800.0);
        assert_eq!(config.initial_size.height, 600.0);
    }

    #[test]
    fn default_present_mode_is_fifo() {
        assert_eq!(SessionConfig::default().present_mode, wgpu::PresentMode::Fifo);
    }
}
