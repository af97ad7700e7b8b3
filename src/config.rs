// Viewer tunables

use std::path::PathBuf;

/// Overrides [`ViewerConfig::max_iterations`] when set to an integer.
pub const MAX_ITERATIONS_ENV: &str = "MANDELBROT_MAX_ITERATIONS";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Escape-time iteration cap per pixel.
    pub max_iterations: u32,
    /// Screen units moved per pan key press.
    pub pan_step: f32,
    /// Magnification per zoom key press.
    pub zoom_factor: f32,
    /// Directory holding `mandelbrot.vsh` and `mandelbrot.fsh`.
    pub shader_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            pan_step: 0.05,
            zoom_factor: 1.1,
            shader_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders"),
        }
    }
}

impl ViewerConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_max_iterations(std::env::var(MAX_ITERATIONS_ENV).ok().as_deref());
        config
    }

    fn apply_max_iterations(&mut self, value: Option<&str>) {
        let Some(value) = value else { return };
        match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => self.max_iterations = n,
            _ => log::warn!("ignoring {MAX_ITERATIONS_ENV}={value:?}, expected a positive integer"),
        }
    }
}
