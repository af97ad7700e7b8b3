// Error types for the shader helpers and the viewer

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the shader compile and link helpers
#[derive(Error, Debug)]
pub enum ShaderError {
    /// The file name does not map to a shader stage
    #[error("cannot infer shader stage from {}", .path.display())]
    UnknownStage { path: PathBuf },

    /// The shader source could not be read
    #[error("failed to read shader {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The context rejected the shader source
    #[error("failed to compile {}:\n{log}", .path.display())]
    Compile { path: PathBuf, log: String },

    /// The context could not link the program
    #[error("failed to link program:\n{log}")]
    Link { log: String },
}

/// Errors that can occur while setting up the viewer
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("{0} has no render pipeline")]
    MissingPipeline(crate::context::ProgramHandle),
}
