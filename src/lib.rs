//! GPU helpers for the Mandelbrot viewer.
//!
//! [`matrix`] dumps and translates `glam` matrices. [`shader`] compiles
//! shader files and links programs against any [`context::GraphicsContext`];
//! [`wgpu_context`] is the backend the viewer uses.

pub mod config;
pub mod context;
pub mod error;
pub mod math;
pub mod matrix;
pub mod renderer;
pub mod shader;
pub mod wgpu_context;

pub use context::{GraphicsContext, ProgramHandle, ShaderHandle, ShaderStage};
pub use error::{RendererError, ShaderError};
pub use matrix::{
    format_matrix3, format_matrix4, log_matrix3, log_matrix4, make_translation3x3, translate3x3,
};
pub use shader::{compile_shader_from_file, compile_shader_source, execute_checked, link_program};
