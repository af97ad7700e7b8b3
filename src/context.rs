// Graphics context boundary shared by the shader helpers and their backends

use std::fmt;
use std::path::Path;

/// Opaque handle to a shader object owned by a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to a program object owned by a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

impl fmt::Display for ShaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader#{}", self.0)
    }
}

impl fmt::Display for ProgramHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program#{}", self.0)
    }
}

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point every shader file must define.
    pub const ENTRY_POINT: &'static str = "main";

    /// Infers the stage from a file name.
    ///
    /// `vsh`/`vert` are vertex shaders, `fsh`/`frag` fragment shaders. A
    /// trailing `wgsl` extension defers to the one before it, so
    /// `quad.vert.wgsl` is a vertex shader.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "wgsl" {
            let stem = Path::new(path.file_stem()?);
            return match stem.extension()?.to_str()?.to_ascii_lowercase().as_str() {
                "wgsl" => None,
                _ => Self::from_path(stem),
            };
        }
        match ext.as_str() {
            "vsh" | "vert" => Some(Self::Vertex),
            "fsh" | "frag" => Some(Self::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// A currently bound rendering context.
///
/// The calls mirror the classic GL object model: create an object, feed it,
/// run the action, then ask for the status flag and the info log. Unknown
/// handles are ignored by mutating calls and report a failed status, the way
/// GL raises an error flag instead of aborting.
///
/// As in GL, deleting a shader that is still attached to a program only
/// flags it; the object stays usable for relinking until every program
/// holding it has been deleted.
pub trait GraphicsContext {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle;
    fn shader_source(&mut self, shader: ShaderHandle, source: &str);
    fn compile_shader(&mut self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&mut self, shader: ShaderHandle);

    fn create_program(&mut self) -> ProgramHandle;
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&mut self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&mut self, program: ProgramHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_from_extension() {
        let cases = [
            ("mandelbrot.vsh", Some(ShaderStage::Vertex)),
            ("shaders/quad.vert", Some(ShaderStage::Vertex)),
            ("mandelbrot.fsh", Some(ShaderStage::Fragment)),
            ("FILL.FRAG", Some(ShaderStage::Fragment)),
            ("quad.vert.wgsl", Some(ShaderStage::Vertex)),
            ("quad.frag.wgsl", Some(ShaderStage::Fragment)),
            ("quad.wgsl", None),
            ("quad.wgsl.wgsl", None),
            ("README", None),
            ("notes.txt", None),
        ];
        for (name, expected) in cases {
            assert_eq!(ShaderStage::from_path(Path::new(name)), expected, "{name}");
        }
    }
}
