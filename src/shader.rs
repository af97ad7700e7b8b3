// Shader compile and program link helpers

use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{GraphicsContext, ProgramHandle, ShaderHandle, ShaderStage};
use crate::error::ShaderError;

/// Substituted when a backend reports failure without any log text.
pub const EMPTY_INFO_LOG: &str = "<no info log>";

/// Runs `action` on `handle`, then checks `status`.
///
/// On failure the object's info log is returned as the error. Both the
/// compile and the link path go through here so neither can skip the status
/// check.
pub fn execute_checked<C, H>(
    ctx: &mut C,
    handle: H,
    action: impl FnOnce(&mut C, H),
    status: impl FnOnce(&C, H) -> bool,
    info_log: impl FnOnce(&C, H) -> String,
) -> Result<(), String>
where
    C: GraphicsContext + ?Sized,
    H: Copy,
{
    action(ctx, handle);
    if status(ctx, handle) {
        return Ok(());
    }
    let log = info_log(ctx, handle);
    if log.trim().is_empty() {
        Err(EMPTY_INFO_LOG.to_owned())
    } else {
        Err(log)
    }
}

/// Reads, compiles and status-checks the shader at `path`.
///
/// A missing or unreadable file is always [`ShaderError::Io`]; only then is
/// the stage inferred with [`ShaderStage::from_path`]. The returned
/// handle belongs to the caller. A shader that fails to compile is deleted
/// before the error is returned.
pub fn compile_shader_from_file<C>(
    ctx: &mut C,
    path: impl AsRef<Path>,
) -> Result<ShaderHandle, ShaderError>
where
    C: GraphicsContext + ?Sized,
{
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stage = ShaderStage::from_path(path).ok_or_else(|| ShaderError::UnknownStage {
        path: path.to_path_buf(),
    })?;
    log::debug!("compiling {} shader {}", stage, path.display());
    compile(ctx, stage, &source, path)
}

/// Compiles in-memory `source` for `stage`.
pub fn compile_shader_source<C>(
    ctx: &mut C,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderHandle, ShaderError>
where
    C: GraphicsContext + ?Sized,
{
    let label = PathBuf::from(format!("<{stage} source>"));
    compile(ctx, stage, source, &label)
}

fn compile<C>(
    ctx: &mut C,
    stage: ShaderStage,
    source: &str,
    path: &Path,
) -> Result<ShaderHandle, ShaderError>
where
    C: GraphicsContext + ?Sized,
{
    let shader = ctx.create_shader(stage);
    ctx.shader_source(shader, source);
    let checked = execute_checked(
        ctx,
        shader,
        |ctx, s| ctx.compile_shader(s),
        |ctx, s| ctx.shader_compile_status(s),
        |ctx, s| ctx.shader_info_log(s),
    );
    match checked {
        Ok(()) => Ok(shader),
        Err(log) => {
            log::error!("{} failed to compile:\n{}", path.display(), log);
            ctx.delete_shader(shader);
            Err(ShaderError::Compile {
                path: path.to_path_buf(),
                log,
            })
        }
    }
}

/// Links `program`, whose shaders must already be attached.
///
/// The program stays owned by the caller even when linking fails.
pub fn link_program<C>(ctx: &mut C, program: ProgramHandle) -> Result<(), ShaderError>
where
    C: GraphicsContext + ?Sized,
{
    execute_checked(
        ctx,
        program,
        |ctx, p| ctx.link_program(p),
        |ctx, p| ctx.program_link_status(p),
        |ctx, p| ctx.program_info_log(p),
    )
    .map_err(|log| {
        log::error!("{program} failed to link:\n{log}");
        ShaderError::Link { log }
    })
}
