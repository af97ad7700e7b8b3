// wgpu implementation of the graphics context

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::{GraphicsContext, ProgramHandle, ShaderHandle, ShaderStage};

struct ShaderObject {
    stage: ShaderStage,
    source: String,
    module: Option<wgpu::ShaderModule>,
    log: String,
    // deleted while attached; dropped once no program references it
    delete_pending: bool,
}

#[derive(Default)]
struct ProgramObject {
    shaders: Vec<ShaderHandle>,
    pipeline: Option<wgpu::RenderPipeline>,
    log: String,
}

/// GL-style object model on top of a wgpu device.
///
/// Shaders are WGSL with a `main` entry point. Compiling creates a shader
/// module, linking creates a render pipeline drawing into `target_format`
/// with an automatically derived layout. Both run inside a validation error
/// scope whose message becomes the info log.
pub struct WgpuContext {
    device: Arc<wgpu::Device>,
    target_format: wgpu::TextureFormat,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    next_id: u32,
}

impl WgpuContext {
    pub fn new(device: Arc<wgpu::Device>, target_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            target_format,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    /// Pipeline produced by the last successful link of `program`.
    pub fn render_pipeline(&self, program: ProgramHandle) -> Option<&wgpu::RenderPipeline> {
        self.programs.get(&program.0)?.pipeline.as_ref()
    }

    fn is_attached(&self, shader: ShaderHandle) -> bool {
        self.programs.values().any(|program| program.shaders.contains(&shader))
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Runs `f` inside a validation error scope.
    fn validated<T>(&self, f: impl FnOnce(&wgpu::Device) -> T) -> (T, Option<wgpu::Error>) {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = f(&self.device);
        let error = pollster::block_on(self.device.pop_error_scope());
        (value, error)
    }

    /// Resolves the attached shaders into one vertex and one fragment module.
    fn stages(&self, program: &ProgramObject) -> Result<(&wgpu::ShaderModule, &wgpu::ShaderModule), String> {
        let mut vertex = Vec::new();
        let mut fragment = Vec::new();
        for handle in &program.shaders {
            let shader = self
                .shaders
                .get(&handle.0)
                .ok_or_else(|| format!("{handle} is not a valid shader object"))?;
            let module = shader
                .module
                .as_ref()
                .ok_or_else(|| format!("{handle} ({}) has not been compiled", shader.stage))?;
            match shader.stage {
                ShaderStage::Vertex => vertex.push(module),
                ShaderStage::Fragment => fragment.push(module),
            }
        }
        match (vertex.as_slice(), fragment.as_slice()) {
            ([v], [f]) => Ok((*v, *f)),
            _ => Err(format!(
                "a program needs exactly one vertex and one fragment shader, found {} vertex and {} fragment",
                vertex.len(),
                fragment.len()
            )),
        }
    }
}

impl GraphicsContext for WgpuContext {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle {
        let id = self.next_id();
        self.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                module: None,
                log: String::new(),
                delete_pending: false,
            },
        );
        ShaderHandle(id)
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        match self.shaders.get_mut(&shader.0) {
            Some(object) => object.source = source.to_owned(),
            None => log::warn!("shader_source: {shader} is not a valid shader object"),
        }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        let Some(object) = self.shaders.get(&shader.0) else {
            log::warn!("compile_shader: {shader} is not a valid shader object");
            return;
        };
        let label = format!("{} {shader}", object.stage);
        let source = object.source.clone();
        let (module, error) = self.validated(|device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label.as_str()),
                source: wgpu::ShaderSource::Wgsl(Cow::Owned(source)),
            })
        });
        if let Some(object) = self.shaders.get_mut(&shader.0) {
            match error {
                None => {
                    object.module = Some(module);
                    object.log.clear();
                }
                Some(err) => {
                    object.module = None;
                    object.log = err.to_string();
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.shaders
            .get(&shader.0)
            .is_some_and(|object| object.module.is_some())
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        match self.shaders.get(&shader.0) {
            Some(object) => object.log.clone(),
            None => format!("{shader} is not a valid shader object"),
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if !self.is_attached(shader) {
            self.shaders.remove(&shader.0);
        } else if let Some(object) = self.shaders.get_mut(&shader.0) {
            object.delete_pending = true;
        }
    }

    fn create_program(&mut self) -> ProgramHandle {
        let id = self.next_id();
        self.programs.insert(id, ProgramObject::default());
        ProgramHandle(id)
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        match self.programs.get_mut(&program.0) {
            Some(object) if !object.shaders.contains(&shader) => object.shaders.push(shader),
            Some(_) => log::warn!("attach_shader: {shader} is already attached to {program}"),
            None => log::warn!("attach_shader: {program} is not a valid program object"),
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        let Some(object) = self.programs.get(&program.0) else {
            log::warn!("link_program: {program} is not a valid program object");
            return;
        };
        let outcome = self.stages(object).and_then(|(vertex, fragment)| {
            let label = program.to_string();
            let (pipeline, error) = self.validated(|device| {
                device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(label.as_str()),
                    layout: None,
                    vertex: wgpu::VertexState {
                        module: vertex,
                        entry_point: ShaderStage::ENTRY_POINT,
                        buffers: &[],
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: fragment,
                        entry_point: ShaderStage::ENTRY_POINT,
                        targets: &[Some(wgpu::ColorTargetState {
                            format: self.target_format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState::default(),
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                })
            });
            match error {
                None => Ok(pipeline),
                Some(err) => Err(err.to_string()),
            }
        });
        if let Some(object) = self.programs.get_mut(&program.0) {
            match outcome {
                Ok(pipeline) => {
                    object.pipeline = Some(pipeline);
                    object.log.clear();
                }
                Err(log) => {
                    object.pipeline = None;
                    object.log = log;
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.programs
            .get(&program.0)
            .is_some_and(|object| object.pipeline.is_some())
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        match self.programs.get(&program.0) {
            Some(object) => object.log.clone(),
            None => format!("{program} is not a valid program object"),
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        let Some(object) = self.programs.remove(&program.0) else {
            return;
        };
        for shader in object.shaders {
            let pending = self.shaders.get(&shader.0).is_some_and(|s| s.delete_pending);
            if pending && !self.is_attached(shader) {
                self.shaders.remove(&shader.0);
            }
        }
    }
}
