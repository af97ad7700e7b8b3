// Renderer module for the Mandelbrot viewer

use winit::{
    event::{Event, WindowEvent, KeyEvent, ElementState},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
    keyboard::{PhysicalKey, KeyCode},
};
use wgpu::{Adapter, Buffer};
use std::sync::Arc;

use crate::config::ViewerConfig;
use crate::context::{GraphicsContext, ProgramHandle};
use crate::error::RendererError;
use crate::math::ViewTransform;
use crate::shader::{compile_shader_from_file, link_program};
use crate::wgpu_context::WgpuContext;

pub struct Renderer {
    adapter: Adapter,
    device: Arc<wgpu::Device>,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    window: Arc<winit::window::Window>,
    context: WgpuContext,
    program: ProgramHandle,
    uniform_buffer: Buffer,
    uniform_bind_group: wgpu::BindGroup,
    surface_format: wgpu::TextureFormat,
    config: ViewerConfig,
    view: ViewTransform,
}

// Matches `Uniforms` in mandelbrot.fsh; mat3x3 columns are padded to 16 bytes
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 3],
    params: [f32; 4],
}

impl Uniforms {
    fn new(view: &ViewTransform, max_iterations: u32, aspect_ratio: f32) -> Self {
        let m = view.matrix();
        Self {
            view: [
                m.x_axis.extend(0.0).to_array(),
                m.y_axis.extend(0.0).to_array(),
                m.z_axis.extend(0.0).to_array(),
            ],
            params: [max_iterations as f32, aspect_ratio, 0.0, 0.0],
        }
    }
}

impl Renderer {
    pub async fn new(event_loop: &EventLoop<()>, config: ViewerConfig) -> Result<Self, RendererError> {
        let window = Arc::new(WindowBuilder::new()
            .with_title("Mandelbrot")
            .build(event_loop)?);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }).await.ok_or(RendererError::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Renderer Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::default(),
            },
            None, // Trace path
        ).await?;
        let device = Arc::new(device);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        surface.configure(&device, &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        });

        // Build the program the GL way: compile each stage, attach, link
        let mut context = WgpuContext::new(device.clone(), surface_format);
        let vertex = compile_shader_from_file(&mut context, config.shader_dir.join("mandelbrot.vsh"))?;
        let fragment = compile_shader_from_file(&mut context, config.shader_dir.join("mandelbrot.fsh"))?;
        let program = context.create_program();
        context.attach_shader(program, vertex);
        context.attach_shader(program, fragment);
        link_program(&mut context, program)?;
        // Only flagged while attached; released together with the program
        context.delete_shader(vertex);
        context.delete_shader(fragment);

        let pipeline = context
            .render_pipeline(program)
            .ok_or(RendererError::MissingPipeline(program))?;
        let bind_group_layout = pipeline.get_bind_group_layout(0);

        let view = ViewTransform::new();
        let uniform_data = Uniforms::new(&view, config.max_iterations, aspect_ratio(size));
        use wgpu::util::DeviceExt;
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform_data]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            adapter,
            device,
            queue,
            surface,
            window,
            context,
            program,
            uniform_buffer,
            uniform_bind_group,
            surface_format,
            config,
            view,
        })
    }

    pub fn run(mut self, event_loop: EventLoop<()>) {
        let result = event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent {
                    window_id,
                    event: WindowEvent::CloseRequested,
                } if window_id == self.window.id() => {
                    target.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    window_id,
                } if window_id == self.window.id() => {
                    self.resize(physical_size);
                    self.window.request_redraw();
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    window_id,
                } if window_id == self.window.id() => {
                    self.update_and_render();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    window_id,
                } if window_id == self.window.id() => {
                    self.handle_keyboard_input(event, target);
                }
                _ => {}
            }
        });
        if let Err(err) = result {
            log::error!("event loop terminated: {err}");
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let surface_caps = self.surface.get_capabilities(&self.adapter);

        self.surface.configure(&self.device, &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.surface_format,
            width: new_size.width,
            height: new_size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        });
    }

    fn handle_keyboard_input(&mut self, event: KeyEvent, target: &EventLoopWindowTarget<()>) {
        if event.state != ElementState::Pressed {
            return;
        }
        let PhysicalKey::Code(keycode) = event.physical_key else {
            return;
        };
        let step = self.config.pan_step;
        match keycode {
            KeyCode::KeyW | KeyCode::ArrowUp => self.view.pan(0.0, step),
            KeyCode::KeyS | KeyCode::ArrowDown => self.view.pan(0.0, -step),
            KeyCode::KeyA | KeyCode::ArrowLeft => self.view.pan(-step, 0.0),
            KeyCode::KeyD | KeyCode::ArrowRight => self.view.pan(step, 0.0),
            KeyCode::KeyE => self.view.zoom(self.config.zoom_factor),
            KeyCode::KeyQ => self.view.zoom(1.0 / self.config.zoom_factor),
            KeyCode::KeyR => self.view.reset(),
            KeyCode::Escape => {
                target.exit();
                return;
            }
            _ => return,
        }
        self.window.request_redraw();
    }

    fn update_and_render(&mut self) {
        let uniforms = Uniforms::new(
            &self.view,
            self.config.max_iterations,
            aspect_ratio(self.window.inner_size()),
        );
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniforms]),
        );

        self.render();
    }

    fn render(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("dropping frame: {err}");
                self.resize(self.window.inner_size());
                return;
            }
        };

        let Some(pipeline) = self.context.render_pipeline(self.program) else {
            log::error!("{} lost its render pipeline", self.program);
            return;
        };

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            // Full-screen triangle generated from the vertex index
            render_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

fn aspect_ratio(size: winit::dpi::PhysicalSize<u32>) -> f32 {
    size.width as f32 / size.height.max(1) as f32
}
