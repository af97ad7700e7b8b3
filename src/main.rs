// Mandelbrot viewer: compiles the fractal shaders and opens a window

use std::process::ExitCode;

use mandelbrot_shader::config::ViewerConfig;
use mandelbrot_shader::renderer::Renderer;
use winit::event_loop::EventLoop;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = ViewerConfig::from_env();
    let renderer = match Renderer::new(&event_loop, config).await {
        Ok(renderer) => renderer,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    renderer.run(event_loop);
    ExitCode::SUCCESS
}
