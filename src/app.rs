use crate::{
    config::WindowConfig,
    error::{Result, TrigridError},
    input::is_close_request,
    renderer::{Renderer, Scene},
};
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::LogicalSize,
    event::{DeviceEvent, Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

/// One skeleton program: what it draws and how its transform moves.
pub trait Demo {
    fn window_config(&self) -> WindowConfig {
        WindowConfig::default()
    }

    /// Called once before the first frame. An error here ends the program.
    fn scene(&self) -> Result<Scene>;

    /// Returns `true` if the event was consumed.
    fn input(&mut self, _event: &WindowEvent, _window: &Window) -> bool {
        false
    }

    /// Raw mouse motion from the device, independent of the cursor position.
    fn mouse_motion(&mut self, _delta: (f64, f64)) {}

    /// Combined model-view-projection matrix for this frame.
    fn mvp(&mut self, elapsed: f32, aspect: f32) -> glam::Mat4;
}

/// Opens the window and redraws the demo until Escape or a close request.
pub fn run<D: Demo + 'static>(mut demo: D) -> Result<()> {
    let window_config = demo.window_config();
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&window_config.title)
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height))
            .build(&event_loop)?,
    );

    let scene = demo.scene()?;
    let mut renderer = pollster::block_on(Renderer::new(window, &scene))?;
    let start_time = Instant::now();

    event_loop.run(move |event, target| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == renderer.window().id() => {
            if is_close_request(event) {
                target.exit();
                return;
            }
            if demo.input(event, renderer.window()) {
                return;
            }
            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(physical_size) => renderer.resize(*physical_size),
                WindowEvent::RedrawRequested => {
                    let mvp = demo.mvp(start_time.elapsed().as_secs_f32(), renderer.aspect());
                    renderer.update(mvp);
                    match renderer.render() {
                        Ok(()) => {}
                        Err(TrigridError::Surface(
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                        )) => renderer.resize(renderer.size),
                        Err(TrigridError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                            log::error!("GPU out of memory, exiting");
                            target.exit();
                        }
                        Err(e) => log::warn!("{e}"),
                    }
                }
                _ => {}
            }
        }
        Event::DeviceEvent {
            event: DeviceEvent::MouseMotion { delta },
            ..
        } => demo.mouse_motion(delta),
        Event::AboutToWait => renderer.window().request_redraw(),
        _ => {}
    })?;

    log::info!("Window closed");
    Ok(())
}

/// Logging setup shared by the binaries; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
