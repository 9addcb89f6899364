use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrigridError {
    #[error("Shader source not found: {}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader {label} failed to compile.\nError log: {log}")]
    ShaderCompile { label: String, log: String },

    #[error("Failed to create the event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create the window")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to request a wgpu device")]
    WgpuRequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Failed to create a wgpu surface")]
    WgpuCreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("No suitable GPU adapter found")]
    NoGpuAdapter,
}

pub type Result<T> = std::result::Result<T, TrigridError>;
