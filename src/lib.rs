pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod mesh;
pub mod octant;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use app::{Demo, init_logging, run};
pub use camera::{Camera, OrbitController, TransformUniform};
pub use config::WindowConfig;
pub use error::{Result, TrigridError};
pub use input::InputHandler;
pub use mesh::Mesh;
pub use octant::Octant;
pub use renderer::{Renderer, Scene};
pub use shader::{ShaderSource, ShaderStage};
pub use vertex::{ColoredVertex, TRIANGLE, Vertex};
