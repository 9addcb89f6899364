//! Rotating triangle with shaders read from `simple.vert` and `simple.frag`.

use glam::{Mat4, Vec3};
use trigrid::{Camera, Demo, Mesh, Result, Scene, ShaderSource, ShaderStage, TRIANGLE, WindowConfig};

struct SpinningTriangle {
    camera: Camera,
}

impl Demo for SpinningTriangle {
    fn window_config(&self) -> WindowConfig {
        WindowConfig::titled("CS 120 Template Project")
    }

    fn scene(&self) -> Result<Scene> {
        // Resolved against the working directory, i.e. an in-tree run.
        Ok(Scene {
            mesh: Mesh::Colored(TRIANGLE.to_vec()),
            vertex_shader: ShaderSource::from_file("simple.vert", ShaderStage::Vertex)?,
            fragment_shader: ShaderSource::from_file("simple.frag", ShaderStage::Fragment)?,
            wireframe: false,
            color: [1.0, 1.0, 1.0],
        })
    }

    fn mvp(&mut self, elapsed: f32, aspect: f32) -> Mat4 {
        self.camera.aspect = aspect;
        let model = Mat4::from_rotation_z(elapsed);
        self.camera.build_view_projection_matrix() * model
    }
}

fn main() {
    trigrid::init_logging();

    let demo = SpinningTriangle {
        camera: Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0), 0.5),
    };

    if let Err(e) = trigrid::run(demo) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
