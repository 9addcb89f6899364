//! Wireframe octant grid; drag with the left button to orbit, scroll to zoom.

use glam::{Mat4, Vec3};
use trigrid::{
    Camera, Demo, InputHandler, Mesh, Octant, Result, Scene, ShaderSource, ShaderStage,
    octant::DEFAULT_LEVELS,
};
use winit::{event::WindowEvent, window::Window};

const VERTEX_SHADER: &str = r"#version 450
layout(set = 0, binding = 0) uniform Transform {
    mat4 MVP;
    vec3 uColor;
};
layout(location = 0) in vec3 posn_obj;

void main()
{
    gl_Position = MVP * vec4(posn_obj, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 450
layout(set = 0, binding = 0) uniform Transform {
    mat4 MVP;
    vec3 uColor;
};
layout(location = 0) out vec4 fragColor;

void main()
{
    fragColor = vec4(uColor, 1.0);
}
";

const DARK_GREEN: [f32; 3] = [0.0, 0.7, 0.0];

struct OctantViewer {
    camera: Camera,
    input: InputHandler,
}

impl Demo for OctantViewer {
    fn scene(&self) -> Result<Scene> {
        let octant = Octant::new(DEFAULT_LEVELS);
        log::info!(
            "Octant grid: {} vertices, {} triangles",
            octant.vertices.len(),
            octant.indices.len() / 3
        );

        Ok(Scene {
            mesh: Mesh::from(octant),
            vertex_shader: ShaderSource::inline("octant.vert", ShaderStage::Vertex, VERTEX_SHADER),
            fragment_shader: ShaderSource::inline(
                "octant.frag",
                ShaderStage::Fragment,
                FRAGMENT_SHADER,
            ),
            wireframe: true,
            color: DARK_GREEN,
        })
    }

    fn input(&mut self, event: &WindowEvent, window: &Window) -> bool {
        self.input.process_input(event, window)
    }

    fn mouse_motion(&mut self, delta: (f64, f64)) {
        self.input.handle_mouse_motion(delta);
    }

    fn mvp(&mut self, _elapsed: f32, aspect: f32) -> Mat4 {
        self.input.orbit.update_camera(&mut self.camera);
        self.camera.aspect = aspect;
        self.camera.build_view_projection_matrix() * self.input.orbit.model_matrix()
    }
}

fn main() {
    trigrid::init_logging();

    let zoom_angle = 0.5;
    let demo = OctantViewer {
        camera: Camera::looking_at_origin(Vec3::new(0.0, 7.0, 15.0), zoom_angle),
        input: InputHandler::new(zoom_angle),
    };

    if let Err(e) = trigrid::run(demo) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
