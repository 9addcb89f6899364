use glam::{Mat4, Vec3};

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at `eye` looking at the origin with `+Y` up and a 1..100 depth range.
    pub fn looking_at_origin(eye: Vec3, fovy: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy,
            znear: 1.0,
            zfar: 100.0,
        }
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    mvp: [[f32; 4]; 4],
    color: [f32; 3],
    // std140 rounds the vec3 up to 16 bytes
    _padding: u32,
}

impl TransformUniform {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
            color,
            _padding: 0,
        }
    }

    pub fn update_mvp(&mut self, mvp: Mat4) {
        self.mvp = mvp.to_cols_array_2d();
    }
}

/// Mouse-driven orbit and zoom state.
///
/// While a drag is active every raw mouse motion turns the model by the
/// distance travelled, with no bound from the window edges.
#[derive(Debug, Clone)]
pub struct OrbitController {
    x_angle: f32,
    y_angle: f32,
    dragging: bool,
    mouse_speed: f32,
    zoom_angle: f32,
    zoom_step: f32,
}

impl OrbitController {
    pub const MIN_ZOOM: f32 = 0.05;
    pub const MAX_ZOOM: f32 = 3.0;

    pub fn new(zoom_angle: f32) -> Self {
        Self {
            x_angle: 0.0,
            y_angle: 0.0,
            dragging: false,
            mouse_speed: 0.01,
            zoom_angle: zoom_angle.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM),
            zoom_step: 0.02,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Returns `true` if the motion rotated the model.
    pub fn process_mouse(&mut self, mouse_dx: f64, mouse_dy: f64) -> bool {
        if !self.dragging {
            return false;
        }
        self.x_angle += mouse_dx as f32 * self.mouse_speed;
        self.y_angle += mouse_dy as f32 * self.mouse_speed;
        true
    }

    pub fn process_scroll(&mut self, lines: f32) {
        self.zoom_angle =
            (self.zoom_angle + lines * self.zoom_step).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.x_angle, self.y_angle)
    }

    pub fn zoom_angle(&self) -> f32 {
        self.zoom_angle
    }

    /// Horizontal drag spins about `+Y`, vertical drag tilts about `+X`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.x_angle) * Mat4::from_rotation_x(self.y_angle)
    }

    pub fn update_camera(&self, camera: &mut Camera) {
        camera.fovy = self.zoom_angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_ignored_without_drag() {
        let mut orbit = OrbitController::new(0.5);
        assert!(!orbit.process_mouse(100.0, 40.0));
        assert_eq!(orbit.angles(), (0.0, 0.0));
    }

    #[test]
    fn test_drag_accumulates_deltas() {
        let mut orbit = OrbitController::new(0.5);
        orbit.begin_drag();
        assert!(orbit.process_mouse(20.0, -5.0));
        assert!(orbit.process_mouse(10.0, 0.0));
        let (x, y) = orbit.angles();
        assert!((x - 0.3).abs() < 1e-6);
        assert!((y + 0.05).abs() < 1e-6);

        orbit.end_drag();
        assert!(!orbit.is_dragging());
        assert!(!orbit.process_mouse(500.0, 500.0));
        assert_eq!(orbit.angles(), (x, y));
    }

    #[test]
    fn test_drag_is_not_bounded_by_window_width() {
        let mut orbit = OrbitController::new(0.5);
        orbit.begin_drag();
        // Far more travel than a 640 px window allows in absolute coordinates.
        for _ in 0..100 {
            orbit.process_mouse(64.0, 0.0);
        }
        assert!((orbit.angles().0 - 64.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_zoom_is_clamped() {
        let mut orbit = OrbitController::new(0.5);
        orbit.process_scroll(2.0);
        assert!((orbit.zoom_angle() - 0.54).abs() < 1e-6);

        orbit.process_scroll(-1000.0);
        assert_eq!(orbit.zoom_angle(), OrbitController::MIN_ZOOM);
        orbit.process_scroll(1000.0);
        assert_eq!(orbit.zoom_angle(), OrbitController::MAX_ZOOM);
    }

    #[test]
    fn test_model_matrix_spins_then_tilts() {
        let mut orbit = OrbitController::new(0.5);
        orbit.begin_drag();
        orbit.process_mouse(100.0 * std::f64::consts::FRAC_PI_2, 0.0);
        // Quarter turn about +Y takes +Z to +X.
        let p = orbit.model_matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_zoom_drives_camera_fovy() {
        let mut camera = Camera::looking_at_origin(Vec3::new(0.0, 7.0, 15.0), 1.0);
        let mut orbit = OrbitController::new(0.5);
        orbit.process_scroll(-5.0);
        orbit.update_camera(&mut camera);
        assert!((camera.fovy - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_view_projection_centers_target() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0), 0.5);
        let clip = camera.build_view_projection_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_uniform_is_std140_sized() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 80);
    }
}
