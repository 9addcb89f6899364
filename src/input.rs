use crate::camera::OrbitController;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

/// Pixels per scroll "line" for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

/// `true` for the key press that asks the program to quit.
pub fn is_close_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        }
    )
}

/// Wheel movement in lines, positive away from the user.
pub fn scroll_lines(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => *y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

pub struct InputHandler {
    pub orbit: OrbitController,
}

impl InputHandler {
    pub fn new(zoom_angle: f32) -> Self {
        Self {
            orbit: OrbitController::new(zoom_angle),
        }
    }

    /// Returns `true` if the event was consumed by the orbit controls.
    pub fn process_input(&mut self, event: &WindowEvent, window: &Window) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if self.process_left_button(*state) {
                    grab_cursor(window);
                } else {
                    release_cursor(window);
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.orbit.process_scroll(scroll_lines(delta));
                true
            }
            _ => false,
        }
    }

    /// Starts or ends a drag; returns whether a drag is now active.
    pub fn process_left_button(&mut self, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => self.orbit.begin_drag(),
            ElementState::Released => self.orbit.end_drag(),
        }
        self.orbit.is_dragging()
    }

    /// Raw device motion, unaffected by the cursor hitting the window edge.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) -> bool {
        self.orbit.process_mouse(delta.0, delta.1)
    }
}

fn grab_cursor(window: &Window) {
    // Locked is unbounded like a disabled cursor; not every platform has it.
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        log::debug!("Cursor grab unavailable: {err}");
    }
    window.set_cursor_visible(false);
}

fn release_cursor(window: &Window) {
    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        log::debug!("Cursor release failed: {err}");
    }
    window.set_cursor_visible(true);
}
