/// Window settings requested at startup.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowConfig {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            ..Self::default()
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CS 150 Template Project".to_owned(),
            width: 640,
            height: 480,
        }
    }
}

/// Background color the frame is cleared to.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
