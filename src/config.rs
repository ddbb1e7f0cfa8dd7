//! Window, projection and pipeline settings for a demo.

use std::path::PathBuf;

/// Everything a demo needs to open its window and build its pipelines.
///
/// Shader paths are relative to the asset root (see [`crate::resources::asset_path`]).
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial top-left corner of the window in logical pixels.
    pub position: (i32, i32),
    pub clear_colour: wgpu::Color,
    pub depth_buffer: bool,
    pub cull_back_faces: bool,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "box-ngin".to_string(),
            width: 500,
            height: 500,
            position: (200, 200),
            clear_colour: wgpu::Color::BLACK,
            depth_buffer: true,
            cull_back_faces: true,
            fov_degrees: 45.0,
            znear: 1.0,
            zfar: 45.0,
            vertex_shader: PathBuf::from("shaders/vertex.wgsl"),
            fragment_shader: PathBuf::from("shaders/fragment.wgsl"),
        }
    }
}

impl DemoConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }

    pub fn with_depth_buffer(mut self, enabled: bool) -> Self {
        self.depth_buffer = enabled;
        self
    }

    pub fn with_back_face_culling(mut self, enabled: bool) -> Self {
        self.cull_back_faces = enabled;
        self
    }

    /// Vertical field of view and clip planes.
    pub fn with_perspective(mut self, fov_degrees: f32, znear: f32, zfar: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    pub fn with_shaders(
        mut self,
        vertex_shader: impl Into<PathBuf>,
        fragment_shader: impl Into<PathBuf>,
    ) -> Self {
        self.vertex_shader = vertex_shader.into();
        self.fragment_shader = fragment_shader.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tutorial_window() {
        let config = DemoConfig::default();
        assert_eq!((config.width, config.height), (500, 500));
        assert_eq!(config.position, (200, 200));
        assert!(config.depth_buffer);
        assert!(config.cull_back_faces);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = DemoConfig::default()
            .with_title("wedges")
            .with_perspective(60.0, 0.5, 3.0)
            .with_depth_buffer(false);
        assert_eq!(config.title, "wedges");
        assert_eq!(config.fov_degrees, 60.0);
        assert_eq!(config.znear, 0.5);
        assert_eq!(config.zfar, 3.0);
        assert!(!config.depth_buffer);
        assert_eq!(config.vertex_shader, PathBuf::from("shaders/vertex.wgsl"));
    }
}
