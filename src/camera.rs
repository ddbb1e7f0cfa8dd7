//! Perspective projection.
//!
//! The projection is built the classic OpenGL way, with clip-space depth in
//! `[-1, 1]`. [`OPENGL_TO_WGPU_MATRIX`] remaps it to wgpu's `[0, 1]` depth range
//! when the matrix is uploaded.

use cgmath::{Deg, Matrix4, Rad, Zero};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    Rad::from(Deg(degrees)).0
}

/// `1 / tan(fov / 2)` for a vertical field of view in degrees.
pub fn frustum_scale(fov_degrees: f32) -> f32 {
    1.0 / (deg_to_rad(fov_degrees) / 2.0).tan()
}

/// Perspective projection with a fixed vertical field of view.
///
/// Resizing only touches the aspect term, so the vertical field of view is
/// preserved and the horizontal one follows the width/height ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    frustum_scale: f32,
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: Deg<f32>, znear: f32, zfar: f32) -> Self {
        Self::from_frustum_scale(frustum_scale(fovy.0), width, height, znear, zfar)
    }

    /// Use a fixed frustum scale instead of deriving it from a field of view.
    pub fn from_frustum_scale(
        frustum_scale: f32,
        width: u32,
        height: u32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        if znear == zfar {
            log::warn!("Near and far planes coincide at {znear}; depth will be degenerate");
        }
        let mut projection = Self {
            frustum_scale,
            aspect: 1.0,
            znear,
            zfar,
        };
        projection.resize(width, height);
        projection
    }

    /// Recompute the aspect term. Zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring projection resize to {width}x{height}");
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn frustum_scale(&self) -> f32 {
        self.frustum_scale
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// The perspective matrix in OpenGL conventions (`m[column][row]`).
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let (near, far) = (self.znear, self.zfar);
        let mut m = Matrix4::zero();
        m[0][0] = self.frustum_scale / self.aspect;
        m[1][1] = self.frustum_scale;
        m[2][2] = (far + near) / (near - far);
        m[3][2] = (2.0 * far * near) / (near - far);
        m[2][3] = -1.0;
        m
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_frustum_scale(1.0, 1, 1, 1.0, 3.0)
    }
}
