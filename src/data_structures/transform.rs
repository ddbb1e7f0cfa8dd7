//! Matrix stack for composing per-object model-to-camera transforms.
//!
//! The stack always holds at least one matrix. Elementary transforms
//! right-multiply the top, so calling `translate` then `rotate` then `scale`
//! yields `Top * T * R * S`: a vertex is scaled first, then rotated about its
//! local origin, then translated.

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

/// A push/pop stack of 4x4 matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    matrices: Vec<Matrix4<f32>>,
}

impl TransformStack {
    /// Create a stack holding a single identity matrix.
    pub fn new() -> Self {
        Self {
            matrices: vec![Matrix4::identity()],
        }
    }

    /// The current composed matrix.
    pub fn top(&self) -> Matrix4<f32> {
        *self.top_ref()
    }

    /// Number of matrices on the stack. Never zero.
    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    /// Duplicate the top matrix.
    pub fn push(&mut self) -> &mut Self {
        let top = self.top();
        self.matrices.push(top);
        self
    }

    /// Discard the top matrix.
    ///
    /// # Panics
    ///
    /// Popping the last remaining matrix is a caller bug and panics.
    pub fn pop(&mut self) -> &mut Self {
        assert!(
            self.matrices.len() > 1,
            "TransformStack::pop would leave the stack empty"
        );
        self.matrices.pop();
        self
    }

    /// Drop everything and start over from a single identity matrix.
    pub fn reset(&mut self) {
        self.matrices.truncate(1);
        self.matrices[0] = Matrix4::identity();
    }

    /// Right-multiply the top by an arbitrary matrix.
    pub fn apply(&mut self, matrix: Matrix4<f32>) -> &mut Self {
        let top = self.top_mut();
        *top = *top * matrix;
        self
    }

    pub fn translate(&mut self, offset: Vector3<f32>) -> &mut Self {
        self.apply(Matrix4::from_translation(offset))
    }

    /// Rotate about `axis` (normalized here) by `angle_degrees`, right-handed.
    pub fn rotate(&mut self, axis: Vector3<f32>, angle_degrees: f32) -> &mut Self {
        if axis.magnitude2() == 0.0 {
            log::warn!("Ignoring rotation about a zero-length axis");
            return self;
        }
        self.apply(Matrix4::from_axis_angle(axis.normalize(), Deg(angle_degrees)))
    }

    /// Uniform scale.
    pub fn scale(&mut self, factor: f32) -> &mut Self {
        self.apply(Matrix4::from_scale(factor))
    }

    /// Push, run `f`, then pop, so changes made inside `f` do not leak.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let depth = self.depth();
        let result = f(self);
        debug_assert_eq!(depth, self.depth(), "unbalanced push/pop inside scope");
        self.pop();
        result
    }

    fn top_ref(&self) -> &Matrix4<f32> {
        // The stack is never empty: `pop` refuses to remove the last entry.
        &self.matrices[self.matrices.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f32> {
        let last = self.matrices.len() - 1;
        &mut self.matrices[last]
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
