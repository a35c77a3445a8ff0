//! Uniform upload interface
//!
//! The camera and the demo only need one thing from a shader program: push a
//! named 4x4 matrix. Keeping that behind a trait lets the matrix plumbing be
//! tested without a GL context.

use crate::foundation::math::Mat4;

/// Destination for named matrix uniforms
///
/// Implementations must treat an unknown uniform name as a non-fatal warning
/// and skip the upload.
pub trait MatrixUniforms {
    /// Upload `value` to the uniform called `name`
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4);
}
