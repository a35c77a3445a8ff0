//! Rendering module
//!
//! The camera and uniform seam are pure math and need no GL context. The
//! window, shader and mesh types wrap GLFW/OpenGL objects; build a [`Window`]
//! first, since it loads the GL function pointers the others call.

pub mod camera;
pub mod uniforms;
pub mod window;
pub mod shader;
pub mod mesh;

#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use uniforms::MatrixUniforms;
pub use window::{Window, WindowError};
pub use shader::{ShaderError, ShaderProgram, ShaderSources, ShaderStage};
pub use mesh::{Mesh, MeshData, MeshError};
