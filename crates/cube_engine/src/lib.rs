//! # Cube Engine
//!
//! A small OpenGL rendering core: a GLFW window host, GLSL program and static
//! mesh wrappers, and a yaw/pitch first-person camera.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cube_engine::prelude::*;
//!
//! struct MyApp {
//!     camera: Camera,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         self.camera.move_rotation(10.0 * delta_time, 0.0, 0.0);
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = MyApp { camera: Camera::default() };
//!     Engine::run(&WindowConfig::default(), &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError, AppEvent};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineError,
        foundation::math::{Vec3, Mat4, Mat4Ext},
        render::{Camera, MatrixUniforms, Mesh, MeshData, ShaderProgram, ShaderSources},
        config::{Config, DemoConfig, CameraConfig, LensConfig, ShaderConfig, WindowConfig},
    };
}
