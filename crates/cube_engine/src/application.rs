//! Application trait and lifecycle management

use crate::engine::Engine;
use crate::render::{MeshError, ShaderError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait and hand it to [`Engine::run`]. Every hook runs on the
/// thread that owns the GL context.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the window and GL context exist. Create shaders and
    /// upload meshes here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before rendering.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update with the framebuffer already cleared.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// Called for each translated window event before the frame's update.
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        // Default implementation forwards to engine
        engine.handle_event(event)
    }

    /// Cleanup the application
    ///
    /// Called once when the loop ends, while the GL context is still alive.
    /// Release GL resources here.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Shader loading, compilation or linking failed
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    /// Mesh validation or upload failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Framebuffer was resized
    WindowResized {
        /// New framebuffer width in pixels
        width: u32,
        /// New framebuffer height in pixels
        height: u32,
    },

    /// Window close requested (close button or Escape)
    WindowCloseRequested,
}

impl AppEvent {
    /// Translate a raw GLFW event; events the engine does not use yield `None`
    pub fn from_window_event(event: &glfw::WindowEvent) -> Option<Self> {
        use glfw::{Action, Key, WindowEvent};

        match *event {
            WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                Some(Self::WindowCloseRequested)
            }
            WindowEvent::FramebufferSize(width, height) => Some(Self::WindowResized {
                width: u32::try_from(width).unwrap_or(0),
                height: u32::try_from(height).unwrap_or(0),
            }),
            _ => None,
        }
    }
}
