//! Window management using GLFW
//!
//! Owns the OS window and its OpenGL 3.2 core context. Creating a [`Window`]
//! also loads the GL function pointers, so every other render type assumes a
//! live `Window` exists on the current thread.

use crate::config::WindowConfig;
use gl::types::GLsizei;
use glfw::Context;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// GLFW returned no window (usually no GL 3.2 core support)
    #[error("Window creation failed ({width}x{height} '{title}')")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested title
        title: String,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create the window, make its context current and load OpenGL
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        // Stay hidden until the context is fully set up
        glfw.window_hint(glfw::WindowHint::Visible(false));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 2));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed {
                width: config.width,
                height: config.height,
                title: config.title.clone(),
            })?;

        window.make_current();
        let interval = if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        // Set up event polling
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Enable(gl::DEPTH_TEST);
        }

        window.show();

        let mut created = Self { glfw, window, events };
        let (width, height) = created.framebuffer_size();
        created.set_viewport(width, height);

        log::info!(
            "Window '{}' created ({}x{}, framebuffer {}x{}, vsync {})",
            config.title, config.width, config.height, width, height, config.vsync
        );
        Ok(created)
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Pump the OS event queue
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain the events received since the last poll
    pub fn flush_events(&self) -> glfw::FlushedMessages<'_, (f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Seconds since GLFW was initialised
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Current framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }

    /// Resize the GL viewport to cover `width` x `height` pixels
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let (width, height) = viewport_extent(width, height);
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    /// Clear the colour and depth buffers
    pub fn clear(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::info!("Destroying window");
    }
}

/// Pixel sizes as GL viewport extents, saturating instead of wrapping
fn viewport_extent(width: u32, height: u32) -> (GLsizei, GLsizei) {
    (
        GLsizei::try_from(width).unwrap_or(GLsizei::MAX),
        GLsizei::try_from(height).unwrap_or(GLsizei::MAX),
    )
}
