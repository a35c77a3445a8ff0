//! Core engine implementation

use crate::{
    application::{AppError, AppEvent, Application},
    config::WindowConfig,
    foundation::time::Timer,
    render::{Window, WindowError},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the window (and with it the GL context) and the frame timer, and
/// drives the render loop.
pub struct Engine {
    /// Window host and GL context
    window: Window,

    /// Frame timing
    timer: Timer,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create the window and GL context
    pub fn new(config: &WindowConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let window = Window::new(config)?;
        let timer = Timer::new(window.time());

        Ok(Self {
            window,
            timer,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Any startup failure is fatal. `cleanup` runs whether the loop ends
    /// normally or with an error, so GL resources are released before the
    /// context goes away.
    pub fn run<T: Application>(config: &WindowConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        let result = app
            .initialize(&mut engine)
            .map_err(|source| EngineError::Application { phase: "initialization", source })
            .and_then(|()| {
                log::info!("Starting main loop...");
                engine.main_loop(app)
            });

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        result
    }

    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while self.running && !self.window.should_close() {
            let delta_time = self.timer.tick(self.window.time());

            // Collect events to avoid borrow checker issues
            let events: Vec<AppEvent> = self
                .window
                .flush_events()
                .filter_map(|(_, event)| AppEvent::from_window_event(&event))
                .collect();
            for event in events {
                app.handle_event(self, event)
                    .map_err(|source| EngineError::Application { phase: "event", source })?;
            }

            self.window.clear();

            app.update(self, delta_time)
                .map_err(|source| EngineError::Application { phase: "update", source })?;
            app.render(self)
                .map_err(|source| EngineError::Application { phase: "render", source })?;

            self.window.swap_buffers();
            self.window.poll_events();
        }
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<(), AppError> {
        match event {
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::WindowResized { width, height } => {
                log::debug!("Framebuffer resized to {}x{}", width, height);
                self.window.set_viewport(width, height);
            }
        }

        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
        self.window.set_should_close(true);
    }

    /// Get the window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Get mutable access to the window
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Get the frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or GL context could not be created
    #[error("Initialization failed: {0}")]
    InitializationFailed(#[from] WindowError),

    /// The application returned an error
    #[error("Application error during {phase}: {source}")]
    Application {
        /// Lifecycle hook that failed
        phase: &'static str,
        /// Error returned by the application
        #[source]
        source: AppError,
    },
}
