//! Spinning cube demo
//!
//! Opens a window, compiles the cube shaders, uploads the unit cube and spins
//! it about the (1, 1, 0) axis while the camera supplies view and projection.
//!
//! Usage: `cube_demo [config.toml|config.ron]`. Without an argument the demo
//! reads `cube_demo.toml` from the working directory if present; a path given
//! on the command line must exist.

use cube_engine::config::ConfigError;
use cube_engine::prelude::*;

const DEFAULT_CONFIG_PATH: &str = "cube_demo.toml";

/// Uniform name the cube's model matrix is uploaded under
const MODEL_UNIFORM: &str = "model";

struct CubeDemo {
    config: DemoConfig,
    camera: Camera,
    shader: Option<ShaderProgram>,
    mesh: Option<Mesh>,
    spin_degrees: f32,
}

impl CubeDemo {
    fn new(config: DemoConfig) -> Self {
        let camera = Camera::from_config(&config.camera);
        Self {
            config,
            camera,
            shader: None,
            mesh: None,
            spin_degrees: 0.0,
        }
    }
}

/// Width over height, or `None` for a minimised (zero-sized) framebuffer
#[allow(clippy::cast_precision_loss)]
fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

/// Model matrix for a cube spun `degrees` about the (1, 1, 0) axis
fn model_matrix(degrees: f32) -> Mat4 {
    Mat4::rotation_axis(Vec3::new(1.0, 1.0, 0.0), degrees.to_radians())
}

impl Application for CubeDemo {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing cube demo...");

        let (width, height) = engine.window().framebuffer_size();
        if let Some(aspect) = aspect_ratio(width, height) {
            self.camera.set_aspect_ratio(aspect);
        }
        self.camera.move_rotation(self.config.initial_yaw_degrees, 0.0, 0.0);

        let sources = ShaderSources::load(&self.config.shaders)?;
        self.shader = Some(ShaderProgram::from_sources(&sources)?);
        self.mesh = Some(Mesh::upload(&MeshData::cube())?);

        log::info!("Cube demo ready");
        Ok(())
    }

    fn update(&mut self, _engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.spin_degrees += delta_time * self.config.spin_degrees_per_second;
        Ok(())
    }

    fn render(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        let (Some(shader), Some(mesh)) = (self.shader.as_mut(), self.mesh.as_ref()) else {
            return Err(AppError::Custom("render called before initialize".to_string()));
        };

        shader.bind();
        self.camera.upload(shader);
        shader.set_uniform_mat4(MODEL_UNIFORM, &model_matrix(self.spin_degrees));
        mesh.draw();
        shader.unbind();

        log::trace!("Rendered cube at {:.1} degrees", self.spin_degrees);
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        if let AppEvent::WindowResized { width, height } = event {
            if let Some(aspect) = aspect_ratio(width, height) {
                self.camera.set_aspect_ratio(aspect);
            }
        }
        engine.handle_event(event)
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!("Releasing cube demo resources");
        self.mesh = None;
        self.shader = None;
    }
}

/// Install the `env_logger` backend, `Info` unless `RUST_LOG` says otherwise
fn init_logging() -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.try_init()
}

/// An explicit path must load; the implicit default may be absent
fn load_config(explicit_path: Option<&str>) -> Result<DemoConfig, ConfigError> {
    match explicit_path {
        Some(path) => DemoConfig::load(path),
        None => DemoConfig::load_or_default(DEFAULT_CONFIG_PATH),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config_arg = std::env::args().nth(1);
    let config = load_config(config_arg.as_deref()).map_err(|e| {
        log::error!(
            "Failed to load configuration '{}': {}",
            config_arg.as_deref().unwrap_or(DEFAULT_CONFIG_PATH),
            e
        );
        e
    })?;

    log::info!("Starting spinning cube demo");
    let window_config = config.window.clone();
    let mut app = CubeDemo::new(config);

    match Engine::run(&window_config, &mut app) {
        Ok(()) => {
            log::info!("Cube demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Cube demo failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_matrix_spins_about_diagonal_axis() {
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let model = model_matrix(73.0);

        let rotated = model.transform_vector(&axis);
        assert!((rotated - axis).norm() < 1e-5);
    }

    #[test]
    fn test_model_matrix_is_identity_at_rest() {
        assert!((model_matrix(0.0) - Mat4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let result = load_config(Some("no/such/cube_demo.toml"));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_aspect_ratio_skips_minimised_framebuffer() {
        assert_eq!(aspect_ratio(800, 600), Some(800.0 / 600.0));
        assert_eq!(aspect_ratio(0, 600), None);
        assert_eq!(aspect_ratio(800, 0), None);
    }

    #[test]
    fn test_logger_installs_once() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_err());
    }

    #[test]
    fn test_new_demo_uses_configured_camera() {
        let demo = CubeDemo::new(DemoConfig::default());

        assert_eq!(demo.camera.position(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(demo.camera.yaw(), 0.0);
        assert!(demo.shader.is_none() && demo.mesh.is_none());
    }
}
