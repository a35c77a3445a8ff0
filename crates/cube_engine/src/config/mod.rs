//! # Configuration System
//!
//! Serializable settings for the window host, camera lens, shader sources and
//! the demo itself. Every struct defaults to the values the demo was tuned
//! with, so a missing config file simply yields the stock behaviour.
//!
//! Files are read and written through the [`Config`] trait, which picks TOML
//! or RON from the file extension.

use crate::foundation::math::Vec3;
use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value that parsed fine but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Lens Configuration
///
/// Perspective parameters for the camera. The field of view is stored in
/// degrees; the camera converts it when building the projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width divided by height
    pub aspect_ratio: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
}

impl LensConfig {
    /// Check that the lens produces a well-formed projection
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}", self.fov_degrees
            )));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "aspect_ratio must be positive, got {}", self.aspect_ratio
            )));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "near must be positive, got {}", self.near
            )));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "far ({}) must be greater than near ({})", self.far, self.near
            )));
        }
        Ok(())
    }
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect_ratio: 800.0 / 600.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// Camera lens plus its starting position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Projection parameters
    pub lens: LensConfig,
    /// World-space position the camera starts at
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lens: LensConfig::default(),
            position: Vec3::new(0.0, 0.0, -3.0),
        }
    }
}

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Wait for vertical sync when swapping buffers
    pub vsync: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// RGBA colour the framebuffer is cleared to every frame
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Spinning Cube".to_string(),
            vsync: true,
            resizable: true,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

/// # Shader Configuration
///
/// Paths to the GLSL sources compiled at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: String,
    /// Path to the fragment shader source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries the common shader locations so the demo can be launched from the
    /// workspace root or from inside the app crate.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        let shader_dirs = [
            "resources/shaders/",
            "shaders/",
            "../resources/shaders/",
            "./",
        ];

        let resolve = |file: &str| {
            shader_dirs
                .iter()
                .map(|dir| format!("{}{}", dir, file))
                .find(|candidate| Path::new(candidate).exists())
                .unwrap_or_else(|| format!("resources/shaders/{}", file))
        };

        Self {
            vertex_shader_path: resolve(base_vertex),
            fragment_shader_path: resolve(base_fragment),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("cube.vert", "cube.frag")
    }
}

/// Top-level settings for the spinning cube demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Cube spin rate about the (1, 1, 0) axis
    pub spin_degrees_per_second: f32,
    /// Yaw applied through the camera's rotation update before the first frame
    ///
    /// The camera starts at z = -3 looking down +Z in world terms, which puts
    /// the origin behind it; a half turn brings the cube into view.
    pub initial_yaw_degrees: f32,
    /// Window host settings
    pub window: WindowConfig,
    /// Camera lens and start position
    pub camera: CameraConfig,
    /// Shader source locations
    pub shaders: ShaderConfig,
}

impl DemoConfig {
    /// Load from `path` when it exists, otherwise fall back to defaults
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            log::info!("No config at '{}', using defaults", path);
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Load and validate the file at `path`
    ///
    /// Unlike [`DemoConfig::load_or_default`], a missing file is an error.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!("Loaded configuration from '{}'", path);
        Ok(config)
    }

    /// Validate every section that has constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !self.spin_degrees_per_second.is_finite() {
            return Err(ConfigError::Invalid("spin_degrees_per_second must be finite".into()));
        }
        if !self.initial_yaw_degrees.is_finite() {
            return Err(ConfigError::Invalid("initial_yaw_degrees must be finite".into()));
        }
        self.camera.lens.validate()
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            spin_degrees_per_second: 50.0,
            initial_yaw_degrees: 180.0,
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            shaders: ShaderConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_stock_demo() {
        let config = DemoConfig::default();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_relative_eq!(config.camera.lens.fov_degrees, 60.0);
        assert_relative_eq!(config.camera.lens.aspect_ratio, 800.0 / 600.0);
        assert_relative_eq!(config.camera.lens.near, 0.01);
        assert_relative_eq!(config.camera.lens.far, 1000.0);
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.0, -3.0));
        assert_relative_eq!(config.spin_degrees_per_second, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            spin_degrees_per_second = 90.0

            [camera.lens]
            fov_degrees = 75.0

            [shaders]
            vertex_shader_path = "a.vert"
            fragment_shader_path = "a.frag"
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.spin_degrees_per_second, 90.0);
        assert_relative_eq!(config.camera.lens.fov_degrees, 75.0);
        assert_relative_eq!(config.camera.lens.far, 1000.0);
        assert_eq!(config.window.title, "Spinning Cube");
        assert_eq!(config.shaders, ShaderConfig::new("a.vert", "a.frag"));
    }

    #[test]
    fn test_ron_lens() {
        let lens: LensConfig = ron::from_str("(fov_degrees: 90.0, far: 50.0)").unwrap();

        assert_relative_eq!(lens.fov_degrees, 90.0);
        assert_relative_eq!(lens.far, 50.0);
        assert_relative_eq!(lens.near, 0.01);
    }

    #[test]
    fn test_toml_camera_position() {
        let camera: CameraConfig = toml::from_str("position = [1.0, 2.0, 3.0]").unwrap();

        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.lens, LensConfig::default());
    }

    #[test]
    fn test_lens_validation_rejects_degenerate_values() {
        let bad = [
            LensConfig { fov_degrees: 0.0, ..LensConfig::default() },
            LensConfig { fov_degrees: 180.0, ..LensConfig::default() },
            LensConfig { aspect_ratio: 0.0, ..LensConfig::default() },
            LensConfig { near: -1.0, ..LensConfig::default() },
            LensConfig { far: 0.001, ..LensConfig::default() },
            LensConfig { far: f32::NAN, ..LensConfig::default() },
        ];

        for lens in bad {
            assert!(
                matches!(lens.validate(), Err(ConfigError::Invalid(_))),
                "lens should be rejected: {:?}", lens
            );
        }
    }

    #[test]
    fn test_zero_window_size_is_invalid() {
        let mut config = DemoConfig::default();
        config.window.height = 0;

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("cube_engine_config_test.yaml");
        std::fs::write(&path, "spin: 1").unwrap();

        let result = DemoConfig::load_from_file(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_then_load_toml_file() {
        let path = std::env::temp_dir().join("cube_engine_config_test.toml");
        let path_str = path.to_str().unwrap();

        let mut config = DemoConfig::default();
        config.window.title = "Saved".to_string();
        config.save_to_file(path_str).unwrap();

        let loaded = DemoConfig::load_or_default(path_str);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.unwrap().window.title, "Saved");
    }

    #[test]
    fn test_bundled_example_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/config/cube_demo.toml");

        let config = DemoConfig::load_or_default(path).unwrap();

        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.window, WindowConfig::default());
        assert_relative_eq!(config.initial_yaw_degrees, 180.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("definitely/not/here.toml").unwrap();

        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_load_requires_the_file() {
        let result = DemoConfig::load("definitely/not/here.toml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = std::env::temp_dir().join("cube_engine_config_invalid.toml");
        std::fs::write(&path, "[camera.lens]\nnear = 0.0\n").unwrap();

        let result = DemoConfig::load_or_default(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
