//! # First-Person Camera
//!
//! A yaw/pitch camera that walks on the XZ plane. Orientation is stored as two
//! unbounded angles in degrees; the view matrix is rebuilt from them on every
//! call rather than cached.
//!
//! ## Conventions
//! - Yaw rotates about +Y, pitch about +X, both in degrees.
//! - Translation only looks at yaw, so moving forward while looking up keeps
//!   the camera at the same height.
//! - Neither angle is wrapped or clamped. Pitch beyond ±90° flips the image
//!   upside down; callers that want an FPS-style limit clamp before calling
//!   [`Camera::move_rotation`].

use crate::config::{CameraConfig, LensConfig};
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::render::uniforms::MatrixUniforms;

/// Uniform name the projection matrix is uploaded under
pub const PROJECTION_UNIFORM: &str = "projection";

/// Uniform name the view matrix is uploaded under
pub const VIEW_UNIFORM: &str = "view";

/// First-person camera with yaw/pitch orientation
///
/// `position`, `yaw` and `pitch` only change through [`Camera::move_position`]
/// and [`Camera::move_rotation`]. The lens is separate state and may be
/// updated when the viewport changes shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    lens: LensConfig,
}

impl Camera {
    /// Create a camera at `position` looking down +Z with no pitch
    pub fn new(position: Vec3, lens: LensConfig) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            lens,
        }
    }

    /// Create a camera from its configuration section
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.position, config.lens)
    }

    /// Perspective projection built from the lens
    ///
    /// Depends only on the lens, so repeated calls without a lens change
    /// return bit-identical matrices.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            utils::deg_to_rad(self.lens.fov_degrees),
            self.lens.aspect_ratio,
            self.lens.near,
            self.lens.far,
        )
    }

    /// World-to-camera transform
    ///
    /// Rotates by pitch about X, then by yaw about Y, then translates by the
    /// negated position: `Rx(pitch) * Ry(yaw) * T(-position)`. This is the
    /// inverse of placing the camera with translate-then-rotate.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::rotation_x(utils::deg_to_rad(self.pitch))
            * Mat4::rotation_y(utils::deg_to_rad(self.yaw))
            * Mat4::translation(-self.position)
    }

    /// Move in camera-local axes
    ///
    /// * `dx` - strafe; positive moves along the yaw - 90° heading
    /// * `dy` - vertical, applied directly to world Y
    /// * `dz` - forward/back along the current yaw heading
    ///
    /// Pitch is ignored. The offsets are applied as-is; scaling by frame time
    /// or speed is the caller's job.
    pub fn move_position(&mut self, dx: f32, dy: f32, dz: f32) {
        if dz != 0.0 {
            let heading = utils::deg_to_rad(self.yaw);
            self.position.x += -heading.sin() * dz;
            self.position.z += heading.cos() * dz;
        }
        if dx != 0.0 {
            let heading = utils::deg_to_rad(self.yaw - 90.0);
            self.position.x += -heading.sin() * dx;
            self.position.z += heading.cos() * dx;
        }
        self.position.y += dy;

        log::trace!("Camera position: {:?}", self.position);
    }

    /// Accumulate orientation deltas in degrees
    ///
    /// `dx` is added to yaw and `dy` to pitch. `_dz` is accepted so callers can
    /// pass a full 3-axis delta and is ignored; there is no roll.
    pub fn move_rotation(&mut self, dx: f32, dy: f32, _dz: f32) {
        self.yaw += dx;
        self.pitch += dy;

        log::trace!("Camera rotation: yaw {:.2}, pitch {:.2}", self.yaw, self.pitch);
    }

    /// Current world-space position (a copy)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Lens parameters used for the projection matrix
    pub fn lens(&self) -> &LensConfig {
        &self.lens
    }

    /// Update the aspect ratio after a viewport resize
    ///
    /// Zero, negative and non-finite ratios are ignored; a minimised window
    /// reports a 0x0 framebuffer.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            log::debug!("Ignoring aspect ratio {}", aspect);
            return;
        }
        // Use a larger threshold to prevent spam during window resize
        if (self.lens.aspect_ratio - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.lens.aspect_ratio, aspect);
        }
        self.lens.aspect_ratio = aspect;
    }

    /// Upload the projection and view matrices to the bound program
    pub fn upload<U: MatrixUniforms + ?Sized>(&self, target: &mut U) {
        target.set_uniform_mat4(PROJECTION_UNIFORM, &self.projection_matrix());
        target.set_uniform_mat4(VIEW_UNIFORM, &self.view_matrix());
    }
}

impl Default for Camera {
    /// Three units behind the origin with the stock 60° lens
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
