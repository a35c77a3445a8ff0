//! Camera to shader-uniform integration tests
//!
//! Drives the camera through a few frames the way the render loop does and
//! checks what reaches the uniform interface.

use crate::config::{CameraConfig, LensConfig};
use crate::foundation::math::{Mat4, Point3, Vec3, Vec4};
use crate::render::camera::{Camera, PROJECTION_UNIFORM, VIEW_UNIFORM};
use crate::render::uniforms::mock::RecordingUniforms;
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_sends_projection_then_view() {
        let camera = Camera::default();
        let mut uniforms = RecordingUniforms::with_uniforms(&[PROJECTION_UNIFORM, VIEW_UNIFORM]);

        camera.upload(&mut uniforms);

        let names: Vec<&str> = uniforms.uploads.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["projection", "view"]);
        assert_eq!(uniforms.last("projection"), Some(&camera.projection_matrix()));
        assert_eq!(uniforms.last("view"), Some(&camera.view_matrix()));
    }

    #[test]
    fn test_missing_uniform_is_skipped_not_fatal() {
        let camera = Camera::default();
        let mut uniforms = RecordingUniforms::with_uniforms(&[VIEW_UNIFORM]);

        camera.upload(&mut uniforms);

        assert_eq!(uniforms.missing, ["projection"]);
        assert_eq!(uniforms.uploads.len(), 1);
        assert!(uniforms.last("view").is_some());
    }

    #[test]
    fn test_frame_updates_reach_uniforms() {
        let mut camera = Camera::from_config(&CameraConfig {
            lens: LensConfig::default(),
            position: Vec3::zeros(),
        });
        let mut uniforms = RecordingUniforms::with_uniforms(&[PROJECTION_UNIFORM, VIEW_UNIFORM]);

        // update, then read projection and view, once per frame
        for _ in 0..4 {
            camera.move_position(0.0, 0.0, 0.5);
            camera.upload(&mut uniforms);
        }

        assert_eq!(uniforms.uploads.len(), 8);
        let view = uniforms.last("view").unwrap();
        assert_relative_eq!(
            view.transform_point(&Point3::new(0.0, 0.0, 2.0)),
            Point3::origin(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_point_ahead_lands_inside_clip_volume() {
        let mut camera = Camera::default();
        camera.move_rotation(180.0, 0.0, 0.0);

        // The default camera sits at z = -3; after a half turn the origin is straight ahead
        let clip: Vec4 = camera.projection_matrix() * camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.xyz() / clip.w;

        assert!(clip.w > 0.0);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_view_inverts_camera_placement() {
        let mut camera = Camera::new(Vec3::new(3.0, -1.0, 2.0), LensConfig::default());
        camera.move_rotation(-40.0, 15.0, 0.0);

        let placement = Mat4::new_translation(&camera.position())
            * Mat4::from_axis_angle(&Vec3::y_axis(), (-camera.yaw()).to_radians())
            * Mat4::from_axis_angle(&Vec3::x_axis(), (-camera.pitch()).to_radians());

        assert_relative_eq!(camera.view_matrix() * placement, Mat4::identity(), epsilon = 1e-5);
    }
}
