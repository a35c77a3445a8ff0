//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix builders the renderer
//! needs. All matrices follow OpenGL conventions: right-handed view space
//! looking down -Z, clip-space depth in [-1, 1], column-major storage.

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary axis (normalized internally)
    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4;

    /// Create a translation matrix
    fn translation(offset: Vec3) -> Mat4;

    /// Create an OpenGL perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4 {
        match Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Mat4::from_axis_angle(&axis, angle),
            None => Mat4::identity(),
        }
    }

    fn translation(offset: Vec3) -> Mat4 {
        Mat4::new_translation(&offset)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [1/(a·t)  0    0              0            ]
        //     [0        1/t  0              0            ]
        //     [0        0    (f+n)/(n-f)    2fn/(n-f)    ]
        //     [0        0    -1             0            ]
        // with t = tan(fov_y / 2)
        let tan_half_fovy = (fov_y * 0.5).tan();
        let depth = near - far;

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = (far + near) / depth;
        result[(2, 3)] = 2.0 * far * near / depth;
        result[(3, 2)] = -1.0;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), std::f32::consts::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::deg_to_rad(-90.0), -std::f32::consts::FRAC_PI_2, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let ours = Mat4::perspective(1.0, 4.0 / 3.0, 0.01, 1000.0);
        let reference = Mat4::new_perspective(4.0 / 3.0, 1.0, 0.01, 1000.0);

        assert_relative_eq!(ours, reference, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_maps_planes_to_ndc_depth() {
        let (near, far) = (0.5, 50.0);
        let projection = Mat4::perspective(1.0, 1.0, near, far);

        let near_clip = projection * Vec4::new(0.0, 0.0, -near, 1.0);
        let far_clip = projection * Vec4::new(0.0, 0.0, -far, 1.0);

        assert_relative_eq!(near_clip.z / near_clip.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far_clip.z / far_clip.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let rotated = Mat4::rotation_y(std::f32::consts::FRAC_PI_2)
            .transform_vector(&Vec3::new(0.0, 0.0, -1.0));

        assert_relative_eq!(rotated, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_axis_normalizes_input() {
        let angle = 0.7;
        let scaled = Mat4::rotation_axis(Vec3::new(2.0, 2.0, 0.0), angle);
        let unit = Mat4::rotation_axis(Vec3::new(1.0, 1.0, 0.0).normalize(), angle);

        assert_relative_eq!(scaled, unit, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_axis_zero_axis_is_identity() {
        assert_eq!(Mat4::rotation_axis(Vec3::zeros(), 1.0), Mat4::identity());
    }

    #[test]
    fn test_translation_moves_points() {
        let moved = Mat4::translation(Vec3::new(1.0, -2.0, 3.0))
            .transform_point(&Point3::new(1.0, 1.0, 1.0));

        assert_relative_eq!(moved, Point3::new(2.0, -1.0, 4.0), epsilon = EPSILON);
    }
}
