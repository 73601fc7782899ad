//! Core types: math re-exports, Transform, fly Camera.

pub use glam::{Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::from_translation(vec3(1.0, 2.0, 3.0)).with_scale(2.0);
        // Last column = translation, diagonal = scale (no rotation).
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn camera_view_proj_is_finite() {
        let cam = camera::Camera::new(vec3(0.0, 8.0, 12.0));
        let vp = cam.view_proj(16.0 / 9.0);
        let a = vp.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn camera_pitch_is_clamped() {
        let mut cam = camera::Camera::new(Vec3::ZERO);
        cam.on_mouse_move(0.0, 100_000.0);
        assert!(cam.pitch_deg() <= 89.0);
        cam.on_mouse_move(0.0, -200_000.0);
        assert!(cam.pitch_deg() >= -89.0);
        // Front must stay a unit vector even at the clamp limits.
        assert!((cam.front().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn camera_fov_is_clamped() {
        let mut cam = camera::Camera::new(Vec3::ZERO);
        cam.on_scroll(1000.0);
        assert!(cam.fov_y_deg() >= 1.0);
        cam.on_scroll(-1000.0);
        assert!(cam.fov_y_deg() <= 89.0);
    }

    #[test]
    fn planar_movement_keeps_eye_height() {
        let mut cam = camera::Camera::new(vec3(0.0, 5.0, 0.0));
        // Pitched 45 degrees down by default; walking forward must not sink the eye.
        cam.on_move(camera::CameraMove::Forward, 1.0);
        cam.on_move(camera::CameraMove::Left, 1.0);
        assert!((cam.position.y - 5.0).abs() < 1e-6);
        cam.on_move(camera::CameraMove::Up, 1.0);
        assert!(cam.position.y > 5.0);
    }
}
