use crate::{Mat4, Vec3};

/// Movement request produced by input handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person fly camera driven by Euler angles (degrees).
///
/// Horizontal movement is planar: walking forward while looking down keeps
/// the eye height constant. `Up`/`Down` move along the camera's up axis.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub sensitivity: f32,
    pub move_speed: f32,
    world_up: Vec3,
    yaw_deg: f32,
    pitch_deg: f32,
    fov_y_deg: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 1000.0;

    const PITCH_LIMIT_DEG: f32 = 89.0;
    const FOV_MIN_DEG: f32 = 1.0;
    const FOV_MAX_DEG: f32 = 89.0;

    /// Camera at `position`, looking down -Z at a 45 degree downward pitch.
    pub fn new(position: Vec3) -> Self {
        let mut cam = Self {
            position,
            sensitivity: 0.1,
            move_speed: 7.5,
            world_up: Vec3::Y,
            yaw_deg: -90.0,
            pitch_deg: -45.0,
            fov_y_deg: 45.0,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        cam.update_axes();
        cam
    }

    /// Apply a mouse delta (pixels); positive `dy` looks up.
    pub fn on_mouse_move(&mut self, dx: f32, dy: f32) {
        self.yaw_deg += dx * self.sensitivity;
        self.pitch_deg = (self.pitch_deg + dy * self.sensitivity)
            .clamp(-Self::PITCH_LIMIT_DEG, Self::PITCH_LIMIT_DEG);
        self.update_axes();
    }

    /// Scroll-wheel zoom: positive delta narrows the field of view.
    pub fn on_scroll(&mut self, delta: f32) {
        self.fov_y_deg = (self.fov_y_deg - delta).clamp(Self::FOV_MIN_DEG, Self::FOV_MAX_DEG);
    }

    /// Advance the camera for one input tick.
    pub fn on_move(&mut self, dir: CameraMove, dt: f32) {
        let velocity = self.move_speed * dt;
        let height = self.position.y;
        match dir {
            CameraMove::Forward => {
                self.position += self.front * velocity;
                self.position.y = height;
            }
            CameraMove::Backward => {
                self.position -= self.front * velocity;
                self.position.y = height;
            }
            CameraMove::Right => {
                self.position += self.right * velocity;
                self.position.y = height;
            }
            CameraMove::Left => {
                self.position -= self.right * velocity;
                self.position.y = height;
            }
            CameraMove::Up => self.position += self.up * velocity,
            CameraMove::Down => self.position -= self.up * velocity,
        }
    }

    fn update_axes(&mut self) {
        let (yaw, pitch) = (self.yaw_deg.to_radians(), self.pitch_deg.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection with wgpu depth range (z in [0, 1]).
    #[inline]
    pub fn proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            aspect.max(1e-6),
            Self::Z_NEAR,
            Self::Z_FAR,
        )
    }

    #[inline]
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.proj(aspect) * self.view()
    }

    #[inline]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    #[inline]
    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    #[inline]
    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    #[inline]
    pub fn fov_y_deg(&self) -> f32 {
        self.fov_y_deg
    }
}
