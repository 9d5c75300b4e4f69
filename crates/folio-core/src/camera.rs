//! Camera description and the scroll-driven camera rig.
//!
//! The rig eases its position toward a target derived from scroll progress.
//! Only the position is smoothed; the look-at point follows progress
//! directly.

use crate::config::SmoothingMode;
use crate::constants::*;
use crate::scroll::{PointerPosition, ScrollProgress};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// World-space right and up vectors of the view, used to face billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (right, up)
    }
}

/// Where the camera wants to be at a given scroll progress.
#[inline]
pub fn camera_target(progress: ScrollProgress) -> Vec3 {
    let p = progress.get();
    Vec3::new(
        (p * std::f32::consts::PI).sin() * CAMERA_SWAY_X,
        p * CAMERA_RISE_Y,
        CAMERA_START_Z - p * CAMERA_TRAVEL_Z,
    )
}

/// Point the camera looks at for a given progress and pointer offset.
#[inline]
pub fn look_at_point(progress: ScrollProgress, pointer: PointerPosition, parallax: f32) -> Vec3 {
    Vec3::new(
        pointer.x * parallax,
        progress.get() * CAMERA_LOOK_RISE_Y + pointer.y * parallax,
        0.0,
    )
}

/// One exponential smoothing step: move `current` toward `target` by `alpha`
/// of the remaining distance on every axis.
#[inline]
pub fn smooth_toward(current: Vec3, target: Vec3, alpha: f32) -> Vec3 {
    current + (target - current) * alpha
}

#[derive(Clone, Debug)]
pub struct ScrollCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub smoothing: SmoothingMode,
    pub pointer_parallax: f32,
}

impl ScrollCamera {
    pub fn new(smoothing: SmoothingMode, pointer_parallax: f32) -> Self {
        Self {
            position: camera_target(ScrollProgress::START),
            look_at: Vec3::ZERO,
            smoothing,
            pointer_parallax,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, progress: ScrollProgress, pointer: PointerPosition, dt_sec: f32) {
        let alpha = self.smoothing.alpha(dt_sec);
        self.position = smooth_toward(self.position, camera_target(progress), alpha);
        self.look_at = look_at_point(progress, pointer, self.pointer_parallax);
    }

    pub fn to_camera(&self, aspect: f32, fovy_radians: f32) -> Camera {
        Camera {
            eye: self.position,
            target: self.look_at,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Default for ScrollCamera {
    fn default() -> Self {
        Self::new(SmoothingMode::default(), POINTER_PARALLAX)
    }
}
