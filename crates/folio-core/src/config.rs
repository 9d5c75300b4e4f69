//! Scene configuration.
//!
//! Everything tunable at startup lives in [`SceneConfig`]. Defaults reproduce
//! the look of the portfolio page; `validate` catches values that would make
//! the camera diverge or the particle field degenerate.

use crate::constants::*;
use crate::error::SceneError;

/// How the camera converts its smoothing factor into a per-frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SmoothingMode {
    /// Fixed fraction of the remaining distance per rendered frame.
    /// Faster displays converge faster.
    PerFrame { factor: f32 },
    /// Factor is defined at `reference_fps`; each frame applies
    /// `1 - (1 - factor)^(dt * reference_fps)`.
    TimeScaled { factor: f32, reference_fps: f32 },
}

impl SmoothingMode {
    /// Frame-rate independent smoothing tuned at `CAMERA_REFERENCE_FPS`.
    pub fn time_scaled(factor: f32) -> Self {
        SmoothingMode::TimeScaled {
            factor,
            reference_fps: CAMERA_REFERENCE_FPS,
        }
    }

    /// Fraction of the remaining distance to cover this frame, in [0, 1].
    pub fn alpha(&self, dt_sec: f32) -> f32 {
        match *self {
            SmoothingMode::PerFrame { factor } => factor.clamp(0.0, 1.0),
            SmoothingMode::TimeScaled {
                factor,
                reference_fps,
            } => {
                let frames = (dt_sec * reference_fps).max(0.0);
                (1.0 - (1.0 - factor.clamp(0.0, 1.0)).powf(frames)).clamp(0.0, 1.0)
            }
        }
    }

    fn factor(&self) -> f32 {
        match *self {
            SmoothingMode::PerFrame { factor } | SmoothingMode::TimeScaled { factor, .. } => factor,
        }
    }
}

impl Default for SmoothingMode {
    fn default() -> Self {
        SmoothingMode::PerFrame {
            factor: CAMERA_SMOOTHING,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub smoothing: SmoothingMode,
    pub pointer_parallax: f32,
    pub fov_y_degrees: f32,
    pub particle_count: usize,
    pub particle_extent: f32,
    pub particle_seed: u64,
    pub shooting_star_period_sec: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingMode::default(),
            pointer_parallax: POINTER_PARALLAX,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            particle_count: PARTICLE_COUNT,
            particle_extent: PARTICLE_EXTENT,
            particle_seed: PARTICLE_SEED,
            shooting_star_period_sec: SHOOTING_STAR_PERIOD_SEC,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        let factor = self.smoothing.factor();
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(SceneError::SmoothingFactor(factor));
        }
        if let SmoothingMode::TimeScaled { reference_fps, .. } = self.smoothing {
            if !(reference_fps > 0.0) {
                return Err(SceneError::ReferenceFps(reference_fps));
            }
        }
        if !(self.particle_extent > 0.0) {
            return Err(SceneError::ParticleExtent(self.particle_extent));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(SceneError::FieldOfView(self.fov_y_degrees));
        }
        Ok(())
    }
}
