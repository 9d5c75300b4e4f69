//! Per-kind motion formulas.
//!
//! Every function here is a pure function of elapsed time and constant
//! parameters (spawn position, object index). Nothing accumulates between
//! frames, so any frame can be recomputed from scratch.

use crate::color::hsl;
use crate::constants::*;
use crate::objects::{euler_xyz, FloatParams, ObjectKind};
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Object-local motion: absolute position and Euler XYZ rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Wobble applied around the object by its float wrapper.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPose {
    pub offset_y: f32,
    pub rotation: Vec3,
}

impl FloatPose {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            euler_xyz(self.rotation),
            Vec3::new(0.0, self.offset_y, 0.0),
        )
    }
}

/// Kind-specific motion at elapsed time `t`.
pub fn motion(kind: &ObjectKind, t: f32, spawn: Vec3, star_period_sec: f32) -> Motion {
    use ObjectKind::*;
    let (position, rotation) = match kind {
        ParticleField => (spawn, Vec3::new(t * 0.02, t * 0.05, 0.0)),
        ExperienceNode { .. } => (spawn, Vec3::new(t * 0.3, t * 0.2, 0.0)),
        SkillSphere | Sparkles => (spawn, Vec3::ZERO),
        InteractiveGeometry(_) => (
            spawn + Vec3::new(0.0, (t * 2.0 + spawn.x).sin() * 0.5, 0.0),
            Vec3::new(t * 0.3, t * 0.5, t * 0.2),
        ),
        AnimatedRings => (spawn, Vec3::new(t * 0.1, t * 0.15, 0.0)),
        Dna => (spawn, Vec3::new(0.0, t * 0.3, 0.0)),
        GeometricCluster => (spawn, Vec3::new(t * 0.2, t * 0.3, 0.0)),
        CrystalFormation => (spawn, Vec3::new(0.0, t * 0.4, (t * 0.5).sin() * 0.1)),
        AbstractRing => (spawn, Vec3::new(t * 0.4, t * 0.3, 0.0)),
        Spaceship => (
            spawn + Vec3::new((t * 0.5).sin() * 0.3, 0.0, (t * 0.3).cos() * 0.2),
            Vec3::new(0.0, t * 0.2, 0.0),
        ),
        Rocket => (
            spawn + Vec3::new(0.0, (t * 2.0).sin() * 0.4, 0.0),
            Vec3::new(0.0, t * 0.1, 0.0),
        ),
        ShootingStar => {
            let tau = star_clock(t, star_period_sec);
            (star_position(spawn, tau), Vec3::new(0.0, 0.0, tau * 5.0))
        }
        Satellite => (
            spawn + Vec3::new((t * 0.3).sin() * 0.2, 0.0, (t * 0.3).cos() * 0.2),
            Vec3::new(0.0, t * 0.5, 0.0),
        ),
        Asteroid => (
            spawn + Vec3::new(0.0, (t * 0.5).sin() * 0.1, 0.0),
            Vec3::new(t * 0.3, t * 0.4, t * 0.2),
        ),
    };
    Motion { position, rotation }
}

/// Phase offset so neighbouring objects do not bob in lockstep.
#[inline]
pub fn float_phase(index: usize) -> f32 {
    index as f32 * FLOAT_PHASE_STEP
}

pub fn float_pose(params: &FloatParams, t: f32, index: usize) -> FloatPose {
    let phi = (t + float_phase(index)) / 4.0 * params.speed;
    let (s, c) = phi.sin_cos();
    let ri = params.rotation_intensity;
    FloatPose {
        offset_y: s / 10.0 * params.float_intensity,
        rotation: Vec3::new(c / 8.0 * ri, s / 8.0 * ri, s / 20.0 * ri),
    }
}

/// Flight time of a shooting star. A non-positive period disables looping.
#[inline]
pub fn star_clock(t: f32, period_sec: f32) -> f32 {
    if period_sec > 0.0 {
        t.rem_euclid(period_sec)
    } else {
        t
    }
}

#[inline]
pub fn star_position(spawn: Vec3, tau: f32) -> Vec3 {
    spawn - Vec3::from_array(SHOOTING_STAR_VELOCITY) * tau
}

/// Trail samples, newest first, each `TRAIL_SPACING_SEC` further back in time.
pub fn trail_positions(spawn: Vec3, tau: f32, out: &mut [Vec3; TRAIL_SAMPLES]) {
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = star_position(spawn, tau - i as f32 * TRAIL_SPACING_SEC);
    }
}

/// Position and colour of sparkle `i` around `centre`.
pub fn sparkle(centre: Vec3, t: f32, i: usize) -> (Vec3, Vec3) {
    let fi = i as f32;
    let angle = fi / SPARKLE_COUNT as f32 * TAU;
    let radius = 1.0 + (t * 2.0 + fi).sin() * 0.3;
    let height = (t * 3.0 + fi * 0.5).sin() * 0.5;
    let position = centre + Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
    let color = hsl((t * 0.1 + fi * 0.02).rem_euclid(1.0), 0.8, 0.7);
    (position, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_clock_wraps() {
        assert_eq!(star_clock(15.0, 14.0), 1.0);
        assert_eq!(star_clock(15.0, 0.0), 15.0);
    }

    #[test]
    fn trail_head_matches_star() {
        let spawn = Vec3::new(15.0, 8.0, 2.0);
        let mut trail = [Vec3::ZERO; TRAIL_SAMPLES];
        trail_positions(spawn, 3.0, &mut trail);
        assert_eq!(trail[0], star_position(spawn, 3.0));
    }
}
