//! Point buffers: the static particle field and the per-frame trail and
//! sparkle rings.

use crate::color::hex;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

/// Coordinate space of a point buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSpace {
    /// Transformed by the owning object's pose every frame.
    Object,
    /// Already in world space; written directly by the updater.
    World,
}

#[derive(Clone, Debug)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub size: f32,
    pub opacity: f32,
    pub space: PointSpace,
}

impl PointCloud {
    fn uniform(count: usize, color: Vec3, size: f32, opacity: f32, space: PointSpace) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count],
            colors: vec![color; count],
            size,
            opacity,
            space,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Uniformly scattered points in a cube of edge `extent` centred on the
/// origin. The same seed always yields the same field.
pub fn particle_field(count: usize, extent: f32, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cloud = PointCloud::uniform(
        count,
        hex(TEAL),
        PARTICLE_SIZE,
        PARTICLE_OPACITY,
        PointSpace::Object,
    );
    for p in cloud.positions.iter_mut() {
        *p = Vec3::new(
            (rng.gen::<f32>() - 0.5) * extent,
            (rng.gen::<f32>() - 0.5) * extent,
            (rng.gen::<f32>() - 0.5) * extent,
        );
    }
    log::debug!("[particles] field count={} extent={:.1} seed={:#x}", count, extent, seed);
    cloud
}

pub fn trail_buffer() -> PointCloud {
    PointCloud::uniform(TRAIL_SAMPLES, hex(TEAL), TRAIL_SIZE, TRAIL_OPACITY, PointSpace::World)
}

pub fn sparkle_buffer() -> PointCloud {
    PointCloud::uniform(SPARKLE_COUNT, Vec3::ONE, SPARKLE_SIZE, SPARKLE_OPACITY, PointSpace::World)
}
