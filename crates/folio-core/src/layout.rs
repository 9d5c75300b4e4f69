//! Fixed scene composition.
//!
//! The layout is built once: objects, their parts, and a deduplicated mesh
//! catalogue the renderer uploads up front. Objects are spread along the
//! camera path, which runs from z = +10 at the top of the page to z = -10 at
//! the bottom.

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::{Shape, ShapeKey};
use crate::objects::{DecorativeObject, GeometryKind, ObjectKind};
use crate::particles::{particle_field, sparkle_buffer, trail_buffer, PointCloud};
use crate::constants::{GOLD, ORANGE, TEAL};
use crate::scene::{ObjectPose, SceneGraph};
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

pub struct SceneLayout {
    pub objects: Vec<DecorativeObject>,
    /// Unique shapes; parts refer to them by index.
    pub meshes: Vec<Shape>,
    /// `part_meshes[object][part]` is an index into `meshes`.
    pub part_meshes: Vec<SmallVec<[usize; 4]>>,
    pub config: SceneConfig,
}

impl SceneLayout {
    pub fn new(config: SceneConfig, placements: &[(ObjectKind, Vec3)]) -> Result<Self, SceneError> {
        config.validate()?;
        let objects: Vec<DecorativeObject> = placements
            .iter()
            .map(|&(kind, spawn)| DecorativeObject::new(kind, spawn))
            .collect();

        let mut ids: FnvHashMap<ShapeKey, usize> = FnvHashMap::default();
        let mut meshes = Vec::new();
        let part_meshes: Vec<SmallVec<[usize; 4]>> = objects
            .iter()
            .map(|obj| {
                obj.parts
                    .iter()
                    .map(|part| {
                        *ids.entry(part.shape.key()).or_insert_with(|| {
                            meshes.push(part.shape);
                            meshes.len() - 1
                        })
                    })
                    .collect()
            })
            .collect();

        log::info!(
            "[scene] layout objects={} meshes={}",
            objects.len(),
            meshes.len()
        );
        Ok(Self {
            objects,
            meshes,
            part_meshes,
            config,
        })
    }

    pub fn portfolio(config: SceneConfig) -> Result<Self, SceneError> {
        Self::new(config, &portfolio_placements())
    }

    /// Allocate the render driver's records: one pose per object and the
    /// point buffers of point-bearing kinds.
    pub fn new_graph(&self) -> SceneGraph {
        let poses = self
            .objects
            .iter()
            .map(|o| ObjectPose::at_rest(o.spawn))
            .collect();
        let points = self
            .objects
            .iter()
            .map(|o| self.point_buffer(&o.kind))
            .collect();
        SceneGraph { poses, points }
    }

    fn point_buffer(&self, kind: &ObjectKind) -> Option<PointCloud> {
        match kind {
            ObjectKind::ParticleField => Some(particle_field(
                self.config.particle_count,
                self.config.particle_extent,
                self.config.particle_seed,
            )),
            ObjectKind::ShootingStar => Some(trail_buffer()),
            ObjectKind::Sparkles => Some(sparkle_buffer()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// The page's object set.
pub fn portfolio_placements() -> Vec<(ObjectKind, Vec3)> {
    use GeometryKind::*;
    use ObjectKind::*;
    vec![
        (ParticleField, Vec3::ZERO),
        (AnimatedRings, Vec3::new(0.0, 0.0, -5.0)),
        // hero
        (Spaceship, Vec3::new(-3.5, 2.5, 5.0)),
        (Asteroid, Vec3::new(3.0, -1.0, 6.0)),
        (ShootingStar, Vec3::new(15.0, 8.0, 2.0)),
        (SkillSphere, Vec3::new(3.5, 2.0, 3.5)),
        (InteractiveGeometry(Octahedron), Vec3::new(5.0, -2.0, 3.0)),
        (ExperienceNode { color: TEAL, scale: 1.0 }, Vec3::new(-4.0, 1.5, 2.0)),
        // about / skills
        (InteractiveGeometry(Dodecahedron), Vec3::new(-6.0, 3.0, -1.0)),
        (Asteroid, Vec3::new(-4.0, -3.5, 0.0)),
        (ExperienceNode { color: ORANGE, scale: 1.2 }, Vec3::new(4.0, -1.0, -2.0)),
        (SkillSphere, Vec3::new(-5.0, 0.0, -3.0)),
        (AbstractRing, Vec3::new(0.0, -4.0, -4.0)),
        // projects
        (GeometricCluster, Vec3::new(-7.0, 1.0, -6.0)),
        (InteractiveGeometry(TorusKnot), Vec3::new(6.0, 1.0, -6.0)),
        (ShootingStar, Vec3::new(20.0, 11.0, -8.0)),
        (ExperienceNode { color: GOLD, scale: 0.8 }, Vec3::new(-3.0, -2.0, -8.0)),
        (Dna, Vec3::new(7.0, 4.0, -10.0)),
        (Satellite, Vec3::new(-6.0, 6.0, -10.0)),
        (SkillSphere, Vec3::new(2.0, -3.0, -10.0)),
        // contact
        (InteractiveGeometry(Icosahedron), Vec3::new(-2.0, 7.0, -12.0)),
        (Rocket, Vec3::new(6.0, 3.0, -12.0)),
        (CrystalFormation, Vec3::new(4.0, 7.0, -14.0)),
        (InteractiveGeometry(Tetrahedron), Vec3::new(-5.0, 2.0, -14.0)),
        (Sparkles, Vec3::new(0.0, 5.0, -15.0)),
        (Asteroid, Vec3::new(8.0, 6.0, -16.0)),
    ]
}
