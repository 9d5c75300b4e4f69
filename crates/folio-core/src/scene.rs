//! Per-frame scene update.
//!
//! The render driver owns a [`SceneGraph`]: an indexed array of pose records
//! plus optional point buffers. Each frame it hands the updater an explicit
//! [`UpdateContext`]; the updater writes straight into the record at each
//! object's index. A missing record means that object is skipped for the
//! frame, nothing more.

use crate::animation::{self, FloatPose, Motion};
use crate::camera::ScrollCamera;
use crate::constants::TRAIL_SAMPLES;
use crate::layout::SceneLayout;
use crate::objects::{DecorativeObject, Material, ObjectKind};
use crate::particles::{PointCloud, PointSpace};
use crate::scroll::{PointerPosition, ScrollProgress};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectPose {
    pub motion: Motion,
    pub float: FloatPose,
}

impl ObjectPose {
    pub fn at_rest(spawn: Vec3) -> Self {
        Self {
            motion: Motion {
                position: spawn,
                rotation: Vec3::ZERO,
            },
            float: FloatPose::default(),
        }
    }

    /// Object-to-world transform: float wrapper, then object motion, then scale.
    pub fn matrix(&self, scale: f32) -> Mat4 {
        self.float.matrix()
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(scale),
                crate::objects::euler_xyz(self.motion.rotation),
                self.motion.position,
            )
    }
}

pub struct SceneGraph {
    pub poses: Vec<ObjectPose>,
    pub points: Vec<Option<PointCloud>>,
}

/// Everything the updater reads or writes besides the scene graph.
pub struct UpdateContext<'a> {
    pub elapsed_sec: f32,
    pub dt_sec: f32,
    pub progress: ScrollProgress,
    pub pointer: PointerPosition,
    pub camera: &'a mut ScrollCamera,
}

/// Advance the camera and every object by one frame.
pub fn update_frame(layout: &SceneLayout, graph: &mut SceneGraph, ctx: &mut UpdateContext<'_>) {
    ctx.camera.step(ctx.progress, ctx.pointer, ctx.dt_sec);
    let star_period = layout.config.shooting_star_period_sec;
    for (index, object) in layout.objects.iter().enumerate() {
        update_object(object, index, ctx.elapsed_sec, star_period, graph);
    }
}

/// Recompute one object's record. Skips silently if the record is missing.
pub fn update_object(
    object: &DecorativeObject,
    index: usize,
    t: f32,
    star_period_sec: f32,
    graph: &mut SceneGraph,
) {
    let Some(pose) = graph.poses.get_mut(index) else {
        return;
    };
    pose.motion = animation::motion(&object.kind, t, object.spawn, star_period_sec);
    pose.float = object
        .float
        .map(|f| animation::float_pose(&f, t, index))
        .unwrap_or_default();

    let Some(Some(cloud)) = graph.points.get_mut(index) else {
        return;
    };
    match object.kind {
        ObjectKind::ShootingStar => {
            let tau = animation::star_clock(t, star_period_sec);
            let trail = <&mut [Vec3; TRAIL_SAMPLES]>::try_from(cloud.positions.as_mut_slice());
            if let Ok(trail) = trail {
                animation::trail_positions(object.spawn, tau, trail);
            }
        }
        ObjectKind::Sparkles => {
            for (i, (p, c)) in cloud
                .positions
                .iter_mut()
                .zip(cloud.colors.iter_mut())
                .enumerate()
            {
                (*p, *c) = animation::sparkle(object.spawn, t, i);
            }
        }
        _ => {}
    }
}

/// One mesh draw: which catalogue mesh, where, and with what material.
#[derive(Clone, Copy, Debug)]
pub struct MeshInstance {
    pub mesh: usize,
    pub model: Mat4,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointInstance {
    pub position: Vec3,
    pub size: f32,
    pub color: Vec3,
    pub opacity: f32,
}

impl SceneGraph {
    pub fn mesh_instances<'a>(
        &'a self,
        layout: &'a SceneLayout,
    ) -> impl Iterator<Item = MeshInstance> + 'a {
        layout
            .objects
            .iter()
            .zip(layout.part_meshes.iter())
            .enumerate()
            .filter_map(move |(i, (object, meshes))| {
                self.poses
                    .get(i)
                    .map(|pose| (object, meshes, pose.matrix(object.scale)))
            })
            .flat_map(|(object, meshes, world)| {
                object
                    .parts
                    .iter()
                    .zip(meshes.iter())
                    .map(move |(part, &mesh)| MeshInstance {
                        mesh,
                        model: world * part.local_matrix(),
                        material: part.material,
                    })
            })
    }

    pub fn point_instances<'a>(
        &'a self,
        layout: &'a SceneLayout,
    ) -> impl Iterator<Item = PointInstance> + 'a {
        self.points
            .iter()
            .enumerate()
            .filter_map(move |(i, cloud)| {
                let cloud = cloud.as_ref()?;
                let world = match cloud.space {
                    PointSpace::World => Mat4::IDENTITY,
                    PointSpace::Object => {
                        let scale = layout.objects.get(i)?.scale;
                        self.poses.get(i)?.matrix(scale)
                    }
                };
                Some((cloud, world))
            })
            .flat_map(|(cloud, world)| {
                cloud
                    .positions
                    .iter()
                    .zip(cloud.colors.iter())
                    .map(move |(p, c)| PointInstance {
                        position: world.transform_point3(*p),
                        size: cloud.size,
                        color: *c,
                        opacity: cloud.opacity,
                    })
            })
    }
}
