// GPU instance packing. Pure data transforms, no wgpu types, so the host
// tests can include this file directly.

use folio_core::{Material, MeshInstance, PointInstance};
use glam::Vec3;

/// Per-instance vertex data for mesh draws. 112 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstanceRaw {
    pub model: [[f32; 4]; 4],
    /// Linear rgb, opacity.
    pub color: [f32; 4],
    /// Linear rgb pre-multiplied by intensity; w = 1 for unlit.
    pub emissive: [f32; 4],
    /// Metalness, roughness.
    pub surface: [f32; 4],
}

impl MeshInstanceRaw {
    pub fn new(instance: &MeshInstance) -> Self {
        let m = &instance.material;
        Self {
            model: instance.model.to_cols_array_2d(),
            color: m.color.extend(m.opacity).to_array(),
            emissive: (m.emissive * m.emissive_intensity)
                .extend(if m.unlit { 1.0 } else { 0.0 })
                .to_array(),
            surface: [m.metalness, m.roughness, 0.0, 0.0],
        }
    }
}

/// Per-instance vertex data for billboard points. 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstanceRaw {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl From<&PointInstance> for PointInstanceRaw {
    fn from(p: &PointInstance) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size,
            color: p.color.extend(p.opacity).to_array(),
        }
    }
}

/// Mesh pipelines, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeshPass {
    Opaque,
    Wireframe,
    Transparent,
}

impl MeshPass {
    pub fn of(material: &Material) -> Self {
        if material.wireframe {
            MeshPass::Wireframe
        } else if material.is_transparent() {
            MeshPass::Transparent
        } else {
            MeshPass::Opaque
        }
    }
}

/// A run of consecutive instances drawn with one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    pub pass: MeshPass,
    pub mesh: usize,
    pub first: u32,
    pub count: u32,
}

/// Sort instances into pass order and pack them for upload.
///
/// Opaque and wireframe instances are grouped by mesh. Transparent ones are
/// ordered far to near from `eye`; neighbours sharing a mesh still merge.
pub fn pack_meshes(
    instances: impl IntoIterator<Item = MeshInstance>,
    eye: Vec3,
    raw: &mut Vec<MeshInstanceRaw>,
    batches: &mut Vec<DrawBatch>,
) {
    raw.clear();
    batches.clear();

    let mut keyed: Vec<(MeshPass, usize, f32, MeshInstanceRaw)> = instances
        .into_iter()
        .map(|inst| {
            let depth = inst.model.w_axis.truncate().distance_squared(eye);
            (MeshPass::of(&inst.material), inst.mesh, depth, MeshInstanceRaw::new(&inst))
        })
        .collect();
    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| match a.0 {
            MeshPass::Transparent => b.2.total_cmp(&a.2),
            _ => a.1.cmp(&b.1),
        })
    });

    for (pass, mesh, _, inst) in keyed {
        let index = raw.len() as u32;
        raw.push(inst);
        match batches.last_mut() {
            Some(b) if b.pass == pass && b.mesh == mesh && b.first + b.count == index => {
                b.count += 1;
            }
            _ => batches.push(DrawBatch {
                pass,
                mesh,
                first: index,
                count: 1,
            }),
        }
    }
}

pub fn pack_points(
    instances: impl IntoIterator<Item = PointInstance>,
    raw: &mut Vec<PointInstanceRaw>,
) {
    raw.clear();
    raw.extend(instances.into_iter().map(|p| PointInstanceRaw::from(&p)));
}

/// Batches of one pass, in upload order.
pub fn batches_in(batches: &[DrawBatch], pass: MeshPass) -> impl Iterator<Item = &DrawBatch> {
    batches.iter().filter(move |b| b.pass == pass)
}

/// Capacity to allocate for `needed` instances: next power of two, never
/// below `floor`.
pub fn grown_capacity(needed: usize, floor: usize) -> usize {
    needed.max(floor).next_power_of_two()
}

