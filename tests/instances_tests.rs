// Host-side tests for GPU instance packing.

#![allow(dead_code)]
mod instances {
    include!("../src/render/instances.rs");
}

use folio_core::{Material, MeshInstance, PointInstance};
use glam::{Mat4, Vec3};
use instances::*;

fn at(mesh: usize, position: Vec3, material: Material) -> MeshInstance {
    MeshInstance {
        mesh,
        model: Mat4::from_translation(position),
        material,
    }
}

fn solid() -> Material {
    Material::standard(0x8a2be2, 0x8a2be2, 0.5, 0.7, 0.2)
}

fn glass() -> Material {
    solid().with_opacity(0.45)
}

fn pack(list: Vec<MeshInstance>, eye: Vec3) -> (Vec<MeshInstanceRaw>, Vec<DrawBatch>) {
    let mut raw = Vec::new();
    let mut batches = Vec::new();
    pack_meshes(list, eye, &mut raw, &mut batches);
    (raw, batches)
}

#[test]
fn raw_layouts_match_the_shader() {
    assert_eq!(std::mem::size_of::<MeshInstanceRaw>(), 112);
    assert_eq!(std::mem::size_of::<PointInstanceRaw>(), 32);
}

#[test]
fn materials_choose_their_pass() {
    assert_eq!(MeshPass::of(&solid()), MeshPass::Opaque);
    assert_eq!(MeshPass::of(&glass()), MeshPass::Transparent);
    assert_eq!(MeshPass::of(&glass().with_wireframe()), MeshPass::Wireframe);
    assert_eq!(MeshPass::of(&Material::unlit(0xffffff, 1.0)), MeshPass::Opaque);
}

#[test]
fn unlit_flag_travels_in_emissive_w() {
    let lit = MeshInstanceRaw::new(&at(0, Vec3::ZERO, solid()));
    let unlit = MeshInstanceRaw::new(&at(0, Vec3::ZERO, Material::unlit(0xffffff, 0.6)));
    assert_eq!(lit.emissive[3], 0.0);
    assert_eq!(unlit.emissive[3], 1.0);
    assert!((unlit.color[3] - 0.6).abs() < 1e-6);
    assert_eq!(lit.surface[0], 0.7);
    assert_eq!(lit.surface[1], 0.2);
}

#[test]
fn same_mesh_instances_merge_into_one_batch() {
    let list = vec![
        at(1, Vec3::X, solid()),
        at(0, Vec3::Y, solid()),
        at(1, Vec3::Z, solid()),
        at(0, Vec3::NEG_X, solid()),
    ];
    let (raw, batches) = pack(list, Vec3::ZERO);
    assert_eq!(raw.len(), 4);
    assert_eq!(
        batches,
        vec![
            DrawBatch {
                pass: MeshPass::Opaque,
                mesh: 0,
                first: 0,
                count: 2
            },
            DrawBatch {
                pass: MeshPass::Opaque,
                mesh: 1,
                first: 2,
                count: 2
            },
        ]
    );
}

#[test]
fn passes_are_emitted_in_draw_order() {
    let list = vec![
        at(0, Vec3::ZERO, glass()),
        at(0, Vec3::ZERO, solid().with_wireframe()),
        at(0, Vec3::ZERO, solid()),
    ];
    let (_, batches) = pack(list, Vec3::new(0.0, 0.0, 10.0));
    let passes: Vec<MeshPass> = batches.iter().map(|b| b.pass).collect();
    assert_eq!(
        passes,
        vec![MeshPass::Opaque, MeshPass::Wireframe, MeshPass::Transparent]
    );
    assert_eq!(batches_in(&batches, MeshPass::Wireframe).count(), 1);
}

#[test]
fn transparent_instances_sort_far_to_near() {
    let eye = Vec3::new(0.0, 0.0, 10.0);
    let list = vec![
        at(0, Vec3::new(0.0, 0.0, 5.0), glass()),
        at(1, Vec3::new(0.0, 0.0, -20.0), glass()),
        at(0, Vec3::new(0.0, 0.0, -5.0), glass()),
    ];
    let (raw, batches) = pack(list, eye);
    let z: Vec<f32> = raw.iter().map(|r| r.model[3][2]).collect();
    assert_eq!(z, vec![-20.0, -5.0, 5.0]);
    // both mesh 0 instances end up adjacent and share a draw
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1].mesh, 0);
    assert_eq!(batches[1].count, 2);
}

#[test]
fn batches_cover_every_instance_once() {
    let list: Vec<MeshInstance> = (0..30)
        .map(|i| {
            let material = match i % 3 {
                0 => solid(),
                1 => glass(),
                _ => solid().with_wireframe(),
            };
            at(i % 4, Vec3::new(i as f32, 0.0, -(i as f32)), material)
        })
        .collect();
    let (raw, batches) = pack(list, Vec3::new(0.0, 0.0, 10.0));
    let mut next = 0;
    for b in &batches {
        assert_eq!(b.first, next);
        assert!(b.count > 0);
        next += b.count;
    }
    assert_eq!(next as usize, raw.len());
}

#[test]
fn packing_reuses_the_scratch_vectors() {
    let mut raw = Vec::new();
    let mut batches = Vec::new();
    pack_meshes(vec![at(0, Vec3::ZERO, solid()); 5], Vec3::Z, &mut raw, &mut batches);
    pack_meshes(vec![at(0, Vec3::ZERO, solid()); 2], Vec3::Z, &mut raw, &mut batches);
    assert_eq!(raw.len(), 2);
    assert_eq!(batches.len(), 1);

    let mut points = Vec::new();
    let p = PointInstance {
        position: Vec3::ONE,
        size: 0.1,
        color: Vec3::ONE,
        opacity: 0.5,
    };
    pack_points(vec![p; 3], &mut points);
    pack_points(vec![p], &mut points);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].color, [1.0, 1.0, 1.0, 0.5]);
    assert_eq!(points[0].size, 0.1);
}

#[test]
fn instance_capacity_grows_in_powers_of_two() {
    assert_eq!(grown_capacity(1, 128), 128);
    assert_eq!(grown_capacity(129, 128), 256);
    assert_eq!(grown_capacity(1000, 128), 1024);
    assert_eq!(grown_capacity(1024, 128), 1024);
}
