// Scene layout, per-object formulas and the per-frame updater.

use folio_core::animation::{float_pose, motion, sparkle, star_clock};
use folio_core::constants::{SPARKLE_COUNT, TRAIL_SAMPLES};
use folio_core::{
    update_frame, update_object, DecorativeObject, GeometryKind, ObjectKind, PointerPosition,
    SceneConfig, SceneError, SceneLayout, ScrollCamera, ScrollProgress, SmoothingMode,
    UpdateContext,
};
use glam::Vec3;

fn all_kinds() -> Vec<ObjectKind> {
    use GeometryKind::*;
    use ObjectKind::*;
    vec![
        ParticleField,
        ExperienceNode {
            color: 0x64ffda,
            scale: 1.0,
        },
        SkillSphere,
        InteractiveGeometry(Dodecahedron),
        InteractiveGeometry(TorusKnot),
        InteractiveGeometry(Icosahedron),
        InteractiveGeometry(Octahedron),
        InteractiveGeometry(Tetrahedron),
        AnimatedRings,
        Dna,
        GeometricCluster,
        CrystalFormation,
        AbstractRing,
        Spaceship,
        Rocket,
        ShootingStar,
        Sparkles,
        Satellite,
        Asteroid,
    ]
}

fn bits(v: Vec3) -> [u32; 3] {
    v.to_array().map(f32::to_bits)
}

fn layout() -> SceneLayout {
    SceneLayout::portfolio(SceneConfig::default()).expect("default config is valid")
}

fn step(layout: &SceneLayout, graph: &mut folio_core::SceneGraph, cam: &mut ScrollCamera, t: f32) {
    let mut ctx = UpdateContext {
        elapsed_sec: t,
        dt_sec: 1.0 / 60.0,
        progress: ScrollProgress::new(0.3),
        pointer: PointerPosition::default(),
        camera: cam,
    };
    update_frame(layout, graph, &mut ctx);
}

#[test]
fn formulas_are_pure() {
    let spawn = Vec3::new(1.5, -2.0, 3.25);
    for kind in all_kinds() {
        for &t in &[0.0, 0.016, 1.0, 7.3, 123.456] {
            let a = motion(&kind, t, spawn, 14.0);
            let b = motion(&kind, t, spawn, 14.0);
            assert_eq!(bits(a.position), bits(b.position));
            assert_eq!(bits(a.rotation), bits(b.rotation));
        }
    }
}

#[test]
fn rotation_at_time_zero_is_base_orientation() {
    let spawn = Vec3::new(2.0, 1.0, -3.0);
    for kind in all_kinds() {
        let m = motion(&kind, 0.0, spawn, 14.0);
        assert_eq!(m.rotation, Vec3::ZERO, "{:?}", kind);
    }
}

#[test]
fn interactive_geometry_bobs_with_phase_from_spawn_x() {
    let spawn = Vec3::new(1.0, 2.0, 0.0);
    let m = motion(&ObjectKind::InteractiveGeometry(GeometryKind::Octahedron), 0.0, spawn, 0.0);
    assert!((m.position.y - (2.0 + 1.0f32.sin() * 0.5)).abs() < 1e-6);
    assert_eq!(m.position.x, 1.0);
}

#[test]
fn satellite_orbits_its_spawn() {
    let spawn = Vec3::new(-6.0, 6.0, -10.0);
    for i in 0..50 {
        let m = motion(&ObjectKind::Satellite, i as f32 * 0.37, spawn, 0.0);
        let offset = m.position - spawn;
        assert!((offset.length() - 0.2).abs() < 1e-4);
        assert_eq!(offset.y, 0.0);
    }
}

#[test]
fn shooting_star_restarts_each_period() {
    let spawn = Vec3::new(15.0, 8.0, 2.0);
    let a = motion(&ObjectKind::ShootingStar, 2.0, spawn, 14.0);
    let b = motion(&ObjectKind::ShootingStar, 16.0, spawn, 14.0);
    assert!((a.position - b.position).abs().max_element() < 1e-4);
    assert_eq!(star_clock(0.0, 14.0), 0.0);
    assert_eq!(motion(&ObjectKind::ShootingStar, 0.0, spawn, 14.0).position, spawn);
}

#[test]
fn float_wobble_is_small_and_phase_shifted() {
    let params = ObjectKind::SkillSphere.float_params().expect("sphere floats");
    let a = float_pose(&params, 1.0, 0);
    let b = float_pose(&params, 1.0, 1);
    assert_ne!(a, b);
    for i in 0..200 {
        let p = float_pose(&params, i as f32 * 0.1, 3);
        assert!(p.offset_y.abs() <= 0.1 * params.float_intensity + 1e-6);
        assert!(p.rotation.abs().max_element() <= params.rotation_intensity / 8.0 + 1e-6);
    }
}

#[test]
fn sparkle_ring_stays_near_centre() {
    let centre = Vec3::new(0.0, 5.0, -15.0);
    for i in 0..SPARKLE_COUNT {
        let (p, c) = sparkle(centre, 4.2, i);
        let flat = Vec3::new(p.x - centre.x, 0.0, p.z - centre.z).length();
        assert!((0.7 - 1e-4..=1.3 + 1e-4).contains(&flat));
        assert!((p.y - centre.y).abs() <= 0.5 + 1e-6);
        assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
    }
}

#[test]
fn layout_has_fixed_cardinality_and_shared_meshes() {
    let layout = layout();
    let mut graph = layout.new_graph();
    assert_eq!(graph.poses.len(), layout.len());
    assert_eq!(graph.points.len(), layout.len());

    // three skill spheres share one sphere mesh
    let sphere_meshes: Vec<usize> = layout
        .objects
        .iter()
        .zip(layout.part_meshes.iter())
        .filter(|(o, _)| o.kind == ObjectKind::SkillSphere)
        .map(|(_, m)| m[0])
        .collect();
    assert_eq!(sphere_meshes.len(), 3);
    assert!(sphere_meshes.windows(2).all(|w| w[0] == w[1]));

    let mut cam = ScrollCamera::default();
    for frame in 0..120 {
        step(&layout, &mut graph, &mut cam, frame as f32 / 60.0);
    }
    assert_eq!(graph.poses.len(), layout.len());
    assert_eq!(layout.objects.len(), layout.part_meshes.len());
}

#[test]
fn point_buffers_keep_fixed_length() {
    let layout = layout();
    let mut graph = layout.new_graph();
    let mut cam = ScrollCamera::default();
    let lengths = |g: &folio_core::SceneGraph| -> Vec<Option<usize>> {
        g.points.iter().map(|c| c.as_ref().map(|c| c.len())).collect()
    };
    let before = lengths(&graph);
    for frame in 0..300 {
        step(&layout, &mut graph, &mut cam, frame as f32 * 0.05);
    }
    assert_eq!(lengths(&graph), before);
    for (object, cloud) in layout.objects.iter().zip(graph.points.iter()) {
        match object.kind {
            ObjectKind::ShootingStar => {
                assert_eq!(cloud.as_ref().map(|c| c.len()), Some(TRAIL_SAMPLES))
            }
            ObjectKind::Sparkles => {
                assert_eq!(cloud.as_ref().map(|c| c.len()), Some(SPARKLE_COUNT))
            }
            ObjectKind::ParticleField => assert!(cloud.is_some()),
            _ => assert!(cloud.is_none()),
        }
    }
}

#[test]
fn update_is_recomputation_not_accumulation() {
    let layout = layout();
    let mut cam = ScrollCamera::default();

    let mut fresh = layout.new_graph();
    step(&layout, &mut fresh, &mut cam, 5.0);

    let mut warmed = layout.new_graph();
    for frame in 0..50 {
        step(&layout, &mut warmed, &mut cam, frame as f32 * 0.11);
    }
    step(&layout, &mut warmed, &mut cam, 5.0);

    assert_eq!(fresh.poses, warmed.poses);
    for (a, b) in fresh.points.iter().zip(warmed.points.iter()) {
        assert_eq!(
            a.as_ref().map(|c| c.positions.clone()),
            b.as_ref().map(|c| c.positions.clone())
        );
    }
}

#[test]
fn missing_records_are_skipped() {
    let layout = layout();
    let mut graph = layout.new_graph();
    graph.poses.truncate(3);
    for p in graph.points.iter_mut().skip(3) {
        *p = None;
    }
    let mut cam = ScrollCamera::default();
    step(&layout, &mut graph, &mut cam, 2.0);
    assert_eq!(graph.poses.len(), 3);
    // instances only come from objects that still have a record
    let drawn = graph.mesh_instances(&layout).count();
    let expected: usize = layout.objects.iter().take(3).map(|o| o.parts.len()).sum();
    assert_eq!(drawn, expected);

    // an object updated past the end of the graph is a no-op
    let extra = DecorativeObject::new(ObjectKind::Asteroid, Vec3::ZERO);
    update_object(&extra, 999, 1.0, 14.0, &mut graph);
    assert_eq!(graph.poses.len(), 3);
}

#[test]
fn instances_are_finite() {
    let layout = layout();
    let mut graph = layout.new_graph();
    let mut cam = ScrollCamera::default();
    step(&layout, &mut graph, &mut cam, 9.5);
    let meshes: Vec<_> = graph.mesh_instances(&layout).collect();
    assert!(!meshes.is_empty());
    assert!(meshes.iter().all(|m| m.mesh < layout.meshes.len()));
    assert!(meshes
        .iter()
        .all(|m| m.model.to_cols_array().iter().all(|v| v.is_finite())));
    let points: Vec<_> = graph.point_instances(&layout).collect();
    let expected: usize = graph.points.iter().flatten().map(|c| c.len()).sum();
    assert_eq!(points.len(), expected);
    assert!(points.iter().all(|p| p.position.is_finite()));
}

#[test]
fn particle_field_is_deterministic_per_seed() {
    let a = SceneLayout::portfolio(SceneConfig::default()).unwrap().new_graph();
    let b = SceneLayout::portfolio(SceneConfig::default()).unwrap().new_graph();
    let c = SceneLayout::portfolio(SceneConfig {
        particle_seed: 7,
        ..SceneConfig::default()
    })
    .unwrap()
    .new_graph();
    let field = |g: &folio_core::SceneGraph| g.points[0].as_ref().unwrap().positions.clone();
    assert_eq!(field(&a), field(&b));
    assert_ne!(field(&a), field(&c));
    assert!(field(&a).iter().all(|p| p.abs().max_element() <= 25.0));
}

#[test]
fn invalid_config_is_rejected() {
    let bad_factor = SceneConfig {
        smoothing: SmoothingMode::PerFrame { factor: 0.0 },
        ..SceneConfig::default()
    };
    assert_eq!(
        SceneLayout::portfolio(bad_factor).err(),
        Some(SceneError::SmoothingFactor(0.0))
    );

    let bad_fps = SceneConfig {
        smoothing: SmoothingMode::TimeScaled {
            factor: 0.05,
            reference_fps: 0.0,
        },
        ..SceneConfig::default()
    };
    assert_eq!(bad_fps.validate(), Err(SceneError::ReferenceFps(0.0)));

    let bad_extent = SceneConfig {
        particle_extent: -1.0,
        ..SceneConfig::default()
    };
    assert_eq!(bad_extent.validate(), Err(SceneError::ParticleExtent(-1.0)));
}
