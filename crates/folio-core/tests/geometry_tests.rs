// Procedural mesh generators.

use folio_core::geometry::{MeshData, Shape};
use folio_core::{SceneConfig, SceneLayout};
use glam::Vec3;

fn shapes() -> Vec<Shape> {
    vec![
        Shape::Sphere { radius: 1.0, segments: 16 },
        Shape::Box { width: 0.3, height: 0.2, depth: 0.4 },
        Shape::Cylinder {
            radius_top: 0.2,
            radius_bottom: 0.3,
            height: 1.5,
            segments: 8,
        },
        Shape::cone(0.15, 0.8, 6),
        Shape::Capsule { radius: 0.3, length: 1.2, segments: 8 },
        Shape::Torus { radius: 2.0, tube: 0.05, radial: 16, tubular: 100 },
        Shape::TorusKnot {
            radius: 0.6,
            tube: 0.15,
            tubular: 120,
            radial: 20,
            p: 3,
            q: 2,
        },
        Shape::Tetrahedron { radius: 1.0, detail: 0 },
        Shape::Octahedron { radius: 0.9, detail: 0 },
        Shape::Icosahedron { radius: 0.6, detail: 1 },
        Shape::Dodecahedron { radius: 0.4, detail: 0 },
    ]
}

fn check_mesh(shape: &Shape, m: &MeshData) {
    assert!(!m.vertices.is_empty(), "{:?}", shape);
    assert_eq!(m.indices.len() % 3, 0, "{:?}", shape);
    let n = m.vertices.len() as u32;
    assert!(m.indices.iter().all(|&i| i < n), "{:?}", shape);
    for v in &m.vertices {
        assert!(v.position.iter().all(|c| c.is_finite()), "{:?}", shape);
        let len = Vec3::from_array(v.normal).length();
        assert!((len - 1.0).abs() < 1e-4, "{:?} normal length {}", shape, len);
    }
    let edges = m.edges();
    assert_eq!(edges.len() % 2, 0);
    assert!(edges.iter().all(|&i| i < n));
    assert!(!edges.is_empty());
}

#[test]
fn every_shape_builds_a_valid_mesh() {
    for shape in shapes() {
        check_mesh(&shape, &shape.build());
    }
}

#[test]
fn scene_meshes_are_valid() {
    let layout = SceneLayout::portfolio(SceneConfig::default()).unwrap();
    assert!(!layout.meshes.is_empty());
    for shape in &layout.meshes {
        check_mesh(shape, &shape.build());
    }
}

#[test]
fn platonic_solids_have_expected_edges() {
    let cases = [
        (Shape::Tetrahedron { radius: 1.0, detail: 0 }, 4, 6),
        (Shape::Octahedron { radius: 1.0, detail: 0 }, 8, 12),
        (Shape::Icosahedron { radius: 1.0, detail: 0 }, 20, 30),
        // twelve pentagons, three triangles each
        (Shape::Dodecahedron { radius: 1.0, detail: 0 }, 36, 54),
    ];
    for (shape, faces, edges) in cases {
        let m = shape.build();
        assert_eq!(m.triangle_count(), faces, "{:?}", shape);
        assert_eq!(m.edges().len() / 2, edges, "{:?}", shape);
    }
}

#[test]
fn box_wireframe_includes_face_diagonals() {
    let m = Shape::Box { width: 1.0, height: 2.0, depth: 3.0 }.build();
    assert_eq!(m.triangle_count(), 12);
    assert_eq!(m.edges().len() / 2, 18);
}

#[test]
fn polyhedra_sit_on_their_sphere_and_face_outward() {
    for shape in [
        Shape::Tetrahedron { radius: 1.0, detail: 0 },
        Shape::Octahedron { radius: 0.9, detail: 0 },
        Shape::Icosahedron { radius: 0.6, detail: 1 },
        Shape::Dodecahedron { radius: 0.4, detail: 0 },
    ] {
        let radius = match shape {
            Shape::Tetrahedron { radius, .. }
            | Shape::Octahedron { radius, .. }
            | Shape::Icosahedron { radius, .. }
            | Shape::Dodecahedron { radius, .. } => radius,
            _ => unreachable!(),
        };
        let m = shape.build();
        for tri in m.indices.chunks_exact(3) {
            let p: Vec<Vec3> = tri
                .iter()
                .map(|&i| Vec3::from_array(m.vertices[i as usize].position))
                .collect();
            for q in &p {
                assert!((q.length() - radius).abs() < 1e-5);
            }
            let centroid = (p[0] + p[1] + p[2]) / 3.0;
            let normal = Vec3::from_array(m.vertices[tri[0] as usize].normal);
            assert!(normal.dot(centroid) > 0.0, "{:?}", shape);
        }
    }
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let m = Shape::Sphere { radius: 0.08, segments: 8 }.build();
    for v in &m.vertices {
        assert!((Vec3::from_array(v.position).length() - 0.08).abs() < 1e-5);
    }
}

#[test]
fn sphere_has_as_many_rings_as_segments() {
    let m = Shape::Sphere { radius: 1.0, segments: 16 }.build();
    assert_eq!(m.vertices.len(), 17 * 17);
    // pole rows are single triangles per segment
    assert_eq!(m.triangle_count(), 2 * 16 * 15);

    let bead = Shape::Sphere { radius: 0.08, segments: 8 }.build();
    let rings: std::collections::BTreeSet<i32> = bead
        .vertices
        .iter()
        .map(|v| (v.position[1] * 1e4).round() as i32)
        .collect();
    assert_eq!(rings.len(), 9);
}

#[test]
fn cylinder_spans_its_height() {
    let m = Shape::cone(0.2, 0.4, 8).build();
    let ys: Vec<f32> = m.vertices.iter().map(|v| v.position[1]).collect();
    let min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert!((min + 0.2).abs() < 1e-6);
    assert!((max - 0.2).abs() < 1e-6);
}
