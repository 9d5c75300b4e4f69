//! Procedural meshes for the decorative objects.
//!
//! Every generator returns indexed triangles with per-vertex normals. The
//! platonic solids are flat shaded and oriented so normals point away from
//! the centre; curved surfaces carry smooth normals. Culling is disabled in
//! the renderer, so winding is not load-bearing for curved shapes.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        });
        i
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat-shaded triangle with its normal facing away from the origin.
    fn flat_face(&mut self, a: Vec3, mut b: Vec3, mut c: Vec3) {
        let mut n = (b - a).cross(c - a);
        if n.dot(a + b + c) < 0.0 {
            std::mem::swap(&mut b, &mut c);
            n = -n;
        }
        let ia = self.push(a, n);
        let ib = self.push(b, n);
        let ic = self.push(c, n);
        self.triangle(ia, ib, ic);
    }

    /// Unique undirected edges, as a line-list index buffer.
    ///
    /// Edges shared by two coplanar triangles are kept; the result matches
    /// the triangle wireframe a GPU would draw.
    pub fn edges(&self) -> Vec<u32> {
        // Flat-shaded faces duplicate vertices; dedup on position bits.
        let mut first: FnvHashMap<[u32; 3], u32> = FnvHashMap::default();
        let canonical: Vec<u32> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| *first.entry(v.position.map(f32::to_bits)).or_insert(i as u32))
            .collect();

        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut out = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let ka = canonical[a as usize];
                let kb = canonical[b as usize];
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                if seen.insert(key) {
                    out.push(a);
                    out.push(b);
                }
            }
        }
        out
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Closed set of primitive shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32, segments: u32 },
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    Capsule { radius: f32, length: f32, segments: u32 },
    Torus { radius: f32, tube: f32, radial: u32, tubular: u32 },
    TorusKnot { radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32 },
    Tetrahedron { radius: f32, detail: u32 },
    Octahedron { radius: f32, detail: u32 },
    Icosahedron { radius: f32, detail: u32 },
    Dodecahedron { radius: f32, detail: u32 },
}

/// Hashable identity of a [`Shape`], float parameters compared bitwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeKey(u8, [u32; 6]);

impl Shape {
    /// Cone with its apex at +y.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        Shape::Cylinder {
            radius_top: 0.0,
            radius_bottom: radius,
            height,
            segments,
        }
    }

    pub fn key(&self) -> ShapeKey {
        let b = f32::to_bits;
        match *self {
            Shape::Sphere { radius, segments } => ShapeKey(0, [b(radius), segments, 0, 0, 0, 0]),
            Shape::Box { width, height, depth } => {
                ShapeKey(1, [b(width), b(height), b(depth), 0, 0, 0])
            }
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => ShapeKey(2, [b(radius_top), b(radius_bottom), b(height), segments, 0, 0]),
            Shape::Capsule {
                radius,
                length,
                segments,
            } => ShapeKey(3, [b(radius), b(length), segments, 0, 0, 0]),
            Shape::Torus {
                radius,
                tube,
                radial,
                tubular,
            } => ShapeKey(4, [b(radius), b(tube), radial, tubular, 0, 0]),
            Shape::TorusKnot {
                radius,
                tube,
                tubular,
                radial,
                p,
                q,
            } => ShapeKey(5, [b(radius), b(tube), tubular, radial, p, q]),
            Shape::Tetrahedron { radius, detail } => ShapeKey(6, [b(radius), detail, 0, 0, 0, 0]),
            Shape::Octahedron { radius, detail } => ShapeKey(7, [b(radius), detail, 0, 0, 0, 0]),
            Shape::Icosahedron { radius, detail } => ShapeKey(8, [b(radius), detail, 0, 0, 0, 0]),
            Shape::Dodecahedron { radius, detail } => ShapeKey(9, [b(radius), detail, 0, 0, 0, 0]),
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            Shape::Sphere { radius, segments } => sphere(radius, segments),
            Shape::Box { width, height, depth } => cuboid(width, height, depth),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => cylinder(radius_top, radius_bottom, height, segments),
            Shape::Capsule {
                radius,
                length,
                segments,
            } => capsule(radius, length, segments),
            Shape::Torus {
                radius,
                tube,
                radial,
                tubular,
            } => torus(radius, tube, radial, tubular),
            Shape::TorusKnot {
                radius,
                tube,
                tubular,
                radial,
                p,
                q,
            } => torus_knot(radius, tube, tubular, radial, p, q),
            Shape::Tetrahedron { radius, detail } => polyhedron(&TETRA_V, &TETRA_I, radius, detail),
            Shape::Octahedron { radius, detail } => polyhedron(&OCTA_V, &OCTA_I, radius, detail),
            Shape::Icosahedron { radius, detail } => polyhedron(&ICOSA_V, &ICOSA_I, radius, detail),
            Shape::Dodecahedron { radius, detail } => {
                polyhedron(&DODECA_V, &DODECA_I, radius, detail)
            }
        }
    }
}

// ---------------- Curved surfaces ----------------

/// UV sphere with `segments` divisions both around and from pole to pole.
pub fn sphere(radius: f32, segments: u32) -> MeshData {
    let lon = segments.max(3);
    let lat = segments.max(2);
    let mut m = MeshData::default();
    for y in 0..=lat {
        let v = y as f32 / lat as f32;
        let theta = v * PI;
        for x in 0..=lon {
            let u = x as f32 / lon as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            m.push(n * radius, n);
        }
    }
    let row = lon + 1;
    for y in 0..lat {
        for x in 0..lon {
            let a = y * row + x;
            let b = a + row;
            if y != 0 {
                m.triangle(a, b, a + 1);
            }
            if y != lat - 1 {
                m.triangle(a + 1, b, b + 1);
            }
        }
    }
    m
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut m = MeshData::default();
    // (normal, u axis, v axis)
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let c = n * h;
        let du = u * h;
        let dv = v * h;
        let i0 = m.push(c - du - dv, n);
        let i1 = m.push(c + du - dv, n);
        let i2 = m.push(c + du + dv, n);
        let i3 = m.push(c - du + dv, n);
        m.triangle(i0, i1, i2);
        m.triangle(i0, i2, i3);
    }
    m
}

/// Revolve a profile of `(radius, y)` points around the y axis.
fn lathe(m: &mut MeshData, profile: &[(f32, f32)], segments: u32) {
    let seg = segments.max(3);
    let base = m.vertices.len() as u32;
    for (k, &(r, y)) in profile.iter().enumerate() {
        // Profile tangent from neighbours; the normal is its outward perpendicular.
        let prev = profile[k.saturating_sub(1)];
        let next = profile[(k + 1).min(profile.len() - 1)];
        let (dr, dy) = (next.0 - prev.0, next.1 - prev.1);
        let (nr, ny) = (dy, -dr);
        for s in 0..=seg {
            let a = s as f32 / seg as f32 * TAU;
            let (sin, cos) = a.sin_cos();
            let pos = Vec3::new(r * sin, y, r * cos);
            let normal = Vec3::new(nr * sin, ny, nr * cos);
            m.push(pos, normal);
        }
    }
    let row = seg + 1;
    for k in 0..(profile.len() as u32 - 1) {
        for s in 0..seg {
            let a = base + k * row + s;
            let b = a + row;
            m.triangle(a, b, a + 1);
            m.triangle(a + 1, b, b + 1);
        }
    }
}

fn disc(m: &mut MeshData, radius: f32, y: f32, up: bool, segments: u32) {
    if radius <= 0.0 {
        return;
    }
    let seg = segments.max(3);
    let n = if up { Vec3::Y } else { Vec3::NEG_Y };
    let centre = m.push(Vec3::new(0.0, y, 0.0), n);
    let first = m.vertices.len() as u32;
    for s in 0..=seg {
        let a = s as f32 / seg as f32 * TAU;
        m.push(Vec3::new(radius * a.sin(), y, radius * a.cos()), n);
    }
    for s in 0..seg {
        if up {
            m.triangle(centre, first + s, first + s + 1);
        } else {
            m.triangle(centre, first + s + 1, first + s);
        }
    }
}

pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let half = height * 0.5;
    let mut m = MeshData::default();
    lathe(&mut m, &[(radius_bottom, -half), (radius_top, half)], segments);
    disc(&mut m, radius_top, half, true, segments);
    disc(&mut m, radius_bottom, -half, false, segments);
    m
}

pub fn capsule(radius: f32, length: f32, segments: u32) -> MeshData {
    let cap_steps = (segments / 2).max(2);
    let half = length * 0.5;
    let mut profile = Vec::with_capacity(cap_steps as usize * 2 + 2);
    // bottom pole up to the equator, then the top hemisphere
    for k in 0..=cap_steps {
        let a = -PI / 2.0 + k as f32 / cap_steps as f32 * (PI / 2.0);
        profile.push((radius * a.cos(), -half + radius * a.sin()));
    }
    for k in 0..=cap_steps {
        let a = k as f32 / cap_steps as f32 * (PI / 2.0);
        profile.push((radius * a.cos(), half + radius * a.sin()));
    }
    let mut m = MeshData::default();
    lathe(&mut m, &profile, segments);
    m
}

pub fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let radial = radial.max(3);
    let tubular = tubular.max(3);
    let mut m = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let pos = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            m.push(pos, pos - centre);
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            m.triangle(a, b, d);
            m.triangle(b, c, d);
        }
    }
    m
}

fn knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu = q / p * u;
    let cs = qu.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu.sin() * 0.5,
    )
}

pub fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32) -> MeshData {
    let tubular = tubular.max(3);
    let radial = radial.max(3);
    let (pf, qf) = (p.max(1) as f32, q.max(1) as f32);
    let mut m = MeshData::default();
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = knot_curve(u, pf, qf, radius);
        let p2 = knot_curve(u + 0.01, pf, qf, radius);
        // Frenet-like frame from the curve tangent and the chord sum.
        let t = p2 - p1;
        let n0 = p2 + p1;
        let b = t.cross(n0).normalize_or_zero();
        let n = b.cross(t).normalize_or_zero();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            m.push(pos, pos - p1);
        }
    }
    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            m.triangle(a, b, d);
            m.triangle(b, c, d);
        }
    }
    m
}

// ---------------- Platonic solids ----------------

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

const TETRA_V: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];
const TETRA_I: [[u16; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

const OCTA_V: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_I: [[u16; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

const ICOSA_V: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];
const ICOSA_I: [[u16; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

const DODECA_V: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI],
    [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI],
    [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0],
    [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0],
    [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI],
    [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI],
    [PHI, 0.0, INV_PHI],
];
const DODECA_I: [[u16; 3]; 36] = [
    [3, 11, 7],
    [3, 7, 15],
    [3, 15, 13],
    [7, 19, 17],
    [7, 17, 6],
    [7, 6, 15],
    [17, 4, 8],
    [17, 8, 10],
    [17, 10, 6],
    [8, 0, 16],
    [8, 16, 2],
    [8, 2, 10],
    [0, 12, 1],
    [0, 1, 18],
    [0, 18, 16],
    [6, 10, 2],
    [6, 2, 13],
    [6, 13, 15],
    [2, 16, 18],
    [2, 18, 3],
    [2, 3, 13],
    [18, 1, 9],
    [18, 9, 11],
    [18, 11, 3],
    [4, 14, 12],
    [4, 12, 0],
    [4, 0, 8],
    [11, 9, 5],
    [11, 5, 19],
    [11, 19, 7],
    [19, 5, 14],
    [19, 14, 4],
    [19, 4, 17],
    [1, 12, 14],
    [1, 14, 5],
    [1, 5, 9],
];

/// Lerp that returns the endpoints exactly, so shared corners stay bit-equal.
#[inline]
fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a.lerp(b, t)
    }
}

/// Subdivide each face `detail` times, project onto the sphere of `radius`.
fn polyhedron(verts: &[[f32; 3]], faces: &[[u16; 3]], radius: f32, detail: u32) -> MeshData {
    let cols = detail as usize + 1;
    let mut m = MeshData::default();
    for face in faces {
        let a = Vec3::from_array(verts[face[0] as usize]);
        let b = Vec3::from_array(verts[face[1] as usize]);
        let c = Vec3::from_array(verts[face[2] as usize]);
        // grid[i][j]: row i from a toward c, j across toward b
        let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let aj = mix(a, c, i as f32 / cols as f32);
            let bj = mix(b, c, i as f32 / cols as f32);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    if rows == 0 {
                        aj
                    } else {
                        mix(aj, bj, j as f32 / rows as f32)
                    }
                })
                .map(|p| p.normalize() * radius)
                .collect();
            grid.push(row);
        }
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                if j % 2 == 0 {
                    m.flat_face(grid[i][k + 1], grid[i + 1][k], grid[i][k]);
                } else {
                    m.flat_face(grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]);
                }
            }
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octahedron_has_eight_faces() {
        let m = Shape::Octahedron { radius: 1.0, detail: 0 }.build();
        assert_eq!(m.triangle_count(), 8);
        assert_eq!(m.edges().len() / 2, 12);
    }

    #[test]
    fn detail_quadruples_faces_per_step() {
        let m = Shape::Icosahedron { radius: 1.0, detail: 1 }.build();
        assert_eq!(m.triangle_count(), 80);
    }

    #[test]
    fn cone_key_differs_from_cylinder() {
        let cone = Shape::cone(0.2, 0.4, 8);
        let cyl = Shape::Cylinder {
            radius_top: 0.2,
            radius_bottom: 0.2,
            height: 0.4,
            segments: 8,
        };
        assert_ne!(cone.key(), cyl.key());
        assert_eq!(cone.key(), Shape::cone(0.2, 0.4, 8).key());
    }
}
