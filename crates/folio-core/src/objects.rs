//! Decorative object catalogue.
//!
//! An object is a fixed spawn position, a kind, an optional float wobble and
//! a small list of mesh parts in object space. Nothing here changes after
//! the scene is built; per-frame motion lives in [`crate::animation`].

use crate::color::hex;
use crate::constants::*;
use crate::geometry::Shape;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub wireframe: bool,
    /// Ignore lighting; colour is output as-is.
    pub unlit: bool,
}

impl Material {
    pub fn standard(
        color: u32,
        emissive: u32,
        intensity: f32,
        metalness: f32,
        roughness: f32,
    ) -> Self {
        Self {
            color: hex(color),
            emissive: hex(emissive),
            emissive_intensity: intensity,
            metalness,
            roughness,
            opacity: 1.0,
            wireframe: false,
            unlit: false,
        }
    }

    /// Self-coloured glow, the common case in this scene.
    pub fn glowing(color: u32, intensity: f32, metalness: f32, roughness: f32) -> Self {
        Self::standard(color, color, intensity, metalness, roughness)
    }

    pub fn unlit(color: u32, opacity: f32) -> Self {
        Self {
            unlit: true,
            ..Self::standard(color, 0x000000, 0.0, 0.0, 1.0).with_opacity(opacity)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One mesh of an object, placed in object space.
#[derive(Clone, Copy, Debug)]
pub struct Part {
    pub shape: Shape,
    pub offset: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub material: Material,
}

impl Part {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            material,
        }
    }

    pub fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            euler_xyz(self.rotation),
            self.offset,
        )
    }
}

#[inline]
pub fn euler_xyz(r: Vec3) -> Quat {
    Quat::from_euler(glam::EulerRot::XYZ, r.x, r.y, r.z)
}

/// Idle bob and sway around an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl FloatParams {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Dodecahedron,
    TorusKnot,
    Icosahedron,
    Octahedron,
    Tetrahedron,
}

/// Closed set of decorative object kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObjectKind {
    ParticleField,
    ExperienceNode { color: u32, scale: f32 },
    SkillSphere,
    InteractiveGeometry(GeometryKind),
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
}

impl ObjectKind {
    pub fn float_params(&self) -> Option<FloatParams> {
        use ObjectKind::*;
        match self {
            ParticleField | AnimatedRings | ShootingStar | Sparkles => None,
            ExperienceNode { .. } => Some(FloatParams::new(2.0, 0.5, 0.5)),
            SkillSphere => Some(FloatParams::new(3.0, 0.3, 0.8)),
            InteractiveGeometry(_) => Some(FloatParams::new(1.5, 0.8, 1.0)),
            Dna => Some(FloatParams::new(2.0, 0.3, 0.5)),
            GeometricCluster => Some(FloatParams::new(1.5, 0.5, 0.8)),
            CrystalFormation => Some(FloatParams::new(1.0, 0.3, 0.6)),
            AbstractRing => Some(FloatParams::new(2.0, 0.5, 1.0)),
            Spaceship => Some(FloatParams::new(1.0, 0.2, 0.3)),
            Rocket => Some(FloatParams::new(0.8, 0.1, 0.4)),
            Satellite => Some(FloatParams::new(1.2, 0.3, 0.2)),
            Asteroid => Some(FloatParams::new(0.5, 0.4, 0.1)),
        }
    }

    /// Object-level uniform scale.
    pub fn scale(&self) -> f32 {
        match self {
            ObjectKind::ExperienceNode { scale, .. } => *scale,
            ObjectKind::SkillSphere => 0.4,
            _ => 1.0,
        }
    }

    /// Mesh parts in object space. Point-only kinds return nothing.
    pub fn parts(&self) -> SmallVec<[Part; 4]> {
        use ObjectKind::*;
        let mut parts = SmallVec::new();
        match *self {
            ParticleField | Sparkles => {}
            ExperienceNode { color, .. } => {
                parts.push(Part::new(
                    Shape::Octahedron { radius: 0.5, detail: 0 },
                    Material::glowing(color, 0.5, 0.8, 0.2),
                ));
            }
            SkillSphere => {
                parts.push(Part::new(
                    Shape::Sphere { radius: 1.0, segments: 16 },
                    Material::standard(TEAL, TEAL, 0.15, 0.1, 0.05).with_opacity(0.45),
                ));
            }
            InteractiveGeometry(geometry) => {
                let shape = match geometry {
                    GeometryKind::Dodecahedron => Shape::Dodecahedron { radius: 0.8, detail: 0 },
                    GeometryKind::TorusKnot => Shape::TorusKnot {
                        radius: 0.5,
                        tube: 0.18,
                        tubular: 100,
                        radial: 16,
                        p: 2,
                        q: 3,
                    },
                    GeometryKind::Icosahedron => Shape::Icosahedron { radius: 0.8, detail: 0 },
                    GeometryKind::Octahedron => Shape::Octahedron { radius: 0.9, detail: 0 },
                    GeometryKind::Tetrahedron => Shape::Tetrahedron { radius: 1.0, detail: 0 },
                };
                parts.push(Part::new(shape, Material::standard(GOLD, ORANGE, 0.3, 0.8, 0.2)));
            }
            AnimatedRings => {
                for i in 0..3 {
                    let shape = Shape::Torus {
                        radius: 2.0 + i as f32 * 1.5,
                        tube: 0.05,
                        radial: 16,
                        tubular: 100,
                    };
                    parts.push(
                        Part::new(shape, Material::unlit(TEAL, 0.3 - i as f32 * 0.08))
                            .rotated(Vec3::new(PI / 2.0, 0.0, 0.0)),
                    );
                }
            }
            Dna => {
                let bead = Shape::Sphere { radius: 0.08, segments: 8 };
                for p in helix_points() {
                    parts.push(Part::new(bead, Material::glowing(TEAL, 0.5, 0.0, 1.0)).at(p));
                }
            }
            GeometricCluster => {
                parts.push(Part::new(
                    Shape::Icosahedron { radius: 0.6, detail: 1 },
                    Material::glowing(ORANGE, 0.3, 0.7, 0.3).with_wireframe(),
                ));
                parts.push(Part::new(
                    Shape::Octahedron { radius: 0.4, detail: 0 },
                    Material::glowing(GOLD, 0.4, 0.9, 0.1),
                ));
            }
            CrystalFormation => {
                let crystal = Shape::cone(0.15, 0.8, 6);
                let mat = Material::glowing(TEAL, 0.4, 0.9, 0.1).with_opacity(0.8);
                let layout = [
                    (Vec3::new(0.0, 0.0, 0.0), 1.0, 0.0),
                    (Vec3::new(0.3, 0.5, 0.2), 0.6, PI / 3.0),
                    (Vec3::new(-0.3, 0.4, -0.2), 0.7, -PI / 4.0),
                    (Vec3::new(0.2, -0.3, 0.3), 0.5, PI / 6.0),
                ];
                for (pos, scale, yaw) in layout {
                    parts.push(
                        Part::new(crystal, mat)
                            .at(pos)
                            .rotated(Vec3::new(0.0, yaw, 0.0))
                            .scaled(scale),
                    );
                }
            }
            AbstractRing => {
                parts.push(Part::new(
                    Shape::TorusKnot {
                        radius: 0.6,
                        tube: 0.15,
                        tubular: 120,
                        radial: 20,
                        p: 3,
                        q: 2,
                    },
                    Material::standard(GOLD, ORANGE, 0.3, 0.8, 0.2),
                ));
            }
            Spaceship => {
                parts.push(Part::new(
                    Shape::Capsule { radius: 0.3, length: 1.2, segments: 8 },
                    Material::glowing(TEAL, 0.3, 0.9, 0.1),
                ));
                let wing = Shape::Box { width: 0.1, height: 0.8, depth: 0.3 };
                let wing_mat = Material::glowing(ORANGE, 0.2, 0.8, 0.2);
                parts.push(
                    Part::new(wing, wing_mat)
                        .at(Vec3::new(-0.4, 0.0, 0.0))
                        .rotated(Vec3::new(0.0, 0.0, PI / 4.0)),
                );
                parts.push(
                    Part::new(wing, wing_mat)
                        .at(Vec3::new(0.4, 0.0, 0.0))
                        .rotated(Vec3::new(0.0, 0.0, -PI / 4.0)),
                );
                parts.push(
                    Part::new(
                        Shape::Sphere { radius: 0.2, segments: 8 },
                        Material::glowing(GOLD, 0.8, 0.0, 1.0).with_opacity(0.6),
                    )
                    .at(Vec3::new(0.0, -0.8, 0.0)),
                );
            }
            Rocket => {
                parts.push(Part::new(
                    Shape::Cylinder {
                        radius_top: 0.2,
                        radius_bottom: 0.3,
                        height: 1.5,
                        segments: 8,
                    },
                    Material::standard(ICE, TEAL, 0.2, 0.7, 0.3),
                ));
                parts.push(
                    Part::new(Shape::cone(0.2, 0.4, 8), Material::glowing(ORANGE, 0.3, 0.8, 0.2))
                        .at(Vec3::new(0.0, 0.9, 0.0)),
                );
                let fin = Shape::Box { width: 0.1, height: 0.3, depth: 0.2 };
                for k in 0..4 {
                    let angle = k as f32 * PI / 2.0;
                    parts.push(
                        Part::new(fin, Material::glowing(GOLD, 0.2, 0.6, 0.4))
                            .at(Vec3::new(angle.cos() * 0.25, -0.6, angle.sin() * 0.25))
                            .rotated(Vec3::new(0.0, angle, 0.0)),
                    );
                }
                parts.push(
                    Part::new(
                        Shape::cone(0.15, 0.5, 8),
                        Material::glowing(ORANGE, 1.0, 0.0, 1.0).with_opacity(0.7),
                    )
                    .at(Vec3::new(0.0, -1.0, 0.0)),
                );
            }
            ShootingStar => {
                parts.push(Part::new(
                    Shape::Octahedron { radius: 0.1, detail: 0 },
                    Material::standard(WHITE, TEAL, 1.0, 0.0, 1.0),
                ));
            }
            Satellite => {
                parts.push(Part::new(
                    Shape::Box { width: 0.3, height: 0.2, depth: 0.4 },
                    Material::standard(SLATE, TEAL, 0.2, 0.9, 0.1),
                ));
                let panel = Shape::Box { width: 0.6, height: 0.05, depth: 0.3 };
                let panel_mat = Material::standard(NAVY, GOLD, 0.1, 0.8, 0.2);
                parts.push(Part::new(panel, panel_mat).at(Vec3::new(-0.4, 0.0, 0.0)));
                parts.push(Part::new(panel, panel_mat).at(Vec3::new(0.4, 0.0, 0.0)));
                parts.push(
                    Part::new(
                        Shape::Cylinder {
                            radius_top: 0.01,
                            radius_bottom: 0.01,
                            height: 0.3,
                            segments: 4,
                        },
                        Material::glowing(TEAL, 0.5, 0.0, 1.0),
                    )
                    .at(Vec3::new(0.0, 0.2, 0.0)),
                );
            }
            Asteroid => {
                parts.push(Part::new(
                    Shape::Dodecahedron { radius: 0.4, detail: 0 },
                    Material::standard(ROCK, ORANGE, 0.1, 0.3, 0.8),
                ));
            }
        }
        parts
    }
}

/// Bead positions of the double helix, bottom to top.
pub fn helix_points() -> impl Iterator<Item = Vec3> {
    (0..HELIX_BEADS).map(|i| {
        let f = i as f32 / HELIX_BEADS as f32;
        let angle = f * PI * 2.0 * HELIX_TURNS;
        Vec3::new(
            angle.cos() * HELIX_RADIUS,
            f * HELIX_HEIGHT - HELIX_HEIGHT / 2.0,
            angle.sin() * HELIX_RADIUS,
        )
    })
}

#[derive(Clone, Debug)]
pub struct DecorativeObject {
    pub kind: ObjectKind,
    pub spawn: Vec3,
    pub float: Option<FloatParams>,
    pub scale: f32,
    pub parts: SmallVec<[Part; 4]>,
}

impl DecorativeObject {
    pub fn new(kind: ObjectKind, spawn: Vec3) -> Self {
        Self {
            kind,
            spawn,
            float: kind.float_params(),
            scale: kind.scale(),
            parts: kind.parts(),
        }
    }
}
