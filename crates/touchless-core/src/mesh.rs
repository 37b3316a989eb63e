//! Procedural unit meshes shared by every scene.
//!
//! Sphere: radius 1. Cylinder: radius 1, height 1 centered on the origin.
//! Cube: side 1 centered on the origin. Scenes scale instances as needed.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sphere,
    Cylinder,
    Cube,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Sphere, MeshKind::Cylinder, MeshKind::Cube];

    pub fn build(self) -> MeshData {
        match self {
            MeshKind::Sphere => uv_sphere(24, 16),
            MeshKind::Cylinder => cylinder(24),
            MeshKind::Cube => cube(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

pub fn uv_sphere(segments: u16, rings: u16) -> MeshData {
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let theta = PI * r as f32 / rings as f32;
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            let n = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            mesh.vertices.push(Vertex { position: n, normal: n });
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

pub fn cylinder(segments: u16) -> MeshData {
    let mut mesh = MeshData::default();
    // side
    for s in 0..=segments {
        let phi = TAU * s as f32 / segments as f32;
        let (x, z) = (phi.cos(), phi.sin());
        for y in [0.5, -0.5] {
            mesh.vertices.push(Vertex {
                position: [x, y, z],
                normal: [x, 0.0, z],
            });
        }
    }
    for s in 0..segments {
        let top = s * 2;
        let bottom = top + 1;
        mesh.indices
            .extend_from_slice(&[top, top + 2, bottom, top + 2, bottom + 2, bottom]);
    }
    // caps
    for (y, ny) in [(0.5_f32, 1.0_f32), (-0.5, -1.0)] {
        let center = mesh.vertices.len() as u16;
        mesh.vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            mesh.vertices.push(Vertex {
                position: [phi.cos(), y, phi.sin()],
                normal: [0.0, ny, 0.0],
            });
        }
        for s in 0..segments {
            let a = center + 1 + s;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, a + 1, a]);
            } else {
                mesh.indices.extend_from_slice(&[center, a, a + 1]);
            }
        }
    }
    mesh
}

pub fn cube() -> MeshData {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u16;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let position = [
                normal[0] * 0.5 + u[0] * su + v[0] * sv,
                normal[1] * 0.5 + u[1] * su + v[1] * sv,
                normal[2] * 0.5 + u[2] * su + v[2] * sv,
            ];
            mesh.vertices.push(Vertex { position, normal });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
