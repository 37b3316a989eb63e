//! Plain per-frame render description handed to the renderer.
//!
//! Scenes never talk to the graphics engine directly; they describe what to
//! draw (camera, instanced meshes, a status line) and the web frontend turns
//! that into GPU work.

use crate::mesh::MeshKind;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            ..Self::default()
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 500.0,
        }
    }
}

/// GPU instance layout: model matrix columns followed by RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    pub camera: Camera,
    pub clear_color: [f32; 4],
    pub instances: Vec<(MeshKind, InstanceRaw)>,
    pub status: String,
}

impl SceneSnapshot {
    pub fn new(camera: Camera, clear_color: [f32; 4]) -> Self {
        Self {
            camera,
            clear_color,
            instances: Vec::new(),
            status: String::new(),
        }
    }

    pub fn push(
        &mut self,
        mesh: MeshKind,
        scale: Vec3,
        rotation: Quat,
        translation: Vec3,
        color: [f32; 4],
    ) {
        let model = Mat4::from_scale_rotation_translation(scale, rotation, translation);
        self.instances.push((mesh, InstanceRaw::new(model, color)));
    }

    /// Instances of one mesh kind, in submission order.
    pub fn batch(&self, mesh: MeshKind) -> Vec<InstanceRaw> {
        self.instances
            .iter()
            .filter(|(kind, _)| *kind == mesh)
            .map(|(_, raw)| *raw)
            .collect()
    }

    pub fn count(&self, mesh: MeshKind) -> usize {
        self.instances.iter().filter(|(kind, _)| *kind == mesh).count()
    }
}
