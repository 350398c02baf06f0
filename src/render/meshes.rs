//! Unit meshes shared by every scene node; node transforms scale them into place.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use mirror_core::constants::{CLOCK_MODEL_SCALE, CLOCK_SIZE, MARKER_SEGMENTS};
use mirror_core::Geometry;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub(crate) pos: [f32; 3],
    pub(crate) normal: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum MeshKind {
    Cube,
    Quad,
    /// Fan with the given number of rim segments.
    Disc(u32),
    Triangle,
}

pub(crate) struct MeshBuffers {
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
}

fn upload(device: &wgpu::Device, label: &str, (v, i): (Vec<Vertex>, Vec<u16>)) -> MeshBuffers {
    MeshBuffers {
        vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&v),
            usage: wgpu::BufferUsages::VERTEX,
        }),
        indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&i),
            usage: wgpu::BufferUsages::INDEX,
        }),
        index_count: i.len() as u32,
    }
}

/// Fixed meshes plus one disc per segment count seen so far.
pub(crate) struct MeshSet {
    cube: MeshBuffers,
    quad: MeshBuffers,
    triangle: MeshBuffers,
    discs: Vec<(u32, MeshBuffers)>,
}

impl MeshSet {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        Self {
            cube: upload(device, "cube", unit_cube()),
            quad: upload(device, "quad", unit_quad()),
            triangle: upload(device, "triangle", unit_triangle()),
            discs: vec![(
                disc_segments(MARKER_SEGMENTS),
                upload(device, "disc", unit_disc(MARKER_SEGMENTS)),
            )],
        }
    }

    /// Build the buffers for `kind` if they do not exist yet.
    pub(crate) fn ensure(&mut self, device: &wgpu::Device, kind: MeshKind) {
        if let MeshKind::Disc(segments) = kind {
            if !self.discs.iter().any(|(n, _)| *n == segments) {
                log::debug!("[render] disc mesh with {segments} segments");
                self.discs
                    .push((segments, upload(device, "disc", unit_disc(segments))));
            }
        }
    }

    pub(crate) fn get(&self, kind: MeshKind) -> Option<&MeshBuffers> {
        match kind {
            MeshKind::Cube => Some(&self.cube),
            MeshKind::Quad => Some(&self.quad),
            MeshKind::Triangle => Some(&self.triangle),
            MeshKind::Disc(segments) => self
                .discs
                .iter()
                .find(|(n, _)| *n == segments)
                .map(|(_, mesh)| mesh),
        }
    }
}

/// Rim segment count actually used for a disc; fewer than three is no disc.
#[inline]
pub(crate) fn disc_segments(requested: u32) -> u32 {
    requested.max(3)
}

/// Which unit mesh draws `geometry` and the local matrix that stretches it to size.
///
/// Models have no mesh data of their own; they are drawn as a flat dial of the
/// configured clock size.
pub(crate) fn fit(geometry: &Geometry) -> (MeshKind, Mat4) {
    match *geometry {
        Geometry::Box { size } => (MeshKind::Cube, Mat4::from_scale(size)),
        Geometry::Plane { size } => (MeshKind::Quad, Mat4::from_scale(size.extend(1.0))),
        Geometry::Disc { radius, segments } => (
            MeshKind::Disc(disc_segments(segments)),
            Mat4::from_scale(Vec3::new(radius, radius, 1.0)),
        ),
        Geometry::Triangle { a, b, c } => {
            let (ab, ac) = (b - a, c - a);
            (
                MeshKind::Triangle,
                Mat4::from_cols(
                    ab.extend(0.0).extend(0.0),
                    ac.extend(0.0).extend(0.0),
                    Vec4::Z,
                    a.extend(0.0).extend(1.0),
                ),
            )
        }
        Geometry::Model { .. } => {
            let r = CLOCK_SIZE / CLOCK_MODEL_SCALE;
            (
                MeshKind::Disc(disc_segments(MARKER_SEGMENTS)),
                Mat4::from_scale(Vec3::new(r, r, 1.0)),
            )
        }
    }
}

fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::NEG_Y),
    ];
    let mut verts = Vec::with_capacity(24);
    let mut idx = Vec::with_capacity(36);
    for (n, u, v) in faces {
        let base = verts.len() as u16;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let p = n * 0.5 + u * su + v * sv;
            verts.push(Vertex {
                pos: p.to_array(),
                normal: n.to_array(),
            });
        }
        idx.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (verts, idx)
}

fn unit_quad() -> (Vec<Vertex>, Vec<u16>) {
    let verts = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)]
        .into_iter()
        .map(|(x, y)| Vertex {
            pos: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
        })
        .collect();
    (verts, vec![0, 1, 2, 0, 2, 3])
}

pub(crate) fn unit_disc(segments: u32) -> (Vec<Vertex>, Vec<u16>) {
    let n = disc_segments(segments);
    let mut verts = vec![Vertex {
        pos: [0.0; 3],
        normal: [0.0, 0.0, 1.0],
    }];
    for i in 0..n {
        let a = i as f32 / n as f32 * std::f32::consts::TAU;
        verts.push(Vertex {
            pos: [a.cos(), a.sin(), 0.0],
            normal: [0.0, 0.0, 1.0],
        });
    }
    let mut idx = Vec::with_capacity(n as usize * 3);
    for i in 0..n {
        let next = (i + 1) % n;
        idx.extend_from_slice(&[0, (i + 1) as u16, (next + 1) as u16]);
    }
    (verts, idx)
}

fn unit_triangle() -> (Vec<Vertex>, Vec<u16>) {
    let verts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        .into_iter()
        .map(|pos| Vertex {
            pos,
            normal: [0.0, 0.0, 1.0],
        })
        .collect();
    (verts, vec![0, 1, 2])
}
