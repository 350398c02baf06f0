//! Scene graph description handed to the renderer.
//!
//! Nodes live in a flat arena and reference each other by [`NodeId`]. The
//! graph is rebuilt from scratch whenever the configuration changes, so it
//! only supports appending.

use crate::assets::AssetId;
use crate::features::{Feature, Placement};
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
        self
    }

    pub fn rotated_z(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_rotation_z(angle) * self.rotation;
        self
    }

    pub fn scaled(mut self, s: f32) -> Self {
        self.scale *= s;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Primitive shapes in node-local space. Planes, discs and triangles lie in XY facing +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Box { size: Vec3 },
    Plane { size: Vec2 },
    Disc { radius: f32, segments: u32 },
    Triangle { a: Vec2, b: Vec2, c: Vec2 },
    Model { asset: AssetId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    Standard,
    Unlit,
    Reflective,
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub shading: Shading,
    pub emissive: f32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            color: Vec3::from(color),
            shading: Shading::Standard,
            emissive: 0.0,
            opacity: 1.0,
            roughness: 0.5,
            metalness: 0.0,
        }
    }

    pub fn unlit(color: [f32; 3]) -> Self {
        Self {
            shading: Shading::Unlit,
            ..Self::standard(color)
        }
    }

    pub fn reflective() -> Self {
        Self {
            shading: Shading::Reflective,
            roughness: 0.0,
            metalness: 0.0,
            ..Self::standard([1.0, 1.0, 1.0])
        }
    }

    pub fn glow(intensity: f32, opacity: f32) -> Self {
        Self {
            shading: Shading::Glow,
            emissive: intensity,
            opacity,
            roughness: 1.0,
            ..Self::standard([1.0, 1.0, 1.0])
        }
    }

    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.shading == Shading::Glow
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient { intensity: f32 },
    /// Shines from the node position toward the origin.
    Directional { intensity: f32 },
    Spot { intensity: f32, angle: f32, penumbra: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitTarget {
    pub feature: Feature,
    pub placement: Placement,
}

/// A clickable disc attached to a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegion {
    pub target: HitTarget,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { geometry: Geometry, material: Material },
    Light(Light),
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub render_order: i32,
    pub hit: Option<HitRegion>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Image-based lighting backdrop, present once the map has loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub asset: AssetId,
    pub rotation_y: f32,
}

/// A mesh with its accumulated world transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub geometry: Geometry,
    pub material: Material,
    pub render_order: i32,
}

/// World-space placement of a hit region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitMarker {
    pub target: HitTarget,
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    by_name: FnvHashMap<String, NodeId>,
    pub environment: Option<Environment>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = SceneNode {
            name: "root".to_string(),
            transform: Transform::default(),
            kind: NodeKind::Group,
            render_order: 0,
            hit: None,
            parent: None,
            children: SmallVec::new(),
        };
        let mut by_name = FnvHashMap::default();
        by_name.insert(root.name.clone(), NodeId(0));
        Self {
            nodes: vec![root],
            by_name,
            environment: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn add(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = name.into();
        self.by_name.insert(name.clone(), id);
        self.nodes.push(SceneNode {
            name,
            transform,
            kind,
            render_order: 0,
            hit: None,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn group(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> NodeId {
        self.add(parent, name, transform, NodeKind::Group)
    }

    pub fn mesh(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        geometry: Geometry,
        material: Material,
    ) -> NodeId {
        self.add(parent, name, transform, NodeKind::Mesh { geometry, material })
    }

    pub fn light(&mut self, parent: NodeId, name: impl Into<String>, position: Vec3, light: Light) -> NodeId {
        let transform = Transform {
            translation: position,
            ..Default::default()
        };
        self.add(parent, name, transform, NodeKind::Light(light))
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Names of all nodes starting with `prefix`, in insertion order.
    pub fn names_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .iter()
            .map(|n| n.name.as_str())
            .filter(move |n| n.starts_with(prefix))
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.nodes[id.0].transform.matrix();
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            m = self.nodes[p.0].transform.matrix() * m;
            cur = self.nodes[p.0].parent;
        }
        m
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    fn visit(&self, id: NodeId, parent_world: Mat4, f: &mut impl FnMut(NodeId, &SceneNode, Mat4)) {
        let node = &self.nodes[id.0];
        let world = parent_world * node.transform.matrix();
        f(id, node, world);
        for child in &node.children {
            self.visit(*child, world, f);
        }
    }

    /// Every mesh in depth-first order with its world transform.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.visit(self.root(), Mat4::IDENTITY, &mut |id, node, world| {
            if let NodeKind::Mesh { geometry, material } = node.kind {
                out.push(DrawItem {
                    node: id,
                    world,
                    geometry,
                    material,
                    render_order: node.render_order,
                });
            }
        });
        out
    }

    pub fn hit_markers(&self) -> Vec<HitMarker> {
        let mut out = Vec::new();
        self.visit(self.root(), Mat4::IDENTITY, &mut |_, node, world| {
            if let Some(region) = node.hit {
                out.push(HitMarker {
                    target: region.target,
                    center: world.transform_point3(Vec3::ZERO),
                    normal: world.transform_vector3(Vec3::Z).normalize_or_zero(),
                    radius: region.radius * world.x_axis.truncate().length(),
                });
            }
        });
        out
    }

    pub fn lights(&self) -> Vec<(Light, Vec3)> {
        let mut out = Vec::new();
        self.visit(self.root(), Mat4::IDENTITY, &mut |_, node, world| {
            if let NodeKind::Light(light) = node.kind {
                out.push((light, world.transform_point3(Vec3::ZERO)));
            }
        });
        out
    }
}
