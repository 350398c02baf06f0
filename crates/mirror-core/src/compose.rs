//! Scene composer: configuration in, scene graph out.
//!
//! Everything is laid out in mirror-local meters with the mirror center at the
//! origin and the reflective face toward +Z. The `assembly` group then turns
//! the whole thing a quarter turn about Y and lifts it to mirror-center height.

use crate::assets::{AssetId, AssetRegistry, AssetState};
use crate::constants::*;
use crate::dimension::Dimensions;
use crate::features::{Feature, FeatureSet, Placement};
use crate::scene::{
    Environment, Geometry, HitRegion, HitTarget, Light, Material, NodeId, SceneGraph, Transform,
};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// One selector hit target in mirror-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerLayout {
    pub placement: Placement,
    pub position: Vec2,
    /// Arrow rotation about Z so the glyph points away from the center.
    pub rotation: f32,
}

/// Centers of the dashes along one edge, symmetric about the edge midpoint.
pub fn dash_positions(edge_len: f32) -> Vec<f32> {
    let pitch = DASH_LENGTH + DASH_GAP;
    if edge_len.is_nan() || edge_len <= 0.0 {
        return Vec::new();
    }
    let count = (edge_len / pitch).floor() as usize;
    let start = -(count as f32) * pitch * 0.5;
    (0..count)
        .map(|i| start + (i as f32 + 0.5) * pitch)
        .collect()
}

/// `(size, intensity, opacity)` for each halo plane, inner to outer.
pub fn halo_layers(width: f32, height: f32) -> [(Vec2, f32, f32); 3] {
    let glow = width.max(height) * HALO_GLOW_FACTOR;
    HALO_LAYERS.map(|(factor, intensity, opacity)| {
        let grow = glow * factor;
        (Vec2::new(width + grow, height + grow), intensity, opacity)
    })
}

/// Offset from the mirror center for an attachment kept `inset` away from the edges.
pub fn attachment_offset(placement: Option<Placement>, width: f32, height: f32, inset: f32) -> Vec2 {
    let Some(p) = placement else {
        return Vec2::ZERO;
    };
    let (sx, sy) = p.signs();
    let hx = (width * 0.5 - inset).max(0.0);
    let hy = (height * 0.5 - inset).max(0.0);
    Vec2::new(sx * hx, sy * hy)
}

/// Distance from the mirror edge to an attachment's center.
pub fn attachment_inset(feature: Feature) -> f32 {
    match feature {
        Feature::Clock => CLOCK_SIZE + EDGE_MARGIN,
        Feature::Socket => SOCKET_SIZE * 0.5 + EDGE_MARGIN,
        Feature::HygieneMirror => HYGIENE_MIRROR_RADIUS + EDGE_MARGIN,
        Feature::Wall | Feature::Light | Feature::Shelf => 0.0,
    }
}

pub fn selector_layout(feature: Feature, width: f32, height: f32) -> SmallVec<[MarkerLayout; 8]> {
    let radius = width.min(height) * SELECTOR_RADIUS_FACTOR;
    feature
        .candidates()
        .iter()
        .map(|&placement| {
            let a = placement.angle();
            let position = Vec2::new(a.cos(), a.sin()) * radius;
            MarkerLayout {
                placement,
                position,
                rotation: position.y.atan2(position.x) - FRAC_PI_2,
            }
        })
        .collect()
}

/// Build the full scene for the given state.
pub fn compose(dims: &Dimensions, features: &FeatureSet, assets: &AssetRegistry) -> SceneGraph {
    let mut g = SceneGraph::new();
    let root = g.root();
    let width = dims.width_m();
    let height = dims.height_m();
    let lit = features.is_enabled(Feature::Light);

    add_room_lights(&mut g, root, lit);

    let assembly = g.group(
        root,
        "assembly",
        Transform::at(0.0, SCENE_ROOT_Y, 0.0).rotated_y(SCENE_ROOT_YAW),
    );

    if features.is_enabled(Feature::Wall) {
        g.mesh(
            assembly,
            "wall",
            Transform::at(0.0, WALL_LIFT, -MOUNT_DEPTH + WALL_THICKNESS * 0.5),
            Geometry::Box {
                size: Vec3::new(WALL_SIZE, WALL_SIZE, WALL_THICKNESS),
            },
            Material::unlit(WALL_COLOR),
        );
    }

    add_mirror(&mut g, assembly, width, height);
    if lit {
        add_halo(&mut g, assembly, width, height);
    }

    if features.is_enabled(Feature::Clock) {
        let at = attachment_offset(
            features.placement(Feature::Clock),
            width,
            height,
            attachment_inset(Feature::Clock),
        );
        add_clock(&mut g, assembly, at, assets.state(AssetId::ClockModel));
    }
    if features.is_enabled(Feature::Socket) {
        let at = attachment_offset(
            features.placement(Feature::Socket),
            width,
            height,
            attachment_inset(Feature::Socket),
        );
        add_socket(&mut g, assembly, at);
    }
    if let Some(percent) = features.shelf_width_percent() {
        add_shelf(&mut g, assembly, width * percent as f32 / 100.0, height);
    }
    if features.is_enabled(Feature::HygieneMirror) {
        let at = attachment_offset(
            features.placement(Feature::HygieneMirror),
            width,
            height,
            attachment_inset(Feature::HygieneMirror),
        );
        add_hygiene_mirror(&mut g, assembly, at);
    }

    if let Some(feature) = features.active_selection() {
        add_selector(&mut g, assembly, feature, width, height);
    }

    if assets.is_ready(AssetId::EnvironmentMap) {
        g.environment = Some(Environment {
            asset: AssetId::EnvironmentMap,
            rotation_y: FRAC_PI_2,
        });
    }
    g
}

fn add_room_lights(g: &mut SceneGraph, root: NodeId, lit: bool) {
    g.light(root, "ambient", Vec3::ZERO, Light::Ambient { intensity: 3.0 });
    g.light(root, "ceiling", Vec3::new(0.0, 3.0, 0.0), Light::Directional { intensity: 6.0 });
    g.light(root, "ceiling-left", Vec3::new(-1.0, 3.0, 0.0), Light::Directional { intensity: 5.0 });
    g.light(root, "ceiling-right", Vec3::new(1.0, 3.0, 0.0), Light::Directional { intensity: 5.0 });
    if !lit {
        return;
    }
    let spot = |intensity| Light::Spot {
        intensity,
        angle: FRAC_PI_4,
        penumbra: 0.9,
    };
    g.light(root, "spot-top", Vec3::new(0.0, 2.4, 0.6), spot(2.4));
    g.light(root, "spot-bottom", Vec3::new(0.0, -0.1, 0.6), spot(1.1));
    g.light(root, "spot-left", Vec3::new(-1.4, 1.2, 0.8), spot(1.4));
    g.light(root, "spot-right", Vec3::new(1.4, 1.2, 0.8), spot(1.4));
}

fn add_mirror(g: &mut SceneGraph, parent: NodeId, width: f32, height: f32) {
    let mirror = g.group(parent, "mirror", Transform::default());
    let mount_w = (width - FRAME_THICKNESS * 2.0).max(0.0);
    let mount_h = (height - FRAME_THICKNESS * 2.0).max(0.0);

    g.mesh(
        mirror,
        "mount",
        Transform::at(0.0, 0.0, MOUNT_Z),
        Geometry::Box {
            size: Vec3::new(mount_w, mount_h, MOUNT_DEPTH),
        },
        Material::standard(MOUNT_COLOR).with_surface(0.95, 0.1),
    );

    let dash_material = Material::standard(WHITE);
    let horizontal = Geometry::Box {
        size: Vec3::new(DASH_LENGTH, DASH_THICKNESS, DASH_HEIGHT),
    };
    let vertical = Geometry::Box {
        size: Vec3::new(DASH_THICKNESS, DASH_LENGTH, DASH_HEIGHT),
    };
    for (i, x) in dash_positions(mount_w).into_iter().enumerate() {
        for (edge, y) in [("top", mount_h * 0.5), ("bottom", -mount_h * 0.5)] {
            g.mesh(
                mirror,
                format!("dash-{edge}-{i}"),
                Transform::at(x, y, DASH_Z),
                horizontal,
                dash_material,
            );
        }
    }
    for (i, y) in dash_positions(mount_h).into_iter().enumerate() {
        for (edge, x) in [("left", -mount_w * 0.5), ("right", mount_w * 0.5)] {
            g.mesh(
                mirror,
                format!("dash-{edge}-{i}"),
                Transform::at(x, y, DASH_Z),
                vertical,
                dash_material,
            );
        }
    }

    g.mesh(
        mirror,
        "mirror-surface",
        Transform::at(0.0, 0.0, MIRROR_Z),
        Geometry::Plane {
            size: Vec2::new(width, height),
        },
        Material::reflective(),
    );
    g.mesh(
        mirror,
        "frame",
        Transform::at(0.0, 0.0, FRAME_Z),
        Geometry::Box {
            size: Vec3::new(width + FRAME_THICKNESS, height + FRAME_THICKNESS, MIRROR_DEPTH),
        },
        Material::standard(FRAME_COLOR).with_surface(0.4, 0.2),
    );
}

fn add_halo(g: &mut SceneGraph, parent: NodeId, width: f32, height: f32) {
    let halo = g.group(parent, "halo", Transform::default());
    for (i, (size, intensity, opacity)) in halo_layers(width, height).into_iter().enumerate() {
        g.mesh(
            halo,
            format!("halo-{i}"),
            Transform::at(0.0, 0.0, HALO_Z - HALO_LAYER_STEP_Z * i as f32),
            Geometry::Plane { size },
            Material::glow(intensity, opacity),
        );
    }
}

fn add_clock(g: &mut SceneGraph, parent: NodeId, at: Vec2, state: AssetState) {
    let transform = Transform::at(at.x, at.y, CLOCK_Z);
    match state {
        AssetState::Ready => {
            g.mesh(
                parent,
                "clock",
                transform.scaled(CLOCK_MODEL_SCALE),
                Geometry::Model {
                    asset: AssetId::ClockModel,
                },
                Material::standard(WHITE),
            );
        }
        AssetState::Missing | AssetState::Loading => {
            let dial = g.group(parent, "clock-placeholder", transform);
            g.mesh(
                dial,
                "clock-placeholder-face",
                Transform::default(),
                Geometry::Disc {
                    radius: CLOCK_SIZE,
                    segments: MARKER_SEGMENTS,
                },
                Material::standard(FRAME_COLOR).with_opacity(0.6),
            );
            let hand = |len: f32| Geometry::Box {
                size: Vec3::new(CLOCK_SIZE * 0.06, len, 0.002),
            };
            g.mesh(
                dial,
                "clock-placeholder-hour",
                Transform::at(0.0, CLOCK_SIZE * 0.25, 0.002),
                hand(CLOCK_SIZE * 0.5),
                Material::unlit(MOUNT_COLOR),
            );
            g.mesh(
                dial,
                "clock-placeholder-minute",
                Transform::default().rotated_z(-FRAC_PI_2),
                hand(CLOCK_SIZE * 0.8),
                Material::unlit(MOUNT_COLOR),
            );
        }
        AssetState::Failed => {
            log::debug!("[compose] clock model unavailable, omitting clock body");
        }
    }
}

fn add_socket(g: &mut SceneGraph, parent: NodeId, at: Vec2) {
    let socket = g.group(parent, "socket", Transform::at(at.x, at.y, CLOCK_Z));
    g.mesh(
        socket,
        "socket-plate",
        Transform::default(),
        Geometry::Box {
            size: Vec3::new(SOCKET_SIZE, SOCKET_SIZE, SOCKET_DEPTH),
        },
        Material::standard(FRAME_COLOR).with_surface(0.3, 0.0),
    );
    for (i, x) in [-1.0_f32, 1.0].into_iter().enumerate() {
        g.mesh(
            socket,
            format!("socket-pin-{i}"),
            Transform::at(x * SOCKET_SIZE * 0.2, 0.0, SOCKET_DEPTH * 0.5 + 0.001),
            Geometry::Disc {
                radius: SOCKET_SIZE * 0.06,
                segments: 16,
            },
            Material::unlit(MOUNT_COLOR),
        );
    }
}

fn add_shelf(g: &mut SceneGraph, parent: NodeId, shelf_width: f32, height: f32) {
    g.mesh(
        parent,
        "shelf",
        Transform::at(0.0, -height * 0.5 - SHELF_GAP, MIRROR_Z + SHELF_DEPTH * 0.5),
        Geometry::Box {
            size: Vec3::new(shelf_width, SHELF_THICKNESS, SHELF_DEPTH),
        },
        Material::standard(WHITE)
            .with_surface(0.05, 0.0)
            .with_opacity(0.35),
    );
}

fn add_hygiene_mirror(g: &mut SceneGraph, parent: NodeId, at: Vec2) {
    let hm = g.group(parent, "hygiene-mirror", Transform::at(at.x, at.y, CLOCK_Z));
    g.mesh(
        hm,
        "hygiene-mirror-rim",
        Transform::default(),
        Geometry::Disc {
            radius: HYGIENE_MIRROR_RADIUS + FRAME_THICKNESS * 0.3,
            segments: MARKER_SEGMENTS,
        },
        Material::standard(FRAME_COLOR).with_surface(0.4, 0.2),
    );
    g.mesh(
        hm,
        "hygiene-mirror-glass",
        Transform::at(0.0, 0.0, 0.002),
        Geometry::Disc {
            radius: HYGIENE_MIRROR_RADIUS,
            segments: MARKER_SEGMENTS,
        },
        Material::reflective(),
    );
}

fn add_selector(g: &mut SceneGraph, parent: NodeId, feature: Feature, width: f32, height: f32) {
    let selector = g.group(parent, "selector", Transform::at(0.0, 0.0, SELECTOR_Z));
    let marker_material = Material::unlit(MARKER_COLOR).with_opacity(0.8);
    let arrow_material = Material::unlit(WHITE);
    for layout in selector_layout(feature, width, height) {
        let id = layout.placement.id();
        let marker = g.mesh(
            selector,
            format!("marker-{id}"),
            Transform::at(layout.position.x, layout.position.y, 0.0),
            Geometry::Disc {
                radius: MARKER_RADIUS,
                segments: MARKER_SEGMENTS,
            },
            marker_material,
        );
        {
            let node = g.node_mut(marker);
            node.render_order = MARKER_RENDER_ORDER;
            node.hit = Some(HitRegion {
                target: HitTarget {
                    feature,
                    placement: layout.placement,
                },
                radius: MARKER_RADIUS,
            });
        }

        let arrow = g.group(
            marker,
            format!("arrow-{id}"),
            Transform::at(0.0, 0.0, 0.002).rotated_z(layout.rotation),
        );
        let head = g.mesh(
            arrow,
            format!("arrow-head-{id}"),
            Transform::at(0.0, ARROW_HEAD_SIZE * 0.3, 0.0),
            Geometry::Triangle {
                a: Vec2::new(0.0, ARROW_HEAD_SIZE),
                b: Vec2::new(ARROW_HEAD_SIZE * 0.6, -ARROW_HEAD_SIZE * 0.3),
                c: Vec2::new(-ARROW_HEAD_SIZE * 0.6, -ARROW_HEAD_SIZE * 0.3),
            },
            arrow_material,
        );
        let tail = g.mesh(
            arrow,
            format!("arrow-tail-{id}"),
            Transform::at(0.0, -ARROW_HEAD_SIZE * 0.001 - ARROW_TAIL_LENGTH * 0.5, 0.0),
            Geometry::Box {
                size: Vec3::new(ARROW_TAIL_WIDTH, ARROW_TAIL_LENGTH, 0.001),
            },
            arrow_material,
        );
        for n in [head, tail] {
            g.node_mut(n).render_order = MARKER_RENDER_ORDER + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    fn geometry_of(g: &SceneGraph, name: &str) -> Geometry {
        let id = g.find(name).unwrap_or_else(|| panic!("missing {name}"));
        match g.node(id).kind {
            NodeKind::Mesh { geometry, .. } => geometry,
            other => panic!("{name} is not a mesh: {other:?}"),
        }
    }

    #[test]
    fn mirror_assembly_follows_the_dimensions() {
        let dims = Dimensions::new(1200, 700);
        let g = compose(&dims, &FeatureSet::default(), &AssetRegistry::new());
        let (w, h) = (1.2_f32, 0.7_f32);

        let Geometry::Plane { size } = geometry_of(&g, "mirror-surface") else {
            panic!("mirror-surface should be a plane");
        };
        assert!((size - Vec2::new(w, h)).abs().max_element() < 1e-6);

        let Geometry::Box { size } = geometry_of(&g, "frame") else {
            panic!("frame should be a box");
        };
        let expected = Vec3::new(w + FRAME_THICKNESS, h + FRAME_THICKNESS, MIRROR_DEPTH);
        assert!((size - expected).abs().max_element() < 1e-6);

        let mount_w = w - 2.0 * FRAME_THICKNESS;
        let mount_h = h - 2.0 * FRAME_THICKNESS;
        let Geometry::Box { size } = geometry_of(&g, "mount") else {
            panic!("mount should be a box");
        };
        let expected = Vec3::new(mount_w, mount_h, MOUNT_DEPTH);
        assert!((size - expected).abs().max_element() < 1e-6);

        let pitch = DASH_LENGTH + DASH_GAP;
        let across = (mount_w / pitch).floor() as usize;
        let down = (mount_h / pitch).floor() as usize;
        assert_eq!((across, down), (28, 15));
        assert_eq!(g.names_with_prefix("dash-top-").count(), across);
        assert_eq!(g.names_with_prefix("dash-bottom-").count(), across);
        assert_eq!(g.names_with_prefix("dash-left-").count(), down);
        assert_eq!(g.names_with_prefix("dash-right-").count(), down);
    }

    #[test]
    fn dashes_are_centered_on_the_edge() {
        let d = dash_positions(0.83);
        assert_eq!(d.len(), 20);
        let first = d[0];
        let last = d[d.len() - 1];
        assert!((first + last).abs() < 1e-5);
        assert!(dash_positions(0.0).is_empty());
        assert!(dash_positions(f32::NAN).is_empty());
    }

    #[test]
    fn halo_grows_and_fades_outward() {
        let layers = halo_layers(0.9, 1.6);
        for pair in layers.windows(2) {
            assert!(pair[1].0.x > pair[0].0.x);
            assert!(pair[1].1 < pair[0].1);
            assert!(pair[1].2 < pair[0].2);
        }
        assert!((layers[0].0.y - (1.6 + 1.6 * 0.4 * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn offsets_follow_the_corner_formula() {
        let at = attachment_offset(Some(Placement::TopRight), 0.9, 1.6, 0.2);
        assert!((at - Vec2::new(0.25, 0.6)).length() < 1e-5);
        let at = attachment_offset(Some(Placement::LeftCenter), 0.9, 1.6, 0.2);
        assert!((at - Vec2::new(-0.25, 0.0)).length() < 1e-5);
        assert_eq!(attachment_offset(None, 0.9, 1.6, 0.2), Vec2::ZERO);
    }

    #[test]
    fn selector_arrows_point_outward() {
        let layout = selector_layout(Feature::Clock, 0.9, 1.6);
        assert_eq!(layout.len(), 8);
        for m in &layout {
            assert!((m.position.length() - 0.9 * SELECTOR_RADIUS_FACTOR).abs() < 1e-5);
            // The glyph points along +Y before rotation.
            let tip = Vec2::from_angle(m.rotation).rotate(Vec2::Y);
            assert!(tip.dot(m.position.normalize()) > 0.999);
        }
    }

    #[test]
    fn halo_and_spots_follow_the_light_flag() {
        let dims = Dimensions::default();
        let assets = AssetRegistry::new();
        let mut set = FeatureSet::default();
        let dark = compose(&dims, &set, &assets);
        assert!(dark.find("halo").is_none());
        set.toggle(Feature::Light, true);
        let lit = compose(&dims, &set, &assets);
        assert_eq!(lit.names_with_prefix("halo-").count(), 3);
        assert_eq!(lit.lights().len(), dark.lights().len() + 4);
    }

    #[test]
    fn failed_clock_model_is_omitted_without_breaking_the_rest() {
        let dims = Dimensions::default();
        let mut assets = AssetRegistry::new();
        let ticket = assets.request(AssetId::ClockModel).unwrap();
        let mut set = FeatureSet::default();
        set.toggle(Feature::Clock, true);
        assert!(compose(&dims, &set, &assets).find("clock-placeholder").is_some());

        assets.resolve(
            ticket,
            Err(crate::error::ConfigError::AssetUnavailable(AssetId::ClockModel)),
        );
        let g = compose(&dims, &set, &assets);
        assert!(g.find("clock").is_none());
        assert!(g.find("clock-placeholder").is_none());
        assert!(g.find("mirror-surface").is_some());
        assert_eq!(g.hit_markers().len(), 8);
    }

    #[test]
    fn shelf_width_tracks_percent() {
        let dims = Dimensions::new(1000, 1000);
        let mut set = FeatureSet::empty();
        set.toggle(Feature::Shelf, true);
        set.set_shelf_width_percent(50).unwrap();
        let g = compose(&dims, &set, &AssetRegistry::new());
        let id = g.find("shelf").unwrap();
        match g.node(id).kind {
            crate::scene::NodeKind::Mesh {
                geometry: Geometry::Box { size },
                ..
            } => assert!((size.x - 0.5).abs() < 1e-5),
            other => panic!("unexpected shelf node {other:?}"),
        }
    }
}
