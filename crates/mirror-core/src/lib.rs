pub mod assets;
pub mod camera;
pub mod compose;
pub mod configurator;
pub mod constants;
pub mod dimension;
pub mod error;
pub mod features;
pub mod picking;
pub mod pricing;
pub mod scene;
pub mod selector;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use assets::{AssetId, AssetRegistry, AssetState, LoadTicket};
pub use camera::{Camera, OrbitController, OrbitLimits, OrbitPose, ViewPreset};
pub use compose::compose;
pub use configurator::Configurator;
pub use dimension::{Axis, Dimensions, EntryOutcome, InputMode};
pub use error::ConfigError;
pub use features::{Feature, FeatureSet, Placement};
pub use picking::{screen_ray, Ray};
pub use pricing::{compute_price, format_price, PriceTable};
pub use scene::{Geometry, HitTarget, Light, Material, SceneGraph, Shading};
pub use selector::SelectorState;
