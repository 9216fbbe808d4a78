//! Convenience re-exports: `use orrery::prelude::*` for the common items.

// Core
pub use crate::asset::{TextureLoader, load_mesh};
pub use crate::camera::Lens;
pub use crate::component::{
    Bobber, Component, MovementBindings, MovementController, OverlayHider, OverlayRegion, Primitive,
    RotationController, Spinner,
};
pub use crate::config::DemoConfig;
pub use crate::entity::Entity;
pub use crate::error::{OrreryError, Result};
pub use crate::input::{Input, actions};
pub use crate::light::PointLight;
pub use crate::material::Material;
pub use crate::math::{Color, Mat4, Quat, Vec3};
pub use crate::mesh::MeshData;
pub use crate::render::{CommandRecorder, DrawMode, RenderBackend, RenderState};
pub use crate::scene::SceneAssets;
pub use crate::spatial::Spatial;
pub use crate::time::FrameClock;
pub use crate::world::{EntityId, World};

// Windowed (feature-gated)
#[cfg(feature = "window")]
pub use crate::app::App;
#[cfg(feature = "window")]
pub use crate::render::WgpuBackend;
