//! # Orrery: A Small Scene-Graph Demo
//!
//! A hierarchy of entities, each a [`Spatial`](spatial::Spatial) plus an
//! ordered list of [`Component`](component::Component)s, updated and
//! rendered once per frame. Parents are plain ids into the
//! [`World`](world::World)'s flat entity list; world transforms are composed
//! on demand.
//!
//! Rendering goes through the [`RenderBackend`](render::RenderBackend)
//! trait. The `window` feature (on by default) provides a wgpu backend and a
//! winit frame loop; without it the crate is headless and draws into a
//! [`CommandRecorder`](render::CommandRecorder).
//!
//! Start with `use orrery::prelude::*` and build the demo with
//! [`World::create`](world::World::create).

pub mod asset;
pub mod camera;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod input;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod prelude;
pub mod render;
pub mod scene;
pub mod spatial;
pub mod time;
pub mod world;

#[cfg(feature = "window")]
pub mod app;
#[cfg(feature = "window")]
pub(crate) mod window;

pub use error::{OrreryError, Result};
