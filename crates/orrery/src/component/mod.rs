//! # Components: Per-Entity Behaviour
//!
//! A [`Component`] is one unit of behaviour owned by exactly one
//! [`Entity`](crate::entity::Entity). The set of behaviours is closed, so
//! it is an enum rather than a trait object: adding a variant makes every
//! `match` below fail to compile until it is handled.
//!
//! ```text
//!   Component
//!   ├── Primitive            draws geometry; toggles wireframe
//!   ├── Spinner              constant angular velocity
//!   ├── Bobber               sinusoidal x/y offset
//!   ├── RotationController   yaw / pitch / roll from input
//!   ├── MovementController   translate from input (camera or light bindings)
//!   └── OverlayHider         toggles the help / hint overlay regions
//! ```
//!
//! ## Two Entry Points
//!
//! - [`update`](Component::update) gets the owner's [`Spatial`] mutably and
//!   the current [`Input`]. This is the only place scene state changes.
//! - [`render`](Component::render) gets the owner by shared reference plus
//!   its already-resolved world transform, so it cannot move anything.
//!
//! Variants that have nothing to do in one of the passes simply return.
//!
//! ## Comparison
//!
//! - **Unity**: `MonoBehaviour.Update` / `OnRenderObject`, open-ended
//!   subclassing.
//! - **Bevy**: behaviour lives in systems, components are pure data.

mod controller;
mod motion;
mod overlay;
mod primitive;

pub use controller::{MovementBindings, MovementController, RotationController};
pub use motion::{Bobber, Spinner};
pub use overlay::{Display, OverlayHider, OverlayRegion};
pub use primitive::Primitive;

use crate::entity::Entity;
use crate::input::Input;
use crate::math::Mat4;
use crate::render::{RenderBackend, RenderState};
use crate::spatial::Spatial;

/// One behaviour attached to an entity.
#[derive(Debug, Clone)]
pub enum Component {
    Primitive(Primitive),
    Spinner(Spinner),
    Bobber(Bobber),
    RotationController(RotationController),
    MovementController(MovementController),
    OverlayHider(OverlayHider),
}

impl Component {
    /// Advance by `delta` seconds, mutating the owner's spatial state.
    pub fn update(&mut self, delta: f32, spatial: &mut Spatial, input: &Input) {
        match self {
            Component::Primitive(primitive) => primitive.update(input),
            Component::Spinner(spinner) => spinner.update(delta, spatial),
            Component::Bobber(bobber) => bobber.update(delta, spatial),
            Component::RotationController(controller) => controller.update(delta, spatial, input),
            Component::MovementController(controller) => controller.update(delta, spatial, input),
            Component::OverlayHider(hider) => hider.update(input),
        }
    }

    /// Emit draw calls for the owner, whose world transform is `world`.
    pub fn render(&self, backend: &mut dyn RenderBackend, state: &RenderState, owner: &Entity, world: Mat4) {
        match self {
            Component::Primitive(primitive) => primitive.render(backend, state, owner, world),
            Component::Spinner(_)
            | Component::Bobber(_)
            | Component::RotationController(_)
            | Component::MovementController(_)
            | Component::OverlayHider(_) => {}
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Component::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn as_primitive_mut(&mut self) -> Option<&mut Primitive> {
        match self {
            Component::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn as_overlay_hider(&self) -> Option<&OverlayHider> {
        match self {
            Component::OverlayHider(hider) => Some(hider),
            _ => None,
        }
    }

    /// Short variant name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Primitive(_) => "Primitive",
            Component::Spinner(_) => "Spinner",
            Component::Bobber(_) => "Bobber",
            Component::RotationController(_) => "RotationController",
            Component::MovementController(_) => "MovementController",
            Component::OverlayHider(_) => "OverlayHider",
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Component {
                fn from(value: $variant) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Primitive,
    Spinner,
    Bobber,
    RotationController,
    MovementController,
    OverlayHider,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_the_variant() {
        let spinner: Component = Spinner::new(1.0, 0.0, 0.0).into();
        assert_eq!(spinner.kind(), "Spinner");
        assert!(spinner.as_overlay_hider().is_none());
    }
}
