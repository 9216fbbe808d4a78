//! # Entity: Spatial State Plus Ordered Behaviour
//!
//! An [`Entity`] is a [`Spatial`] with an append-only list of
//! [`Component`]s. Both passes walk the list front to back:
//!
//! ```text
//!   components: [A, B, C]
//!
//!   update  → A.update(spatial) → B.update(spatial) → C.update(spatial)
//!   render  → A.render(&self)   → B.render(&self)   → C.render(&self)
//! ```
//!
//! Order matters. A [`Bobber`](crate::component::Bobber) added after a
//! [`MovementController`](crate::component::MovementController) overwrites
//! the x/y the controller just produced.
//!
//! Camera and light are not separate types. An entity *is* the camera when
//! it carries a [`Lens`], and *is* the light when it carries a
//! [`PointLight`]; its spatial state places it in the world like anything
//! else.

use crate::camera::Lens;
use crate::component::{Component, Primitive};
use crate::input::Input;
use crate::light::PointLight;
use crate::math::Mat4;
use crate::render::{RenderBackend, RenderState};
use crate::spatial::Spatial;

/// A spatial object that owns an ordered list of components.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub spatial: Spatial,
    components: Vec<Component>,
    lens: Option<Lens>,
    light: Option<PointLight>,
    name: Option<String>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// An entity starting out with `components`, in that order.
    pub fn with_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Give the entity a name for [`World::find`](crate::world::World::find).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_spatial(mut self, spatial: Spatial) -> Self {
        self.spatial = spatial;
        self
    }

    /// Make this entity a camera.
    pub fn with_lens(mut self, lens: Lens) -> Self {
        self.lens = Some(lens);
        self
    }

    /// Make this entity a light.
    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = Some(light);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn lens(&self) -> Option<&Lens> {
        self.lens.as_ref()
    }

    pub fn light(&self) -> Option<&PointLight> {
        self.light.as_ref()
    }

    /// Append a component. It runs after every component already attached.
    pub fn add_component(&mut self, component: impl Into<Component>) {
        let component = component.into();
        log::trace!("{} += {}", self.name().unwrap_or("<unnamed>"), component.kind());
        self.components.push(component);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The first component matching `predicate`.
    pub fn find_component(&self, predicate: impl Fn(&Component) -> bool) -> Option<&Component> {
        self.components.iter().find(|c| predicate(c))
    }

    /// The first [`Primitive`], if any.
    pub fn primitive(&self) -> Option<&Primitive> {
        self.components.iter().find_map(Component::as_primitive)
    }

    pub fn primitive_mut(&mut self) -> Option<&mut Primitive> {
        self.components.iter_mut().find_map(Component::as_primitive_mut)
    }

    /// Run every component's update, in order.
    pub fn update(&mut self, delta: f32, input: &Input) {
        for component in &mut self.components {
            component.update(delta, &mut self.spatial, input);
        }
    }

    /// Run every component's render, in order. `world` is this entity's
    /// resolved world transform.
    pub fn render(&self, backend: &mut dyn RenderBackend, state: &RenderState, world: Mat4) {
        for component in &self.components {
            component.render(backend, state, self, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Bobber, MovementController, Spinner};
    use crate::input::actions;
    use crate::material::Material;
    use crate::math::Vec3;
    use crate::mesh;
    use crate::render::CommandRecorder;

    #[test]
    fn typed_accessor_finds_first_primitive() {
        let mut recorder = CommandRecorder::new();
        let mut entity = Entity::new();
        entity.add_component(Spinner::new(0.0, 1.0, 0.0));
        entity.add_component(Primitive::create(&mut recorder, &mesh::cube(1.0), Material::default()));
        assert!(entity.primitive().is_some());

        entity.primitive_mut().unwrap().material.set_shininess(48.0);
        assert_eq!(entity.primitive().unwrap().material.shininess(), 48.0);
    }

    #[test]
    fn find_component_with_predicate() {
        let entity = Entity::with_components([Spinner::new(0.0, 0.0, 0.0).into()]);
        assert!(entity.find_component(|c| matches!(c, Component::Spinner(_))).is_some());
        assert!(entity.find_component(|c| matches!(c, Component::Bobber(_))).is_none());
        assert!(entity.primitive().is_none());
    }

    #[test]
    fn later_components_see_earlier_results() {
        let mut input = Input::from_bindings([(actions::MOVE_RIGHT, "d")], false);
        input.press_key("d");

        // Movement first, bobber second: the bobber has the last word on x/y.
        let mut entity = Entity::new();
        entity.add_component(MovementController::new(10.0, Vec3::ZERO));
        entity.add_component(Bobber::new(0.0, 0.0, 2.0, 3.0, 1.0));
        entity.spatial.translation.z = 4.0;
        entity.update(1.0, &input);
        assert_eq!(entity.spatial.translation, Vec3::new(2.0, 3.0, 4.0));

        // Reversed: the controller moves the bobbed position.
        let mut entity = Entity::new();
        entity.add_component(Bobber::new(0.0, 0.0, 2.0, 3.0, 1.0));
        entity.add_component(MovementController::new(10.0, Vec3::ZERO));
        entity.update(1.0, &input);
        assert_eq!(entity.spatial.translation, Vec3::new(12.0, 3.0, 0.0));
    }

    #[test]
    fn render_visits_components_in_order() {
        let mut recorder = CommandRecorder::new();
        let mut entity = Entity::new();
        let first = Primitive::create(&mut recorder, &mesh::cube(1.0), Material::default());
        let second = Primitive::create(&mut recorder, &mesh::sphere(1.0, 4, 4), Material::default());
        let third = Primitive::create(&mut recorder, &mesh::cube(2.0), Material::default());
        let expected = [first.geometry(), second.geometry(), third.geometry()];
        entity.add_component(first);
        entity.add_component(Spinner::new(1.0, 0.0, 0.0));
        entity.add_component(second);
        entity.add_component(third);

        entity.render(&mut recorder, &RenderState::default(), Mat4::IDENTITY);
        let drawn: Vec<_> = recorder.draws().iter().map(|d| d.geometry).collect();
        assert_eq!(drawn, expected);
    }
}
