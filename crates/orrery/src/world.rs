//! # World: The Flat Entity List
//!
//! The [`World`] owns every [`Entity`] in one `Vec`. The hierarchy is not a
//! tree of boxes: each entity's [`Spatial`](crate::spatial::Spatial) holds
//! an optional [`EntityId`] naming its parent, and nothing else links them.
//!
//! ```text
//!   entities: [ sphere0 … sphere7, camera, cube, cylinder, pivot, … ]
//!                  │                 │        ▲      │  ▲        ▲
//!                  └── parent ───────┼────────┼──────┘  │        │
//!                                    │        └─ parent ┘        │
//!                                    └────────── parent ─────────┘
//! ```
//!
//! List order is pass order: [`update`](World::update) and
//! [`render`](World::render) walk front to back, and each entity walks its
//! own components front to back. Because parents can appear after their
//! children, a child may be updated before its parent in the same frame;
//! world transforms are resolved at render time, after every update has run,
//! so that never shows on screen.
//!
//! ## World Transforms
//!
//! [`transformation`](World::transformation) composes
//! `… × grandparent.local × parent.local × local` by walking the parent
//! chain on every call. Nothing is cached.
//!
//! ## Comparison
//!
//! - **Bevy**: `Parent` / `Children` components and a transform propagation
//!   system that writes `GlobalTransform` once per frame.
//! - **Godot**: a real node tree; the tree owns the children.

use std::collections::HashMap;

use crate::entity::Entity;
use crate::error::{OrreryError, Result};
use crate::input::Input;
use crate::math::{Color, Mat4, Vec3};
use crate::render::{RenderBackend, RenderState};

/// Index of an entity in its [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    /// Position in the world's pass order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every entity and drives the per-frame passes.
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    /// Named entity lookup: name → entity.
    names: HashMap<String, EntityId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. It runs after every entity already in the world.
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len());
        if let Some(parent) = entity.spatial.parent() {
            if parent.0 >= self.entities.len() {
                log::warn!("Entity {id:?} arrived with unknown parent {parent:?}; detached");
                entity.spatial.set_parent(None);
            }
        }
        if let Some(name) = entity.name() {
            if self.names.contains_key(name) {
                log::warn!("Entity name '{name}' is already taken; lookup keeps the first");
            } else {
                self.names.insert(name.to_owned(), id);
            }
        }
        self.entities.push(entity);
        id
    }

    /// Append several entities, in order.
    pub fn add_entities(&mut self, entities: impl IntoIterator<Item = Entity>) -> Vec<EntityId> {
        entities.into_iter().map(|e| self.add_entity(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// Look an entity up by the name it was given with
    /// [`Entity::named`].
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Entities in pass order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().enumerate().map(|(i, e)| (EntityId(i), e))
    }

    /// The first entity carrying a [`Lens`](crate::camera::Lens).
    pub fn camera(&self) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.lens().is_some()).map(|(id, _)| id)
    }

    /// The first entity carrying a [`PointLight`](crate::light::PointLight).
    pub fn light(&self) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.light().is_some()).map(|(id, _)| id)
    }

    /// Express `child` relative to `parent`, or detach it with `None`.
    ///
    /// Fails if either id is unknown or if `parent` is `child` or one of its
    /// descendants.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        self.check(child)?;
        if let Some(parent) = parent {
            self.check(parent)?;
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                if ancestor == child {
                    return Err(OrreryError::ParentCycle { child, parent });
                }
                cursor = self.entities[ancestor.0].spatial.parent();
            }
        }
        self.entities[child.0].spatial.set_parent(parent);
        Ok(())
    }

    /// World transform of `id`: every ancestor's local matrix composed with
    /// its own, root first.
    pub fn transformation(&self, id: EntityId) -> Option<Mat4> {
        let entity = self.get(id)?;
        let mut matrix = entity.spatial.local_matrix();
        let mut cursor = entity.spatial.parent();
        let mut depth = 0;
        while let Some(parent) = cursor {
            let Some(ancestor) = self.get(parent) else {
                log::warn!("Entity {id:?} has a dangling parent {parent:?}");
                break;
            };
            depth += 1;
            if depth > self.entities.len() {
                log::error!("Parent chain of {id:?} does not terminate");
                break;
            }
            matrix = ancestor.spatial.local_matrix() * matrix;
            cursor = ancestor.spatial.parent();
        }
        Some(matrix)
    }

    /// Translation column of [`transformation`](Self::transformation).
    pub fn world_translation(&self, id: EntityId) -> Option<Vec3> {
        self.transformation(id).map(|m| m.w_axis.truncate())
    }

    /// Update every entity, in list order.
    pub fn update(&mut self, delta: f32, input: &Input) {
        for entity in &mut self.entities {
            entity.update(delta, input);
        }
    }

    /// Render every entity, in list order. Must follow [`update`](Self::update)
    /// within a frame.
    pub fn render(&self, backend: &mut dyn RenderBackend, state: &RenderState) {
        for (id, entity) in self.iter() {
            let world = self.transformation(id).unwrap_or(Mat4::IDENTITY);
            entity.render(backend, state, world);
        }
    }

    /// Capture the frame's [`RenderState`], start the frame on `backend`
    /// and render every entity into it.
    pub fn draw_frame(&self, backend: &mut dyn RenderBackend, aspect: f32, clear_color: Color) -> RenderState {
        let state = RenderState::capture(self, aspect, clear_color);
        backend.begin_frame(&state);
        self.render(backend, &state);
        state
    }

    fn check(&self, id: EntityId) -> Result<()> {
        if id.0 < self.entities.len() {
            Ok(())
        } else {
            Err(OrreryError::UnknownEntity(id))
        }
    }
}
