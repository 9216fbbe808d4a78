//! # Scene: The Demo Assembly
//!
//! [`World::create`] builds the demo scene once at startup: a rotating
//! pivot with the camera on a boom, a movable light with a small emissive
//! "sun", and a bobbing cube carrying a spinning cylinder, a ring of eight
//! spheres and a teapot.
//!
//! ```text
//!   pivot (RotationController)
//!   └── camera (0,0,6)   MovementController
//!
//!   light (1.1,0.75,2.5) MovementController (light bindings)
//!   └── sun              emissive sphere, scale 0.1
//!
//!   cube                 Bobber + Spinner, container texture
//!   ├── cylinder (0,4,0) Spinner, scale 0.5
//!   │   └── sphere0..7   radius 3 in the XY plane, Bobber each
//!   └── teapot (0,1.333,0) scale 0.05
//!
//!   overlay              OverlayHider
//! ```
//!
//! The flat list order, which is also the update and render order, is:
//! spheres, camera, cube, cylinder, pivot, teapot, light, sun, overlay.
//!
//! Every entity is named, so callers address them with
//! [`World::find`]: `"pivot"`, `"camera"`, `"light"`, `"sun"`, `"cube"`,
//! `"cylinder"`, `"sphere0"` … `"sphere7"`, `"teapot"`, `"overlay"`.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::path::{Path, PathBuf};

use crate::asset::{TextureLoader, load_mesh};
use crate::camera::Lens;
use crate::component::{
    Bobber, Component, MovementController, OverlayHider, OverlayRegion, Primitive, RotationController, Spinner,
};
use crate::entity::Entity;
use crate::error::Result;
use crate::light::PointLight;
use crate::material::Material;
use crate::math::{Color, Vec3};
use crate::mesh::{self, MeshData};
use crate::render::RenderBackend;
use crate::spatial::Spatial;
use crate::world::World;

/// Number of spheres orbiting the cylinder.
pub const SPHERE_COUNT: usize = 8;
/// Distance of each sphere from the cylinder's origin.
pub const SPHERE_ORBIT: f32 = 3.0;

const HELP_TEXT: &str = "WASD move camera | X/Y/Z rotate (Shift reverses) | IJKL/U/O move light | \
F wireframe (Shift+F off) | R reset | H hide help";
const HINT_TEXT: &str = "Shift+H for help";

/// Meshes and texture paths the demo scene needs.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub teapot: MeshData,
    pub container_texture: Option<PathBuf>,
    pub tile_texture: Option<PathBuf>,
}

impl SceneAssets {
    /// Look for `mesh_teapot.json`, `container.jpg` and `tile.jpg` in `dir`.
    ///
    /// A teapot file that exists but does not load is an error. A missing
    /// one is replaced by a sphere of similar size.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let teapot_path = dir.join("mesh_teapot.json");
        let teapot = if teapot_path.exists() {
            load_mesh(&teapot_path)?
        } else {
            log::warn!("'{}' not found; using a stand-in sphere", teapot_path.display());
            stand_in_teapot()
        };
        Ok(Self {
            teapot,
            container_texture: Some(dir.join("container.jpg")),
            tile_texture: Some(dir.join("tile.jpg")),
        })
    }

    /// Generated geometry only, no textures. Needs no files.
    pub fn builtin() -> Self {
        Self {
            teapot: stand_in_teapot(),
            container_texture: None,
            tile_texture: None,
        }
    }
}

fn stand_in_teapot() -> MeshData {
    // Teapot coordinates are authored roughly 20x larger than the scene.
    mesh::sphere(15.0, 24, 16)
}

// ── Factories ───────────────────────────────────────────────────────────────

/// Primitive components built from the shape generators.
pub mod components {
    use super::*;

    pub fn cube(backend: &mut dyn RenderBackend, size: f32, material: Material) -> Primitive {
        Primitive::create(backend, &mesh::cube(size), material)
    }

    pub fn cylinder(
        backend: &mut dyn RenderBackend,
        base_radius: f32,
        top_radius: f32,
        height: f32,
        slices: u32,
        stacks: u32,
        material: Material,
    ) -> Primitive {
        let mesh = mesh::cylinder(base_radius, top_radius, height, slices, stacks);
        Primitive::create(backend, &mesh, material)
    }

    pub fn sphere(backend: &mut dyn RenderBackend, radius: f32, slices: u32, stacks: u32, material: Material) -> Primitive {
        Primitive::create(backend, &mesh::sphere(radius, slices, stacks), material)
    }
}

/// Single-primitive entities with the demo's standard proportions.
pub mod entities {
    use super::*;

    /// A unit cube.
    pub fn cube(backend: &mut dyn RenderBackend, material: Material) -> Entity {
        Entity::with_components([components::cube(backend, 1.0, material).into()])
    }

    /// Radius 1, height 2, 36 slices, 1 stack.
    pub fn cylinder(backend: &mut dyn RenderBackend, material: Material) -> Entity {
        Entity::with_components([components::cylinder(backend, 1.0, 1.0, 2.0, 36, 1, material).into()])
    }

    /// Radius 0.75, 18 slices, 18 stacks.
    pub fn sphere(backend: &mut dyn RenderBackend, material: Material) -> Entity {
        Entity::with_components([components::sphere(backend, 0.75, 18, 18, material).into()])
    }
}

/// Colour of sphere `i`: the first is pure `color1`, the rest blend from
/// `color2` toward `color1` by how far their angle is from π.
pub fn sphere_color(i: usize) -> Color {
    let color1 = Color::from_u8(211, 71, 61);
    let color2 = Color::from_u8(134, 188, 209);
    if i == 0 {
        return color1;
    }
    let radians = TAU * (i as f32 / SPHERE_COUNT as f32);
    Color::lerp(color2, color1, (PI - radians).abs() / PI)
}

fn set_material(entity: &mut Entity, edit: impl FnOnce(&mut Material)) {
    if let Some(primitive) = entity.primitive_mut() {
        edit(&mut primitive.material);
    }
}

impl World {
    /// Assemble the demo scene.
    ///
    /// Geometry is uploaded through `backend`; textures start loading through
    /// `textures` and appear once it is polled.
    pub fn create(backend: &mut dyn RenderBackend, textures: &mut TextureLoader, assets: &SceneAssets) -> Result<World> {
        // Pivot: the camera orbits by rotating this.
        let mut pivot = Entity::new().named("pivot");
        pivot.add_component(RotationController::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, pivot.spatial.rotation));

        let camera_spatial = Spatial::from_xyz(0.0, 0.0, 6.0);
        let mut camera = Entity::new()
            .named("camera")
            .with_lens(Lens::default())
            .with_spatial(camera_spatial);
        camera.add_component(MovementController::new(10.0, camera_spatial.translation));

        let light_spatial = Spatial::from_xyz(1.1, 0.75, 2.5);
        let mut light = Entity::new()
            .named("light")
            .with_light(PointLight::uniform(0.125, 0.9, 0.5))
            .with_spatial(light_spatial);
        light.add_component(MovementController::light(10.0, light_spatial.translation));

        let mut sun = entities::sphere(backend, Material::default())
            .named("sun")
            .with_spatial(Spatial::default().with_scale(0.1));
        set_material(&mut sun, |m| {
            m.set_emission(Color::WHITE);
            m.set_shininess(1.0);
        });

        let mut cube = entities::cube(backend, Material::from_diffuse(Color::WHITE))
            .named("cube")
            .with_spatial(Spatial::default().with_scale(0.5));
        cube.add_component(Bobber::new(0.0, 2.0, 0.0, -1.0, 0.125));
        cube.add_component(Spinner::new(0.0, 0.25, 0.0));
        if let Some(path) = &assets.container_texture {
            let albedo = textures.load(backend, path);
            set_material(&mut cube, |m| m.albedo = Some(albedo));
        }

        let mut cylinder = entities::cylinder(backend, Material::from_diffuse(Color::from_u8(245, 239, 235)))
            .named("cylinder")
            .with_spatial(Spatial::default().with_translation(Vec3::Y * 4.0).with_scale(0.5));
        cylinder.add_component(Spinner::new(0.0, 2.0, 1.4));
        set_material(&mut cylinder, |m| m.set_shininess(Material::MAX_SHININESS));

        let tile = assets.tile_texture.as_ref().map(|path| textures.load(backend, path));
        let mut spheres = Vec::with_capacity(SPHERE_COUNT);
        for i in 0..SPHERE_COUNT {
            let radians = TAU * (i as f32 / SPHERE_COUNT as f32);
            let translation = Vec3::new(radians.cos(), radians.sin(), 0.0) * SPHERE_ORBIT;

            let mut sphere = entities::sphere(backend, Material::from_diffuse(sphere_color(i)))
                .named(format!("sphere{i}"))
                .with_spatial(Spatial::default().with_translation(translation));
            sphere.add_component(Bobber::with_phase(-10.0, 10.0, translation.x, translation.y, 0.125, i as f32));
            set_material(&mut sphere, |m| {
                m.albedo = tile;
                m.set_shininess(16.0);
            });
            spheres.push(sphere);
        }

        let mut teapot_material = Material::from_diffuse(Color::from_u8(246, 173, 15));
        teapot_material.set_shininess(48.0);
        let teapot = Entity::with_components([Primitive::create(backend, &assets.teapot, teapot_material).into()])
            .named("teapot")
            .with_spatial(
                Spatial::default()
                    .with_translation(Vec3::new(0.0, 1.333, 0.0))
                    .with_scale(0.05),
            );

        let overlay = Entity::with_components([Component::from(OverlayHider::new(
            OverlayRegion::new("show-overlay", HELP_TEXT),
            OverlayRegion::new("hide-overlay", HINT_TEXT),
            true,
        ))])
        .named("overlay");

        let mut world = World::new();
        let sphere_ids = world.add_entities(spheres);
        let camera = world.add_entity(camera);
        let cube = world.add_entity(cube);
        let cylinder = world.add_entity(cylinder);
        let pivot = world.add_entity(pivot);
        let teapot = world.add_entity(teapot);
        let light = world.add_entity(light);
        let sun = world.add_entity(sun);
        world.add_entity(overlay);

        world.set_parent(camera, Some(pivot))?;
        world.set_parent(sun, Some(light))?;
        world.set_parent(cylinder, Some(cube))?;
        world.set_parent(teapot, Some(cube))?;
        for id in sphere_ids {
            world.set_parent(id, Some(cylinder))?;
        }

        log::info!("Assembled scene with {} entities", world.len());
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_sphere_uses_color1_and_others_blend() {
        assert_eq!(sphere_color(0), Color::from_u8(211, 71, 61));
        // Sphere 4 sits at π: fully color2.
        let c = sphere_color(4);
        let color2 = Color::from_u8(134, 188, 209);
        assert_abs_diff_eq!(c.r, color2.r, epsilon = 1e-6);
        assert_abs_diff_eq!(c.b, color2.b, epsilon = 1e-6);
    }

    #[test]
    fn entity_factories_use_standard_proportions() {
        let mut recorder = crate::render::CommandRecorder::new();
        let cylinder = entities::cylinder(&mut recorder, Material::default());
        assert_eq!(cylinder.primitive().unwrap().index_count(), 36 * 6 * 2);
        let sphere = entities::sphere(&mut recorder, Material::default());
        assert_eq!(sphere.primitive().unwrap().index_count(), 18 * 18 * 6);
        let cube = entities::cube(&mut recorder, Material::default());
        assert_eq!(cube.primitive().unwrap().index_count(), 36);
    }

    #[test]
    fn builtin_assets_need_no_files() {
        let assets = SceneAssets::builtin();
        assert!(assets.container_texture.is_none());
        assets.teapot.validate().unwrap();
    }
}
