//! Scene management
//!
//! The Part scene lives in a `bevy_ecs` [`World`]: one camera, one point light
//! and the Part entity. Built meshes are owned by the [`MeshAssets`] resource
//! and entities refer to them through [`MeshHandle`]s.

mod camera;
mod light;
mod transform;

pub use camera::*;
pub use light::*;
pub use transform::*;

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3};

use crate::resources::{InterleavedMesh, MeshResult};

/// Index of a mesh in [`MeshAssets`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) usize);

/// Arena of built meshes
#[derive(Resource, Debug, Default)]
pub struct MeshAssets {
    meshes: Vec<InterleavedMesh>,
}

impl MeshAssets {
    pub fn add(&mut self, mesh: InterleavedMesh) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&InterleavedMesh> {
        self.meshes.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Marks an entity as drawing a mesh
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRenderer {
    pub mesh: MeshHandle,
}

/// A mesh to draw and the model matrix to draw it with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshHandle,
    pub model: Mat4,
}

/// Configuration for assembling the Part scene
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Camera; the point light is placed at its position
    pub camera: Camera,
    pub light: PointLight,
    /// Uniform scale applied to the Part
    pub part_scale: f32,
    pub part_rotation_axis: Vec3,
    /// Rotation about `part_rotation_axis`, in degrees
    pub part_rotation_degrees: f32,
    pub part_translation: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            light: PointLight::default(),
            part_scale: 2.0,
            part_rotation_axis: Vec3::Y,
            part_rotation_degrees: 25.0,
            part_translation: Vec3::new(5.0, 4.0, 0.0),
        }
    }
}

impl SceneConfig {
    pub fn part_transform(&self) -> Transform {
        Transform::from_position(self.part_translation)
            .with_uniform_scale(self.part_scale)
            .with_axis_angle_degrees(self.part_rotation_axis, self.part_rotation_degrees)
    }
}

/// The assembled Part scene
pub struct PartScene {
    world: World,
    camera: Entity,
    light: Entity,
    part: Entity,
}

impl PartScene {
    /// Build the Part mesh and spawn the camera, light and Part entities.
    pub fn new(config: &SceneConfig) -> MeshResult<Self> {
        let mut world = World::new();

        let mut meshes = MeshAssets::default();
        let part_mesh = meshes.add(InterleavedMesh::part()?);
        let mesh_count = meshes.len();
        world.insert_resource(meshes);

        let camera = world.spawn(config.camera.clone()).id();
        log::debug!("camera entity {:?} at {}", camera, config.camera.position);

        let light = world
            .spawn((
                config.light.clone(),
                Transform::from_position(config.camera.position),
            ))
            .id();
        log::debug!("light entity {:?} at {}", light, config.camera.position);

        let part = world
            .spawn((PartRenderer { mesh: part_mesh }, config.part_transform()))
            .id();
        log::debug!("part entity {:?} using mesh {:?}", part, part_mesh);

        log::info!(
            "Part scene ready: {} entities, {} meshes",
            world.entities().len(),
            mesh_count
        );

        Ok(Self {
            world,
            camera,
            light,
            part,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera_entity(&self) -> Entity {
        self.camera
    }

    pub fn light_entity(&self) -> Entity {
        self.light
    }

    pub fn part_entity(&self) -> Entity {
        self.part
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.world.get::<Camera>(self.camera)
    }

    pub fn meshes(&self) -> Option<&MeshAssets> {
        self.world.get_resource::<MeshAssets>()
    }

    /// The mesh drawn by the Part entity
    pub fn part_mesh(&self) -> Option<&InterleavedMesh> {
        let renderer = self.world.get::<PartRenderer>(self.part)?;
        self.meshes()?.get(renderer.mesh)
    }

    /// Every mesh-drawing entity with its model matrix
    pub fn draw_list(&mut self) -> Vec<DrawItem> {
        let mut query = self.world.query::<(&PartRenderer, &Transform)>();
        query
            .iter(&self.world)
            .map(|(renderer, transform)| DrawItem {
                mesh: renderer.mesh,
                model: transform.matrix(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_part_transform() {
        let t = SceneConfig::default().part_transform();
        assert_eq!(t.position, Vec3::new(5.0, 4.0, 0.0));
        assert_eq!(t.scale, Vec3::splat(2.0));
        let (axis, angle) = t.rotation.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-5));
        assert!((angle.to_degrees() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_mesh_assets_handles() {
        let mut assets = MeshAssets::default();
        assert!(assets.is_empty());
        let a = assets.add(InterleavedMesh::part().unwrap());
        let b = assets.add(InterleavedMesh::part().unwrap());
        assert_ne!(a, b);
        assert_eq!(assets.len(), 2);
        assert!(assets.get(b).is_some());
        assert!(assets.get(MeshHandle(2)).is_none());
    }

    #[test]
    fn test_part_scene_entities() {
        let mut scene = PartScene::new(&SceneConfig::default()).unwrap();
        let world = scene.world();

        let light_at = world.get::<Transform>(scene.light_entity()).unwrap().position;
        assert_eq!(light_at, Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(world.get::<PointLight>(scene.light_entity()), Some(&PointLight::default()));
        assert!(world.get::<Transform>(scene.camera_entity()).is_none());

        let mesh = scene.part_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        let draws = scene.draw_list();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].model, SceneConfig::default().part_transform().matrix());
    }

    #[test]
    fn test_part_scene_counts() {
        let mut scene = PartScene::new(&SceneConfig::default()).unwrap();
        let world = scene.world_mut();
        assert_eq!(world.query::<&Camera>().iter(world).count(), 1);
        assert_eq!(world.query::<&PointLight>().iter(world).count(), 1);
        assert_eq!(world.query::<&PartRenderer>().iter(world).count(), 1);
    }
}
