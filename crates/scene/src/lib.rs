mod hair;
mod tags;

use glam::Mat4;
use serde::{Deserialize, Serialize};

pub use hair::{HairSystem, ParticleSystem, Strand};
pub use tags::{
    AssetGuid, ColliderTag, ColliderType, MaterialTag, ModelTag, ObjectTags, SceneRootTag,
    TagKind, TagRef, UNASSIGNED_GUID,
};

fn identity_matrix() -> [f32; 16] {
    Mat4::IDENTITY.to_cols_array()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub tags: ObjectTags,
    #[serde(default)]
    pub particle_systems: Vec<ParticleSystem>,
    /// Column-major object-to-world matrix.
    #[serde(default = "identity_matrix")]
    pub world_matrix: [f32; 16],
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: ObjectTags::default(),
            particle_systems: Vec::new(),
            world_matrix: identity_matrix(),
        }
    }

    pub fn with_particle_system(mut self, system: ParticleSystem) -> Self {
        self.particle_systems.push(system);
        self
    }

    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_cols_array(&self.world_matrix)
    }

    pub fn tags_mut(&mut self) -> &mut ObjectTags {
        &mut self.tags
    }

    /// Hair systems in extraction order; other particle kinds are skipped.
    pub fn hair_systems(&self) -> Vec<&HairSystem> {
        self.particle_systems
            .iter()
            .filter_map(ParticleSystem::as_hair)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub selected: Vec<usize>,
    pub active: Option<usize>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            selected: Vec::new(),
            active: None,
        }
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|object| object.name == name)
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|index| self.objects.get(index))
    }

    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.selected
            .iter()
            .filter_map(|index| self.objects.get(*index))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.objects.len() && !self.selected.contains(&index) {
            self.selected.push(index);
        }
    }

    pub fn scene_root(&self) -> Option<&SceneObject> {
        self.objects.iter().find(|object| {
            object
                .tags
                .scene_root
                .as_ref()
                .is_some_and(|root| root.enabled)
        })
    }
}
