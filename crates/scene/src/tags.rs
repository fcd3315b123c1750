use serde::{Deserialize, Serialize};

/// Random per-tag identifier. Zero means the tag never received one.
pub type AssetGuid = u64;

pub const UNASSIGNED_GUID: AssetGuid = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderType {
    #[default]
    NoCollider,
    SelfGeometry,
    BoundingBox,
    MeshCollider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderTag {
    pub enabled: bool,
    pub scene_id: String,
    pub asset_id: String,
    pub asset_guid: AssetGuid,
    pub source_id: String,
    pub collider_type: ColliderType,
    /// Only meaningful for `ColliderType::BoundingBox`.
    pub half_dimensions: [f32; 3],
    /// Only meaningful for `ColliderType::MeshCollider`.
    pub other_mesh_id: String,
}

impl Default for ColliderTag {
    fn default() -> Self {
        Self {
            enabled: false,
            scene_id: String::new(),
            asset_id: String::new(),
            asset_guid: UNASSIGNED_GUID,
            source_id: String::new(),
            collider_type: ColliderType::default(),
            half_dimensions: [1.0, 1.0, 1.0],
            other_mesh_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTag {
    pub enabled: bool,
    pub scene_id: String,
    pub asset_id: String,
    pub asset_guid: AssetGuid,
    pub source_id: String,
    pub material_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialTag {
    pub asset_id: String,
    pub asset_guid: AssetGuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneRootTag {
    pub enabled: bool,
    pub scene_id: String,
    pub quad_tree_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Collider,
    Model,
    Material,
    SceneRoot,
}

impl TagKind {
    pub fn label(self) -> &'static str {
        match self {
            TagKind::Collider => "collider",
            TagKind::Model => "model",
            TagKind::Material => "material",
            TagKind::SceneRoot => "scene root",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagRef<'a> {
    Collider(&'a ColliderTag),
    Model(&'a ModelTag),
    Material(&'a MaterialTag),
    SceneRoot(&'a SceneRootTag),
}

impl TagRef<'_> {
    pub fn kind(&self) -> TagKind {
        match self {
            TagRef::Collider(_) => TagKind::Collider,
            TagRef::Model(_) => TagKind::Model,
            TagRef::Material(_) => TagKind::Material,
            TagRef::SceneRoot(_) => TagKind::SceneRoot,
        }
    }

    /// Material tags carry no flag and always describe themselves.
    pub fn is_enabled(&self) -> bool {
        match self {
            TagRef::Collider(tag) => tag.enabled,
            TagRef::Model(tag) => tag.enabled,
            TagRef::Material(_) => true,
            TagRef::SceneRoot(tag) => tag.enabled,
        }
    }
}

/// The set of tags attached to one object. Each kind appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTags {
    pub collider: Option<ColliderTag>,
    pub model: Option<ModelTag>,
    pub material: Option<MaterialTag>,
    pub scene_root: Option<SceneRootTag>,
}

impl ObjectTags {
    pub fn is_empty(&self) -> bool {
        self.collider.is_none()
            && self.model.is_none()
            && self.material.is_none()
            && self.scene_root.is_none()
    }

    pub fn has(&self, kind: TagKind) -> bool {
        match kind {
            TagKind::Collider => self.collider.is_some(),
            TagKind::Model => self.model.is_some(),
            TagKind::Material => self.material.is_some(),
            TagKind::SceneRoot => self.scene_root.is_some(),
        }
    }

    /// Attached tags in export order: collider, model, material, scene root.
    pub fn iter(&self) -> impl Iterator<Item = TagRef<'_>> {
        [
            self.collider.as_ref().map(TagRef::Collider),
            self.model.as_ref().map(TagRef::Model),
            self.material.as_ref().map(TagRef::Material),
            self.scene_root.as_ref().map(TagRef::SceneRoot),
        ]
        .into_iter()
        .flatten()
    }

    pub fn collider_mut(&mut self) -> &mut ColliderTag {
        self.collider.get_or_insert_with(ColliderTag::default)
    }

    pub fn model_mut(&mut self) -> &mut ModelTag {
        self.model.get_or_insert_with(ModelTag::default)
    }

    pub fn scene_root_mut(&mut self) -> &mut SceneRootTag {
        self.scene_root.get_or_insert_with(SceneRootTag::default)
    }
}
