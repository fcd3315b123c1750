use std::io::Write;
use std::path::Path;

use flexkit_scene::{ColliderTag, MaterialTag, ModelTag, Scene, SceneObject, SceneRootTag, TagRef};

use crate::error::ExportError;
use crate::settings::ExportSettings;

pub fn collider_block(tag: &ColliderTag) -> String {
    if !tag.enabled {
        return String::new();
    }
    identity_block(&tag.scene_id, "MeshCollider", &tag.asset_id, tag.asset_guid)
}

pub fn model_block(tag: &ModelTag) -> String {
    if !tag.enabled {
        return String::new();
    }
    let mut out = identity_block(&tag.scene_id, "Model", &tag.asset_id, tag.asset_guid);
    out.push('\n');
    out
}

pub fn scene_root_block(tag: &SceneRootTag) -> String {
    if !tag.enabled {
        return String::new();
    }
    format!(
        "{} : SceneRoot =\n{{ \n\tquadTreeSize\t: {}\n}};\n",
        tag.scene_id, tag.quad_tree_size
    )
}

pub fn material_block(tag: &MaterialTag) -> String {
    format!("{}{{}}}};\n", tag.asset_id)
}

// Collider blocks end at the semicolon, model blocks add a newline.
fn identity_block(scene_id: &str, type_name: &str, asset_id: &str, asset_guid: u64) -> String {
    format!(
        "{scene_id} : {type_name} =\n{{ \n\tassetID  \t: {asset_id}\n\tassetGUID\t: {asset_guid}\n}};"
    )
}

#[derive(Debug, Clone, Default)]
pub struct MetadataCollector {
    include_materials: bool,
}

impl MetadataCollector {
    pub fn new(settings: &ExportSettings) -> Self {
        Self {
            include_materials: settings.include_materials,
        }
    }

    pub fn tag_block(&self, tag: TagRef<'_>) -> String {
        match tag {
            TagRef::Collider(tag) => collider_block(tag),
            TagRef::Model(tag) => model_block(tag),
            TagRef::Material(tag) if self.include_materials => material_block(tag),
            TagRef::Material(_) => String::new(),
            TagRef::SceneRoot(tag) => scene_root_block(tag),
        }
    }

    pub fn object_metadata(&self, object: &SceneObject) -> String {
        object
            .tags
            .iter()
            .map(|tag| self.tag_block(tag))
            .collect()
    }

    pub fn collect(&self, objects: &[SceneObject]) -> String {
        let mut out = String::new();
        for object in objects {
            out.push_str(&self.object_metadata(object));
        }
        tracing::debug!(
            "collected {} bytes of metadata from {} objects",
            out.len(),
            objects.len()
        );
        out
    }

    pub fn collect_scene(&self, scene: &Scene) -> String {
        self.collect(&scene.objects)
    }

    /// Writes the collected text to a caller-supplied sink.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        objects: &[SceneObject],
    ) -> Result<(), ExportError> {
        self.write_text(writer, objects)
            .map_err(ExportError::SinkFailure)
    }

    fn write_text<W: Write>(&self, writer: &mut W, objects: &[SceneObject]) -> std::io::Result<()> {
        writer.write_all(self.collect(objects).as_bytes())?;
        writer.flush()
    }

    pub fn export_to_path(&self, objects: &[SceneObject], path: &Path) -> Result<(), ExportError> {
        let file = std::fs::File::create(path).map_err(|err| ExportError::write(path, err))?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_text(&mut writer, objects)
            .map_err(|err| ExportError::write(path, err))?;
        tracing::info!("metadata written to {:?}", path);
        Ok(())
    }
}
