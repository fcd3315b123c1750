use std::path::Path;

use flexkit_scene::Scene;

use crate::error::ExportError;

pub fn scene_from_json(text: &str) -> Result<Scene, serde_json::Error> {
    let mut scene: Scene = serde_json::from_str(text)?;
    sanitize_selection(&mut scene);
    Ok(scene)
}

pub fn load_scene(path: &Path) -> Result<Scene, ExportError> {
    let invalid = |message: String| ExportError::InvalidInput {
        path: path.to_path_buf(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
    let scene = scene_from_json(&text).map_err(|err| invalid(err.to_string()))?;
    tracing::info!("loaded {} objects from {:?}", scene.objects.len(), path);
    Ok(scene)
}

pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), ExportError> {
    let data = serde_json::to_vec_pretty(scene).map_err(|err| ExportError::InvalidInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    std::fs::write(path, data).map_err(|err| ExportError::write(path, err))
}

fn sanitize_selection(scene: &mut Scene) {
    let count = scene.objects.len();
    scene.selected.retain(|index| {
        let valid = *index < count;
        if !valid {
            tracing::warn!("dropping selection index {} ({} objects)", index, count);
        }
        valid
    });
    if scene.active.is_some_and(|index| index >= count) {
        tracing::warn!("active index {:?} is out of range", scene.active);
        scene.active = None;
    }
}
