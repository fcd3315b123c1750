use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

pub const DEFAULT_QUAD_TREE_SIZE: u32 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HairSpace {
    #[default]
    Local,
    World,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub include_materials: bool,
    pub default_quad_tree_size: u32,
    pub hair_space: HairSpace,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_materials: false,
            default_quad_tree_size: DEFAULT_QUAD_TREE_SIZE,
            hair_space: HairSpace::Local,
        }
    }
}

impl ExportSettings {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let text = std::fs::read_to_string(path).map_err(|err| ExportError::InvalidInput {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json(&text).map_err(|err| ExportError::InvalidInput {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = ExportSettings::from_json("{}").unwrap();
        assert_eq!(settings, ExportSettings::default());
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let settings =
            ExportSettings::from_json(r#"{ "include_materials": true, "hair_space": "World" }"#)
                .unwrap();
        assert!(settings.include_materials);
        assert_eq!(settings.hair_space, HairSpace::World);
        assert_eq!(settings.default_quad_tree_size, DEFAULT_QUAD_TREE_SIZE);
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let err = ExportSettings::load(Path::new("/nonexistent/flexkit/settings.json"))
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidInput { .. }));
    }
}
