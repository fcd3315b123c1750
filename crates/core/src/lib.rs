mod error;
mod hair_csv;
mod metadata;
mod scene_io;
mod settings;
mod toggle;

pub use error::ExportError;
pub use hair_csv::{export_hair_csv, hair_output_paths, write_hair_system, HairCurveExporter};
pub use metadata::{
    collider_block, material_block, model_block, scene_root_block, MetadataCollector,
};
pub use scene_io::{load_scene, save_scene, scene_from_json};
pub use settings::{ExportSettings, HairSpace, DEFAULT_QUAD_TREE_SIZE};
pub use toggle::{
    create_scene_root, toggle_selected, toggle_tag, toggle_tag_with_thread_rng, GUID_MAX,
    GUID_MIN,
};

pub use flexkit_scene as scene;
