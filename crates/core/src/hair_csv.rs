use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flexkit_scene::{HairSystem, Scene, SceneObject};

use crate::error::ExportError;
use crate::settings::HairSpace;

/// One path per system. A single system keeps `base`; several get `<stem>.<index>.csv`.
pub fn hair_output_paths(base: &Path, count: usize) -> Vec<PathBuf> {
    if count == 1 {
        return vec![base.to_path_buf()];
    }
    (0..count)
        .map(|index| base.with_extension(format!("{index}.csv")))
        .collect()
}

/// Writes one line per strand, each point as `(x y z), `.
pub fn write_hair_system<W: Write>(writer: &mut W, system: &HairSystem) -> std::io::Result<()> {
    for strand in &system.strands {
        for p in &strand.points {
            write!(writer, "({} {} {}), ", p[0], p[1], p[2])?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HairCurveExporter {
    space: HairSpace,
}

impl HairCurveExporter {
    pub fn new(space: HairSpace) -> Self {
        Self { space }
    }

    /// Writes every hair system of `object`. Files written before a failure are kept.
    pub fn export(&self, object: &SceneObject, base: &Path) -> Result<Vec<PathBuf>, ExportError> {
        let systems = object.hair_systems();
        if systems.is_empty() {
            tracing::warn!("{:?} has no hair particle system", object.name);
            return Err(ExportError::NoHairData {
                object: object.name.clone(),
            });
        }

        let paths = hair_output_paths(base, systems.len());
        for (system, path) in systems.iter().zip(&paths) {
            match self.space {
                HairSpace::Local => write_hair_file(path, system)?,
                HairSpace::World => {
                    let mut world = (*system).clone();
                    world.transform(object.world_transform());
                    write_hair_file(path, &world)?;
                }
            }
            tracing::info!(
                "hair system {:?} ({} strands) written to {:?}",
                system.name,
                system.strands.len(),
                path
            );
        }
        Ok(paths)
    }

    pub fn export_active(&self, scene: &Scene, base: &Path) -> Result<Vec<PathBuf>, ExportError> {
        let object = scene.active_object().ok_or(ExportError::NoSelection)?;
        self.export(object, base)
    }
}

pub fn export_hair_csv(object: &SceneObject, base: &Path) -> Result<Vec<PathBuf>, ExportError> {
    HairCurveExporter::default().export(object, base)
}

fn write_hair_file(path: &Path, system: &HairSystem) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|err| ExportError::write(path, err))?;
    let mut writer = BufWriter::new(file);
    write_hair_system(&mut writer, system)
        .and_then(|_| writer.flush())
        .map_err(|err| ExportError::write(path, err))
}
