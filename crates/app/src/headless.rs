use std::path::{Path, PathBuf};
use std::process;

use flexkit_core::scene::{Scene, TagKind};
use flexkit_core::{
    create_scene_root, load_scene, save_scene, toggle_tag, ExportSettings, HairCurveExporter,
    MetadataCollector,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Default)]
pub(crate) struct HeadlessArgs {
    pub(crate) scene_path: Option<PathBuf>,
    pub(crate) settings_path: Option<PathBuf>,
    pub(crate) object: Option<String>,
    pub(crate) toggle_collider: Vec<String>,
    pub(crate) toggle_model: Vec<String>,
    pub(crate) scene_root: Option<String>,
    pub(crate) meta_path: Option<String>,
    pub(crate) hair_path: Option<PathBuf>,
    pub(crate) save_path: Option<PathBuf>,
    pub(crate) print: bool,
    pub(crate) log_level: Option<LevelFilter>,
}

pub(crate) fn parse_headless_args(args: &[String]) -> Result<HeadlessArgs, String> {
    let mut parsed = HeadlessArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--scene" => parsed.scene_path = Some(PathBuf::from(value("--scene")?)),
            "--settings" => parsed.settings_path = Some(PathBuf::from(value("--settings")?)),
            "--object" => parsed.object = Some(value("--object")?),
            "--toggle-collider" => parsed.toggle_collider.push(value("--toggle-collider")?),
            "--toggle-model" => parsed.toggle_model.push(value("--toggle-model")?),
            "--scene-root" => parsed.scene_root = Some(value("--scene-root")?),
            "--meta" => parsed.meta_path = Some(value("--meta")?),
            "--hair" => parsed.hair_path = Some(PathBuf::from(value("--hair")?)),
            "--save" => parsed.save_path = Some(PathBuf::from(value("--save")?)),
            "--log-level" => {
                let level = value("--log-level")?;
                parsed.log_level = Some(
                    level
                        .parse::<LevelFilter>()
                        .map_err(|_| format!("unknown log level {level}"))?,
                );
            }
            "--print" => parsed.print = true,
            "--help" | "-h" => {
                print_headless_help();
                process::exit(0);
            }
            other => tracing::warn!("ignoring unknown argument {other}"),
        }
    }

    Ok(parsed)
}

fn print_headless_help() {
    println!(
        "Usage: flexkit --scene <scene.json> [options]\n  \
         --settings <settings.json>\n  \
         --object <name>            object whose hair is exported\n  \
         --toggle-collider <name>   repeatable\n  \
         --toggle-model <name>      repeatable\n  \
         --scene-root <name>\n  \
         --meta <path|->            write scene metadata\n  \
         --hair <path.csv>          write hair curves\n  \
         --save <scene.json>        save the updated scene\n  \
         --print                    print the updated scene as JSON\n  \
         --log-level <level>"
    );
}

pub(crate) fn run(args: &HeadlessArgs) -> Result<(), String> {
    let scene_path = args
        .scene_path
        .as_deref()
        .ok_or_else(|| "--scene is required".to_string())?;
    let mut scene = load_scene(scene_path).map_err(|err| err.to_string())?;
    let settings = match &args.settings_path {
        Some(path) => ExportSettings::load(path).map_err(|err| err.to_string())?,
        None => ExportSettings::default(),
    };

    apply_toggles(&mut scene, args, &settings)?;

    if let Some(meta) = &args.meta_path {
        let collector = MetadataCollector::new(&settings);
        if meta == "-" {
            let mut stdout = std::io::stdout().lock();
            collector
                .write_to(&mut stdout, &scene.objects)
                .map_err(|err| err.to_string())?;
        } else {
            collector
                .export_to_path(&scene.objects, Path::new(meta))
                .map_err(|err| err.to_string())?;
        }
    }

    if let Some(base) = &args.hair_path {
        if let Some(name) = &args.object {
            let index = scene
                .find(name)
                .ok_or_else(|| format!("object {name} not found"))?;
            scene.active = Some(index);
        }
        let written = HairCurveExporter::new(settings.hair_space)
            .export_active(&scene, base)
            .map_err(|err| err.to_string())?;
        tracing::info!("headless: wrote {} hair file(s)", written.len());
    }

    if let Some(path) = &args.save_path {
        save_scene(&scene, path).map_err(|err| err.to_string())?;
        tracing::info!("headless: saved scene to {:?}", path);
    }

    if args.print {
        let json = serde_json::to_string_pretty(&scene).map_err(|err| err.to_string())?;
        println!("{json}");
    }

    tracing::info!("headless: completed");
    Ok(())
}

fn apply_toggles(
    scene: &mut Scene,
    args: &HeadlessArgs,
    settings: &ExportSettings,
) -> Result<(), String> {
    let mut rng = rand::thread_rng();
    let toggles = args
        .toggle_collider
        .iter()
        .map(|name| (name, TagKind::Collider))
        .chain(args.toggle_model.iter().map(|name| (name, TagKind::Model)));
    for (name, kind) in toggles {
        let index = scene
            .find(name)
            .ok_or_else(|| format!("object {name} not found"))?;
        toggle_tag(&mut scene.objects[index], kind, &mut rng);
    }

    if let Some(name) = &args.scene_root {
        let index = scene
            .find(name)
            .ok_or_else(|| format!("object {name} not found"))?;
        create_scene_root(scene, index, settings.default_quad_tree_size)
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}
