use flexkit_scene::{AssetGuid, Scene, SceneObject, TagKind, UNASSIGNED_GUID};
use rand::Rng;

use crate::error::ExportError;

pub const GUID_MIN: AssetGuid = 1;
pub const GUID_MAX: AssetGuid = 1_000_000_000;

/// Flips the tag of `kind` on `object`, attaching a default tag first if needed.
/// Returns the new enabled state. Scene roots flipped here are not checked for
/// uniqueness; go through `toggle_selected` or `create_scene_root` for that.
///
/// On a false to true transition the scene, asset and source ids are taken from the
/// object's current name. Colliders also receive a random GUID unless they already
/// have one; models never do. Material tags have no flag and are left alone.
pub fn toggle_tag<R: Rng>(object: &mut SceneObject, kind: TagKind, rng: &mut R) -> bool {
    let name = object.name.clone();
    let tags = object.tags_mut();
    let enabled = match kind {
        TagKind::Collider => {
            let tag = tags.collider_mut();
            tag.enabled = !tag.enabled;
            if tag.enabled {
                tag.scene_id = name.clone();
                tag.asset_id = name.clone();
                tag.source_id = name.clone();
                if tag.asset_guid == UNASSIGNED_GUID {
                    tag.asset_guid = rng.gen_range(GUID_MIN..=GUID_MAX);
                }
            }
            tag.enabled
        }
        TagKind::Model => {
            let tag = tags.model_mut();
            tag.enabled = !tag.enabled;
            if tag.enabled {
                tag.scene_id = name.clone();
                tag.asset_id = name.clone();
                tag.source_id = name.clone();
            }
            tag.enabled
        }
        TagKind::SceneRoot => {
            let tag = tags.scene_root_mut();
            tag.enabled = !tag.enabled;
            if tag.enabled {
                tag.scene_id = name.clone();
            }
            tag.enabled
        }
        TagKind::Material => {
            tracing::warn!("material tags cannot be toggled ({})", name);
            return tags.material.is_some();
        }
    };
    tracing::debug!("{} tag on {:?} enabled={}", kind.label(), name, enabled);
    enabled
}

pub fn toggle_tag_with_thread_rng(object: &mut SceneObject, kind: TagKind) -> bool {
    toggle_tag(object, kind, &mut rand::thread_rng())
}

/// Toggles `kind` on every selected object and returns how many were touched.
pub fn toggle_selected<R: Rng>(
    scene: &mut Scene,
    kind: TagKind,
    rng: &mut R,
) -> Result<usize, ExportError> {
    if kind == TagKind::SceneRoot {
        let index = scene
            .selected
            .first()
            .copied()
            .filter(|index| *index < scene.objects.len())
            .ok_or(ExportError::NoSelection)?;
        let existing = scene.objects[index].tags.scene_root.clone();
        match existing {
            Some(root) if root.enabled => {
                scene.objects[index].tags.scene_root_mut().enabled = false;
            }
            existing => {
                let size = existing
                    .map(|root| root.quad_tree_size)
                    .filter(|size| *size > 0)
                    .unwrap_or(crate::settings::DEFAULT_QUAD_TREE_SIZE);
                create_scene_root(scene, index, size)?;
            }
        }
        return Ok(1);
    }

    let selected = scene.selected.clone();
    let mut touched = 0;
    for index in selected {
        match scene.objects.get_mut(index) {
            Some(object) => {
                toggle_tag(object, kind, rng);
                touched += 1;
            }
            None => tracing::warn!("selection index {} is out of range", index),
        }
    }
    if touched == 0 {
        return Err(ExportError::NoSelection);
    }
    Ok(touched)
}

/// Marks `index` as the scene's spatial-partition root and clears every other root.
pub fn create_scene_root(
    scene: &mut Scene,
    index: usize,
    quad_tree_size: u32,
) -> Result<(), ExportError> {
    if index >= scene.objects.len() {
        return Err(ExportError::NoSelection);
    }
    for (i, object) in scene.objects.iter_mut().enumerate() {
        if i == index {
            let name = object.name.clone();
            let root = object.tags_mut().scene_root_mut();
            root.enabled = true;
            root.scene_id = name;
            root.quad_tree_size = quad_tree_size;
        } else if let Some(root) = object.tags.scene_root.as_mut() {
            if root.enabled {
                tracing::info!("clearing previous scene root {:?}", object.name);
            }
            root.enabled = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flexkit_scene::SceneObject;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn collider_toggle_on_assigns_identity_and_guid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rock = SceneObject::new("Rock_01");

        assert!(toggle_tag(&mut rock, TagKind::Collider, &mut rng));
        let tag = rock.tags.collider.clone().unwrap();
        assert_eq!(tag.scene_id, "Rock_01");
        assert_eq!(tag.asset_id, "Rock_01");
        assert_eq!(tag.source_id, "Rock_01");
        assert!((GUID_MIN..=GUID_MAX).contains(&tag.asset_guid));
    }

    #[test]
    fn collider_toggle_off_keeps_fields() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rock = SceneObject::new("Rock_01");
        toggle_tag(&mut rock, TagKind::Collider, &mut rng);
        let enabled = rock.tags.collider.clone().unwrap();

        rock.name = "Renamed".to_string();
        assert!(!toggle_tag(&mut rock, TagKind::Collider, &mut rng));
        let disabled = rock.tags.collider.clone().unwrap();
        assert!(!disabled.enabled);
        assert_eq!(disabled.scene_id, enabled.scene_id);
        assert_eq!(disabled.asset_guid, enabled.asset_guid);
    }

    #[test]
    fn collider_guid_is_stable_across_reenable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rock = SceneObject::new("Rock_01");
        toggle_tag(&mut rock, TagKind::Collider, &mut rng);
        let guid = rock.tags.collider.as_ref().unwrap().asset_guid;

        toggle_tag(&mut rock, TagKind::Collider, &mut rng);
        rock.name = "Boulder".to_string();
        toggle_tag(&mut rock, TagKind::Collider, &mut rng);

        let tag = rock.tags.collider.as_ref().unwrap();
        assert!(tag.enabled);
        assert_eq!(tag.asset_guid, guid);
        assert_eq!(tag.scene_id, "Boulder");
    }

    #[test]
    fn model_toggle_does_not_assign_guid() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tree = SceneObject::new("Tree");
        assert!(toggle_tag(&mut tree, TagKind::Model, &mut rng));
        let tag = tree.tags.model.as_ref().unwrap();
        assert_eq!(tag.asset_id, "Tree");
        assert_eq!(tag.asset_guid, UNASSIGNED_GUID);
    }

    #[test]
    fn thread_rng_toggle_stays_in_range() {
        let mut rock = SceneObject::new("Rock_02");
        assert!(toggle_tag_with_thread_rng(&mut rock, TagKind::Collider));
        let guid = rock.tags.collider.as_ref().unwrap().asset_guid;
        assert!((GUID_MIN..=GUID_MAX).contains(&guid));
    }

    #[test]
    fn material_toggle_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut crate_object = SceneObject::new("Crate");
        assert!(!toggle_tag(&mut crate_object, TagKind::Material, &mut rng));
        assert!(crate_object.tags.is_empty());
    }

    #[test]
    fn double_toggle_restores_enabled_flag() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut tree = SceneObject::new("Tree");
        toggle_tag(&mut tree, TagKind::Model, &mut rng);
        toggle_tag(&mut tree, TagKind::Model, &mut rng);
        assert!(!tree.tags.model.as_ref().unwrap().enabled);
    }

    #[test]
    fn toggle_selected_touches_only_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut scene = Scene::new(vec![
            SceneObject::new("A"),
            SceneObject::new("B"),
            SceneObject::new("C"),
        ]);
        scene.select(0);
        scene.select(2);

        let touched = toggle_selected(&mut scene, TagKind::Collider, &mut rng).unwrap();
        assert_eq!(touched, 2);
        assert!(scene.objects[0].tags.collider.as_ref().unwrap().enabled);
        assert!(scene.objects[1].tags.collider.is_none());
        assert!(scene.objects[2].tags.collider.as_ref().unwrap().enabled);
    }

    #[test]
    fn toggle_selected_without_selection_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut scene = Scene::new(vec![SceneObject::new("A")]);
        let err = toggle_selected(&mut scene, TagKind::Model, &mut rng).unwrap_err();
        assert!(matches!(err, ExportError::NoSelection));
    }

    #[test]
    fn create_scene_root_keeps_single_root() {
        let mut scene = Scene::new(vec![SceneObject::new("A"), SceneObject::new("B")]);
        create_scene_root(&mut scene, 0, 256).unwrap();
        create_scene_root(&mut scene, 1, 512).unwrap();

        let roots: Vec<&str> = scene
            .objects
            .iter()
            .filter(|o| o.tags.scene_root.as_ref().is_some_and(|r| r.enabled))
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(roots, vec!["B"]);
        let root = scene.objects[1].tags.scene_root.as_ref().unwrap();
        assert_eq!(root.quad_tree_size, 512);
        assert_eq!(root.scene_id, "B");
    }

    #[test]
    fn toggle_selected_scene_root_flips_and_moves_root() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut scene = Scene::new(vec![SceneObject::new("A"), SceneObject::new("B")]);
        create_scene_root(&mut scene, 0, 64).unwrap();

        scene.select(1);
        toggle_selected(&mut scene, TagKind::SceneRoot, &mut rng).unwrap();
        assert_eq!(scene.scene_root().map(|o| o.name.as_str()), Some("B"));
        assert!(!scene.objects[0].tags.scene_root.as_ref().unwrap().enabled);

        toggle_selected(&mut scene, TagKind::SceneRoot, &mut rng).unwrap();
        assert!(scene.scene_root().is_none());
    }

    #[test]
    fn create_scene_root_out_of_range() {
        let mut scene = Scene::new(vec![SceneObject::new("A")]);
        assert!(matches!(
            create_scene_root(&mut scene, 4, 128),
            Err(ExportError::NoSelection)
        ));
    }
}
