//! Batch collider fitting for scene files.
//!
//! Runs the same setup the game runs (spawn, validate, fit colliders) in a
//! headless [`World`] and writes the resulting colliders, and any scale the
//! validation corrected, back into the [`SceneData`]. Used by the
//! `fit-colliders` subcommand; no window is opened.

use bevy_ecs::prelude::*;
use std::path::Path;

use crate::components::boxcollider::BoxCollider;
use crate::components::scale::Scale;
use crate::scene::{ColliderData, SceneData, spawn_scene};
use crate::systems::collider::fit_colliders_system;
use crate::systems::validation::{DragSetupError, validate_draggables};

/// Outcome of one batch run, by map name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FitReport {
    /// Maps whose stored collider was missing or different.
    pub updated: Vec<String>,
    /// Maps whose stored collider already fit.
    pub unchanged: Vec<String>,
    /// Names given in the filter that match no map.
    pub not_found: Vec<String>,
}

/// Fit the colliders of the maps in `scene`.
///
/// An empty `only` selects every map; otherwise only maps with those names
/// are written back.
pub fn fit_colliders(scene: &mut SceneData, only: &[String]) -> Result<FitReport, DragSetupError> {
    let mut world = World::new();
    let roots = spawn_scene(&mut world, scene);
    validate_draggables(&mut world)?;

    let mut schedule = Schedule::default();
    schedule.add_systems(fit_colliders_system);
    schedule.run(&mut world);

    let mut report = FitReport::default();
    for (map, root) in scene.maps.iter_mut().zip(roots) {
        if !only.is_empty() && !only.contains(&map.name) {
            continue;
        }
        let Some(collider) = world.get::<BoxCollider>(root) else {
            continue;
        };
        let fitted = ColliderData::from(collider);

        if !map.visual_child
            && let Some(scale) = world.get::<Scale>(root)
        {
            map.scale = [scale.scale.x, scale.scale.y];
        }

        if map.collider == Some(fitted) {
            report.unchanged.push(map.name.clone());
        } else {
            log::info!(
                "{}: collider {:?} -> size {:?} offset {:?}",
                map.name,
                map.collider.map(|c| c.size),
                fitted.size,
                fitted.offset
            );
            map.collider = Some(fitted);
            report.updated.push(map.name.clone());
        }
    }

    report.not_found = only
        .iter()
        .filter(|name| scene.map(name).is_none())
        .cloned()
        .collect();
    for name in &report.not_found {
        log::warn!("No map named '{}' in scene", name);
    }

    Ok(report)
}

/// Load `input`, fit its colliders and write the scene to `output`.
pub fn fit_scene_file(
    input: &Path,
    output: &Path,
    only: &[String],
) -> Result<FitReport, Box<dyn std::error::Error>> {
    let mut scene = SceneData::load_from_file(input).map_err(|e| DragSetupError::Scene {
        path: input.display().to_string(),
        reason: e.to_string(),
    })?;
    let report = fit_colliders(&mut scene, only)?;
    scene.save_to_file(output)?;
    log::info!(
        "Wrote {} ({} updated, {} unchanged)",
        output.display(),
        report.updated.len(),
        report.unchanged.len()
    );
    Ok(report)
}
