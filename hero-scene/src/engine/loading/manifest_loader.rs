use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::hero_manifest::HeroManifest;
use crate::engine::core::config::HeroConfig;
use crate::engine::loading::model_loader::ModelLoadTracker;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::viewport::state::DeviceClass;
use crate::error::HeroError;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<HeroManifest>>,
}

/// Resolve the manifest for the device class and build the load tracker.
/// An invalid manifest falls back to the built-in model table.
pub fn resolve_manifest(manifest: &HeroManifest, class: DeviceClass) -> ModelLoadTracker {
    match manifest.resolve(class) {
        Ok(specs) => ModelLoadTracker::from_specs(specs),
        Err(err) => {
            error!("Manifest rejected ({err}), using built-in models");
            builtin_tracker(class)
        }
    }
}

fn builtin_tracker(class: DeviceClass) -> ModelLoadTracker {
    let specs = HeroManifest::builtin().resolve(class).unwrap_or_default();
    ModelLoadTracker::from_specs(specs)
}

/// Start loading the manifest file, or resolve the built-in table right away.
pub fn start_loading(
    mut commands: Commands,
    mut manifest_loader: ResMut<ManifestLoader>,
    mut progress: ResMut<LoadingProgress>,
    config: Res<HeroConfig>,
    class: Res<DeviceClass>,
    asset_server: Option<Res<AssetServer>>,
) {
    match (&config.manifest_path, asset_server) {
        (Some(path), Some(asset_server)) => {
            info!("Loading hero manifest from: {}", path);
            manifest_loader.handle = Some(asset_server.load(path.clone()));
        }
        _ => {
            info!("Using built-in hero models for {} layout", class.as_str());
            commands.insert_resource(builtin_tracker(*class));
            progress.manifest_resolved = true;
        }
    }
}

/// Wait for the manifest asset and hand its models to the tracker.
pub fn load_manifest_system(
    mut commands: Commands,
    mut progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<HeroManifest>>,
    asset_server: Res<AssetServer>,
    class: Res<DeviceClass>,
) {
    if progress.manifest_resolved {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        info!("✓ Hero manifest loaded ({} models)", manifest.models.len());
        commands.insert_resource(resolve_manifest(manifest, *class));
        progress.manifest_resolved = true;
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        let err = HeroError::ManifestLoad(err.to_string());
        error!("{err}, using built-in models");
        commands.insert_resource(builtin_tracker(*class));
        progress.manifest_resolved = true;
    }
}
