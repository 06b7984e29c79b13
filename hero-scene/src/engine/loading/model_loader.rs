use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use serde::Serialize;

use crate::engine::assets::asset_spec::AssetSpec;

/// Per-model load status reported to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Loaded,
    Failed(String),
}

/// Completion of one model load, successful or not.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ModelLoadOutcome {
    pub index: usize,
    pub id: String,
    pub result: LoadResult,
}

impl ModelLoadOutcome {
    pub fn loaded(spec: &AssetSpec) -> Self {
        Self {
            index: spec.index,
            id: spec.id.clone(),
            result: LoadResult::Loaded,
        }
    }

    pub fn failed(spec: &AssetSpec, reason: impl Into<String>) -> Self {
        Self {
            index: spec.index,
            id: spec.id.clone(),
            result: LoadResult::Failed(reason.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackedModel {
    pub spec: AssetSpec,
    pub gltf: Handle<Gltf>,
    /// Scene to spawn, set once the glTF file has loaded.
    pub handle: Handle<Scene>,
    pub status: LoadStatus,
    /// An outcome event was already emitted for this model.
    reported: bool,
}

/// One row of the load report sent to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub index: usize,
    pub id: String,
    pub path: String,
    #[serde(flatten)]
    pub status: LoadStatus,
}

/// Every model of the resolved manifest together with its load handle and status.
#[derive(Resource, Debug, Default)]
pub struct ModelLoadTracker {
    models: Vec<TrackedModel>,
    requested: bool,
}

impl ModelLoadTracker {
    pub fn from_specs(specs: Vec<AssetSpec>) -> Self {
        Self {
            models: specs
                .into_iter()
                .map(|spec| TrackedModel {
                    spec,
                    gltf: Handle::default(),
                    handle: Handle::default(),
                    status: LoadStatus::Pending,
                    reported: false,
                })
                .collect(),
            requested: false,
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackedModel> {
        self.models.get(index)
    }

    /// Record an outcome. A failure never downgrades a model that already loaded.
    pub fn record(&mut self, outcome: &ModelLoadOutcome) {
        let Some(model) = self.models.get_mut(outcome.index) else {
            return;
        };
        model.status = match (&model.status, &outcome.result) {
            (LoadStatus::Loaded, _) => LoadStatus::Loaded,
            (_, LoadResult::Loaded) => LoadStatus::Loaded,
            (_, LoadResult::Failed(reason)) => LoadStatus::Failed(reason.clone()),
        };
    }

    pub fn loaded_count(&self) -> usize {
        self.count(|status| matches!(status, LoadStatus::Loaded))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|status| matches!(status, LoadStatus::Failed(_)))
    }

    pub fn pending_count(&self) -> usize {
        self.count(|status| matches!(status, LoadStatus::Pending))
    }

    fn count(&self, predicate: impl Fn(&LoadStatus) -> bool) -> usize {
        self.models.iter().filter(|m| predicate(&m.status)).count()
    }

    pub fn report(&self) -> Vec<ModelReport> {
        self.models
            .iter()
            .map(|model| ModelReport {
                index: model.spec.index,
                id: model.spec.id.clone(),
                path: model.spec.path.clone(),
                status: model.status.clone(),
            })
            .collect()
    }
}

/// Issue one independent glTF load per model.
pub fn request_model_loads(mut tracker: ResMut<ModelLoadTracker>, asset_server: Res<AssetServer>) {
    if tracker.requested || tracker.is_empty() {
        return;
    }

    for model in tracker.models.iter_mut() {
        model.gltf = asset_server.load(model.spec.path.clone());
        info!("Loading model '{}' from {}", model.spec.id, model.spec.path);
    }
    tracker.requested = true;
}

/// Outcome for one model once its glTF file has settled, `None` while still loading.
///
/// The scene is the file's default scene, or its first one.
fn settle_model(
    model: &mut TrackedModel,
    state: Option<LoadState>,
    gltfs: &Assets<Gltf>,
) -> Option<ModelLoadOutcome> {
    match state? {
        LoadState::Failed(err) => Some(ModelLoadOutcome::failed(&model.spec, err.to_string())),
        LoadState::Loaded => {
            let gltf = gltfs.get(&model.gltf)?;
            match gltf.default_scene.as_ref().or(gltf.scenes.first()) {
                Some(scene) => {
                    model.handle = scene.clone();
                    Some(ModelLoadOutcome::loaded(&model.spec))
                }
                None => Some(ModelLoadOutcome::failed(&model.spec, "no scene")),
            }
        }
        _ => None,
    }
}

/// Turn asset server load states into one outcome event per model.
pub fn poll_model_loads(
    mut tracker: ResMut<ModelLoadTracker>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut outcomes: EventWriter<ModelLoadOutcome>,
) {
    if !tracker.requested {
        return;
    }

    for model in tracker.models.iter_mut().filter(|m| !m.reported) {
        let state = asset_server.get_load_state(&model.gltf);
        let Some(outcome) = settle_model(model, state, &gltfs) else {
            continue;
        };
        model.reported = true;
        outcomes.write(outcome);
    }
}
