use std::collections::HashSet;

use bevy::prelude::*;

use crate::engine::core::app_state::HeroState;
use crate::engine::loading::model_loader::{LoadResult, ModelLoadOutcome, ModelLoadTracker};
use crate::engine::loading::progress::LoadingProgress;

/// Root of a loaded hero model in the scene.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HeroModel {
    pub index: usize,
    pub id: String,
}

/// Model ids already inserted into the scene.
#[derive(Resource, Default, Debug)]
pub struct SpawnedModels(HashSet<String>);

impl SpawnedModels {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Place every freshly loaded model and start the render loop on the first one.
pub fn spawn_loaded_models(
    mut commands: Commands,
    mut outcomes: EventReader<ModelLoadOutcome>,
    mut tracker: ResMut<ModelLoadTracker>,
    mut spawned: ResMut<SpawnedModels>,
    mut progress: ResMut<LoadingProgress>,
    state: Res<State<HeroState>>,
    mut next_state: ResMut<NextState<HeroState>>,
) {
    for outcome in outcomes.read() {
        tracker.record(outcome);

        if let LoadResult::Failed(reason) = &outcome.result {
            warn!("Model '{}' failed to load: {}", outcome.id, reason);
            continue;
        }

        let Some(model) = tracker.get(outcome.index) else {
            warn!("Load outcome for unknown model index {}", outcome.index);
            continue;
        };
        if !spawned.0.insert(model.spec.id.clone()) {
            debug!("Model '{}' already in scene, skipping", model.spec.id);
            continue;
        }

        commands.spawn((
            SceneRoot(model.handle.clone()),
            model.spec.to_transform(),
            HeroModel {
                index: model.spec.index,
                id: model.spec.id.clone(),
            },
            Name::new(model.spec.id.clone()),
        ));
        info!(
            "✓ Model '{}' placed ({}/{})",
            model.spec.id,
            spawned.len(),
            tracker.len()
        );

        progress.loaded = true;
        if *state.get() == HeroState::Loading {
            next_state.set(HeroState::Running);
        }
    }
}
