use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    /// Model placements are resolved and loads can be issued.
    pub manifest_resolved: bool,
    /// At least one model made it into the scene.
    pub loaded: bool,
}
