use bevy::prelude::*;

/// Scene lifecycle. The render loop runs once the first model has arrived.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum HeroState {
    #[default]
    Loading,
    Running,
}

pub fn log_render_loop_start() {
    info!("→ First model in scene, render loop running");
}
