//! Scene content: the lighting rig and the loaded hero models.

/// Hero model placement from load outcomes.
pub mod hero_models;

/// Static ambient and directional lighting.
pub mod lighting;
