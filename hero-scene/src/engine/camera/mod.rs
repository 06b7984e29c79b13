//! Fixed perspective camera framing the hero models.

/// Camera spawning, activation and aspect updates.
pub mod hero_camera;
