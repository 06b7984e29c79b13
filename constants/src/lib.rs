//! Static configuration tables shared by the hero scene engine.

pub mod camera;
pub mod intro;
pub mod lighting;
pub mod models;
pub mod path;
pub mod viewport;
