//! Hero model manifest and per-device placements.
//!
//! The manifest lists every model with a mobile and a desktop transform;
//! it is resolved once against the detected device class.

/// Resolved model placement for the active device class.
pub mod asset_spec;

/// Manifest asset, built-in model table and validation.
pub mod hero_manifest;
