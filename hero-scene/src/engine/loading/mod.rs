//! Asset loading for the hero models.
//!
//! Resolves the manifest, issues one independent glTF load per model and
//! reports every completion as a structured outcome.

/// Manifest loading and resolution against the device class.
pub mod manifest_loader;

/// Per-model load requests, polling and the load report.
pub mod model_loader;

/// Loading flags shared with the scene controller.
pub mod progress;
