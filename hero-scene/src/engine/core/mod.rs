//! Core application setup and state management.
//!
//! Handles application lifecycle, host capabilities, window configuration
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app and groups the scene controller, model loading,
/// resize sources and page messaging into plugins.
pub mod app_setup;

/// Scene lifecycle state, from loading to a running render loop.
pub mod app_state;

/// Runtime configuration with defaults from the `constants` crate.
pub mod config;

/// Host viewport signals (browser window on wasm, fixed size elsewhere).
pub mod host;

/// Platform-specific window configuration for native and WASM builds.
///
/// Attaches the canvas to the page anchor on web targets and sets vsync.
pub mod window_config;
