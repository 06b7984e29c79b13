//! Intro animation over the page overlay.
//!
//! A fixed timeline fades in and slides up the hero copy once the first
//! frame with content has rendered. Playback is latched so it runs once.

/// Overlay element access (DOM on wasm, in-memory elsewhere).
pub mod overlay;

/// One-shot timeline playback driven by the frame clock.
pub mod player;

/// Timeline definition, tween expansion and easing.
pub mod timeline;
