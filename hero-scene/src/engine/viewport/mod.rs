//! Viewport tracking for the hero canvas.
//!
//! Derives the device class and capped pixel ratio from host signals and
//! keeps camera and surface in sync with throttled resize events.

/// Viewport dimensions, pixel ratio capping and device classification.
pub mod state;

/// Trailing-edge rate limiter for resize bursts.
pub mod throttle;

/// Resize event sources and the system applying settled viewport changes.
pub mod resize;
