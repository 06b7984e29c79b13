/// Viewport width (logical px) at or below which the page is treated as mobile.
/// Mirrors the `(max-width: 768px)` media query used by the page stylesheet.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Upper bound for the device pixel ratio handed to the renderer.
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;

/// Minimum spacing between two applied resize updates.
pub const RESIZE_THROTTLE_MS: u64 = 100;

/// Viewport assumed when no browser window is available (native builds).
pub const FALLBACK_VIEWPORT: (f32, f32) = (1280.0, 720.0);
