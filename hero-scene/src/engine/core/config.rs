use std::time::Duration;

use bevy::prelude::*;
use constants::path::{CANVAS_ANCHOR_SELECTOR, CANVAS_ELEMENT_ID, MANIFEST_PATH};
use constants::viewport::{MAX_DEVICE_PIXEL_RATIO, MOBILE_BREAKPOINT_PX, RESIZE_THROTTLE_MS};

/// Runtime configuration for the hero scene. Defaults come from the `constants` crate.
#[derive(Resource, Debug, Clone)]
pub struct HeroConfig {
    /// Selector of the element the canvas is appended to.
    pub canvas_anchor: String,
    pub canvas_id: String,
    /// JSON manifest to load; `None` uses the built-in model table.
    pub manifest_path: Option<String>,
    pub breakpoint: f32,
    pub max_device_pixel_ratio: f32,
    pub resize_interval: Duration,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            canvas_anchor: CANVAS_ANCHOR_SELECTOR.to_string(),
            canvas_id: CANVAS_ELEMENT_ID.to_string(),
            manifest_path: Some(MANIFEST_PATH.to_string()),
            breakpoint: MOBILE_BREAKPOINT_PX,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
            resize_interval: Duration::from_millis(RESIZE_THROTTLE_MS),
        }
    }
}

impl HeroConfig {
    /// Configuration that skips the manifest file and uses the built-in table.
    pub fn builtin_models() -> Self {
        Self {
            manifest_path: None,
            ..default()
        }
    }
}
