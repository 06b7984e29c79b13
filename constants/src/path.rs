/// Container element the render canvas is appended to.
pub const CANVAS_ANCHOR_SELECTOR: &str = "[data-canvas]";

/// Id given to the canvas created inside the anchor.
pub const CANVAS_ELEMENT_ID: &str = "hero-canvas";

/// Asset manifest listing the hero models, relative to the asset root.
pub const MANIFEST_PATH: &str = "hero_manifest.json";
