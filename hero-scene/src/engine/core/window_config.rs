use bevy::prelude::*;
use bevy::window::PresentMode;

use crate::engine::core::config::HeroConfig;

/// Primary window for the hero canvas.
///
/// On wasm the window binds to `canvas_selector` when the canvas was attached
/// to the page, otherwise Bevy creates its own canvas.
pub fn create_window_config(canvas_selector: Option<String>) -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: canvas_selector,
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = canvas_selector;
        Window {
            title: "Hero Scene".into(),
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Append a fresh canvas to the configured anchor and return its selector.
#[cfg(target_arch = "wasm32")]
pub fn attach_canvas(config: &HeroConfig) -> Result<String, crate::error::HeroError> {
    use crate::error::HeroError;
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or(HeroError::MissingWindow)?;
    let document = window.document().ok_or(HeroError::MissingDocument)?;
    let anchor = document
        .query_selector(&config.canvas_anchor)
        .map_err(|e| HeroError::Dom(format!("{e:?}")))?
        .ok_or_else(|| HeroError::MissingElement(config.canvas_anchor.clone()))?;

    let canvas = document
        .create_element("canvas")
        .map_err(|e| HeroError::Dom(format!("{e:?}")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| HeroError::Dom("created element is not a canvas".to_string()))?;
    canvas.set_id(&config.canvas_id);

    anchor
        .append_child(&canvas)
        .map_err(|e| HeroError::Dom(format!("{e:?}")))?;

    Ok(format!("#{}", config.canvas_id))
}

/// Native builds render into their own window.
#[cfg(not(target_arch = "wasm32"))]
pub fn attach_canvas(config: &HeroConfig) -> Result<String, crate::error::HeroError> {
    Ok(format!("#{}", config.canvas_id))
}
