use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

/// Animated style of one overlay element. `y` is a vertical offset in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    pub opacity: f32,
    pub y: f32,
}

impl StyleState {
    pub const VISIBLE: Self = Self { opacity: 1.0, y: 0.0 };

    pub fn new(opacity: f32, y: f32) -> Self {
        Self { opacity, y }
    }
}

/// Properties written for one frame; `None` leaves the property untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleUpdate {
    pub opacity: Option<f32>,
    pub y: Option<f32>,
}

/// Page elements the intro animates, addressed by selector and match index.
pub trait OverlaySink: Send + Sync + 'static {
    fn count(&self, selector: &str) -> usize;

    /// Style of the element right now; used as the tween start value.
    fn read(&self, selector: &str, index: usize) -> StyleState;

    fn write(&mut self, selector: &str, index: usize, update: StyleUpdate);
}

#[derive(Resource)]
pub struct Overlay(pub Box<dyn OverlaySink>);

impl Overlay {
    pub fn new(sink: impl OverlaySink) -> Self {
        Self(Box::new(sink))
    }
}

#[derive(Debug, Default)]
struct RecordedElements {
    styles: HashMap<String, Vec<StyleState>>,
    writes: usize,
}

/// In-memory overlay for native builds and tests.
///
/// Clones share state, so a test can keep one handle while the app owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    elements: Arc<Mutex<RecordedElements>>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `count` elements matching `selector`, all starting at `initial`.
    pub fn with_elements(self, selector: &str, count: usize, initial: StyleState) -> Self {
        if let Ok(mut elements) = self.elements.lock() {
            elements
                .styles
                .insert(selector.to_string(), vec![initial; count]);
        }
        self
    }

    pub fn style(&self, selector: &str, index: usize) -> Option<StyleState> {
        let elements = self.elements.lock().ok()?;
        elements.styles.get(selector)?.get(index).copied()
    }

    pub fn write_count(&self) -> usize {
        self.elements.lock().map(|e| e.writes).unwrap_or(0)
    }
}

impl OverlaySink for RecordingOverlay {
    fn count(&self, selector: &str) -> usize {
        self.elements
            .lock()
            .ok()
            .and_then(|e| e.styles.get(selector).map(Vec::len))
            .unwrap_or(0)
    }

    fn read(&self, selector: &str, index: usize) -> StyleState {
        self.style(selector, index).unwrap_or(StyleState::VISIBLE)
    }

    fn write(&mut self, selector: &str, index: usize, update: StyleUpdate) {
        let Ok(mut elements) = self.elements.lock() else {
            return;
        };
        elements.writes += 1;
        if let Some(style) = elements
            .styles
            .get_mut(selector)
            .and_then(|styles| styles.get_mut(index))
        {
            if let Some(opacity) = update.opacity {
                style.opacity = opacity;
            }
            if let Some(y) = update.y {
                style.y = y;
            }
        }
    }
}

/// Vertical translation from a computed CSS `transform` value.
pub fn parse_translate_y(transform: &str) -> Option<f32> {
    let transform = transform.trim();
    if transform == "none" {
        return Some(0.0);
    }

    let (kind, rest) = transform.split_once('(')?;
    let values = rest
        .trim_end_matches(')')
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    match (kind.trim(), values.len()) {
        ("matrix", 6) => Some(values[5]),
        ("matrix3d", 16) => Some(values[13]),
        _ => None,
    }
}

/// Overlay backed by the page DOM. Elements are looked up on every call.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DomOverlay;

#[cfg(target_arch = "wasm32")]
impl DomOverlay {
    fn element(selector: &str, index: usize) -> Result<web_sys::HtmlElement, crate::error::HeroError> {
        use crate::error::HeroError;
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .ok_or(HeroError::MissingWindow)?
            .document()
            .ok_or(HeroError::MissingDocument)?;
        let nodes = document
            .query_selector_all(selector)
            .map_err(|e| HeroError::Dom(format!("{e:?}")))?;

        nodes
            .item(index as u32)
            .ok_or_else(|| HeroError::MissingElement(format!("{selector}[{index}]")))?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| HeroError::Dom(format!("{selector}[{index}] is not an HTML element")))
    }
}

#[cfg(target_arch = "wasm32")]
impl OverlaySink for DomOverlay {
    fn count(&self, selector: &str) -> usize {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector_all(selector).ok())
            .map(|nodes| nodes.length() as usize)
            .unwrap_or(0)
    }

    fn read(&self, selector: &str, index: usize) -> StyleState {
        let Ok(element) = Self::element(selector, index) else {
            return StyleState::VISIBLE;
        };
        let Some(computed) = web_sys::window().and_then(|w| w.get_computed_style(&element).ok().flatten())
        else {
            return StyleState::VISIBLE;
        };

        let opacity = computed
            .get_property_value("opacity")
            .ok()
            .and_then(|v| v.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        let y = computed
            .get_property_value("transform")
            .ok()
            .and_then(|v| parse_translate_y(&v))
            .unwrap_or(0.0);

        StyleState { opacity, y }
    }

    fn write(&mut self, selector: &str, index: usize, update: StyleUpdate) {
        let element = match Self::element(selector, index) {
            Ok(element) => element,
            Err(err) => {
                warn!("{err}");
                return;
            }
        };
        let style = element.style();

        if let Some(opacity) = update.opacity {
            if let Err(e) = style.set_property("opacity", &opacity.to_string()) {
                error!("Failed to set opacity on {selector}: {:?}", e);
            }
        }
        if let Some(y) = update.y {
            if let Err(e) = style.set_property("transform", &format!("translate3d(0px, {y}px, 0px)")) {
                error!("Failed to set transform on {selector}: {:?}", e);
            }
        }
    }
}

/// Overlay matching the build target.
pub fn default_overlay() -> Overlay {
    #[cfg(target_arch = "wasm32")]
    {
        Overlay::new(DomOverlay)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Overlay::new(RecordingOverlay::new())
    }
}
