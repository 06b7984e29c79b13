use bevy::prelude::*;

use crate::engine::viewport::state::DeviceClass;

/// Raw viewport reading from the host, before pixel ratio capping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSignal {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl ViewportSignal {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Ambient signals provided by the page hosting the canvas.
pub trait HostSignals: Send + Sync + 'static {
    /// Current inner window size and device pixel ratio.
    fn viewport(&self) -> ViewportSignal;

    /// Evaluate `(max-width: {breakpoint}px)` against the host.
    fn matches_max_width(&self, breakpoint: f32) -> bool;
}

/// Host capability injected into the scene controller.
#[derive(Resource)]
pub struct Host(pub Box<dyn HostSignals>);

impl Host {
    pub fn new(signals: impl HostSignals) -> Self {
        Self(Box::new(signals))
    }

    pub fn viewport(&self) -> ViewportSignal {
        self.0.viewport()
    }

    pub fn device_class(&self, breakpoint: f32) -> DeviceClass {
        if self.0.matches_max_width(breakpoint) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Host with a fixed viewport. Used for native builds and headless tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedHost {
    signal: ViewportSignal,
}

impl FixedHost {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            signal: ViewportSignal::new(width, height, device_pixel_ratio),
        }
    }
}

impl HostSignals for FixedHost {
    fn viewport(&self) -> ViewportSignal {
        self.signal
    }

    fn matches_max_width(&self, breakpoint: f32) -> bool {
        DeviceClass::from_width(self.signal.width, breakpoint) == DeviceClass::Mobile
    }
}

/// Browser window signals read through `web_sys` on every call.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

#[cfg(target_arch = "wasm32")]
impl HostSignals for BrowserHost {
    fn viewport(&self) -> ViewportSignal {
        use constants::viewport::FALLBACK_VIEWPORT;

        let Some(window) = web_sys::window() else {
            error!("{}", crate::error::HeroError::MissingWindow);
            return ViewportSignal::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1, 1.0);
        };

        let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: f32| {
            value
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as f32)
                .unwrap_or(fallback)
        };

        ViewportSignal {
            width: read(window.inner_width(), FALLBACK_VIEWPORT.0),
            height: read(window.inner_height(), FALLBACK_VIEWPORT.1),
            device_pixel_ratio: window.device_pixel_ratio() as f32,
        }
    }

    fn matches_max_width(&self, breakpoint: f32) -> bool {
        let query = format!("(max-width: {breakpoint}px)");
        match web_sys::window().and_then(|w| w.match_media(&query).ok().flatten()) {
            Some(list) => list.matches(),
            None => DeviceClass::from_width(self.viewport().width, breakpoint) == DeviceClass::Mobile,
        }
    }
}

/// Host matching the build target.
pub fn default_host() -> Host {
    #[cfg(target_arch = "wasm32")]
    {
        Host::new(BrowserHost)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use constants::viewport::FALLBACK_VIEWPORT;
        Host::new(FixedHost::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_host_classifies_by_width() {
        let phone = Host::new(FixedHost::new(400.0, 800.0, 3.0));
        let laptop = Host::new(FixedHost::new(1024.0, 768.0, 1.0));

        assert_eq!(phone.device_class(768.0), DeviceClass::Mobile);
        assert_eq!(laptop.device_class(768.0), DeviceClass::Desktop);
        assert_eq!(phone.viewport().device_pixel_ratio, 3.0);
    }
}
