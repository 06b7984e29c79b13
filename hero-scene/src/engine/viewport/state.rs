use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::host::ViewportSignal;

/// Layout class used to pick model placements.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Mobile when the width is at or below the breakpoint, like `(max-width: Npx)`.
    pub fn from_width(width: f32, breakpoint: f32) -> Self {
        if width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Current logical viewport size and the pixel ratio the renderer uses.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl ViewportState {
    pub fn from_signal(signal: ViewportSignal, max_pixel_ratio: f32) -> Self {
        Self {
            width: signal.width.max(0.0),
            height: signal.height.max(0.0),
            device_pixel_ratio: capped_pixel_ratio(signal.device_pixel_ratio, max_pixel_ratio),
        }
    }

    /// Width over height; a collapsed viewport reports 1.0 so the projection stays finite.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 1.0;
        }
        self.width / self.height
    }
}

/// `min(raw, cap)`, with unusable ratios (zero, negative, NaN) treated as 1.0.
pub fn capped_pixel_ratio(raw: f32, cap: f32) -> f32 {
    let ratio = if raw.is_finite() && raw > 0.0 { raw } else { 1.0 };
    ratio.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::viewport::{MAX_DEVICE_PIXEL_RATIO, MOBILE_BREAKPOINT_PX};

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        for (raw, expected) in [(1.0, 1.0), (1.5, 1.5), (2.0, 2.0), (3.0, 2.0), (4.5, 2.0)] {
            assert_eq!(capped_pixel_ratio(raw, MAX_DEVICE_PIXEL_RATIO), expected);
        }
    }

    #[test]
    fn unusable_pixel_ratio_stays_inside_range() {
        for raw in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let ratio = capped_pixel_ratio(raw, MAX_DEVICE_PIXEL_RATIO);
            assert!(ratio > 0.0 && ratio <= MAX_DEVICE_PIXEL_RATIO);
        }
    }

    #[test]
    fn breakpoint_width_is_mobile() {
        assert_eq!(DeviceClass::from_width(0.0, MOBILE_BREAKPOINT_PX), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(400.0, MOBILE_BREAKPOINT_PX), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(768.0, MOBILE_BREAKPOINT_PX), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(769.0, MOBILE_BREAKPOINT_PX), DeviceClass::Desktop);
        assert_eq!(DeviceClass::from_width(1024.0, MOBILE_BREAKPOINT_PX), DeviceClass::Desktop);
    }

    #[test]
    fn aspect_ratio_follows_viewport() {
        let signal = ViewportSignal::new(1024.0, 768.0, 3.0);
        let viewport = ViewportState::from_signal(signal, MAX_DEVICE_PIXEL_RATIO);
        assert!((viewport.aspect_ratio() - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(viewport.device_pixel_ratio, 2.0);

        let collapsed = ViewportState::from_signal(ViewportSignal::new(0.0, 0.0, 1.0), 2.0);
        assert_eq!(collapsed.aspect_ratio(), 1.0);
    }
}
