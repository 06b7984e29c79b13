use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use constants::intro::{INTRO_DEFAULT_DURATION, INTRO_STEPS};

use crate::engine::intro::overlay::{OverlaySink, StyleState, StyleUpdate};

/// Target values of a tween; `None` leaves the property alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenProps {
    pub opacity: Option<f32>,
    pub y: Option<f32>,
}

/// Tween over every element matching `selector`, offset by `stagger` per element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub selector: String,
    pub to: TweenProps,
    pub at: f32,
    pub duration: f32,
    pub stagger: f32,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    pub ease: EaseFunction,
    pub tweens: Vec<Tween>,
}

impl Timeline {
    /// Fade and slide in the canvas, title, sub text lines and links.
    pub fn intro() -> Self {
        Self {
            ease: EaseFunction::CubicOut,
            tweens: INTRO_STEPS
                .iter()
                .map(|step| Tween {
                    selector: step.selector.to_string(),
                    to: TweenProps {
                        opacity: step.opacity,
                        y: step.y,
                    },
                    at: step.at,
                    duration: step.duration.unwrap_or(INTRO_DEFAULT_DURATION),
                    stagger: step.stagger,
                })
                .collect(),
        }
    }

    /// Expand tweens to one entry per matched element, capturing start styles.
    pub fn resolve(&self, overlay: &dyn OverlaySink) -> Vec<ResolvedTween> {
        let mut resolved = Vec::new();
        for tween in &self.tweens {
            for index in 0..overlay.count(&tween.selector) {
                resolved.push(ResolvedTween {
                    selector: tween.selector.clone(),
                    index,
                    start: tween.at + tween.stagger * index as f32,
                    duration: tween.duration,
                    from: overlay.read(&tween.selector, index),
                    to: tween.to,
                });
            }
        }
        resolved
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTween {
    pub selector: String,
    pub index: usize,
    pub start: f32,
    pub duration: f32,
    pub from: StyleState,
    pub to: TweenProps,
}

impl ResolvedTween {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Style at `elapsed` seconds into the timeline; nothing before the tween starts.
    pub fn sample(&self, elapsed: f32, ease: EaseFunction) -> Option<StyleUpdate> {
        if elapsed < self.start {
            return None;
        }
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((elapsed - self.start) / self.duration).clamp(0.0, 1.0)
        };
        let eased = ease_progress(ease, progress);
        let lerp = |from: f32, to: f32| from + (to - from) * eased;

        Some(StyleUpdate {
            opacity: self.to.opacity.map(|to| lerp(self.from.opacity, to)),
            y: self.to.y.map(|to| lerp(self.from.y, to)),
        })
    }
}

pub fn ease_progress(ease: EaseFunction, progress: f32) -> f32 {
    EasingCurve::new(0.0, 1.0, ease).sample_clamped(progress)
}

/// End of the last tween, zero when nothing resolved.
pub fn total_duration(tweens: &[ResolvedTween]) -> f32 {
    tweens.iter().map(ResolvedTween::end).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::intro::overlay::RecordingOverlay;
    use constants::intro::{MV_GIT_LINK_SELECTOR, MV_SUB_TEXT_SELECTOR, MV_TITLE_SELECTOR};
    use constants::path::CANVAS_ANCHOR_SELECTOR;

    fn page() -> RecordingOverlay {
        RecordingOverlay::new()
            .with_elements(CANVAS_ANCHOR_SELECTOR, 1, StyleState::new(0.0, 0.0))
            .with_elements(MV_TITLE_SELECTOR, 1, StyleState::new(0.0, 30.0))
            .with_elements(MV_SUB_TEXT_SELECTOR, 3, StyleState::new(0.0, 20.0))
            .with_elements(MV_GIT_LINK_SELECTOR, 1, StyleState::new(1.0, 50.0))
    }

    #[test]
    fn ease_is_power2_out() {
        let ease = EaseFunction::CubicOut;
        assert!(ease_progress(ease, 0.0).abs() < 1e-6);
        assert!((ease_progress(ease, 0.5) - 0.875).abs() < 1e-5);
        assert!((ease_progress(ease, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sub_text_lines_are_staggered() {
        let resolved = Timeline::intro().resolve(&page());
        let starts: Vec<f32> = resolved
            .iter()
            .filter(|t| t.selector == MV_SUB_TEXT_SELECTOR)
            .map(|t| t.start)
            .collect();

        assert_eq!(starts.len(), 3);
        assert!((starts[0] - 1.5).abs() < 1e-6);
        assert!((starts[1] - 1.55).abs() < 1e-6);
        assert!((starts[2] - 1.6).abs() < 1e-6);
    }

    #[test]
    fn missing_elements_are_skipped() {
        let resolved = Timeline::intro().resolve(&page());
        // canvas + title + 3 lines + git link; home and note links are absent
        assert_eq!(resolved.len(), 6);
        assert!((total_duration(&resolved) - 3.1).abs() < 1e-5);
        assert_eq!(total_duration(&[]), 0.0);
    }

    #[test]
    fn sample_interpolates_from_captured_style() {
        let resolved = Timeline::intro().resolve(&page());
        let title = resolved
            .iter()
            .find(|t| t.selector == MV_TITLE_SELECTOR)
            .unwrap();
        let ease = EaseFunction::CubicOut;

        assert_eq!(title.sample(0.5, ease), None);
        assert_eq!(
            title.sample(1.0, ease),
            Some(StyleUpdate { opacity: Some(0.0), y: Some(30.0) })
        );
        let midway = title.sample(1.3, ease).unwrap();
        assert!((midway.opacity.unwrap() - 0.875).abs() < 1e-4);
        assert!((midway.y.unwrap() - 3.75).abs() < 1e-3);
        assert_eq!(
            title.sample(10.0, ease),
            Some(StyleUpdate { opacity: Some(1.0), y: Some(0.0) })
        );
    }

    #[test]
    fn link_tween_leaves_opacity_alone() {
        let resolved = Timeline::intro().resolve(&page());
        let link = resolved
            .iter()
            .find(|t| t.selector == MV_GIT_LINK_SELECTOR)
            .unwrap();
        let update = link.sample(5.0, EaseFunction::CubicOut).unwrap();
        assert_eq!(update.opacity, None);
        assert_eq!(update.y, Some(0.0));
    }
}
