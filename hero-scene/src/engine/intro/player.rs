use std::time::Duration;

use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy::time::Stopwatch;

use crate::engine::intro::overlay::{Overlay, OverlaySink};
use crate::engine::intro::timeline::{ResolvedTween, Timeline, total_duration};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntroPhase {
    #[default]
    Idle,
    Playing,
    Finished,
}

/// Sent once when the intro timeline has fully played.
#[derive(Event, Debug, Clone, Copy)]
pub struct IntroFinished {
    pub duration: f32,
}

/// One-shot intro playback. Only the first `start` call has any effect.
#[derive(Resource, Debug)]
pub struct IntroPlayer {
    phase: IntroPhase,
    clock: Stopwatch,
    ease: EaseFunction,
    tweens: Vec<ResolvedTween>,
    duration: f32,
    starts: u32,
}

impl Default for IntroPlayer {
    fn default() -> Self {
        Self {
            phase: IntroPhase::Idle,
            clock: Stopwatch::new(),
            ease: EaseFunction::CubicOut,
            tweens: Vec::new(),
            duration: 0.0,
            starts: 0,
        }
    }
}

impl IntroPlayer {
    /// Resolve the timeline against the overlay and begin playback.
    pub fn start(&mut self, timeline: &Timeline, overlay: &dyn OverlaySink) -> bool {
        if self.phase != IntroPhase::Idle {
            return false;
        }
        self.tweens = timeline.resolve(overlay);
        self.duration = total_duration(&self.tweens);
        self.ease = timeline.ease;
        self.clock.reset();
        self.phase = IntroPhase::Playing;
        self.starts += 1;
        true
    }

    /// Step the clock and write the current styles. True on the finishing step.
    pub fn advance(&mut self, delta: Duration, overlay: &mut dyn OverlaySink) -> bool {
        if self.phase != IntroPhase::Playing {
            return false;
        }

        self.clock.tick(delta);
        let elapsed = self.clock.elapsed_secs();
        for tween in &self.tweens {
            if let Some(update) = tween.sample(elapsed, self.ease) {
                overlay.write(&tween.selector, tween.index, update);
            }
        }

        if elapsed >= self.duration {
            self.phase = IntroPhase::Finished;
            return true;
        }
        false
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }
}

pub fn start_intro(mut player: ResMut<IntroPlayer>, overlay: Res<Overlay>) {
    if player.start(&Timeline::intro(), &*overlay.0) {
        info!(
            "Intro timeline started ({} tweens, {:.2}s)",
            player.tweens.len(),
            player.duration
        );
    }
}

pub fn advance_intro(
    mut player: ResMut<IntroPlayer>,
    mut overlay: ResMut<Overlay>,
    time: Res<Time>,
    mut finished: EventWriter<IntroFinished>,
) {
    if player.advance(time.delta(), &mut *overlay.0) {
        info!("Intro timeline finished");
        finished.write(IntroFinished {
            duration: player.duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::intro::overlay::{RecordingOverlay, StyleState};
    use constants::intro::{MV_SUB_TEXT_SELECTOR, MV_TITLE_SELECTOR};

    fn page() -> RecordingOverlay {
        RecordingOverlay::new()
            .with_elements(MV_TITLE_SELECTOR, 1, StyleState::new(0.0, 30.0))
            .with_elements(MV_SUB_TEXT_SELECTOR, 2, StyleState::new(0.0, 20.0))
    }

    #[test]
    fn second_start_is_ignored() {
        let overlay = page();
        let mut player = IntroPlayer::default();

        assert!(player.start(&Timeline::intro(), &overlay));
        assert!(!player.start(&Timeline::intro(), &overlay));
        assert_eq!(player.starts(), 1);
        assert_eq!(player.phase(), IntroPhase::Playing);
    }

    #[test]
    fn plays_to_end_state_then_stops_writing() {
        let handle = page();
        let mut sink = handle.clone();
        let mut player = IntroPlayer::default();
        player.start(&Timeline::intro(), &handle);

        assert!(!player.advance(Duration::from_millis(500), &mut sink));
        assert_eq!(handle.write_count(), 0);
        assert_eq!(handle.style(MV_TITLE_SELECTOR, 0), Some(StyleState::new(0.0, 30.0)));

        let mut finished = false;
        for _ in 0..40 {
            finished |= player.advance(Duration::from_millis(100), &mut sink);
        }
        assert!(finished);
        assert_eq!(player.phase(), IntroPhase::Finished);
        assert_eq!(handle.style(MV_TITLE_SELECTOR, 0), Some(StyleState::VISIBLE));
        assert_eq!(handle.style(MV_SUB_TEXT_SELECTOR, 1), Some(StyleState::VISIBLE));

        let writes = handle.write_count();
        assert!(!player.advance(Duration::from_secs(1), &mut sink));
        assert_eq!(handle.write_count(), writes);
    }

    #[test]
    fn idle_player_never_writes() {
        let handle = page();
        let mut sink = handle.clone();
        let mut player = IntroPlayer::default();
        assert!(!player.advance(Duration::from_secs(5), &mut sink));
        assert_eq!(handle.write_count(), 0);
    }
}
