use std::time::Duration;

use bevy::prelude::*;

use crate::engine::core::host::ViewportSignal;

/// Collapses resize bursts into one update per interval.
///
/// The first event after a quiet period opens a window; when the window has
/// elapsed the most recent signal is released and the throttle goes idle.
/// Consecutive releases are therefore at least `interval` apart.
#[derive(Resource, Debug, Clone)]
pub struct ResizeThrottle {
    interval: Duration,
    window_opened: Option<Duration>,
    pending: Option<ViewportSignal>,
}

impl ResizeThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_opened: None,
            pending: None,
        }
    }

    /// Record a resize observed at `now` (time since startup).
    pub fn push(&mut self, signal: ViewportSignal, now: Duration) {
        if self.window_opened.is_none() {
            self.window_opened = Some(now);
        }
        self.pending = Some(signal);
    }

    /// Release the latest signal once the open window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<ViewportSignal> {
        let opened = self.window_opened?;
        if now.saturating_sub(opened) < self.interval {
            return None;
        }
        self.window_opened = None;
        self.pending.take()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_inside_window_collapses_to_latest() {
        let mut throttle = ResizeThrottle::new(ms(100));
        for (i, at) in [0, 10, 40, 70, 99].into_iter().enumerate() {
            throttle.push(ViewportSignal::new(800.0 + i as f32, 600.0, 1.0), ms(at));
            assert_eq!(throttle.poll(ms(at)), None);
        }

        let released = throttle.poll(ms(100)).expect("window elapsed");
        assert_eq!(released.width, 804.0);
        assert_eq!(throttle.poll(ms(150)), None);
        assert!(throttle.is_idle());
    }

    #[test]
    fn releases_are_at_least_one_interval_apart() {
        let mut throttle = ResizeThrottle::new(ms(100));
        let mut released_at = Vec::new();

        for now in (0..1000).step_by(7) {
            throttle.push(ViewportSignal::new(now as f32, 500.0, 1.0), ms(now));
            if throttle.poll(ms(now)).is_some() {
                released_at.push(now);
            }
        }

        assert!(released_at.len() > 1);
        for pair in released_at.windows(2) {
            assert!(pair[1] - pair[0] >= 100);
        }
    }

    #[test]
    fn idle_throttle_releases_nothing() {
        let mut throttle = ResizeThrottle::new(ms(100));
        assert_eq!(throttle.poll(ms(500)), None);
    }
}
