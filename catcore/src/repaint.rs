//! Repaint governor for FocusCat
//!
//! egui redraws on every input event. Between events the app only needs a
//! frame when something moves on its own: the focus countdown, the cat's hop,
//! or a pending quote rotation / autosave deadline.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()` and
//! [`RepaintController::end_frame`] at the bottom. Set continuous mode while a
//! timer runs; mark one-shot repaints when state changes outside input.

use std::time::Duration;

/// Default interval for timed updates, ~4 Hz is plenty for a seconds display.
const DEFAULT_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Interval while an animation plays.
const FAST_REPAINT_INTERVAL: Duration = Duration::from_millis(16);

pub struct RepaintController {
    continuous: bool,
    animating: bool,
    needs_repaint: bool,
    interval: Duration,
    /// Earliest wake-up the app asked for, e.g. the next autosave.
    wake_after: Option<Duration>,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            animating: false,
            needs_repaint: false,
            interval: DEFAULT_REPAINT_INTERVAL,
            wake_after: None,
        }
    }

    /// Keep repainting at the default interval until turned off.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Repaint at animation speed for this frame's schedule.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Ask to be woken no later than `after` from now. The earliest request
    /// of the frame wins.
    pub fn wake_within(&mut self, after: Duration) {
        self.wake_after = Some(match self.wake_after {
            Some(current) => current.min(after),
            None => after,
        });
    }

    /// Start a frame: requests from the previous frame are spent.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
        self.wake_after = None;
    }

    /// Schedule the next repaint from what was requested during the frame.
    pub fn end_frame(&self, ctx: &egui::Context) {
        match self.scheduled_delay() {
            Some(Duration::ZERO) => ctx.request_repaint(),
            Some(after) => ctx.request_repaint_after(after),
            None => {}
        }
    }

    /// The delay that `end_frame` would schedule, if any.
    pub fn scheduled_delay(&self) -> Option<Duration> {
        if self.needs_repaint {
            Some(Duration::ZERO)
        } else if self.animating {
            Some(FAST_REPAINT_INTERVAL)
        } else if self.continuous {
            Some(self.wake_after.map_or(self.interval, |d| d.min(self.interval)))
        } else {
            self.wake_after
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_schedules_nothing() {
        let rc = RepaintController::new();
        assert_eq!(rc.scheduled_delay(), None);
    }

    #[test]
    fn test_earliest_wake_wins() {
        let mut rc = RepaintController::new();
        rc.wake_within(Duration::from_secs(15));
        rc.wake_within(Duration::from_secs(3));
        rc.wake_within(Duration::from_secs(40));
        assert_eq!(rc.scheduled_delay(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_continuous_caps_wake() {
        let mut rc = RepaintController::new();
        rc.set_continuous(true);
        rc.wake_within(Duration::from_secs(10));
        assert_eq!(rc.scheduled_delay(), Some(DEFAULT_REPAINT_INTERVAL));
        rc.set_animating(true);
        assert_eq!(rc.scheduled_delay(), Some(FAST_REPAINT_INTERVAL));
    }

    #[test]
    fn test_begin_frame_drops_old_requests() {
        let mut rc = RepaintController::new();
        rc.mark_needs_repaint();
        assert_eq!(rc.scheduled_delay(), Some(Duration::ZERO));
        rc.begin_frame();
        assert_eq!(rc.scheduled_delay(), None);

        rc.wake_within(Duration::from_secs(5));
        rc.begin_frame();
        assert_eq!(rc.scheduled_delay(), None);
    }

    #[test]
    fn test_end_frame_on_context() {
        let ctx = egui::Context::default();
        let mut rc = RepaintController::new();
        rc.begin_frame();
        rc.set_continuous(true);
        rc.end_frame(&ctx);
        assert_eq!(rc.scheduled_delay(), Some(DEFAULT_REPAINT_INTERVAL));
    }
}
