//! Focus (pomodoro) countdown.
//!
//! The timer only accumulates time through [`FocusTimer::advance`], which the
//! window calls with each frame's delta. This keeps it independent from the
//! wall clock and easy to drive in tests.

use std::time::Duration;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MAX_FOCUS_MINUTES: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Something the window should react to after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    Finished,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    state: TimerState,
    length: Duration,
    elapsed: Duration,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

impl FocusTimer {
    pub fn new(minutes: u32) -> Self {
        Self {
            state: TimerState::Stopped,
            length: minutes_to_duration(minutes),
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining(&self) -> Duration {
        self.length.saturating_sub(self.elapsed)
    }

    /// Change the focus length. Only takes effect while stopped so a running
    /// session is never cut short.
    pub fn set_minutes(&mut self, minutes: u32) -> bool {
        if self.state != TimerState::Stopped {
            return false;
        }
        self.length = minutes_to_duration(minutes);
        self.elapsed = Duration::ZERO;
        true
    }

    /// Start from stopped, or resume from paused. No-op while running.
    pub fn start(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => None,
            TimerState::Paused => self.resume(),
            TimerState::Stopped => {
                if self.remaining().is_zero() {
                    self.elapsed = Duration::ZERO;
                }
                self.state = TimerState::Running;
                Some(TimerEvent::Started)
            }
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(TimerEvent::Paused)
    }

    pub fn resume(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(TimerEvent::Resumed)
    }

    pub fn reset(&mut self) -> TimerEvent {
        self.state = TimerState::Stopped;
        self.elapsed = Duration::ZERO;
        TimerEvent::Reset
    }

    /// Add `dt` of running time. Reports `Finished` once, on the call that
    /// reaches the focus length; the timer is then stopped at zero remaining.
    pub fn advance(&mut self, dt: Duration) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.elapsed = (self.elapsed + dt).min(self.length);
        if self.elapsed >= self.length {
            self.state = TimerState::Stopped;
            return Some(TimerEvent::Finished);
        }
        None
    }

    /// Remaining time as `MM:SS`, rounding partial seconds up so the display
    /// reads 25:00 at start and 00:00 only when done.
    pub fn display(&self) -> String {
        let remaining = self.remaining();
        let mut secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            secs += 1;
        }
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

fn minutes_to_duration(minutes: u32) -> Duration {
    Duration::from_secs(u64::from(minutes.clamp(1, MAX_FOCUS_MINUTES)) * 60)
}
