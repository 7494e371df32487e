//! Runtime state of the focus cycle.

use serde::{Deserialize, Serialize};

use super::settings::CycleSettings;

/// Which phase the cycle is in. Long-break-ness is derived from the session
/// count, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Display label for front-ends.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work Time",
            Mode::ShortBreak | Mode::LongBreak => "Break Time",
        }
    }
}

fn default_time_remaining() -> i64 {
    i64::from(CycleSettings::default().work_duration)
}

/// Mutable countdown state, persisted after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleState {
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub is_break: bool,
    /// Seconds left in the current phase. Only ever non-positive between a
    /// tick and the transition it triggers.
    #[serde(default = "default_time_remaining")]
    pub time_remaining: i64,
    #[serde(default)]
    pub sessions_completed: u32,
}

impl Default for CycleState {
    fn default() -> Self {
        Self {
            is_running: false,
            is_break: false,
            time_remaining: default_time_remaining(),
            sessions_completed: 0,
        }
    }
}

impl CycleState {
    pub fn mode(&self, settings: &CycleSettings) -> Mode {
        if !self.is_break {
            Mode::Work
        } else if settings.is_long_break(self.sessions_completed) {
            Mode::LongBreak
        } else {
            Mode::ShortBreak
        }
    }

    /// Full length of the current phase under `settings`.
    pub fn phase_duration(&self, settings: &CycleSettings) -> i64 {
        i64::from(settings.duration_for(self.mode(settings)))
    }

    /// Leave the current phase: count a finished work session, flip the mode
    /// and load the next phase's full duration.
    pub(crate) fn advance(&mut self, settings: &CycleSettings) {
        if !self.is_break {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
        }
        self.is_break = !self.is_break;
        self.time_remaining = self.phase_duration(settings);
    }
}
