//! Focus cycle durations.

use serde::{Deserialize, Serialize};

use super::state::Mode;

fn default_work_duration() -> u32 {
    25 * 60
}
fn default_break_duration() -> u32 {
    5 * 60
}
fn default_long_break_duration() -> u32 {
    15 * 60
}
fn default_sessions_before_long_break() -> u32 {
    4
}

/// Durations (seconds) and long-break cadence of the focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    #[serde(default = "default_break_duration")]
    pub break_duration: u32,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            break_duration: default_break_duration(),
            long_break_duration: default_long_break_duration(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl CycleSettings {
    /// Full length of a phase in `mode`.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::ShortBreak => self.break_duration,
            Mode::LongBreak => self.long_break_duration,
        }
    }

    /// True when a break entered after `sessions_completed` work sessions is
    /// a long one.
    pub fn is_long_break(&self, sessions_completed: u32) -> bool {
        // A zero cadence is accepted unvalidated by `configure`; treat it as
        // "never" rather than dividing by zero.
        sessions_completed > 0
            && self.sessions_before_long_break > 0
            && sessions_completed % self.sessions_before_long_break == 0
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: &CycleSettingsPatch) {
        if let Some(v) = patch.work_duration {
            self.work_duration = v;
        }
        if let Some(v) = patch.break_duration {
            self.break_duration = v;
        }
        if let Some(v) = patch.long_break_duration {
            self.long_break_duration = v;
        }
        if let Some(v) = patch.sessions_before_long_break {
            self.sessions_before_long_break = v;
        }
    }
}

/// Partial settings accepted by [`FocusEngine::configure`](super::FocusEngine::configure).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_break_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_before_long_break: Option<u32>,
}

impl CycleSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
