use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::{CycleSettings, CycleState, Mode};

/// Every visible change of the focus cycle produces an Event.
/// The observer receives it synchronously; the CLI prints it as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        mode: Mode,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// Phase left early by the user. No alerts fire.
    TimerSkipped {
        from: Mode,
        to: Mode,
        sessions_completed: u32,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// Phase ran down to zero on its own.
    TimerCompleted {
        from: Mode,
        to: Mode,
        sessions_completed: u32,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    SettingsChanged {
        settings: CycleSettings,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: CycleState,
        settings: CycleSettings,
        mode: Mode,
        label: String,
        display: String,
        at: DateTime<Utc>,
    },
}
