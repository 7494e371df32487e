//! Completion side effects: an audible tone and a system notification.
//!
//! Both are best effort. The engine logs a failed alert and carries on with
//! the transition.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Title used for every completion notification.
pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

/// Answer to a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

/// A short beep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    /// Linear gain, 0.0 ..= 1.0.
    pub gain: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency_hz: 800.0,
            duration: Duration::from_millis(200),
            gain: 0.3,
        }
    }
}

/// Output devices the engine drives when a phase finishes on its own.
pub trait Alerts {
    /// Ask the platform for permission to show notifications. Called once at
    /// startup.
    fn request_permission(&mut self) -> Permission;

    fn play_tone(&mut self, tone: &Tone) -> Result<(), AlertError>;

    fn notify(&mut self, title: &str, body: &str) -> Result<(), AlertError>;
}

/// Headless alerts: no audio, notifications refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlerts;

impl Alerts for SilentAlerts {
    fn request_permission(&mut self) -> Permission {
        Permission::Denied
    }

    fn play_tone(&mut self, _tone: &Tone) -> Result<(), AlertError> {
        Err(AlertError::AudioUnavailable("silent alerts".into()))
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), AlertError> {
        Err(AlertError::NotificationFailed("silent alerts".into()))
    }
}

/// Notification body announcing the phase that was just entered.
pub fn completion_message(entered_break: bool) -> &'static str {
    if entered_break {
        "Time for a break!"
    } else {
        "Break is over. Time to work!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tone_is_short_soft_beep() {
        let tone = Tone::default();
        assert_eq!(tone.frequency_hz, 800.0);
        assert_eq!(tone.duration, Duration::from_millis(200));
        assert!((tone.gain - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn silent_alerts_refuse_everything() {
        let mut alerts = SilentAlerts;
        assert_eq!(alerts.request_permission(), Permission::Denied);
        assert!(alerts.play_tone(&Tone::default()).is_err());
        assert!(alerts.notify(NOTIFICATION_TITLE, "x").is_err());
    }

    #[test]
    fn messages_follow_the_new_phase() {
        assert_eq!(completion_message(true), "Time for a break!");
        assert_eq!(completion_message(false), "Break is over. Time to work!");
    }
}
