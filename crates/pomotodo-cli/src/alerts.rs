//! Terminal rendition of the completion alerts.
//!
//! The tone is the terminal bell; the notification is a line on stdout.

use std::io::Write;

use pomotodo_core::alerts::{Alerts, Permission, Tone};
use pomotodo_core::{AlertError, Config};

pub struct TerminalAlerts {
    sound: bool,
    notifications: bool,
}

impl TerminalAlerts {
    pub fn new(config: &Config) -> Self {
        Self {
            sound: config.alerts.sound,
            notifications: config.alerts.notifications,
        }
    }
}

impl Alerts for TerminalAlerts {
    fn request_permission(&mut self) -> Permission {
        if self.notifications {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn play_tone(&mut self, tone: &Tone) -> Result<(), AlertError> {
        if !self.sound || tone.gain <= 0.0 {
            return Err(AlertError::AudioUnavailable("sound disabled".into()));
        }
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), AlertError> {
        let mut out = std::io::stdout();
        writeln!(out, "\n[{title}] {body}")?;
        out.flush()?;
        Ok(())
    }
}
