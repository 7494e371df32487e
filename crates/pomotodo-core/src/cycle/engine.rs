//! Focus cycle engine.
//!
//! Owns the cycle settings and state, runs the one-second countdown and
//! moves between work and break phases.
//!
//! ## States
//!
//! ```text
//! Work-Idle <-> Work-Running
//!     ^              | complete / skip
//!     |              v
//! Break-Running <-> Break-Idle
//! ```
//!
//! Every operation persists through the [`Store`] and hands an [`Event`] to
//! the observer before returning it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = FocusEngine::new(store);
//! engine.start();
//! // In a loop:
//! std::thread::sleep(engine.next_tick_in().unwrap());
//! engine.poll();
//! ```

use std::time::Duration;

use chrono::Utc;

use super::clock::{Clock, Countdown, SystemClock};
use super::settings::{CycleSettings, CycleSettingsPatch};
use super::state::{CycleState, Mode};
use crate::alerts::{
    completion_message, Alerts, Permission, SilentAlerts, Tone, NOTIFICATION_TITLE,
};
use crate::events::Event;
use crate::format::format_time;
use crate::storage::Store;

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

type Observer = Box<dyn FnMut(&Event)>;

pub struct FocusEngine {
    store: Store,
    settings: CycleSettings,
    state: CycleState,
    /// Live countdown. `Some` exactly while `state.is_running`.
    countdown: Option<Countdown>,
    clock: Box<dyn Clock>,
    alerts: Box<dyn Alerts>,
    tone: Tone,
    permission: Permission,
    observer: Option<Observer>,
}

impl std::fmt::Debug for FocusEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusEngine")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("countdown", &self.countdown)
            .field("permission", &self.permission)
            .finish_non_exhaustive()
    }
}

impl FocusEngine {
    /// Restore settings and state from `store`.
    ///
    /// The restored state is always paused. A non-positive remaining time is
    /// replaced by a full work phase.
    pub fn new(store: Store) -> Self {
        let settings = store.load_settings();
        let mut state = store.load_cycle_state();
        if state.time_remaining <= 0 {
            state.time_remaining = i64::from(settings.work_duration);
        }
        tracing::debug!(?settings, ?state, "focus engine restored");
        Self {
            store,
            settings,
            state,
            countdown: None,
            clock: Box::new(SystemClock::new()),
            alerts: Box::new(SilentAlerts),
            tone: Tone::default(),
            permission: Permission::Default,
            observer: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_alerts(mut self, alerts: impl Alerts + 'static) -> Self {
        self.alerts = Box::new(alerts);
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Register the observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: impl FnMut(&Event) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Ask the alert collaborator for notification permission once.
    pub fn request_notification_permission(&mut self) -> Permission {
        if self.permission == Permission::Default {
            self.permission = self.alerts.request_permission();
            tracing::debug!(permission = ?self.permission, "notification permission");
        }
        self.permission
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> CycleSettings {
        self.settings
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode(&self.settings)
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Time until the next tick is due, or `None` while paused.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.countdown
            .as_ref()
            .map(|c| c.until_next(self.clock.now()))
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let mode = self.mode();
        Event::StateSnapshot {
            state: self.state,
            settings: self.settings,
            mode,
            label: mode.label().to_string(),
            display: format_time(self.state.time_remaining),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Merge `patch` into the settings. While paused, the current phase is
    /// reloaded with its (possibly new) full duration.
    pub fn configure(&mut self, patch: CycleSettingsPatch) -> Event {
        self.settings.merge(&patch);
        self.store.save_settings(&self.settings);
        if !self.state.is_running {
            self.state.time_remaining = self.state.phase_duration(&self.settings);
            self.persist();
        }
        tracing::debug!(settings = ?self.settings, "settings changed");
        self.emit(Event::SettingsChanged {
            settings: self.settings,
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running {
            return None;
        }
        self.state.is_running = true;
        self.persist();
        self.countdown = Some(Countdown::arm(self.clock.now(), TICK_PERIOD));
        tracing::debug!(
            mode = ?self.mode(),
            remaining = self.state.time_remaining,
            "timer started"
        );
        Some(self.emit(Event::TimerStarted {
            mode: self.mode(),
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.countdown = None;
        self.state.is_running = false;
        self.persist();
        Some(self.emit(Event::TimerPaused {
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        }))
    }

    /// Stop and refill the current phase. Mode and session count stay.
    pub fn reset(&mut self) -> Event {
        self.pause();
        self.state.time_remaining = self.state.phase_duration(&self.settings);
        self.persist();
        self.emit(Event::TimerReset {
            mode: self.mode(),
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        })
    }

    /// Leave the current phase now, without alerts.
    pub fn skip(&mut self) -> Event {
        let from = self.transition();
        self.persist();
        tracing::debug!(?from, to = ?self.mode(), "phase skipped");
        self.emit(Event::TimerSkipped {
            from,
            to: self.mode(),
            sessions_completed: self.state.sessions_completed,
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        })
    }

    /// Fire every tick that has come due since the last poll.
    ///
    /// Returns the events produced, in order. A completed phase cancels the
    /// countdown, so later due ticks are dropped.
    pub fn poll(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();
        while self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.take_due(now))
        {
            events.extend(self.tick());
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn tick(&mut self) -> Vec<Event> {
        self.state.time_remaining -= 1;
        if self.state.time_remaining <= 0 {
            return self.complete();
        }
        self.persist();
        vec![self.emit(Event::TimerTicked {
            mode: self.mode(),
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        })]
    }

    /// Natural end of a phase: the skip transition plus alerts.
    ///
    /// The exhausted countdown is stopped without a write, so the only record
    /// stored is the one for the next phase.
    fn complete(&mut self) -> Vec<Event> {
        self.countdown = None;
        self.state.is_running = false;
        let from = self.transition();
        self.fire_alerts();
        self.persist();
        tracing::debug!(
            ?from,
            to = ?self.mode(),
            sessions = self.state.sessions_completed,
            "phase completed"
        );
        vec![self.emit(Event::TimerCompleted {
            from,
            to: self.mode(),
            sessions_completed: self.state.sessions_completed,
            remaining_secs: self.state.time_remaining,
            at: Utc::now(),
        })]
    }

    /// Pause, then move to the next phase. Returns the mode that was left.
    fn transition(&mut self) -> Mode {
        self.pause();
        let from = self.mode();
        self.state.advance(&self.settings);
        from
    }

    fn fire_alerts(&mut self) {
        if let Err(e) = self.alerts.play_tone(&self.tone) {
            tracing::debug!(error = %e, "completion tone skipped");
        }
        if self.permission != Permission::Granted {
            return;
        }
        let body = completion_message(self.state.is_break);
        if let Err(e) = self.alerts.notify(NOTIFICATION_TITLE, body) {
            tracing::debug!(error = %e, "completion notification skipped");
        }
    }

    fn persist(&self) {
        self.store.save_cycle_state(&self.state);
    }

    fn emit(&mut self, event: Event) -> Event {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
        event
    }
}
