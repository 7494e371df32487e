//! Local persistence.
//!
//! Three independent JSON records (tasks, cycle settings, cycle state) live in
//! a key-value backend. Reads never fail: a missing or unreadable record is
//! replaced by its default, and settings/state records are merged field by
//! field over their defaults so older, smaller records stay usable.

mod config;
pub mod database;

pub use config::{AlertsConfig, Config, LogConfig, StorageConfig};
pub use database::Database;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cycle::{CycleSettings, CycleState};
use crate::error::{CoreError, Result};
use crate::tasks::Task;

/// Record key for the task collection.
pub const TASKS_KEY: &str = "pomodoro-todos";
/// Record key for the cycle settings.
pub const SETTINGS_KEY: &str = "pomodoro-timer-settings";
/// Record key for the cycle state.
pub const STATE_KEY: &str = "pomodoro-timer-state";

/// Returns `~/.config/pomotodo[-dev]/` based on POMOTODO_ENV.
///
/// Set POMOTODO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOTODO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomotodo-dev")
    } else {
        base_dir.join("pomotodo")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| CoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Raw string storage under string keys.
pub trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed, fail-soft view over a [`KvBackend`].
///
/// Cloning is cheap; the engine and the task list share one backend.
#[derive(Clone)]
pub struct Store {
    backend: Rc<dyn KvBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Store backed by a fresh [`MemoryKv`].
    pub fn memory() -> Self {
        Self::new(MemoryKv::new())
    }

    pub fn backend(&self) -> &dyn KvBackend {
        self.backend.as_ref()
    }

    /// Serialize `value` under `key`, replacing what was there.
    ///
    /// Write failures are logged and dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize record");
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &json) {
            tracing::warn!(key, error = %e, "failed to write record");
        }
    }

    /// Read `key`, or return `default` if it is absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.read(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable record");
                default
            }
        }
    }

    /// Like [`load`](Self::load), but the stored object is laid over
    /// `default` one top-level field at a time.
    pub fn load_merged<T: Serialize + DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.read(key) else {
            return default;
        };
        let stored = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => return default,
            Ok(other) => {
                tracing::warn!(key, found = %other, "stored record is not an object");
                return default;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable record");
                return default;
            }
        };
        let mut merged = match serde_json::to_value(&default) {
            Ok(Value::Object(map)) => map,
            _ => return default,
        };
        merged.extend(stored);
        match serde_json::from_value(Value::Object(merged)) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored record does not fit schema");
                default
            }
        }
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        self.load(TASKS_KEY, Vec::new())
    }

    pub fn save_tasks(&self, tasks: &[Task]) {
        self.save(TASKS_KEY, tasks);
    }

    pub fn load_settings(&self) -> CycleSettings {
        self.load_merged(SETTINGS_KEY, CycleSettings::default())
    }

    pub fn save_settings(&self, settings: &CycleSettings) {
        self.save(SETTINGS_KEY, settings);
    }

    /// Load the cycle state. The result is never running: no wall-clock
    /// baseline is stored, so a countdown cannot resume correctly.
    pub fn load_cycle_state(&self) -> CycleState {
        let mut state = self.load_merged(STATE_KEY, CycleState::default());
        state.is_running = false;
        state
    }

    pub fn save_cycle_state(&self, state: &CycleState) {
        self.save(STATE_KEY, state);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read record");
                None
            }
        }
    }
}
