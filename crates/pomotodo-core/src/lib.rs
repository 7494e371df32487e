//! # Pomotodo Core Library
//!
//! Business logic for a focus timer paired with a task list. All state is
//! local and single-user; front-ends (the bundled CLI, or any GUI) drive the
//! engine and render what it reports.
//!
//! ## Architecture
//!
//! - **Focus Cycle Engine**: work/break state machine with a one-second
//!   countdown that the caller drives via `poll()`
//! - **Storage**: fail-soft JSON records over a key-value backend (SQLite or
//!   in-memory), plus TOML-based application configuration
//! - **Task List**: CRUD collection persisted as a full snapshot
//! - **Alerts**: tone and notification collaborators fired on natural
//!   phase completion
//!
//! ## Key Components
//!
//! - [`FocusEngine`]: Core timer state machine
//! - [`Store`]: Typed persistence over a [`KvBackend`]
//! - [`TaskList`]: Task collection
//! - [`Config`]: Application configuration management

pub mod alerts;
pub mod cycle;
pub mod error;
pub mod events;
pub mod format;
pub mod storage;
pub mod tasks;

pub use alerts::{Alerts, Permission, SilentAlerts, Tone};
pub use cycle::{
    Clock, CycleSettings, CycleSettingsPatch, CycleState, FocusEngine, ManualClock, Mode,
    SystemClock,
};
pub use error::{AlertError, ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use format::format_time;
pub use storage::{Config, Database, KvBackend, MemoryKv, Store};
pub use tasks::{Task, TaskList};
