//! Integration tests for on-disk persistence.
//!
//! Runs the engine and the task list against a real SQLite file, closes
//! everything, reopens the file and checks what survived.

use pomotodo_core::storage::{SETTINGS_KEY, STATE_KEY};
use pomotodo_core::{
    CycleSettingsPatch, Database, FocusEngine, KvBackend, ManualClock, Mode, Store, TaskList,
};

fn open_store(path: &std::path::Path) -> Store {
    Store::new(Database::open_at(path).unwrap())
}

#[test]
fn test_cycle_survives_reopen_paused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomotodo.db");

    {
        let clock = ManualClock::new();
        let mut engine = FocusEngine::new(open_store(&path)).with_clock(clock.clone());
        engine.configure(CycleSettingsPatch {
            work_duration: Some(600),
            ..Default::default()
        });
        engine.start();
        clock.advance_ms(7_000);
        engine.poll();
        assert!(engine.is_running());
    }

    let engine = FocusEngine::new(open_store(&path));
    assert!(!engine.is_running());
    assert_eq!(engine.settings().work_duration, 600);
    assert_eq!(engine.settings().break_duration, 300);
    assert_eq!(engine.state().time_remaining, 593);
    assert_eq!(engine.mode(), Mode::Work);
}

#[test]
fn test_tasks_and_cycle_share_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomotodo.db");

    {
        let store = open_store(&path);
        let mut tasks = TaskList::new(store.clone());
        let mut engine = FocusEngine::new(store);
        let a = tasks.add("  draft outline ").unwrap();
        tasks.add("review").unwrap();
        tasks.toggle(&a.id);
        engine.skip();
    }

    let store = open_store(&path);
    let tasks = TaskList::new(store.clone());
    let engine = FocusEngine::new(store);

    assert_eq!(tasks.list().len(), 2);
    assert_eq!(tasks.list()[0].text, "draft outline");
    assert!(tasks.list()[0].completed);
    assert!(!tasks.list()[1].completed);
    assert!(engine.state().is_break);
    assert_eq!(engine.state().sessions_completed, 1);
}

#[test]
fn test_stale_running_record_from_disk_is_paused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomotodo.db");
    {
        let db = Database::open_at(&path).unwrap();
        db.set(
            STATE_KEY,
            r#"{"isRunning":true,"isBreak":false,"timeRemaining":-5,"sessionsCompleted":7}"#,
        )
        .unwrap();
        db.set(SETTINGS_KEY, r#"{"workDuration":1000}"#).unwrap();
    }

    let engine = FocusEngine::new(open_store(&path));
    assert!(!engine.is_running());
    assert_eq!(engine.state().time_remaining, 1000);
    assert_eq!(engine.state().sessions_completed, 7);
    assert_eq!(engine.settings().sessions_before_long_break, 4);
}
