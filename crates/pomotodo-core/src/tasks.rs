//! The task list.
//!
//! A plain ordered collection. Every mutation writes the whole collection
//! back to the store and then notifies the list's observer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

type ChangeObserver = Box<dyn FnMut(&[Task])>;

pub struct TaskList {
    store: Store,
    tasks: Vec<Task>,
    observer: Option<ChangeObserver>,
}

impl std::fmt::Debug for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl TaskList {
    /// Load the persisted collection.
    pub fn new(store: Store) -> Self {
        let tasks = store.load_tasks();
        Self {
            store,
            tasks,
            observer: None,
        }
    }

    /// Register the change observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Task]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. Returns `None` for blank text.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        };
        self.tasks.push(task.clone());
        self.commit();
        Some(task)
    }

    /// Flip completion. Returns `false` if no task has `id`.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.commit();
        true
    }

    /// Delete a task. Returns `false` if no task has `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(index);
        self.commit();
        true
    }

    /// Drop every completed task and return how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        self.commit();
        before - self.tasks.len()
    }

    fn commit(&mut self) {
        self.store.save_tasks(&self.tasks);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.tasks);
        }
    }
}
