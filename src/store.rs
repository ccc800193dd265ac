use crate::api::TaskService;
use crate::history::History;
use crate::task::{Task, TaskDraft};
use tracing::{debug, info, warn};

/// Owns the task collection, the loading flag and the undo/redo history,
/// and drives every exchange with the remote service.
///
/// Updates are confirmation-only: nothing changes locally until the service
/// has answered. Every mutation takes `&mut self` and runs its round trip
/// to completion before returning, so at most one mutation is ever in
/// flight and responses cannot land out of order.
pub struct TaskStore {
    service: Box<dyn TaskService>,
    tasks: Vec<Task>,
    loading: bool,
    history: History,
}

impl TaskStore {
    pub fn new(service: Box<dyn TaskService>, history_limit: usize) -> Self {
        Self {
            service,
            tasks: Vec::new(),
            loading: true,
            history: History::new(history_limit),
        }
    }

    /// Fetch the full collection and seed the history with it. On failure
    /// the store stays in the loading state with whatever it had before.
    // TODO: surface fetch failures to the UI instead of an endless loading
    // screen (currently only the log shows why startup never finished).
    pub fn initialize(&mut self) {
        match self.service.list() {
            Ok(tasks) => {
                info!(count = tasks.len(), "task collection fetched");
                self.tasks = tasks;
                self.loading = false;
                self.history.reset(self.tasks.clone());
            }
            Err(error) => {
                warn!(error = %error, "failed to fetch task collection");
            }
        }
    }

    /// Create a task from an already-validated draft. Returns whether the
    /// mutation was confirmed and applied.
    pub fn add_task(&mut self, draft: &TaskDraft) -> bool {
        match self.service.create(draft) {
            Ok(task) => {
                debug!(id = task.id, name = %task.name, "task created");
                self.tasks.push(task);
                self.history.record(self.tasks.clone());
                true
            }
            Err(error) => {
                warn!(error = %error, "create failed, board unchanged");
                false
            }
        }
    }

    /// Submit a full task record; on confirmation the matching entry is
    /// replaced by what the service returned. An id that is no longer in
    /// the collection leaves it unchanged (a snapshot is still recorded,
    /// mirroring the mutation having been confirmed remotely).
    pub fn update_task(&mut self, task: &Task) -> bool {
        match self.service.update(task) {
            Ok(updated) => {
                debug!(id = updated.id, "task updated");
                for existing in &mut self.tasks {
                    if existing.id == updated.id {
                        *existing = updated.clone();
                    }
                }
                self.history.record(self.tasks.clone());
                true
            }
            Err(error) => {
                warn!(error = %error, id = task.id, "update failed, board unchanged");
                false
            }
        }
    }

    /// Delete by id. Removing an id that is already gone locally is not a
    /// fault; the collection simply stays as it is.
    pub fn delete_task(&mut self, id: u64) -> bool {
        match self.service.delete(id) {
            Ok(()) => {
                debug!(id, "task deleted");
                self.tasks.retain(|task| task.id != id);
                self.history.record(self.tasks.clone());
                true
            }
            Err(error) => {
                warn!(error = %error, id, "delete failed, board unchanged");
                false
            }
        }
    }

    /// Step back to the previous snapshot; no-op at the earliest state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(tasks) => {
                self.tasks = tasks;
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone snapshot; no-op if none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(tasks) => {
                self.tasks = tasks;
                true
            }
            None => false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }
}
