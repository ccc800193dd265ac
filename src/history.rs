use crate::task::Task;
use tracing::{debug, trace};

/// Default bound on retained snapshots. Oldest entries are dropped first;
/// the bottom entry always plays the role of the earliest reachable state.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo history of full-collection snapshots.
///
/// The top of the undo stack is always the current collection. Undo never
/// removes the bottom entry, so the earliest reachable state stays
/// restorable. Recording a new snapshot invalidates everything that was
/// undone: history is linear, not a tree.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Vec<Task>>,
    redo: Vec<Vec<Task>>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Drop everything and seed the history with the freshly fetched
    /// collection as its single entry.
    pub fn reset(&mut self, initial: Vec<Task>) {
        self.undo.clear();
        self.redo.clear();
        self.undo.push(initial);
    }

    /// Record the collection after a confirmed mutation. Clears the redo
    /// stack.
    pub fn record(&mut self, snapshot: Vec<Task>) {
        self.push_undo(snapshot);
        self.redo.clear();
        debug!(depth = self.undo.len(), "history: snapshot recorded");
    }

    /// Step back one snapshot. Returns the new current collection, or None
    /// when only the earliest state remains (or nothing was ever recorded).
    pub fn undo(&mut self) -> Option<Vec<Task>> {
        if self.undo.len() <= 1 {
            debug!("history: nothing to undo");
            return None;
        }
        let undone = self.undo.pop()?;
        self.redo.push(undone);
        let current = self.undo.last().cloned();
        debug!(
            depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "history: undo"
        );
        current
    }

    /// Step forward one snapshot. Returns the restored collection, or None
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Vec<Task>> {
        let restored = self.redo.pop()?;
        self.push_undo(restored.clone());
        debug!(
            depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "history: redo"
        );
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    fn push_undo(&mut self, snapshot: Vec<Task>) {
        if self.undo.len() >= self.limit {
            trace!(limit = self.limit, "history full, dropping oldest snapshot");
            self.undo.remove(0);
        }
        self.undo.push(snapshot);
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn task(id: u64, name: &str) -> Task {
        Task {
            id,
            created_at: "2023-04-30T09:15:00Z".parse().unwrap(),
            name: name.to_string(),
            status: Status::Todo,
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(),
            description: None,
            image: None,
        }
    }

    fn snapshot(ids: &[u64]) -> Vec<Task> {
        ids.iter().map(|&id| task(id, &format!("Task {id}"))).collect()
    }

    #[test]
    fn undo_is_noop_with_single_snapshot() {
        let mut history = History::default();
        history.reset(snapshot(&[1]));
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn undo_is_noop_when_empty() {
        let mut history = History::default();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut history = History::default();
        history.reset(snapshot(&[1]));
        history.record(snapshot(&[1, 2]));

        assert_eq!(history.undo(), Some(snapshot(&[1])));
        assert!(history.can_redo());
    }

    #[test]
    fn round_trip_returns_to_initial_then_final() {
        let initial = snapshot(&[1]);
        let after_add = snapshot(&[1, 2]);
        let after_delete = snapshot(&[2]);

        let mut history = History::default();
        history.reset(initial.clone());
        history.record(after_add.clone());
        history.record(after_delete.clone());

        assert_eq!(history.undo(), Some(after_add.clone()));
        assert_eq!(history.undo(), Some(initial.clone()));
        assert_eq!(history.undo(), None);

        assert_eq!(history.redo(), Some(after_add));
        assert_eq!(history.redo(), Some(after_delete));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::default();
        history.reset(snapshot(&[1]));
        history.record(snapshot(&[1, 2]));
        history.undo();
        assert!(history.can_redo());

        history.record(snapshot(&[1, 3]));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn reset_discards_both_stacks() {
        let mut history = History::default();
        history.reset(snapshot(&[1]));
        history.record(snapshot(&[1, 2]));
        history.undo();

        history.reset(snapshot(&[9]));
        assert_eq!(history.depth(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_snapshot() {
        let mut history = History::new(3);
        history.reset(snapshot(&[0]));
        history.record(snapshot(&[1]));
        history.record(snapshot(&[2]));
        history.record(snapshot(&[3]));

        assert_eq!(history.depth(), 3);
        // The horizon moved: two undos land on [1], not [0].
        assert_eq!(history.undo(), Some(snapshot(&[2])));
        assert_eq!(history.undo(), Some(snapshot(&[1])));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn limit_of_zero_still_keeps_current() {
        let mut history = History::new(0);
        history.reset(snapshot(&[1]));
        history.record(snapshot(&[2]));
        assert_eq!(history.depth(), 1);
    }
}
