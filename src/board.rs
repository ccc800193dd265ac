//! Pure view derivation: filtering, column grouping, pagination and the
//! typed column-to-column move. Nothing here touches the store or the
//! network; every function maps the current collection plus display
//! parameters to what the board shows.

use crate::task::{Priority, Status, Task};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Cards shown per column page. The board always renders three columns.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Grouping mode selecting which task field drives the three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    State,
    Priority,
    Date,
}

impl GroupBy {
    /// Cycle to the next grouping: state -> priority -> date -> state
    pub fn next(self) -> GroupBy {
        match self {
            GroupBy::State => GroupBy::Priority,
            GroupBy::Priority => GroupBy::Date,
            GroupBy::Date => GroupBy::State,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::State => "state",
            GroupBy::Priority => "priority",
            GroupBy::Date => "date",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(GroupBy::State),
            "priority" => Ok(GroupBy::Priority),
            "date" => Ok(GroupBy::Date),
            _ => Err(format!("Invalid grouping: {}", s)),
        }
    }
}

/// Optional display predicates. An unset field never excludes a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Case-insensitive substring match on the task name.
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Exact due-date match.
    pub due: Option<NaiveDate>,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        self.search.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || self.due.is_some()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(search) = &self.search
            && !task.name.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        if let Some(due) = self.due
            && task.due_date != due
        {
            return false;
        }
        true
    }
}

/// Due-date bucket relative to today. ISO calendar ordering: strictly
/// earlier is past due, strictly later lands in next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    PastDue,
    Today,
    Next,
}

impl DueBucket {
    pub fn contains(self, due: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DueBucket::PastDue => due < today,
            DueBucket::Today => due == today,
            DueBucket::Next => due > today,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DueBucket::PastDue => "past_due",
            DueBucket::Today => "today",
            DueBucket::Next => "next",
        }
    }
}

/// One of the three column headings under the active grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Status(Status),
    Priority(Priority),
    Due(DueBucket),
}

impl ColumnKey {
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Status(status) => status.label(),
            ColumnKey::Priority(priority) => priority.label(),
            ColumnKey::Due(bucket) => bucket.label(),
        }
    }

    /// Whether a task belongs in this column, given today's date for the
    /// due-date buckets.
    pub fn holds(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            ColumnKey::Status(status) => task.status == status,
            ColumnKey::Priority(priority) => task.priority == priority,
            ColumnKey::Due(bucket) => bucket.contains(task.due_date, today),
        }
    }
}

pub fn columns(group_by: GroupBy) -> [ColumnKey; 3] {
    match group_by {
        GroupBy::State => [
            ColumnKey::Status(Status::Todo),
            ColumnKey::Status(Status::InProgress),
            ColumnKey::Status(Status::Done),
        ],
        GroupBy::Priority => [
            ColumnKey::Priority(Priority::Low),
            ColumnKey::Priority(Priority::Medium),
            ColumnKey::Priority(Priority::High),
        ],
        GroupBy::Date => [
            ColumnKey::Due(DueBucket::PastDue),
            ColumnKey::Due(DueBucket::Today),
            ColumnKey::Due(DueBucket::Next),
        ],
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &Filter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

pub fn column_tasks<'a>(
    tasks: &[&'a Task],
    column: ColumnKey,
    today: NaiveDate,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .copied()
        .filter(|task| column.holds(task, today))
        .collect()
}

/// 1-based page over a fixed-size window. Out-of-range pages (including
/// page 0) yield an empty slice, never an error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1) * page_size;
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Board-wide status totals. Computed over the whole collection, not the
/// filtered or paginated view: the footer is an overall summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            Status::Todo => counts.todo += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Done => counts.done += 1,
        }
    }
    counts
}

/// A card moved from one column to another, tagged with the concrete
/// source and destination keys so it can be checked before anything is
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: ColumnKey,
    pub dest: ColumnKey,
    pub task_id: u64,
}

/// Resolve a move into the updated task to submit, or None when the move
/// changes nothing: wrong task, same column, or a due-date column (those
/// derive from the due date and are not directly assignable).
pub fn apply_move(task: &Task, request: &MoveRequest) -> Option<Task> {
    if request.task_id != task.id || request.source == request.dest {
        return None;
    }
    match request.dest {
        ColumnKey::Status(status) => Some(Task {
            status,
            ..task.clone()
        }),
        ColumnKey::Priority(priority) => Some(Task {
            priority,
            ..task.clone()
        }),
        ColumnKey::Due(_) => None,
    }
}
