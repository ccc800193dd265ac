use super::priority::Priority;
use super::status::Status;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name length bounds enforced before submission.
pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
/// Maximum description length enforced before submission.
pub const DESCRIPTION_MAX: usize = 120;

/// A task as served by the remote collection endpoint.
///
/// `id` and `created_at` are assigned by the service and never change;
/// everything else is mutable through the update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Task {
    /// Apply a draft's fields onto this task, keeping id and created_at.
    pub fn with_fields(&self, draft: &TaskDraft) -> Task {
        Task {
            id: self.id,
            created_at: self.created_at,
            name: draft.name.clone(),
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            description: draft.description.clone(),
            image: draft.image.clone(),
        }
    }
}

/// The body of a create request: every Task field except the
/// service-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("name must be {NAME_MIN}-{NAME_MAX} characters (got {0})")]
    NameLength(usize),
    #[error("description must be at most {DESCRIPTION_MAX} characters (got {0})")]
    DescriptionLength(usize),
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> TaskDraft {
        TaskDraft {
            name: task.name.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            description: task.description.clone(),
            image: task.image.clone(),
        }
    }

    /// Pre-submission field checks. The state container never validates;
    /// callers (forms, CLI) run this before handing the draft over.
    pub fn validate(&self) -> Result<(), DraftError> {
        let name_len = self.name.chars().count();
        if name_len < NAME_MIN || name_len > NAME_MAX {
            return Err(DraftError::NameLength(name_len));
        }
        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > DESCRIPTION_MAX {
                return Err(DraftError::DescriptionLength(len));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_draft() -> TaskDraft {
        TaskDraft {
            name: "Write report".to_string(),
            status: Status::Todo,
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(),
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_task_decodes_service_payload() {
        let json = r#"{
            "id": 7,
            "created_at": "2023-04-30T09:15:00Z",
            "name": "Task 1",
            "status": "in_progress",
            "priority": "high",
            "due_date": "2023-05-02",
            "description": "short note",
            "image": null
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.name, "Task 1");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2023, 5, 2).unwrap());
        assert_eq!(task.description.as_deref(), Some("short note"));
        assert_eq!(task.image, None);
    }

    #[test]
    fn test_task_decodes_payload_without_optional_fields() {
        let json = r#"{
            "id": 1,
            "created_at": "2023-04-30T09:15:00Z",
            "name": "Task 2",
            "status": "todo",
            "priority": "low",
            "due_date": "2023-05-03"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.image, None);
    }

    #[test]
    fn test_draft_has_no_id_or_created_at() {
        let value = serde_json::to_value(sample_draft()).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert_eq!(object["name"], "Write report");
        assert_eq!(object["due_date"], "2023-05-02");
    }

    #[test]
    fn test_validate_accepts_boundary_names() {
        let mut draft = sample_draft();
        draft.name = "abc".to_string();
        assert_eq!(draft.validate(), Ok(()));
        draft.name = "x".repeat(50);
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_short_and_long_names() {
        let mut draft = sample_draft();
        draft.name = "ab".to_string();
        assert_eq!(draft.validate(), Err(DraftError::NameLength(2)));
        draft.name = "x".repeat(51);
        assert_eq!(draft.validate(), Err(DraftError::NameLength(51)));
    }

    #[test]
    fn test_validate_description_bound() {
        let mut draft = sample_draft();
        draft.description = Some("d".repeat(120));
        assert_eq!(draft.validate(), Ok(()));
        draft.description = Some("d".repeat(121));
        assert_eq!(draft.validate(), Err(DraftError::DescriptionLength(121)));
    }

    #[test]
    fn test_with_fields_keeps_identity() {
        let task = Task {
            id: 42,
            created_at: "2023-04-30T09:15:00Z".parse().unwrap(),
            name: "Original".to_string(),
            status: Status::Todo,
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            description: None,
            image: None,
        };
        let mut draft = TaskDraft::from_task(&task);
        draft.name = "Renamed".to_string();
        draft.status = Status::Done;

        let updated = task.with_fields(&draft);
        assert_eq!(updated.id, 42);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, Status::Done);
    }
}
