use crate::task::{Task, TaskDraft};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("taskdeck/", env!("CARGO_PKG_VERSION"));

/// Failure modes of one round trip to the task service. The state
/// container treats them all the same way (log, leave state unchanged);
/// the split exists so logs say what actually went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connect failure, timeout, broken
    /// transport.
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    /// The body was not parseable as the expected shape.
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// One network round trip per operation; no retries. Implemented over HTTP
/// for the real service and in-memory for tests.
pub trait TaskService {
    fn list(&self) -> Result<Vec<Task>, ApiError>;
    fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn update(&self, task: &Task) -> Result<Task, ApiError>;
    fn delete(&self, id: u64) -> Result<(), ApiError>;
}

/// Client for the remote task collection endpoint: GET/POST on the
/// collection, PUT/DELETE on `{base}/{id}`, JSON bodies. No auth header is
/// attached; identity lives entirely outside these calls.
pub struct HttpTaskService {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTaskService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: u64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

fn ensure_success(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

impl TaskService for HttpTaskService {
    fn list(&self) -> Result<Vec<Task>, ApiError> {
        debug!(url = %self.base_url, "Fetching task collection");
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .map_err(ApiError::Network)?;
        let tasks: Vec<Task> = ensure_success(response)?.json().map_err(ApiError::Decode)?;
        debug!(count = tasks.len(), "Task collection fetched");
        Ok(tasks)
    }

    fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        debug!(url = %self.base_url, name = %draft.name, "Creating task");
        let response = self
            .client
            .post(&self.base_url)
            .json(draft)
            .send()
            .map_err(ApiError::Network)?;
        let task: Task = ensure_success(response)?.json().map_err(ApiError::Decode)?;
        debug!(id = task.id, "Task created");
        Ok(task)
    }

    fn update(&self, task: &Task) -> Result<Task, ApiError> {
        let url = self.task_url(task.id);
        debug!(url = %url, id = task.id, "Updating task");
        let response = self
            .client
            .put(&url)
            .json(task)
            .send()
            .map_err(ApiError::Network)?;
        let updated: Task = ensure_success(response)?.json().map_err(ApiError::Decode)?;
        debug!(id = updated.id, "Task updated");
        Ok(updated)
    }

    fn delete(&self, id: u64) -> Result<(), ApiError> {
        let url = self.task_url(id);
        debug!(url = %url, id, "Deleting task");
        let response = self.client.delete(&url).send().map_err(ApiError::Network)?;
        ensure_success(response)?;
        debug!(id, "Task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let service =
            HttpTaskService::new("https://example.test/api/tasks/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(service.base_url(), "https://example.test/api/tasks");
        assert_eq!(service.task_url(7), "https://example.test/api/tasks/7");
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let status = ApiError::Status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(format!("{}", status), "service returned HTTP 404 Not Found");
    }
}
