pub mod client;

pub use client::{ApiError, HttpTaskService, TaskService};
