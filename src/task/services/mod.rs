//! Services orchestrating task creation, status changes and reporting.

mod config;
mod controller;
mod reporting;

pub use config::TaskConfig;
pub use controller::{
    AssignTaskRequest, CreateTaskRequest, EditTaskRequest, TaskService, TaskServiceError,
    TaskServiceResult, UpdateTaskStatusRequest,
};
pub use reporting::{ValidatedWorkQuery, ValidatedWorkSummary};
