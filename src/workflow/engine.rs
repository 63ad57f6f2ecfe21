//! Transition and deletion rules.

use super::TaskStatus;
use std::collections::BTreeSet;

const FROM_TODO: &[TaskStatus] = &[
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Trash,
];
const FROM_IN_PROGRESS: &[TaskStatus] = &[
    TaskStatus::Blocked,
    TaskStatus::Trash,
    TaskStatus::Todo,
    TaskStatus::InReview,
];
const FROM_BLOCKED: &[TaskStatus] = &[TaskStatus::Todo, TaskStatus::Trash];

/// Exits from review, reserved to the project owner.
const OWNER_REVIEW_EXITS: &[TaskStatus] = &[
    TaskStatus::Trash,
    TaskStatus::InProgress,
    TaskStatus::Validated,
];

const DELETABLE: &[TaskStatus] = &[
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Trash,
];

/// Targets reachable from `from`, excluding the no-op.
const fn targets(from: TaskStatus, is_project_owner: bool) -> &'static [TaskStatus] {
    match from {
        TaskStatus::InReview if is_project_owner => OWNER_REVIEW_EXITS,
        TaskStatus::InReview => &[],
        TaskStatus::Todo => FROM_TODO,
        TaskStatus::InProgress => FROM_IN_PROGRESS,
        TaskStatus::Blocked => FROM_BLOCKED,
        TaskStatus::Validated | TaskStatus::Trash => &[],
    }
}

/// Returns whether moving a task from `from` to `to` is legal.
///
/// Moving a task onto its own column is always permitted. Leaving
/// [`TaskStatus::InReview`] is reserved to the project owner; every other
/// row of the board is role-independent.
///
/// # Examples
///
/// ```
/// use collabill::workflow::{TaskStatus, can_transition};
///
/// assert!(can_transition(TaskStatus::InProgress, TaskStatus::InReview, false));
/// assert!(!can_transition(TaskStatus::InReview, TaskStatus::Validated, false));
/// assert!(can_transition(TaskStatus::InReview, TaskStatus::Validated, true));
/// ```
#[must_use]
pub fn can_transition(from: TaskStatus, to: TaskStatus, is_project_owner: bool) -> bool {
    from == to || targets(from, is_project_owner).contains(&to)
}

/// Returns every status reachable from `from` for the given role.
///
/// The trivial self-transition is not included. The returned set is owned
/// by the caller.
#[must_use]
pub fn allowed_transitions(from: TaskStatus, is_project_owner: bool) -> BTreeSet<TaskStatus> {
    targets(from, is_project_owner).iter().copied().collect()
}

/// Returns whether a task in `status` may be deleted.
///
/// Tasks under review or already validated must be moved out first,
/// whatever the caller's role.
#[must_use]
pub fn can_delete(status: TaskStatus) -> bool {
    DELETABLE.contains(&status)
}
