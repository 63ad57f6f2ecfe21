//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use collabill::task::{
    domain::{Task, TaskDomainError},
    services::TaskServiceError,
};
use collabill::workflow::TaskStatus;
use rstest_bdd_macros::then;

fn stored_task(world: &TaskWorkflowWorld) -> Result<Option<Task>, eyre::Report> {
    let task_id = world.task_id()?;
    let tasks = run_async(
        world
            .service
            .list_project_tasks(world.project_id()?, world.owner()?),
    )?;
    Ok(tasks.into_iter().find(|task| task.id() == task_id))
}

fn move_result(world: &TaskWorkflowWorld) -> Result<&Result<Task, TaskServiceError>, eyre::Report> {
    world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = stored_task(world)?.ok_or_else(|| eyre::eyre!("task should be stored"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task has no validation record")]
fn task_has_no_validation(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?.ok_or_else(|| eyre::eyre!("task should be stored"))?;
    eyre::ensure!(
        task.validated_at().is_none() && task.validated_by().is_none(),
        "unexpected validation record on {}",
        task.id()
    );
    Ok(())
}

#[then(r#"the task was validated by "{user}""#)]
fn task_validated_by(world: &TaskWorkflowWorld, user: String) -> Result<(), eyre::Report> {
    let expected = world
        .users
        .get(&user)
        .copied()
        .ok_or_else(|| eyre::eyre!("unknown scenario user {user}"))?;
    let task = stored_task(world)?.ok_or_else(|| eyre::eyre!("task should be stored"))?;

    eyre::ensure!(task.validated_by() == Some(expected), "validator mismatch");
    eyre::ensure!(task.validated_at().is_some(), "missing validation timestamp");
    Ok(())
}

#[then("the move is denied by the workflow")]
fn move_denied(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = move_result(world)?;
    if !matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::TransitionNotAllowed { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected TransitionNotAllowed error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the move fails with an invalid status error")]
fn move_fails_with_invalid_status(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = move_result(world)?;
    if !matches!(result, Err(TaskServiceError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}

#[then("the move is rejected for a non-member")]
fn move_rejected_for_non_member(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = move_result(world)?;
    if !matches!(result, Err(TaskServiceError::NotProjectMember { .. })) {
        return Err(eyre::eyre!(
            "expected NotProjectMember error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the deletion is denied")]
fn deletion_denied(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_delete_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delete result"))?;
    if !matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::DeleteNotAllowed { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected DeleteNotAllowed error, got {result:?}"));
    }
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_delete_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delete result"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("deletion failed: {err}"));
    }
    eyre::ensure!(stored_task(world)?.is_none(), "task is still stored");
    Ok(())
}
