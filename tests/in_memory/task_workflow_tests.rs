//! In-memory integration tests for task workflow operations.

use super::helpers::{Board, board};
use collabill::project::domain::UserId;
use collabill::task::{
    domain::TaskDomainError,
    services::{AssignTaskRequest, EditTaskRequest, TaskServiceError},
};
use collabill::workflow::TaskStatus;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_moves_task_through_the_board(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Login screen").await?;

    let blocked = board
        .walk(task.id(), team.collaborator, &["IN_PROGRESS", "BLOCKED"])
        .await?;
    eyre::ensure!(blocked.status() == TaskStatus::Blocked);

    let reviewed = board
        .walk(
            task.id(),
            team.collaborator,
            &["TODO", "IN_PROGRESS", "IN_REVIEW"],
        )
        .await?;
    eyre::ensure!(reviewed.status() == TaskStatus::InReview);
    eyre::ensure!(reviewed.validation().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_exit_is_reserved_to_owner(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Push notifications").await?;
    board
        .walk(task.id(), team.collaborator, &["IN_PROGRESS", "IN_REVIEW"])
        .await?;

    for target in ["IN_PROGRESS", "TRASH", "VALIDATED"] {
        let result = board.move_task(task.id(), team.collaborator, target).await;
        eyre::ensure!(
            matches!(
                result,
                Err(TaskServiceError::Domain(
                    TaskDomainError::TransitionNotAllowed { .. }
                ))
            ),
            "collaborator move to {target} should be denied, got {result:?}"
        );
    }

    let validated = board
        .move_task(task.id(), team.owner, "VALIDATED")
        .await?;
    eyre::ensure!(validated.status() == TaskStatus::Validated);
    eyre::ensure!(validated.validated_by() == Some(team.owner));
    eyre::ensure!(validated.validated_at().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validated_task_is_frozen(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Release notes").await?;
    board
        .walk(task.id(), team.collaborator, &["IN_PROGRESS", "IN_REVIEW"])
        .await?;
    board
        .move_task(task.id(), team.owner, "VALIDATED")
        .await?;

    let reopened = board.move_task(task.id(), team.owner, "IN_PROGRESS").await;
    let allowed = board
        .tasks
        .allowed_transitions(task.id(), team.owner)
        .await?;
    let deleted = board.tasks.delete_task(task.id(), team.owner).await;

    eyre::ensure!(reopened.is_err(), "validated task should not reopen");
    eyre::ensure!(allowed.is_empty());
    eyre::ensure!(
        matches!(
            deleted,
            Err(TaskServiceError::Domain(
                TaskDomainError::DeleteNotAllowed { .. }
            ))
        ),
        "expected DeleteNotAllowed, got {deleted:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trashed_task_can_be_deleted(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Obsolete idea").await?;
    board
        .move_task(task.id(), team.collaborator, "TRASH")
        .await?;

    board
        .tasks
        .delete_task(task.id(), team.collaborator)
        .await?;

    let remaining = board
        .tasks
        .list_project_tasks(team.project.id(), team.owner)
        .await?;
    eyre::ensure!(remaining.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_strings_are_parsed_leniently(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Case test").await?;

    let moved = board
        .move_task(task.id(), team.collaborator, " in_progress ")
        .await?;
    let invalid = board
        .move_task(task.id(), team.collaborator, "DONE")
        .await;

    eyre::ensure!(moved.status() == TaskStatus::InProgress);
    eyre::ensure!(
        matches!(invalid, Err(TaskServiceError::InvalidStatus(_))),
        "expected InvalidStatus, got {invalid:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_and_edits_persist(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Mobile app").await?;
    let task = board.task(&team, "Onboarding").await?;

    board
        .tasks
        .assign_task(AssignTaskRequest::new(
            task.id(),
            team.owner,
            Some(team.collaborator),
        ))
        .await?;
    board
        .tasks
        .edit_task(EditTaskRequest::new(task.id(), team.collaborator).with_title("Onboarding flow"))
        .await?;
    let outsider = board
        .tasks
        .assign_task(AssignTaskRequest::new(
            task.id(),
            team.owner,
            Some(UserId::new()),
        ))
        .await;

    let listed = board
        .tasks
        .list_project_tasks(team.project.id(), team.collaborator)
        .await?;
    let stored = listed
        .first()
        .ok_or_else(|| eyre::eyre!("expected one task"))?;
    eyre::ensure!(stored.assignee() == Some(team.collaborator));
    eyre::ensure!(stored.title().as_str() == "Onboarding flow");
    eyre::ensure!(
        matches!(outsider, Err(TaskServiceError::NotProjectMember { .. })),
        "expected NotProjectMember, got {outsider:?}"
    );
    Ok(())
}
