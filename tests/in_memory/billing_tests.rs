//! In-memory integration tests for validated-work summaries.

use super::helpers::{Board, board};
use chrono::{Duration, Utc};
use collabill::task::{
    domain::{Task, TaskSize},
    services::{CreateTaskRequest, TaskServiceError, ValidatedWorkQuery},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_counts_only_validated_work(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Client portal").await?;
    let from = Utc::now() - Duration::hours(1);

    for (title, size) in [("Invoices page", TaskSize::M), ("Search", TaskSize::Xl)] {
        let task = board
            .tasks
            .create_task(
                CreateTaskRequest::new(team.project.id(), team.collaborator, title)
                    .with_size(size),
            )
            .await?;
        board
            .walk(task.id(), team.collaborator, &["IN_PROGRESS", "IN_REVIEW"])
            .await?;
        board
            .move_task(task.id(), team.owner, "VALIDATED")
            .await?;
    }
    let pending = board.task(&team, "Still in review").await?;
    board
        .walk(pending.id(), team.collaborator, &["IN_PROGRESS", "IN_REVIEW"])
        .await?;
    let unsized_task = board.task(&team, "Unsized").await?;
    board
        .walk(unsized_task.id(), team.collaborator, &["IN_PROGRESS", "IN_REVIEW"])
        .await?;
    board
        .move_task(unsized_task.id(), team.owner, "VALIDATED")
        .await?;

    let summary = board
        .tasks
        .validated_work(ValidatedWorkQuery::new(
            team.project.id(),
            team.owner,
            from,
            Utc::now() + Duration::hours(1),
        ))
        .await?;

    eyre::ensure!(summary.tasks.len() == 3);
    eyre::ensure!(summary.total_points == TaskSize::M.points() + TaskSize::Xl.points());
    eyre::ensure!(summary.tasks.is_sorted_by_key(Task::validated_at));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_period_yields_empty_summary(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Client portal").await?;
    let yesterday = Utc::now() - Duration::days(1);

    let summary = board
        .tasks
        .validated_work(ValidatedWorkQuery::new(
            team.project.id(),
            team.owner,
            yesterday - Duration::days(1),
            yesterday,
        ))
        .await?;

    eyre::ensure!(summary.tasks.is_empty());
    eyre::ensure!(summary.total_points == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborators_cannot_read_billing(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Client portal").await?;
    let now = Utc::now();

    let result = board
        .tasks
        .validated_work(ValidatedWorkQuery::new(
            team.project.id(),
            team.collaborator,
            now - Duration::days(30),
            now,
        ))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::NotProjectOwner { .. })),
        "expected NotProjectOwner, got {result:?}"
    );
    Ok(())
}
