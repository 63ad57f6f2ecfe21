//! In-memory integration tests for project membership.

use super::helpers::{Board, board};
use collabill::project::{
    domain::{ActorRole, ProjectDomainError, ProjectId, UserId},
    services::{AddMemberRequest, CreateProjectRequest, ProjectServiceError},
};
use collabill::task::services::{CreateTaskRequest, TaskServiceError};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_and_collaborator_roles_are_resolved(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Website redesign").await?;

    let stored = board
        .projects
        .find_by_id(team.project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;

    eyre::ensure!(stored.role_of(team.owner) == Some(ActorRole::Owner));
    eyre::ensure!(stored.role_of(team.collaborator) == Some(ActorRole::Collaborator));
    eyre::ensure!(stored.role_of(UserId::new()).is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_cannot_invite_others(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Website redesign").await?;

    let result = board
        .projects
        .add_member(AddMemberRequest::new(
            team.project.id(),
            team.collaborator,
            UserId::new(),
        ))
        .await;

    eyre::ensure!(
        matches!(result, Err(ProjectServiceError::NotProjectOwner { .. })),
        "expected NotProjectOwner, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_membership_is_rejected(board: Board) -> Result<(), eyre::Report> {
    let team = board.team("Website redesign").await?;

    let result = board
        .projects
        .add_member(AddMemberRequest::new(
            team.project.id(),
            team.owner,
            team.collaborator,
        ))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(ProjectServiceError::Domain(
                ProjectDomainError::AlreadyMember { .. }
            ))
        ),
        "expected AlreadyMember, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_are_isolated_from_each_other(board: Board) -> Result<(), eyre::Report> {
    let first = board.team("First").await?;
    let second = board
        .projects
        .create_project(CreateProjectRequest::new("Second", UserId::new()))
        .await?;

    let result = board
        .tasks
        .create_task(CreateTaskRequest::new(
            second.id(),
            first.collaborator,
            "Cross-project task",
        ))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::NotProjectMember { .. })),
        "expected NotProjectMember, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_reported(board: Board) -> Result<(), eyre::Report> {
    let missing = ProjectId::new();

    let result = board
        .projects
        .add_member(AddMemberRequest::new(missing, UserId::new(), UserId::new()))
        .await;

    eyre::ensure!(
        matches!(result, Err(ProjectServiceError::ProjectNotFound(id)) if id == missing),
        "expected ProjectNotFound, got {result:?}"
    );
    Ok(())
}
