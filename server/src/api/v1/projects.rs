//! Project endpoints.

use axum::extract::{Extension, Json, Path};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use tracing::instrument;

use crate::database::entity::project::{self, ProjectModel};
use crate::database::FilmlogDatabase;
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};
use filmlog::api::v1::project::{CreateProjectRequest, ProjectInfo};

#[instrument(skip_all, fields(payload))]
pub(crate) async fn create_project(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ServerResult<Json<ProjectInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let project = project::ActiveModel {
        owner_id: Set(owner),
        name: Set(payload.name),
        status: Set(payload.status.as_str().to_owned()),
        notes: Set(payload.notes),
        ..Default::default()
    }
    .insert(database)
    .await
    .map_err(ServerError::database_error)?;

    Ok(Json(project_info(database, project).await?))
}

#[instrument(skip_all, fields(project_id))]
pub(crate) async fn get_project(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(project_id): Path<i64>,
) -> ServerResult<Json<ProjectInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let project = database.find_project(owner, project_id).await?;

    Ok(Json(project_info(database, project).await?))
}

async fn project_info(
    database: &DatabaseConnection,
    project: ProjectModel,
) -> ServerResult<ProjectInfo> {
    let rolls_remaining = database.count_rolls_remaining(project.id).await?;

    Ok(ProjectInfo {
        id: project.id,
        status: project.status()?,
        name: project.name,
        notes: project.notes,
        rolls_remaining,
    })
}
