//! Camera endpoints.

use axum::extract::{Extension, Json, Path};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder};
use tracing::instrument;

use crate::database::entity::camera::{self, CameraModel};
use crate::database::entity::camera_back::{self, CameraBackModel, Entity as CameraBack};
use crate::database::FilmlogDatabase;
use crate::error::{ServerError, ServerResult};
use crate::lifecycle;
use crate::{RequestState, State};
use filmlog::api::v1::camera::{
    CameraBackInfo, CameraInfo, CreateCameraBackRequest, CreateCameraRequest,
    SetEquipmentStatusRequest,
};
use filmlog::equipment::EquipmentStatus;

#[instrument(skip_all, fields(payload))]
pub(crate) async fn create_camera(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Json(payload): Json<CreateCameraRequest>,
) -> ServerResult<Json<CameraInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let camera = camera::ActiveModel {
        owner_id: Set(owner),
        name: Set(payload.name),
        format: Set(payload.format.as_str().to_owned()),
        status: Set(payload.status.as_str().to_owned()),
        multiple_backs: Set(payload.multiple_backs),
        loaded_roll_id: Set(None),
        ..Default::default()
    }
    .insert(database)
    .await
    .map_err(ServerError::database_error)?;

    tracing::info!("Created camera {}", camera.id);

    Ok(Json(camera_info(database, camera).await?))
}

#[instrument(skip_all, fields(camera_id))]
pub(crate) async fn get_camera(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(camera_id): Path<i64>,
) -> ServerResult<Json<CameraInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let camera = database.find_camera(owner, camera_id, false).await?;

    Ok(Json(camera_info(database, camera).await?))
}

#[instrument(skip_all, fields(camera_id, payload))]
pub(crate) async fn set_camera_status(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(camera_id): Path<i64>,
    Json(payload): Json<SetEquipmentStatusRequest>,
) -> ServerResult<Json<CameraInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let camera = lifecycle::set_camera_status(database, owner, camera_id, payload.status).await?;

    Ok(Json(camera_info(database, camera).await?))
}

#[instrument(skip_all, fields(camera_id, payload))]
pub(crate) async fn create_camera_back(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(camera_id): Path<i64>,
    Json(payload): Json<CreateCameraBackRequest>,
) -> ServerResult<Json<CameraBackInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let camera = database.find_camera(owner, camera_id, false).await?;
    let format = match payload.format {
        Some(format) => format,
        None => camera.format()?,
    };

    let back = camera_back::ActiveModel {
        camera_id: Set(camera.id),
        name: Set(payload.name),
        format: Set(format.as_str().to_owned()),
        status: Set(EquipmentStatus::default().as_str().to_owned()),
        loaded_roll_id: Set(None),
        ..Default::default()
    }
    .insert(database)
    .await
    .map_err(ServerError::database_error)?;

    Ok(Json(camera_back_info(back)?))
}

#[instrument(skip_all, fields(camera_id, camera_back_id, payload))]
pub(crate) async fn set_camera_back_status(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path((camera_id, camera_back_id)): Path<(i64, i64)>,
    Json(payload): Json<SetEquipmentStatusRequest>,
) -> ServerResult<Json<CameraBackInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let back = lifecycle::set_camera_back_status(
        database,
        owner,
        camera_id,
        camera_back_id,
        payload.status,
    )
    .await?;

    Ok(Json(camera_back_info(back)?))
}

async fn camera_info(
    database: &DatabaseConnection,
    camera: CameraModel,
) -> ServerResult<CameraInfo> {
    let backs = CameraBack::find()
        .filter(camera_back::Column::CameraId.eq(camera.id))
        .order_by_asc(camera_back::Column::Id)
        .all(database)
        .await
        .map_err(ServerError::database_error)?
        .into_iter()
        .map(camera_back_info)
        .collect::<ServerResult<Vec<_>>>()?;

    let finished_rolls = database.count_finished_rolls(camera.id).await?;

    Ok(CameraInfo {
        id: camera.id,
        format: camera.format()?,
        status: camera.status()?,
        name: camera.name,
        multiple_backs: camera.multiple_backs,
        loaded_roll_id: camera.loaded_roll_id,
        backs,
        finished_rolls,
    })
}

fn camera_back_info(back: CameraBackModel) -> ServerResult<CameraBackInfo> {
    Ok(CameraBackInfo {
        id: back.id,
        camera_id: back.camera_id,
        format: back.format()?,
        status: back.status()?,
        name: back.name,
        loaded_roll_id: back.loaded_roll_id,
    })
}
