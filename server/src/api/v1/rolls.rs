//! Roll endpoints.

use axum::extract::{Extension, Json, Path};
use chrono::Utc;
use tracing::instrument;

use crate::database::FilmlogDatabase;
use crate::error::ServerResult;
use crate::lifecycle;
use crate::{RequestState, State};
use filmlog::api::v1::roll::{RollChanges, RollInfo};

#[instrument(skip_all)]
pub(crate) async fn create_roll(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Json(payload): Json<RollChanges>,
) -> ServerResult<Json<RollInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let today = Utc::now().date_naive();
    let saved = lifecycle::save_roll(database, owner, None, payload, today).await?;

    Ok(Json(saved.roll.to_roll_info(&saved.film)?))
}

#[instrument(skip_all, fields(roll_id))]
pub(crate) async fn get_roll(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
) -> ServerResult<Json<RollInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let roll = database.find_roll(owner, roll_id, false).await?;
    let (_, film) = database.find_film_profile(roll.film_id).await?;

    Ok(Json(roll.to_roll_info(&film)?))
}

#[instrument(skip_all, fields(roll_id, payload))]
pub(crate) async fn update_roll(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
    Json(payload): Json<RollChanges>,
) -> ServerResult<Json<RollInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    let today = Utc::now().date_naive();
    let saved = lifecycle::save_roll(database, owner, Some(roll_id), payload, today).await?;

    Ok(Json(saved.roll.to_roll_info(&saved.film)?))
}

#[instrument(skip_all, fields(roll_id))]
pub(crate) async fn delete_roll(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
) -> ServerResult<()> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    lifecycle::delete_roll(database, owner, roll_id).await
}
