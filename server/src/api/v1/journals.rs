//! Journal and frame endpoints.

use axum::extract::{Extension, Json, Path};
use tracing::instrument;

use crate::error::ServerResult;
use crate::journal;
use crate::{RequestState, State};
use filmlog::api::v1::journal::{
    CreateFramesRequest, CreateJournalEntryRequest, FrameInfo, JournalEntryInfo,
};

/// Gets the journal of a roll, including the starting frame of each entry.
#[instrument(skip_all, fields(roll_id))]
pub(crate) async fn get_journal(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
) -> ServerResult<Json<Vec<JournalEntryInfo>>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    Ok(Json(journal::list_journal(database, owner, roll_id).await?))
}

#[instrument(skip_all, fields(roll_id, payload))]
pub(crate) async fn create_journal_entry(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
    Json(payload): Json<CreateJournalEntryRequest>,
) -> ServerResult<Json<JournalEntryInfo>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    Ok(Json(
        journal::create_journal_entry(database, owner, roll_id, payload).await?,
    ))
}

#[instrument(skip_all, fields(roll_id, payload))]
pub(crate) async fn create_frames(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(roll_id): Path<i64>,
    Json(payload): Json<CreateFramesRequest>,
) -> ServerResult<Json<Vec<FrameInfo>>> {
    let owner = req_state.owner()?;
    let database = state.database().await?;

    Ok(Json(
        journal::create_frames(database, owner, roll_id, payload).await?,
    ))
}
