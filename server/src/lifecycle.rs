//! Persistence of the roll lifecycle.
//!
//! The rules themselves live in [`filmlog::lifecycle`]. Here we load the
//! roll and the equipment it refers to, run the transition and write all
//! of the results back in one transaction.
//!
//! On PostgreSQL, the roll and its equipment are locked for the duration
//! of the transaction. The unique indices on the occupancy columns catch
//! any conflicting loads that slip through on other backends.

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::instrument;

use crate::database::entity::camera::{self, Entity as Camera};
use crate::database::entity::camera_back::{self, Entity as CameraBack};
use crate::database::entity::film::{self, Entity as Film};
use crate::database::entity::roll::{self, Entity as Roll, RollModel};
use crate::database::entity::stock::{self, Entity as Stock};
use crate::database::FilmlogDatabase;
use crate::error::{ErrorKind, ServerError, ServerResult};
use filmlog::api::v1::roll::RollChanges;
use filmlog::catalog::FilmProfile;
use filmlog::equipment::{EquipmentState, EquipmentStatus};
use filmlog::lifecycle::{self, LifecycleEvent, Placement, SaveContext};
use filmlog::roll::{PushPull, RollState, RollStatus};

/// A roll that has been saved.
#[derive(Debug)]
pub struct SavedRoll {
    /// The roll as persisted.
    pub roll: RollModel,

    /// The profile of the film of the roll.
    pub film: FilmProfile,

    /// What happened during the save.
    pub events: Vec<LifecycleEvent>,
}

/// Creates or updates a roll.
///
/// If `roll_id` is `None`, a new roll is created in storage before
/// `changes` are applied to it. `changes.film_id` is then required.
#[instrument(skip_all, fields(owner = owner, roll_id = ?roll_id))]
pub async fn save_roll(
    database: &DatabaseConnection,
    owner: i64,
    roll_id: Option<i64>,
    changes: RollChanges,
    today: NaiveDate,
) -> ServerResult<SavedRoll> {
    let txn = database
        .begin()
        .await
        .map_err(ServerError::database_error)?;

    let existing = match roll_id {
        Some(roll_id) => txn.find_roll(owner, roll_id, true).await?,
        None => {
            let film_id = changes.film_id.ok_or_else(|| {
                ServerError::from(ErrorKind::RequestError(anyhow!(
                    "A film is required to create a roll."
                )))
            })?;

            create_roll(&txn, owner, film_id).await?
        }
    };

    let mut state = existing.state()?;
    let previous = state.clone();

    let film_id = changes.film_id.unwrap_or(existing.film_id);
    let (_, film) = txn.find_film_profile(film_id).await?;

    let project_id = match changes.project_id {
        Some(Some(project_id)) => Some(txn.find_project(owner, project_id).await?.id),
        Some(None) => None,
        None => existing.project_id,
    };

    apply_changes(&mut state, &changes);
    state.validate()?;

    // Load the equipment the roll is about to refer to
    let camera = match state.camera {
        Some(camera_id) => Some(txn.find_camera(owner, camera_id, true).await?),
        None => None,
    };

    let camera_back = match state.camera_back {
        Some(camera_back_id) => {
            let back = txn.find_camera_back(owner, camera_back_id, true).await?;
            if Some(back.camera_id) != state.camera {
                return Err(ErrorKind::CameraBackMismatch.into());
            }
            Some(back)
        }
        None => None,
    };

    // Release whatever the roll has been moved away from
    if let Some(old_camera_id) = previous.camera.filter(|id| state.camera != Some(*id)) {
        release_camera(&txn, old_camera_id, state.id).await?;
    }

    if let Some(old_back_id) = previous.camera_back.filter(|id| state.camera_back != Some(*id)) {
        release_camera_back(&txn, old_back_id, state.id).await?;
    }

    let sequence = if state.needs_code() {
        Some(next_sequence(&txn, owner, &state, &film).await?)
    } else {
        None
    };

    let camera_state = camera.as_ref().map(|c| c.state()).transpose()?;
    let camera_back_state = camera_back.as_ref().map(|b| b.state()).transpose()?;

    let context = SaveContext {
        film,
        today,
        sequence,
        loaded_in: Placement::of(&previous),
    };

    let t = lifecycle::transition(state, camera_state, camera_back_state, &context)?;

    if let (Some(before), Some(after)) = (camera_state, t.camera) {
        if before != after {
            write_camera(&txn, &after).await?;
        }
    }

    if let (Some(before), Some(after)) = (camera_back_state, t.camera_back) {
        if before != after {
            write_camera_back(&txn, &after).await?;
        }
    }

    let roll = write_roll(&txn, &t.roll, project_id, film_id, &changes).await?;

    txn.commit().await.map_err(ServerError::database_error)?;

    for event in &t.events {
        tracing::info!(roll_id = roll.id, "{}", event);
    }

    Ok(SavedRoll {
        roll,
        film,
        events: t.events,
    })
}

/// Deletes a roll.
///
/// Any equipment the roll occupies is unloaded first.
#[instrument(skip_all, fields(owner = owner, roll_id = roll_id))]
pub async fn delete_roll(
    database: &DatabaseConnection,
    owner: i64,
    roll_id: i64,
) -> ServerResult<()> {
    let txn = database
        .begin()
        .await
        .map_err(ServerError::database_error)?;

    let roll = txn.find_roll(owner, roll_id, true).await?;

    let cameras = Camera::update_many()
        .col_expr(
            camera::Column::Status,
            Expr::value(EquipmentStatus::Empty.as_str()),
        )
        .col_expr(camera::Column::LoadedRollId, Expr::value(Option::<i64>::None))
        .filter(camera::Column::LoadedRollId.eq(roll.id))
        .exec(&txn)
        .await
        .map_err(ServerError::database_error)?;

    let backs = CameraBack::update_many()
        .col_expr(
            camera_back::Column::Status,
            Expr::value(EquipmentStatus::Empty.as_str()),
        )
        .col_expr(
            camera_back::Column::LoadedRollId,
            Expr::value(Option::<i64>::None),
        )
        .filter(camera_back::Column::LoadedRollId.eq(roll.id))
        .exec(&txn)
        .await
        .map_err(ServerError::database_error)?;

    Roll::delete_by_id(roll.id)
        .exec(&txn)
        .await
        .map_err(ServerError::database_error)?;

    txn.commit().await.map_err(ServerError::database_error)?;

    tracing::info!(
        "Deleted roll {}, unloading {} cameras and {} backs",
        roll.id,
        cameras.rows_affected,
        backs.rows_affected
    );

    Ok(())
}

/// Sets the status of a camera directly.
#[instrument(skip_all, fields(owner = owner, camera_id = camera_id, status = %status))]
pub async fn set_camera_status(
    database: &DatabaseConnection,
    owner: i64,
    camera_id: i64,
    status: EquipmentStatus,
) -> ServerResult<camera::Model> {
    let txn = database
        .begin()
        .await
        .map_err(ServerError::database_error)?;

    let mut state = txn.find_camera(owner, camera_id, true).await?.state()?;
    state.set_status(status);
    let camera = write_camera(&txn, &state).await?;

    txn.commit().await.map_err(ServerError::database_error)?;

    Ok(camera)
}

/// Sets the status of a camera back directly.
#[instrument(skip_all, fields(owner = owner, camera_back_id = camera_back_id, status = %status))]
pub async fn set_camera_back_status(
    database: &DatabaseConnection,
    owner: i64,
    camera_id: i64,
    camera_back_id: i64,
    status: EquipmentStatus,
) -> ServerResult<camera_back::Model> {
    let txn = database
        .begin()
        .await
        .map_err(ServerError::database_error)?;

    let back = txn.find_camera_back(owner, camera_back_id, true).await?;
    if back.camera_id != camera_id {
        return Err(ErrorKind::NoSuchCameraBack.into());
    }

    let mut state = back.state()?;
    state.set_status(status);
    let back = write_camera_back(&txn, &state).await?;

    txn.commit().await.map_err(ServerError::database_error)?;

    Ok(back)
}

/// Applies caller-supplied changes to the lifecycle fields of a roll.
fn apply_changes(state: &mut RollState, changes: &RollChanges) {
    if let Some(camera) = changes.camera_id {
        state.camera = camera;
    }

    if let Some(camera_back) = changes.camera_back_id {
        state.camera_back = camera_back;
    }

    if let Some(status) = changes.status {
        state.status = status;
    }

    if let Some(push_pull) = changes.push_pull {
        state.push_pull = push_pull;
    }

    if let Some(started_on) = changes.started_on {
        state.started_on = started_on;
    }

    if let Some(ended_on) = changes.ended_on {
        state.ended_on = ended_on;
    }
}

/// Inserts a fresh roll in storage.
async fn create_roll(
    txn: &DatabaseTransaction,
    owner: i64,
    film_id: i64,
) -> ServerResult<RollModel> {
    txn.find_film_profile(film_id).await?;

    let now = Utc::now();

    roll::ActiveModel {
        owner_id: Set(owner),
        film_id: Set(film_id),
        camera_id: Set(None),
        camera_back_id: Set(None),
        project_id: Set(None),
        code: Set(String::new()),
        status: Set(RollStatus::Storage.as_db_str().to_owned()),
        push_pull: Set(PushPull::None.as_str().to_owned()),
        started_on: Set(None),
        ended_on: Set(None),
        lens: Set(String::new()),
        location: Set(String::new()),
        notes: Set(String::new()),
        lab: Set(String::new()),
        scanner: Set(String::new()),
        notes_on_development: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(ServerError::database_error)
}

/// Writes the final state of a roll together with its other fields.
async fn write_roll(
    txn: &DatabaseTransaction,
    state: &RollState,
    project_id: Option<i64>,
    film_id: i64,
    changes: &RollChanges,
) -> ServerResult<RollModel> {
    let mut update = roll::ActiveModel {
        id: Set(state.id),
        film_id: Set(film_id),
        camera_id: Set(state.camera),
        camera_back_id: Set(state.camera_back),
        project_id: Set(project_id),
        code: Set(state.code.clone()),
        status: Set(state.status.as_db_str().to_owned()),
        push_pull: Set(state.push_pull.as_str().to_owned()),
        started_on: Set(state.started_on),
        ended_on: Set(state.ended_on),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    if let Some(lens) = &changes.lens {
        update.lens = Set(lens.clone());
    }

    if let Some(location) = &changes.location {
        update.location = Set(location.clone());
    }

    if let Some(notes) = &changes.notes {
        update.notes = Set(notes.clone());
    }

    if let Some(lab) = &changes.lab {
        update.lab = Set(lab.clone());
    }

    if let Some(scanner) = &changes.scanner {
        update.scanner = Set(scanner.clone());
    }

    if let Some(notes_on_development) = &changes.notes_on_development {
        update.notes_on_development = Set(notes_on_development.clone());
    }

    update.update(txn).await.map_err(ServerError::database_error)
}

async fn write_camera(
    txn: &DatabaseTransaction,
    state: &EquipmentState,
) -> ServerResult<camera::Model> {
    camera::ActiveModel::from_state(state)
        .update(txn)
        .await
        .map_err(|e| ServerError::unique_violation_or(e, || ErrorKind::EquipmentConflict))
}

async fn write_camera_back(
    txn: &DatabaseTransaction,
    state: &EquipmentState,
) -> ServerResult<camera_back::Model> {
    camera_back::ActiveModel::from_state(state)
        .update(txn)
        .await
        .map_err(|e| ServerError::unique_violation_or(e, || ErrorKind::EquipmentConflict))
}

/// Unloads a camera if it is occupied by a roll.
async fn release_camera(
    txn: &DatabaseTransaction,
    camera_id: i64,
    roll_id: i64,
) -> ServerResult<()> {
    let camera = Camera::find_by_id(camera_id)
        .one(txn)
        .await
        .map_err(ServerError::database_error)?;

    if let Some(camera) = camera {
        let mut state = camera.state()?;
        if lifecycle::release(&mut state, roll_id) {
            write_camera(txn, &state).await?;
            tracing::info!(roll_id, "{}", LifecycleEvent::CameraUnloaded { camera_id });
        }
    }

    Ok(())
}

/// Unloads a camera back if it is occupied by a roll.
async fn release_camera_back(
    txn: &DatabaseTransaction,
    camera_back_id: i64,
    roll_id: i64,
) -> ServerResult<()> {
    let back = CameraBack::find_by_id(camera_back_id)
        .one(txn)
        .await
        .map_err(ServerError::database_error)?;

    if let Some(back) = back {
        let mut state = back.state()?;
        if lifecycle::release(&mut state, roll_id) {
            write_camera_back(txn, &state).await?;
            tracing::info!(
                roll_id,
                "{}",
                LifecycleEvent::CameraBackUnloaded { camera_back_id }
            );
        }
    }

    Ok(())
}

/// Returns the sequence number for the code of a roll being started.
///
/// This is one more than the number of other rolls of the same owner,
/// format and process type started in the same calendar year.
async fn next_sequence(
    txn: &DatabaseTransaction,
    owner: i64,
    state: &RollState,
    film: &FilmProfile,
) -> ServerResult<u32> {
    let started_on = state
        .started_on
        .ok_or_else(|| ServerError::from(ErrorKind::InternalServerError))?;

    let year = started_on.year();
    let (first_day, last_day) = NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .ok_or_else(|| {
            ErrorKind::DatabaseError(anyhow!("Start date {} is out of range", started_on))
        })?;

    let candidates = Roll::find()
        .filter(roll::Column::OwnerId.eq(owner))
        .filter(roll::Column::Id.ne(state.id))
        .filter(roll::Column::StartedOn.between(first_day, last_day))
        .find_also_related(Film)
        .filter(film::Column::Format.eq(film.format.as_str()))
        .all(txn)
        .await
        .map_err(ServerError::database_error)?;

    let stock_ids: HashSet<i64> = candidates
        .iter()
        .filter_map(|(_, f)| f.as_ref().and_then(|f| f.stock_id))
        .collect();

    let stocks: HashMap<i64, stock::Model> = if stock_ids.is_empty() {
        HashMap::new()
    } else {
        Stock::find()
            .filter(stock::Column::Id.is_in(stock_ids))
            .all(txn)
            .await
            .map_err(ServerError::database_error)?
            .into_iter()
            .map(|s| (s.id, s))
            .collect()
    };

    let count = candidates
        .iter()
        .filter_map(|(_, f)| f.as_ref())
        .filter(|f| {
            let stock = f.stock_id.and_then(|id| stocks.get(&id));
            matches!(f.profile(stock), Ok(p) if p.process == film.process)
        })
        .count();

    u32::try_from(count + 1).map_err(ServerError::request_error)
}
