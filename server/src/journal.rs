//! Persistence of journal entries and frames.


use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, QueryOrder, TransactionTrait};
use tracing::instrument;

use crate::database::entity::frame::{self, Entity as Frame};
use crate::database::entity::journal::{self, Entity as Journal, JournalModel};
use crate::database::FilmlogDatabase;
use crate::error::{ErrorKind, ServerError, ServerResult};
use filmlog::api::v1::journal::{
    CreateFramesRequest, CreateJournalEntryRequest, FrameInfo, JournalEntryInfo,
};
use filmlog::error::FilmlogError;
use filmlog::journal::{self as sequencer, FrameRange};

/// Returns the first frame shot on the day of a journal entry.
pub async fn starting_frame<C>(database: &C, entry: &JournalModel) -> ServerResult<i32>
where
    C: ConnectionTrait,
{
    let previous = Journal::find()
        .filter(journal::Column::RollId.eq(entry.roll_id))
        .filter(journal::Column::Date.lt(entry.date))
        .order_by_desc(journal::Column::Date)
        .one(database)
        .await
        .map_err(ServerError::database_error)?;

    Ok(sequencer::starting_frame(previous.map(|e| e.frame)))
}

/// Lists the journal of a roll in date order.
#[instrument(skip_all, fields(owner = owner, roll_id = roll_id))]
pub async fn list_journal(
    database: &DatabaseConnection,
    owner: i64,
    roll_id: i64,
) -> ServerResult<Vec<JournalEntryInfo>> {
    let roll = database.find_roll(owner, roll_id, false).await?;

    let entries = Journal::find()
        .filter(journal::Column::RollId.eq(roll.id))
        .all(database)
        .await
        .map_err(ServerError::database_error)?;

    Ok(sequencer::with_starting_frames(entries, |e| e.date, |e| e.frame)
        .into_iter()
        .map(|(entry, starting)| entry.to_entry_info(starting))
        .collect())
}

/// Records what was shot on a roll on a given day.
#[instrument(skip_all, fields(owner = owner, roll_id = roll_id, date = %request.date))]
pub async fn create_journal_entry(
    database: &DatabaseConnection,
    owner: i64,
    roll_id: i64,
    request: CreateJournalEntryRequest,
) -> ServerResult<JournalEntryInfo> {
    if request.frame < 1 {
        return Err(FilmlogError::InvalidFrameNumber {
            number: request.frame,
        }
        .into());
    }

    let roll = database.find_roll(owner, roll_id, false).await?;

    let existing = Journal::find()
        .filter(journal::Column::RollId.eq(roll.id))
        .filter(journal::Column::Date.eq(request.date))
        .one(database)
        .await
        .map_err(ServerError::database_error)?;

    if existing.is_some() {
        return Err(ErrorKind::DuplicateJournalEntry.into());
    }

    let entry = journal::ActiveModel {
        roll_id: Set(roll.id),
        date: Set(request.date),
        frame: Set(request.frame),
        notes: Set(request.notes),
        ..Default::default()
    }
    .insert(database)
    .await
    .map_err(|e| ServerError::unique_violation_or(e, || ErrorKind::DuplicateJournalEntry))?;

    let starting = starting_frame(database, &entry).await?;

    Ok(entry.to_entry_info(starting))
}

/// Creates frames sharing the same metadata.
///
/// Either all frames in the range are created or none are.
#[instrument(skip_all, fields(owner = owner, roll_id = roll_id))]
pub async fn create_frames(
    database: &DatabaseConnection,
    owner: i64,
    roll_id: i64,
    request: CreateFramesRequest,
) -> ServerResult<Vec<FrameInfo>> {
    let range = FrameRange::new(request.starting_frame, request.ending_frame)?;

    let txn = database
        .begin()
        .await
        .map_err(ServerError::database_error)?;

    let roll = txn.find_roll(owner, roll_id, false).await?;

    let taken = Frame::find()
        .filter(frame::Column::RollId.eq(roll.id))
        .filter(frame::Column::Number.between(range.start(), range.end()))
        .order_by_asc(frame::Column::Number)
        .one(&txn)
        .await
        .map_err(ServerError::database_error)?;

    if let Some(taken) = taken {
        return Err(ErrorKind::DuplicateFrame {
            number: taken.number,
        }
        .into());
    }

    let mut frames = Vec::with_capacity(range.len());

    for number in range.numbers() {
        let frame = frame::ActiveModel {
            roll_id: Set(roll.id),
            number: Set(number),
            date: Set(request.date),
            aperture: Set(request.aperture.clone()),
            shutter_speed: Set(request.shutter_speed.clone()),
            notes: Set(request.notes.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServerError::unique_violation_or(e, || ErrorKind::DuplicateFrame { number }))?;

        frames.push(FrameInfo::from(frame));
    }

    txn.commit().await.map_err(ServerError::database_error)?;

    tracing::info!(
        "Created frames {}..={} on roll {}",
        range.start(),
        range.end(),
        roll.id
    );

    Ok(frames)
}
