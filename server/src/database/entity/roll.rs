//! A roll of film.

use std::str::FromStr;

use sea_orm::entity::prelude::*;

use crate::error::ServerResult;
use filmlog::api::v1::roll::RollInfo;
use filmlog::catalog::FilmProfile;
use filmlog::roll::{PushPull, RollCode, RollState, RollStatus};

pub type RollModel = Model;

/// A roll of film owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roll")]
pub struct Model {
    /// Unique numeric ID of the roll.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The user that owns this roll.
    #[sea_orm(indexed)]
    pub owner_id: i64,

    /// ID of the film the roll is of.
    #[sea_orm(indexed)]
    pub film_id: i64,

    pub camera_id: Option<i64>,

    pub camera_back_id: Option<i64>,

    pub project_id: Option<i64>,

    /// The roll code (e.g., "35-c41-12").
    ///
    /// Empty until the roll is started.
    #[sea_orm(column_type = "String(Some(30))")]
    pub code: String,

    /// The status, with its ordering prefix (e.g., "02_loaded").
    #[sea_orm(column_type = "String(Some(20))", indexed)]
    pub status: String,

    #[sea_orm(column_type = "String(Some(2))")]
    pub push_pull: String,

    pub started_on: Option<ChronoDate>,

    pub ended_on: Option<ChronoDate>,

    pub lens: String,

    pub location: String,

    pub notes: String,

    pub lab: String,

    pub scanner: String,

    pub notes_on_development: String,

    /// Timestamp when the roll is created.
    pub created_at: ChronoDateTimeUtc,

    /// Timestamp when the roll is last saved.
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::film::Entity",
        from = "Column::FilmId",
        to = "super::film::Column::Id"
    )]
    Film,

    #[sea_orm(
        belongs_to = "super::camera::Entity",
        from = "Column::CameraId",
        to = "super::camera::Column::Id"
    )]
    Camera,

    #[sea_orm(
        belongs_to = "super::camera_back::Entity",
        from = "Column::CameraBackId",
        to = "super::camera_back::Column::Id"
    )]
    CameraBack,

    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,

    #[sea_orm(has_many = "super::journal::Entity")]
    Journal,

    #[sea_orm(has_many = "super::frame::Entity")]
    Frame,
}

impl Model {
    pub fn status(&self) -> ServerResult<RollStatus> {
        Ok(RollStatus::from_str(&self.status)?)
    }

    pub fn push_pull(&self) -> ServerResult<PushPull> {
        Ok(PushPull::from_str(&self.push_pull)?)
    }

    /// Returns the state that the lifecycle engine operates on.
    ///
    /// A stored code must be well-formed.
    pub fn state(&self) -> ServerResult<RollState> {
        if !self.code.is_empty() {
            RollCode::from_str(&self.code)?;
        }

        Ok(RollState {
            id: self.id,
            status: self.status()?,
            code: self.code.clone(),
            push_pull: self.push_pull()?,
            camera: self.camera_id,
            camera_back: self.camera_back_id,
            started_on: self.started_on,
            ended_on: self.ended_on,
        })
    }

    /// Converts this roll to its API representation.
    ///
    /// `film` must be the profile of the film of this roll.
    pub fn to_roll_info(&self, film: &FilmProfile) -> ServerResult<RollInfo> {
        let state = self.state()?;

        Ok(RollInfo {
            id: self.id,
            film_id: self.film_id,
            camera_id: self.camera_id,
            camera_back_id: self.camera_back_id,
            project_id: self.project_id,
            code: self.code.clone(),
            status: state.status,
            push_pull: state.push_pull,
            started_on: self.started_on,
            ended_on: self.ended_on,
            effective_iso: state.effective_iso(film),
            lens: self.lens.clone(),
            location: self.location.clone(),
            notes: self.notes.clone(),
            lab: self.lab.clone(),
            scanner: self.scanner.clone(),
            notes_on_development: self.notes_on_development.clone(),
        })
    }
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl Related<super::camera::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camera.def()
    }
}

impl Related<super::camera_back::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CameraBack.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::journal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journal.def()
    }
}

impl Related<super::frame::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Frame.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
