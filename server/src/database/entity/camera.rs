//! A camera.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::error::ServerResult;
use filmlog::catalog::FilmFormat;
use filmlog::equipment::{EquipmentState, EquipmentStatus};

pub type CameraModel = Model;

/// A camera owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "camera")]
pub struct Model {
    /// Unique numeric ID of the camera.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The user that owns this camera.
    #[sea_orm(indexed)]
    pub owner_id: i64,

    pub name: String,

    /// The film format this camera takes.
    #[sea_orm(column_type = "String(Some(10))")]
    pub format: String,

    /// The status.
    #[sea_orm(column_type = "String(Some(20))")]
    pub status: String,

    /// Whether the camera takes interchangeable backs.
    ///
    /// If so, the backs are loaded individually.
    pub multiple_backs: bool,

    /// ID of the roll this camera is loaded with.
    #[sea_orm(unique)]
    pub loaded_roll_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::camera_back::Entity")]
    CameraBack,

    #[sea_orm(has_many = "super::roll::Entity")]
    Roll,
}

impl Model {
    pub fn format(&self) -> ServerResult<FilmFormat> {
        Ok(FilmFormat::from_str(&self.format)?)
    }

    pub fn status(&self) -> ServerResult<EquipmentStatus> {
        Ok(EquipmentStatus::from_str(&self.status)?)
    }

    /// Returns the state that the lifecycle engine operates on.
    pub fn state(&self) -> ServerResult<EquipmentState> {
        Ok(EquipmentState {
            id: self.id,
            status: self.status()?,
            loaded_roll: self.loaded_roll_id,
            shared: self.multiple_backs,
        })
    }
}

impl ActiveModel {
    /// Returns an update writing back a camera state.
    pub fn from_state(state: &EquipmentState) -> Self {
        Self {
            id: Set(state.id),
            status: Set(state.status.as_str().to_owned()),
            loaded_roll_id: Set(state.loaded_roll),
            ..Default::default()
        }
    }
}

impl Related<super::camera_back::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CameraBack.def()
    }
}

impl Related<super::roll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
