//! An interchangeable camera back.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::error::ServerResult;
use filmlog::catalog::FilmFormat;
use filmlog::equipment::{EquipmentState, EquipmentStatus};

pub type CameraBackModel = Model;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "camera_back")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// ID of the camera the back belongs to.
    #[sea_orm(indexed)]
    pub camera_id: i64,

    pub name: String,

    #[sea_orm(column_type = "String(Some(10))")]
    pub format: String,

    #[sea_orm(column_type = "String(Some(20))")]
    pub status: String,

    /// ID of the roll this back is loaded with.
    #[sea_orm(unique)]
    pub loaded_roll_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::camera::Entity",
        from = "Column::CameraId",
        to = "super::camera::Column::Id"
    )]
    Camera,
}

impl Model {
    pub fn format(&self) -> ServerResult<FilmFormat> {
        Ok(FilmFormat::from_str(&self.format)?)
    }

    pub fn status(&self) -> ServerResult<EquipmentStatus> {
        Ok(EquipmentStatus::from_str(&self.status)?)
    }

    pub fn state(&self) -> ServerResult<EquipmentState> {
        Ok(EquipmentState {
            id: self.id,
            status: self.status()?,
            loaded_roll: self.loaded_roll_id,
            shared: false,
        })
    }
}

impl ActiveModel {
    pub fn from_state(state: &EquipmentState) -> Self {
        Self {
            id: Set(state.id),
            status: Set(state.status.as_str().to_owned()),
            loaded_roll_id: Set(state.loaded_roll),
            ..Default::default()
        }
    }
}

impl Related<super::camera::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camera.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
