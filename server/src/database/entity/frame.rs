//! A single exposure on a roll.

use sea_orm::entity::prelude::*;

use filmlog::api::v1::journal::FrameInfo;

pub type FrameModel = Model;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "frame")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub roll_id: i64,

    /// The frame number, starting at 1.
    pub number: i32,

    pub date: Option<ChronoDate>,

    pub aperture: String,

    pub shutter_speed: String,

    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roll::Entity",
        from = "Column::RollId",
        to = "super::roll::Column::Id"
    )]
    Roll,
}

impl From<Model> for FrameInfo {
    fn from(frame: Model) -> Self {
        Self {
            id: frame.id,
            roll_id: frame.roll_id,
            number: frame.number,
            date: frame.date,
            aperture: frame.aperture,
            shutter_speed: frame.shutter_speed,
            notes: frame.notes,
        }
    }
}

impl Related<super::roll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
