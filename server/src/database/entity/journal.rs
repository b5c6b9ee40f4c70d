//! A journal entry of a roll.

use sea_orm::entity::prelude::*;

use filmlog::api::v1::journal::JournalEntryInfo;

pub type JournalModel = Model;

/// What was shot on a roll on a given day.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "journal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub roll_id: i64,

    pub date: ChronoDate,

    /// The last frame shot on that day.
    pub frame: i32,

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

impl Model {
    pub fn to_entry_info(&self, starting_frame: i32) -> JournalEntryInfo {
        JournalEntryInfo {
            id: self.id,
            roll_id: self.roll_id,
            date: self.date,
            starting_frame,
            frame: self.frame,
            notes: self.notes.clone(),
        }
    }
}

impl Related<super::roll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
