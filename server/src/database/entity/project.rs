//! A project.

use std::str::FromStr;

use sea_orm::entity::prelude::*;

use crate::error::ServerResult;
use filmlog::project::ProjectStatus;

pub type ProjectModel = Model;

/// A group of rolls.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub owner_id: i64,

    pub name: String,

    #[sea_orm(column_type = "String(Some(20))")]
    pub status: String,

    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::roll::Entity")]
    Roll,
}

impl Model {
    pub fn status(&self) -> ServerResult<ProjectStatus> {
        Ok(ProjectStatus::from_str(&self.status)?)
    }
}

impl Related<super::roll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
