//! A film stock.
//!
//! Several films (e.g., the 35mm and 120 versions of an emulsion)
//! can share one stock.

use std::str::FromStr;

use sea_orm::entity::prelude::*;

use crate::error::ServerResult;
use filmlog::catalog::{FilmType, StockProfile};

pub type StockModel = Model;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub manufacturer_id: i64,

    pub name: String,

    /// The process type.
    #[sea_orm(column_type = "String(Some(10))")]
    pub film_type: String,

    /// The box speed.
    pub iso: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id"
    )]
    Manufacturer,

    #[sea_orm(has_many = "super::film::Entity")]
    Film,
}

impl Model {
    pub fn profile(&self) -> ServerResult<StockProfile> {
        Ok(StockProfile {
            process: FilmType::from_str(&self.film_type)?,
            iso: self.iso,
        })
    }
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
