//! A film in the catalog.

use std::str::FromStr;

use sea_orm::entity::prelude::*;

use super::stock::StockModel;
use crate::error::ServerResult;
use filmlog::catalog::{FilmFormat, FilmProfile, FilmType};

pub type FilmModel = Model;

/// A film that rolls can be of.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// The format ("135" or "120").
    #[sea_orm(column_type = "String(Some(10))", indexed)]
    pub format: String,

    /// The process type.
    ///
    /// Films linked to a stock take the type of the stock.
    #[sea_orm(column_type = "String(Some(10))", nullable)]
    pub film_type: Option<String>,

    /// The box speed.
    pub iso: i32,

    /// ID of the stock this film is a format of.
    pub stock_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock::Entity",
        from = "Column::StockId",
        to = "super::stock::Column::Id"
    )]
    Stock,

    #[sea_orm(has_many = "super::roll::Entity")]
    Roll,
}

impl Model {
    pub fn format(&self) -> ServerResult<FilmFormat> {
        Ok(FilmFormat::from_str(&self.format)?)
    }

    /// Returns the profile of this film.
    ///
    /// `stock` must be the stock this film is linked to.
    pub fn profile(&self, stock: Option<&StockModel>) -> ServerResult<FilmProfile> {
        let film_type = self
            .film_type
            .as_deref()
            .map(FilmType::from_str)
            .transpose()?;
        let stock = stock.map(StockModel::profile).transpose()?;

        Ok(FilmProfile::resolve(
            self.id,
            self.format()?,
            film_type,
            self.iso,
            stock,
        )?)
    }
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::roll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
