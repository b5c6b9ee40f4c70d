use sea_orm_migration::prelude::*;

use crate::database::entity::film::*;
use crate::database::entity::stock;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000003_create_film_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Column::Name).string().not_null())
                    .col(ColumnDef::new(Column::Format).string_len(10).not_null())
                    .col(ColumnDef::new(Column::FilmType).string_len(10).null())
                    .col(ColumnDef::new(Column::Iso).integer().not_null())
                    .col(ColumnDef::new(Column::StockId).big_integer().null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_film_stock")
                            .from_tbl(Entity)
                            .from_col(Column::StockId)
                            .to_tbl(stock::Entity)
                            .to_col(stock::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-film-format")
                    .table(Entity)
                    .col(Column::Format)
                    .to_owned(),
            )
            .await
    }
}
