use sea_orm_migration::prelude::*;

use crate::database::entity::manufacturer;
use crate::database::entity::stock::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000002_create_stock_table"
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
                    .col(
                        ColumnDef::new(Column::ManufacturerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Column::Name).string().not_null())
                    .col(ColumnDef::new(Column::FilmType).string_len(10).not_null())
                    .col(ColumnDef::new(Column::Iso).integer().not_null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_stock_manufacturer")
                            .from_tbl(Entity)
                            .from_col(Column::ManufacturerId)
                            .to_tbl(manufacturer::Entity)
                            .to_col(manufacturer::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stock-manufacturer-id")
                    .table(Entity)
                    .col(Column::ManufacturerId)
                    .to_owned(),
            )
            .await
    }
}
