use sea_orm_migration::prelude::*;

use crate::database::entity::frame::*;
use crate::database::entity::roll;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000009_create_frame_table"
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
                    .col(ColumnDef::new(Column::RollId).big_integer().not_null())
                    .col(ColumnDef::new(Column::Number).integer().not_null())
                    .col(ColumnDef::new(Column::Date).date().null())
                    .col(ColumnDef::new(Column::Aperture).string().not_null())
                    .col(ColumnDef::new(Column::ShutterSpeed).string().not_null())
                    .col(ColumnDef::new(Column::Notes).text().not_null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_frame_roll")
                            .from_tbl(Entity)
                            .from_col(Column::RollId)
                            .to_tbl(roll::Entity)
                            .to_col(roll::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-frame-roll-number")
                    .table(Entity)
                    .col(Column::RollId)
                    .col(Column::Number)
                    .unique()
                    .to_owned(),
            )
            .await
    }
}
