use sea_orm_migration::prelude::*;

use crate::database::entity::camera::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000004_create_camera_table"
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
                    .col(ColumnDef::new(Column::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Column::Name).string().not_null())
                    .col(ColumnDef::new(Column::Format).string_len(10).not_null())
                    .col(ColumnDef::new(Column::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Column::MultipleBacks)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Not a foreign key since rolls already reference cameras
                    .col(ColumnDef::new(Column::LoadedRollId).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-camera-owner-id")
                    .table(Entity)
                    .col(Column::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-camera-loaded-roll-id")
                    .table(Entity)
                    .col(Column::LoadedRollId)
                    .unique()
                    .to_owned(),
            )
            .await
    }
}
