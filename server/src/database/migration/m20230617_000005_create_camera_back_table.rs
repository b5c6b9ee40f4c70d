use sea_orm_migration::prelude::*;

use crate::database::entity::camera;
use crate::database::entity::camera_back::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000005_create_camera_back_table"
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
                    .col(ColumnDef::new(Column::CameraId).big_integer().not_null())
                    .col(ColumnDef::new(Column::Name).string().not_null())
                    .col(ColumnDef::new(Column::Format).string_len(10).not_null())
                    .col(ColumnDef::new(Column::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Column::LoadedRollId).big_integer().null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_camera_back_camera")
                            .from_tbl(Entity)
                            .from_col(Column::CameraId)
                            .to_tbl(camera::Entity)
                            .to_col(camera::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-camera-back-camera-id")
                    .table(Entity)
                    .col(Column::CameraId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-camera-back-loaded-roll-id")
                    .table(Entity)
                    .col(Column::LoadedRollId)
                    .unique()
                    .to_owned(),
            )
            .await
    }
}
