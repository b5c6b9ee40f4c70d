use sea_orm_migration::prelude::*;

use crate::database::entity::camera;
use crate::database::entity::camera_back;
use crate::database::entity::film;
use crate::database::entity::project;
use crate::database::entity::roll::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230617_000007_create_roll_table"
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
                    .col(ColumnDef::new(Column::FilmId).big_integer().not_null())
                    .col(ColumnDef::new(Column::CameraId).big_integer().null())
                    .col(ColumnDef::new(Column::CameraBackId).big_integer().null())
                    .col(ColumnDef::new(Column::ProjectId).big_integer().null())
                    .col(
                        ColumnDef::new(Column::Code)
                            .string_len(30)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Column::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Column::PushPull)
                            .string_len(2)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Column::StartedOn).date().null())
                    .col(ColumnDef::new(Column::EndedOn).date().null())
                    .col(ColumnDef::new(Column::Lens).string().not_null())
                    .col(ColumnDef::new(Column::Location).string().not_null())
                    .col(ColumnDef::new(Column::Notes).text().not_null())
                    .col(ColumnDef::new(Column::Lab).string().not_null())
                    .col(ColumnDef::new(Column::Scanner).string().not_null())
                    .col(
                        ColumnDef::new(Column::NotesOnDevelopment)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_roll_film")
                            .from_tbl(Entity)
                            .from_col(Column::FilmId)
                            .to_tbl(film::Entity)
                            .to_col(film::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_roll_camera")
                            .from_tbl(Entity)
                            .from_col(Column::CameraId)
                            .to_tbl(camera::Entity)
                            .to_col(camera::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_roll_camera_back")
                            .from_tbl(Entity)
                            .from_col(Column::CameraBackId)
                            .to_tbl(camera_back::Entity)
                            .to_col(camera_back::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_roll_project")
                            .from_tbl(Entity)
                            .from_col(Column::ProjectId)
                            .to_tbl(project::Entity)
                            .to_col(project::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-roll-owner-started-on")
                    .table(Entity)
                    .col(Column::OwnerId)
                    .col(Column::StartedOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-roll-status")
                    .table(Entity)
                    .col(Column::Status)
                    .to_owned(),
            )
            .await
    }
}
