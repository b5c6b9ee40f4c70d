//! Database migrations.

pub use sea_orm_migration::*;

mod m20230617_000001_create_manufacturer_table;
mod m20230617_000002_create_stock_table;
mod m20230617_000003_create_film_table;
mod m20230617_000004_create_camera_table;
mod m20230617_000005_create_camera_back_table;
mod m20230617_000006_create_project_table;
mod m20230617_000007_create_roll_table;
mod m20230617_000008_create_journal_table;
mod m20230617_000009_create_frame_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230617_000001_create_manufacturer_table::Migration),
            Box::new(m20230617_000002_create_stock_table::Migration),
            Box::new(m20230617_000003_create_film_table::Migration),
            Box::new(m20230617_000004_create_camera_table::Migration),
            Box::new(m20230617_000005_create_camera_back_table::Migration),
            Box::new(m20230617_000006_create_project_table::Migration),
            Box::new(m20230617_000007_create_roll_table::Migration),
            Box::new(m20230617_000008_create_journal_table::Migration),
            Box::new(m20230617_000009_create_frame_table::Migration),
        ]
    }
}
