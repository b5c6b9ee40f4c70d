//! Fixtures for database tests.

use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection};

use crate::database::entity::camera::{self, CameraModel};
use crate::database::entity::camera_back::{self, CameraBackModel};
use crate::database::entity::film::{self, FilmModel};
use crate::database::entity::manufacturer;
use crate::database::entity::project::{self, ProjectModel};
use crate::database::entity::stock;
use crate::database::migration::{Migrator, MigratorTrait};
use crate::lifecycle::{save_roll, SavedRoll};
use filmlog::api::v1::roll::RollChanges;
use filmlog::equipment::EquipmentStatus;
use filmlog::project::ProjectStatus;

pub const OWNER: i64 = 1;
pub const OTHER_OWNER: i64 = 2;

/// Films seeded into every test database.
pub struct Catalog {
    /// Ektachrome, E-6, ISO 100.
    pub e6: FilmModel,

    /// Portra, C-41, ISO 400.
    pub c41: FilmModel,

    /// Tri-X, black and white, ISO 400.
    pub bw: FilmModel,

    /// A 120 film linked to an ISO 400 C-41 stock.
    ///
    /// The film's own type and ISO are overridden by the stock.
    pub stocked: FilmModel,
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Returns a fresh in-memory database with all migrations applied.
pub async fn database() -> (DatabaseConnection, Catalog) {
    // A single connection so that every query sees the same memory database
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let catalog = seed_catalog(&db).await;

    (db, catalog)
}

async fn seed_catalog(db: &DatabaseConnection) -> Catalog {
    let kodak = manufacturer::ActiveModel {
        name: Set("Kodak".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let portra = stock::ActiveModel {
        manufacturer_id: Set(kodak.id),
        name: Set("Portra 400".to_string()),
        film_type: Set("c41".to_string()),
        iso: Set(400),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let e6 = insert_film(db, "Ektachrome E100", "135", Some("e6"), 100, None).await;
    let c41 = insert_film(db, "Portra 400", "135", Some("c41"), 400, None).await;
    let bw = insert_film(db, "Tri-X 400", "135", Some("bw"), 400, None).await;
    let stocked = insert_film(db, "Portra 400 120", "120", Some("bw"), 100, Some(portra.id)).await;

    Catalog {
        e6,
        c41,
        bw,
        stocked,
    }
}

async fn insert_film(
    db: &DatabaseConnection,
    name: &str,
    format: &str,
    film_type: Option<&str>,
    iso: i32,
    stock_id: Option<i64>,
) -> FilmModel {
    film::ActiveModel {
        name: Set(name.to_string()),
        format: Set(format.to_string()),
        film_type: Set(film_type.map(str::to_string)),
        iso: Set(iso),
        stock_id: Set(stock_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_camera(
    db: &DatabaseConnection,
    owner: i64,
    format: &str,
    multiple_backs: bool,
) -> CameraModel {
    camera::ActiveModel {
        owner_id: Set(owner),
        name: Set("Test camera".to_string()),
        format: Set(format.to_string()),
        status: Set(EquipmentStatus::Empty.as_str().to_string()),
        multiple_backs: Set(multiple_backs),
        loaded_roll_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_camera_back(db: &DatabaseConnection, camera: &CameraModel) -> CameraBackModel {
    camera_back::ActiveModel {
        camera_id: Set(camera.id),
        name: Set("A12".to_string()),
        format: Set(camera.format.clone()),
        status: Set(EquipmentStatus::Empty.as_str().to_string()),
        loaded_roll_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_project(db: &DatabaseConnection, owner: i64) -> ProjectModel {
    project::ActiveModel {
        owner_id: Set(owner),
        name: Set("Test project".to_string()),
        status: Set(ProjectStatus::Current.as_str().to_string()),
        notes: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Creates a roll in storage.
pub async fn new_roll(db: &DatabaseConnection, owner: i64, film: &FilmModel) -> SavedRoll {
    let changes = RollChanges {
        film_id: Some(film.id),
        ..Default::default()
    };

    save_roll(db, owner, None, changes, date(2023, 6, 17))
        .await
        .unwrap()
}

/// Starts a roll, optionally in a camera.
pub async fn start_roll(
    db: &DatabaseConnection,
    owner: i64,
    roll_id: i64,
    camera_id: Option<i64>,
    started_on: NaiveDate,
) -> SavedRoll {
    let changes = RollChanges {
        camera_id: Some(camera_id),
        started_on: Some(Some(started_on)),
        ..Default::default()
    };

    save_roll(db, owner, Some(roll_id), changes, started_on)
        .await
        .unwrap()
}
