//! Database entities.
//!
//! We use SeaORM and target PostgreSQL (production) and SQLite (development).
//!
//! Enumerations are stored as their string forms and parsed on access.

pub mod camera;
pub mod camera_back;
pub mod film;
pub mod frame;
pub mod journal;
pub mod manufacturer;
pub mod project;
pub mod roll;
pub mod stock;
