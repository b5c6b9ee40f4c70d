pub mod entity;
pub mod migration;

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Query;
use sea_orm::{ConnectionTrait, DbBackend, PaginatorTrait, QuerySelect};

use crate::error::{ErrorKind, ServerError, ServerResult};
use entity::camera::{self, CameraModel, Entity as Camera};
use entity::camera_back::{self, CameraBackModel, Entity as CameraBack};
use entity::film::{Entity as Film, FilmModel};
use entity::project::{self, Entity as Project, ProjectModel};
use entity::roll::{self, Entity as Roll, RollModel};
use entity::stock::Entity as Stock;
use filmlog::catalog::FilmProfile;
use filmlog::roll::RollStatus;

/// Lookups shared by the API and the persistence adapters.
///
/// Everything a user owns is looked up together with the owner, and
/// a record owned by someone else is reported as missing.
///
/// When `lock` is set, the row is locked for the rest of the transaction
/// on backends that support row locks.
#[async_trait]
pub trait FilmlogDatabase: Send + Sync {
    /// Retrieves a roll.
    async fn find_roll(&self, owner: i64, roll_id: i64, lock: bool) -> ServerResult<RollModel>;

    /// Retrieves a camera.
    async fn find_camera(&self, owner: i64, camera_id: i64, lock: bool)
        -> ServerResult<CameraModel>;

    /// Retrieves a camera back.
    async fn find_camera_back(
        &self,
        owner: i64,
        camera_back_id: i64,
        lock: bool,
    ) -> ServerResult<CameraBackModel>;

    /// Retrieves a project.
    async fn find_project(&self, owner: i64, project_id: i64) -> ServerResult<ProjectModel>;

    /// Retrieves a film and builds its profile.
    async fn find_film_profile(&self, film_id: i64) -> ServerResult<(FilmModel, FilmProfile)>;

    /// Counts the rolls that have been shot in a camera.
    async fn count_finished_rolls(&self, camera_id: i64) -> ServerResult<u64>;

    /// Counts the rolls in a project that are still in storage.
    async fn count_rolls_remaining(&self, project_id: i64) -> ServerResult<u64>;
}

/// Locks the selected rows if the backend supports it.
fn lock_if<S: QuerySelect>(select: S, backend: DbBackend, lock: bool) -> S {
    match backend {
        DbBackend::Postgres | DbBackend::MySql if lock => select.lock_exclusive(),
        _ => select,
    }
}

#[async_trait]
impl<C> FilmlogDatabase for C
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_roll(&self, owner: i64, roll_id: i64, lock: bool) -> ServerResult<RollModel> {
        let select = Roll::find_by_id(roll_id).filter(roll::Column::OwnerId.eq(owner));

        lock_if(select, self.get_database_backend(), lock)
            .one(self)
            .await
            .map_err(ServerError::database_error)?
            .ok_or_else(|| ErrorKind::NoSuchRoll.into())
    }

    async fn find_camera(
        &self,
        owner: i64,
        camera_id: i64,
        lock: bool,
    ) -> ServerResult<CameraModel> {
        let select = Camera::find_by_id(camera_id).filter(camera::Column::OwnerId.eq(owner));

        lock_if(select, self.get_database_backend(), lock)
            .one(self)
            .await
            .map_err(ServerError::database_error)?
            .ok_or_else(|| ErrorKind::NoSuchCamera.into())
    }

    async fn find_camera_back(
        &self,
        owner: i64,
        camera_back_id: i64,
        lock: bool,
    ) -> ServerResult<CameraBackModel> {
        // Only lock the back; the camera is locked separately if needed
        let select = CameraBack::find_by_id(camera_back_id).filter(
            camera_back::Column::CameraId.in_subquery(
                Query::select()
                    .column(camera::Column::Id)
                    .from(Camera)
                    .and_where(camera::Column::OwnerId.eq(owner))
                    .to_owned(),
            ),
        );

        lock_if(select, self.get_database_backend(), lock)
            .one(self)
            .await
            .map_err(ServerError::database_error)?
            .ok_or_else(|| ErrorKind::NoSuchCameraBack.into())
    }

    async fn find_project(&self, owner: i64, project_id: i64) -> ServerResult<ProjectModel> {
        Project::find_by_id(project_id)
            .filter(project::Column::OwnerId.eq(owner))
            .one(self)
            .await
            .map_err(ServerError::database_error)?
            .ok_or_else(|| ErrorKind::NoSuchProject.into())
    }

    async fn find_film_profile(&self, film_id: i64) -> ServerResult<(FilmModel, FilmProfile)> {
        let (film, stock) = Film::find_by_id(film_id)
            .find_also_related(Stock)
            .one(self)
            .await
            .map_err(ServerError::database_error)?
            .ok_or_else(|| ServerError::from(ErrorKind::NoSuchFilm))?;

        let profile = film.profile(stock.as_ref())?;

        Ok((film, profile))
    }

    async fn count_finished_rolls(&self, camera_id: i64) -> ServerResult<u64> {
        // The status prefixes sort in lifecycle order
        Roll::find()
            .filter(roll::Column::CameraId.eq(camera_id))
            .filter(roll::Column::Status.gte(RollStatus::Shot.as_db_str()))
            .count(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn count_rolls_remaining(&self, project_id: i64) -> ServerResult<u64> {
        Roll::find()
            .filter(roll::Column::ProjectId.eq(project_id))
            .filter(roll::Column::Status.eq(RollStatus::Storage.as_db_str()))
            .count(self)
            .await
            .map_err(ServerError::database_error)
    }
}
