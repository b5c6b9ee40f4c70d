mod cameras;
mod journals;
mod projects;
mod rolls;

use axum::{
    routing::{get, patch, post},
    Router,
};

pub(crate) fn get_router() -> Router {
    Router::new()
        .route("/_api/v1/rolls", post(rolls::create_roll))
        .route(
            "/_api/v1/rolls/:roll",
            get(rolls::get_roll)
                .patch(rolls::update_roll)
                .delete(rolls::delete_roll),
        )
        .route(
            "/_api/v1/rolls/:roll/journal",
            get(journals::get_journal).post(journals::create_journal_entry),
        )
        .route("/_api/v1/rolls/:roll/frames", post(journals::create_frames))
        .route("/_api/v1/cameras", post(cameras::create_camera))
        .route(
            "/_api/v1/cameras/:camera",
            get(cameras::get_camera).patch(cameras::set_camera_status),
        )
        .route(
            "/_api/v1/cameras/:camera/backs",
            post(cameras::create_camera_back),
        )
        .route(
            "/_api/v1/cameras/:camera/backs/:back",
            patch(cameras::set_camera_back_status),
        )
        .route("/_api/v1/projects", post(projects::create_project))
        .route("/_api/v1/projects/:project", get(projects::get_project))
}
