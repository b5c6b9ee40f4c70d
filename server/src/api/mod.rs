//! HTTP API.

mod v1;

use axum::Router;

pub(crate) fn get_router() -> Router {
    Router::new().merge(v1::get_router())
}
