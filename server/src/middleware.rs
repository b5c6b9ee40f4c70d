use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Extension, Host},
    http::Request,
    middleware::Next,
    response::Response,
};

use super::{RequestStateInner, State};
use crate::error::{ErrorKind, ServerResult};
use filmlog::api::v1::FILMLOG_OWNER;

/// Initializes per-request state.
pub async fn init_request_state<B>(mut req: Request<B>, next: Next<B>) -> ServerResult<Response> {
    let owner = match req.headers().get(FILMLOG_OWNER) {
        Some(value) => {
            let owner = value
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .ok_or_else(|| ErrorKind::RequestError(anyhow!("Bad owner header")))?;

            Some(owner)
        }
        None => None,
    };

    let req_state = Arc::new(RequestStateInner { owner });

    req.extensions_mut().insert(req_state);
    Ok(next.run(req).await)
}

/// Restricts valid Host headers.
///
/// We also require that all request have a Host header in
/// the first place.
pub async fn restrict_host<B>(
    Extension(state): Extension<State>,
    Host(host): Host,
    req: Request<B>,
    next: Next<B>,
) -> ServerResult<Response> {
    let allowed_hosts = &state.config.allowed_hosts;

    if !allowed_hosts.is_empty() && !allowed_hosts.iter().any(|h| h.as_str() == host) {
        return Err(ErrorKind::RequestError(anyhow!("Bad Host")).into());
    }

    Ok(next.run(req).await)
}
