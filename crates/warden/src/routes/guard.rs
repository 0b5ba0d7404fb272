//! Session guard for routes that require a logged-in admin.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use warden_common::AdminError;

use super::error::ApiError;
use crate::session::RequestCookies;
use crate::state::AppState;

/// The admin resolved from the session cookie
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub account: String,
}

/// Reject requests without a live session; expose the account otherwise
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookies = RequestCookies::from_headers(request.headers());
    let account = state
        .sessions
        .resolve(&cookies)
        .await?
        .ok_or(AdminError::NotLoggedIn)?;

    request.extensions_mut().insert(AdminSession { account });
    Ok(next.run(request).await)
}
