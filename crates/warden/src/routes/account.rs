//! Captcha, login, and logout endpoints.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use warden_common::{AdminError, ApiResponse, CheckCodeResponse, LoginRequest};

use super::error::ApiError;
use super::guard::AdminSession;
use crate::session::{CookieDirective, RequestCookies};
use crate::state::AppState;

/// Issue a captcha challenge
pub async fn check_code(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CheckCodeResponse>>, ApiError> {
    let challenge = state.challenges.issue().await?;
    Ok(Json(ApiResponse::success(challenge)))
}

/// Verify captcha + credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Malformed login body");
        AdminError::Param
    })?;

    let cookies = RequestCookies::from_headers(&headers);
    let outcome = state.sessions.login(&cookies, &req).await?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, cookie_header(&outcome.cookie)?);
    Ok((response_headers, Json(ApiResponse::success(outcome.account))).into_response())
}

/// Drop the current session and expire its cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let cookies = RequestCookies::from_headers(&headers);

    let mut response_headers = HeaderMap::new();
    if let Some(directive) = state.sessions.logout(&cookies).await? {
        response_headers.insert(SET_COOKIE, cookie_header(&directive)?);
    }
    Ok((response_headers, Json(ApiResponse::<()>::empty())).into_response())
}

/// The currently logged-in admin
pub async fn current(Extension(session): Extension<AdminSession>) -> Json<ApiResponse<String>> {
    Json(ApiResponse::success(session.account))
}

fn cookie_header(directive: &CookieDirective) -> Result<axum::http::HeaderValue, AdminError> {
    directive
        .to_header_value()
        .map_err(|e| AdminError::Internal(format!("Invalid cookie value: {e}")))
}
