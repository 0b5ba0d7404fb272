//! Error taxonomy for the admin login flow.

use thiserror::Error;

use crate::constants::messages;

/// Errors raised by the admin components.
///
/// The first four variants are client faults and carry a fixed message.
/// The rest are infrastructure faults whose detail stays server-side.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Captcha answer or captcha key missing
    #[error("{}", messages::PARAM_ERROR)]
    Param,

    /// Account empty, unknown, or wrong password
    #[error("{}", messages::ACCOUNT_OR_PASSWORD_ERROR)]
    AccountOrPassword,

    /// Captcha key unknown/expired, or answer mismatch
    #[error("{}", messages::CAPTCHA_ERROR)]
    Captcha,

    /// No live session for the presented cookie
    #[error("{}", messages::NOT_LOGGED_IN)]
    NotLoggedIn,

    /// Cache connection/operation error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Param => 400,
            Self::AccountOrPassword | Self::Captcha | Self::NotLoggedIn => 401,
            Self::Cache(_) => 503,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Message safe to show to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::Param => messages::PARAM_ERROR,
            Self::AccountOrPassword => messages::ACCOUNT_OR_PASSWORD_ERROR,
            Self::Captcha => messages::CAPTCHA_ERROR,
            Self::NotLoggedIn => messages::NOT_LOGGED_IN,
            Self::Cache(_) => messages::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Internal(_) => messages::INTERNAL_ERROR,
        }
    }

    /// Returns true if this is an infrastructure fault rather than bad input
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Cache(_) | Self::Config(_) | Self::Internal(_))
    }
}
