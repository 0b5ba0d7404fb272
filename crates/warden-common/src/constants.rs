//! Shared constants for Warden components.

/// Default Redis connection URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Captcha challenge expiry in the cache (5 minutes)
pub const CAPTCHA_TTL_MS: u64 = 5 * 60 * 1000;

/// Session token expiry in the cache (1 day)
pub const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Upper bound accepted for any configured TTL (30 days)
pub const MAX_TTL_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Captcha image width in pixels
pub const CAPTCHA_WIDTH: u32 = 130;

/// Captcha image height in pixels
pub const CAPTCHA_HEIGHT: u32 = 48;

/// Name of the cookie carrying the admin session token
pub const ADMIN_COOKIE_NAME: &str = "admin-token";

/// Cache key layout
pub mod cache_keys {
    /// Namespace shared by every admin key
    pub const ADMIN_PREFIX: &str = "warden:admin:";

    /// Captcha answer: warden:admin:captcha:{uuid}
    pub const CAPTCHA_SEGMENT: &str = "captcha:";

    /// Session token: warden:admin:login-token:{token}
    pub const LOGIN_TOKEN_SEGMENT: &str = "login-token:";

    /// Build the cache key for a captcha challenge id
    pub fn captcha(id: &str) -> String {
        format!("{ADMIN_PREFIX}{CAPTCHA_SEGMENT}{id}")
    }

    /// Build the cache key for a session token
    pub fn login_token(token: &str) -> String {
        format!("{ADMIN_PREFIX}{LOGIN_TOKEN_SEGMENT}{token}")
    }
}

/// Fixed messages returned to clients
pub mod messages {
    pub const PARAM_ERROR: &str = "Parameter error";
    pub const ACCOUNT_OR_PASSWORD_ERROR: &str = "Account or password error";
    pub const CAPTCHA_ERROR: &str = "Captcha error";
    pub const NOT_LOGGED_IN: &str = "Please log in";
    pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}
