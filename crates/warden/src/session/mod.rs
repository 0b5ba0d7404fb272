//! Admin session lifecycle: login, logout, and session lookup.
//!
//! A session is a random token stored in the cache (token -> account) and
//! handed to the browser as a cookie. Captcha answers are consumed on the
//! first login attempt that references them.

mod cookies;

pub use cookies::{CookieDirective, RequestCookies};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use warden_common::{
    AdminError, LoginRequest,
    constants::{ADMIN_COOKIE_NAME, cache_keys},
};

use crate::cache::KvCache;
use crate::config::AdminAccount;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: String,
    pub token: String,
    pub cookie: CookieDirective,
}

/// Session manager service
pub struct SessionManager {
    cache: Arc<dyn KvCache>,
    admin: AdminAccount,
    session_ttl: Duration,
}

impl SessionManager {
    pub fn new(cache: Arc<dyn KvCache>, admin: AdminAccount, session_ttl: Duration) -> Self {
        Self {
            cache,
            admin,
            session_ttl,
        }
    }

    /// Validate captcha and credentials, then issue a fresh session
    ///
    /// Checks run in order and stop at the first failure: captcha fields
    /// present, account present, captcha answer, credentials.
    pub async fn login(
        &self,
        cookies: &RequestCookies,
        req: &LoginRequest,
    ) -> Result<LoginOutcome, AdminError> {
        if !has_text(&req.check_code) || !has_text(&req.check_code_key) {
            return Err(AdminError::Param);
        }
        // Same signal as a bad password so the empty field is not revealed
        if !has_text(&req.account) {
            return Err(AdminError::AccountOrPassword);
        }

        // Single-use: the challenge is deleted whether or not it matched
        let expected = self.cache.get(&req.check_code_key).await?;
        self.cache.delete(&req.check_code_key).await?;
        let matched = expected
            .as_deref()
            .is_some_and(|answer| answer.to_lowercase() == req.check_code.to_lowercase());
        if !matched {
            tracing::info!(
                key = %req.check_code_key,
                found = expected.is_some(),
                "Login rejected: captcha"
            );
            return Err(AdminError::Captcha);
        }

        if req.account != self.admin.account || req.password != self.admin.password {
            tracing::info!(account = %req.account, "Login rejected: credentials");
            return Err(AdminError::AccountOrPassword);
        }

        let token = generate_session_token();
        self.cache
            .set_with_ttl(&cache_keys::login_token(&token), &req.account, self.session_ttl)
            .await?;

        // Drop the session this browser held before, if any
        if let Some(previous) = cookies.find_non_empty(ADMIN_COOKIE_NAME) {
            self.cache.delete(&cache_keys::login_token(previous)).await?;
            tracing::debug!("Removed superseded admin session");
        }

        let cookie = CookieDirective::set(ADMIN_COOKIE_NAME, &token, self.session_ttl.as_secs());

        tracing::info!(account = %req.account, "Admin logged in");

        Ok(LoginOutcome {
            account: req.account.clone(),
            token,
            cookie,
        })
    }

    /// End the session named by the first non-empty session cookie
    ///
    /// Returns the expiry directive, or `None` when no session cookie was
    /// presented (including requests with no cookies at all).
    pub async fn logout(
        &self,
        cookies: &RequestCookies,
    ) -> Result<Option<CookieDirective>, AdminError> {
        let Some(token) = cookies.find_non_empty(ADMIN_COOKIE_NAME) else {
            return Ok(None);
        };

        self.cache.delete(&cache_keys::login_token(token)).await?;
        tracing::info!("Admin logged out");

        Ok(Some(CookieDirective::expire(ADMIN_COOKIE_NAME, token)))
    }

    /// Account bound to the presented session cookie, if the session is live
    pub async fn resolve(&self, cookies: &RequestCookies) -> Result<Option<String>, AdminError> {
        match cookies.find_non_empty(ADMIN_COOKIE_NAME) {
            Some(token) => self.cache.get(&cache_keys::login_token(token)).await,
            None => Ok(None),
        }
    }
}

/// True when `s` contains at least one non-whitespace character
fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Generate a cryptographically secure session token
fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use tokio_test::{assert_err, assert_ok};
    use warden_common::constants::cache_keys::{ADMIN_PREFIX, LOGIN_TOKEN_SEGMENT};

    const CHALLENGE_KEY: &str = "warden:admin:captcha:test-key";

    fn admin() -> AdminAccount {
        AdminAccount {
            account: "admin".to_string(),
            password: "encodedpw".to_string(),
        }
    }

    fn manager(cache: Arc<MemoryCache>) -> SessionManager {
        SessionManager::new(cache, admin(), Duration::from_secs(86_400))
    }

    fn request(answer: &str, key: &str) -> LoginRequest {
        LoginRequest {
            account: "admin".to_string(),
            password: "encodedpw".to_string(),
            check_code: answer.to_string(),
            check_code_key: key.to_string(),
        }
    }

    async fn seed_challenge(cache: &MemoryCache, answer: &str) {
        cache
            .set_with_ttl(CHALLENGE_KEY, answer, Duration::from_secs(60))
            .await
            .unwrap();
    }

    async fn session_keys(cache: &MemoryCache) -> Vec<String> {
        cache
            .keys_with_prefix(&format!("{ADMIN_PREFIX}{LOGIN_TOKEN_SEGMENT}"))
            .await
    }

    fn cookie(token: &str) -> RequestCookies {
        RequestCookies::new(vec![(ADMIN_COOKIE_NAME.to_string(), token.to_string())])
    }

    #[tokio::test]
    async fn test_login_end_to_end() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());

        let outcome = assert_ok!(
            sessions
                .login(&RequestCookies::default(), &request("7", CHALLENGE_KEY))
                .await
        );

        assert_eq!(outcome.account, "admin");
        assert_eq!(cache.get(CHALLENGE_KEY).await.unwrap(), None);
        assert_eq!(
            cache
                .get(&cache_keys::login_token(&outcome.token))
                .await
                .unwrap()
                .as_deref(),
            Some("admin")
        );
        assert_eq!(session_keys(&cache).await.len(), 1);
        assert_eq!(outcome.cookie.name, ADMIN_COOKIE_NAME);
        assert_eq!(outcome.cookie.value, outcome.token);
        assert_eq!(outcome.cookie.max_age_secs, 86_400);
    }

    #[tokio::test]
    async fn test_challenge_is_single_use() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());
        let req = request("7", CHALLENGE_KEY);

        assert_ok!(sessions.login(&RequestCookies::default(), &req).await);
        let second = sessions.login(&RequestCookies::default(), &req).await;
        assert!(matches!(second, Err(AdminError::Captcha)));
    }

    #[tokio::test]
    async fn test_unknown_challenge_key_is_captcha_error() {
        let cache = Arc::new(MemoryCache::new());
        let sessions = manager(cache.clone());

        for answer in ["7", "0", "anything"] {
            let result = sessions
                .login(&RequestCookies::default(), &request(answer, CHALLENGE_KEY))
                .await;
            assert!(matches!(result, Err(AdminError::Captcha)));
        }
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_wrong_answer_consumes_challenge() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());

        let result = sessions
            .login(&RequestCookies::default(), &request("8", CHALLENGE_KEY))
            .await;
        assert!(matches!(result, Err(AdminError::Captcha)));
        assert_eq!(cache.get(CHALLENGE_KEY).await.unwrap(), None);

        // The right answer is useless once the challenge is gone
        let retry = sessions
            .login(&RequestCookies::default(), &request("7", CHALLENGE_KEY))
            .await;
        assert!(matches!(retry, Err(AdminError::Captcha)));
    }

    #[tokio::test]
    async fn test_answer_comparison_ignores_case() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "AB").await;
        let sessions = manager(cache.clone());

        assert_ok!(
            sessions
                .login(&RequestCookies::default(), &request("ab", CHALLENGE_KEY))
                .await
        );
    }

    #[tokio::test]
    async fn test_missing_captcha_fields_are_param_errors() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());

        for req in [request("", CHALLENGE_KEY), request("7", ""), request("  ", CHALLENGE_KEY)] {
            let result = sessions.login(&RequestCookies::default(), &req).await;
            assert!(matches!(result, Err(AdminError::Param)));
        }
        // Parameter checks run before the challenge is touched
        assert!(cache.get(CHALLENGE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_account_is_generic_credential_error() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());

        let mut req = request("7", CHALLENGE_KEY);
        req.account = String::new();
        let result = sessions.login(&RequestCookies::default(), &req).await;
        assert!(matches!(result, Err(AdminError::AccountOrPassword)));
        assert!(cache.get(CHALLENGE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bad_credentials_rejected_after_captcha() {
        let cache = Arc::new(MemoryCache::new());
        let sessions = manager(cache.clone());

        let mut wrong_password = request("7", CHALLENGE_KEY);
        wrong_password.password = "nope".to_string();
        let mut wrong_account = request("7", CHALLENGE_KEY);
        wrong_account.account = "root".to_string();

        for req in [wrong_password, wrong_account] {
            seed_challenge(&cache, "7").await;
            let result = sessions.login(&RequestCookies::default(), &req).await;
            assert!(matches!(result, Err(AdminError::AccountOrPassword)));
            assert_eq!(cache.get(CHALLENGE_KEY).await.unwrap(), None);
        }
        assert!(session_keys(&cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_login_replaces_previous_session() {
        let cache = Arc::new(MemoryCache::new());
        let sessions = manager(cache.clone());

        seed_challenge(&cache, "7").await;
        let first = sessions
            .login(&RequestCookies::default(), &request("7", CHALLENGE_KEY))
            .await
            .unwrap();

        seed_challenge(&cache, "7").await;
        let second = sessions
            .login(&cookie(&first.token), &request("7", CHALLENGE_KEY))
            .await
            .unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(
            cache.get(&cache_keys::login_token(&first.token)).await.unwrap(),
            None
        );
        assert_eq!(session_keys(&cache).await, vec![cache_keys::login_token(&second.token)]);
    }

    #[tokio::test]
    async fn test_logout_deletes_session_and_expires_cookie() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());
        let outcome = sessions
            .login(&RequestCookies::default(), &request("7", CHALLENGE_KEY))
            .await
            .unwrap();

        let directive = assert_ok!(sessions.logout(&cookie(&outcome.token)).await)
            .expect("session cookie should be expired");
        assert!(directive.is_expiry());
        assert_eq!(directive.name, ADMIN_COOKIE_NAME);
        assert!(session_keys(&cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_logout_without_session_cookie_is_noop() {
        let cache = Arc::new(MemoryCache::new());
        let ttl = Duration::from_secs(60);
        cache
            .set_with_ttl(&cache_keys::login_token("other"), "admin", ttl)
            .await
            .unwrap();
        let sessions = manager(cache.clone());

        assert_eq!(sessions.logout(&RequestCookies::default()).await.unwrap(), None);
        let unrelated = RequestCookies::new(vec![("theme".to_string(), "dark".to_string())]);
        assert_eq!(sessions.logout(&unrelated).await.unwrap(), None);
        assert_eq!(sessions.logout(&cookie("")).await.unwrap(), None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_tracks_session_lifecycle() {
        let cache = Arc::new(MemoryCache::new());
        seed_challenge(&cache, "7").await;
        let sessions = manager(cache.clone());

        assert_eq!(sessions.resolve(&RequestCookies::default()).await.unwrap(), None);

        let outcome = sessions
            .login(&RequestCookies::default(), &request("7", CHALLENGE_KEY))
            .await
            .unwrap();
        let jar = cookie(&outcome.token);
        assert_eq!(sessions.resolve(&jar).await.unwrap().as_deref(), Some("admin"));

        sessions.logout(&jar).await.unwrap();
        assert_eq!(sessions.resolve(&jar).await.unwrap(), None);
        assert_err!(
            sessions
                .login(&jar, &request("7", CHALLENGE_KEY))
                .await
        );
    }

    #[test]
    fn test_session_tokens_are_unique_and_url_safe() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
