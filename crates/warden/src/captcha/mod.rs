//! Captcha challenge issuance.
//!
//! Each challenge answer lives in the cache under a fresh UUID key until
//! the first login attempt that references it consumes it.

mod arithmetic;

use arithmetic::ArithmeticChallenge;

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use warden_common::{AdminError, CheckCodeResponse, constants::cache_keys};

use crate::cache::KvCache;

/// Captcha issuer service
pub struct ChallengeIssuer {
    cache: Arc<dyn KvCache>,
    width: u32,
    height: u32,
    challenge_ttl: Duration,
}

impl ChallengeIssuer {
    pub fn new(cache: Arc<dyn KvCache>, width: u32, height: u32, challenge_ttl: Duration) -> Self {
        Self {
            cache,
            width,
            height,
            challenge_ttl,
        }
    }

    /// Generate a challenge, store its answer, and return image + key
    pub async fn issue(&self) -> Result<CheckCodeResponse, AdminError> {
        let challenge = ArithmeticChallenge::random();
        let key = cache_keys::captcha(&Uuid::new_v4().to_string());

        self.cache
            .set_with_ttl(&key, &challenge.answer(), self.challenge_ttl)
            .await?;

        tracing::debug!(key = %key, ttl_ms = self.challenge_ttl.as_millis() as u64, "Issued captcha challenge");

        Ok(CheckCodeResponse {
            check_code: challenge.to_data_uri(self.width, self.height),
            check_code_key: key,
        })
    }
}
