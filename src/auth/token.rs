//! HS256 session tokens in JWT compact form

use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64URL;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const NOT_AUTHORIZED: &str = "Request is not authorized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
  /// User id
  pub sub: i64,
  pub iat: i64,
  pub exp: i64,
}

/// Longest session a token may grant
pub const MAX_TTL_DAYS: i64 = 365;

#[derive(Clone)]
pub struct TokenIssuer {
  secret: Vec<u8>,
  ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
  }
}

impl TokenIssuer {
  /// `ttl_days` is clamped to `1..=MAX_TTL_DAYS`
  pub fn new(secret: &[u8], ttl_days: i64) -> Self {
    Self {
      secret: secret.to_vec(),
      ttl: Duration::days(ttl_days.clamp(1, MAX_TTL_DAYS)),
    }
  }

  fn mac(&self) -> HmacSha256 {
    HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
  }

  pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
    self.issue_at(user_id, Utc::now())
  }

  pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, AppError> {
    let claims = Claims {
      sub: user_id,
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    let signing_input = format!(
      "{}.{}",
      B64URL.encode(HEADER),
      B64URL.encode(serde_json::to_vec(&claims)?)
    );

    let mut mac = self.mac();
    mac.update(signing_input.as_bytes());
    let signature = B64URL.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
  }

  pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
    self.verify_at(token, Utc::now())
  }

  /// Check signature and expiry. Every failure maps to the same
  /// unauthorized error.
  pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
    let reject = |reason: &str| {
      debug!(reason, "token rejected");
      AppError::unauthorized(NOT_AUTHORIZED)
    };

    let (signing_input, signature) = token
      .rsplit_once('.')
      .ok_or_else(|| reject("malformed"))?;
    let (_, payload) = signing_input
      .split_once('.')
      .ok_or_else(|| reject("malformed"))?;

    let signature = B64URL
      .decode(signature)
      .map_err(|_| reject("signature encoding"))?;
    let mut mac = self.mac();
    mac.update(signing_input.as_bytes());
    mac
      .verify_slice(&signature)
      .map_err(|_| reject("bad signature"))?;

    let payload = B64URL.decode(payload).map_err(|_| reject("payload encoding"))?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| reject("payload json"))?;

    if claims.exp <= now.timestamp() {
      return Err(reject("expired"));
    }

    Ok(claims)
  }
}
