//! Account registration, login, and bearer-token checks

pub mod password;
pub mod token;

use tracing::{debug, info, warn};

pub use token::{Claims, TokenIssuer};

use crate::db::AppState;
use crate::error::AppError;
use crate::models::User;
use crate::store::users;

/// Lower-cased, trimmed form used for storage and lookups
pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

/// Structural check only: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && domain.split('.').all(|label| !label.is_empty())
}

/// Create an account. The email must be well formed and unused.
pub async fn signup(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
  let email = normalize_email(email);
  if email.is_empty() || password.is_empty() {
    return Err(AppError::validation("All fields are required"));
  }
  if !is_valid_email(&email) {
    return Err(AppError::validation("Email is not valid"));
  }
  if users::find_by_email(&state.db, &email).await?.is_some() {
    return Err(AppError::EmailInUse);
  }

  let hash = password::hash_password_blocking(password, state.password_hash_cost).await?;
  let user = users::create_user(&state.db, &email, &hash).await?;
  info!(user_id = user.id, "signup complete");
  Ok(user)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
  let email = normalize_email(email);
  if email.is_empty() || password.is_empty() {
    return Err(AppError::validation("All fields are required"));
  }

  let Some(user) = users::find_by_email(&state.db, &email).await? else {
    warn!("login for unknown email");
    return Err(AppError::InvalidCredentials("Incorrect email".into()));
  };
  if !password::verify_password_blocking(password, &user.password_hash).await? {
    warn!(user_id = user.id, "login with wrong password");
    return Err(AppError::InvalidCredentials("Incorrect password".into()));
  }

  Ok(user)
}

/// Resolve the `Authorization` header to the id of an existing user
pub async fn require_auth(state: &AppState, authorization: Option<&str>) -> Result<i64, AppError> {
  let Some(header) = authorization else {
    debug!("no authorization header");
    return Err(AppError::unauthorized("Authentication token required"));
  };
  let Some(token) = header.strip_prefix("Bearer ") else {
    debug!("authorization header is not a bearer token");
    return Err(AppError::unauthorized("Invalid authorization format"));
  };

  let claims = state.tokens.verify(token.trim())?;

  if users::find_by_id(&state.db, claims.sub).await?.is_none() {
    warn!(user_id = claims.sub, "token for missing user");
    return Err(AppError::unauthorized("User not found"));
  }

  Ok(claims.sub)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;
  use serial_test::serial;

  #[test]
  fn test_email_validation() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last+gym@mail.example.org"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("no-at-sign.com"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("a@localhost"));
    assert!(!is_valid_email("a@b@c.com"));
    assert!(!is_valid_email("a@example..com"));
    assert!(!is_valid_email("a b@example.com"));
  }

  #[test]
  fn test_normalize_email() {
    assert_eq!(normalize_email("  Lifter@Example.COM "), "lifter@example.com");
  }

  #[tokio::test]
  #[serial]
  async fn test_signup_then_login() {
    let pool = setup_test_db().await;
    let state = test_state(pool.clone());

    let user = signup(&state, "Lifter@Example.com", "pa55word").await.unwrap();
    assert_eq!(user.email, "lifter@example.com");
    assert_ne!(user.password_hash, "pa55word");

    let logged_in = login(&state, "lifter@example.com", "pa55word").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_signup_rejections() {
    let pool = setup_test_db().await;
    let state = test_state(pool.clone());

    let err = signup(&state, "", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "All fields are required");

    let err = signup(&state, "not-an-email", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Email is not valid");

    signup(&state, "taken@example.com", "pw").await.unwrap();
    let err = signup(&state, "TAKEN@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, AppError::EmailInUse));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_login_rejections() {
    let pool = setup_test_db().await;
    let state = test_state(pool.clone());
    signup(&state, "me@example.com", "right").await.unwrap();

    let err = login(&state, "you@example.com", "right").await.unwrap_err();
    assert_eq!(err.to_string(), "Incorrect email");

    let err = login(&state, "me@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Incorrect password");

    let err = login(&state, "me@example.com", "").await.unwrap_err();
    assert_eq!(err.to_string(), "All fields are required");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_require_auth() {
    let pool = setup_test_db().await;
    let state = test_state(pool.clone());
    let user = seed_test_user(&pool, "auth@example.com").await;
    let token = state.tokens.issue(user.id).unwrap();

    let header = format!("Bearer {}", token);
    assert_eq!(require_auth(&state, Some(&header)).await.unwrap(), user.id);

    let err = require_auth(&state, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Authentication token required");

    let err = require_auth(&state, Some(&format!("Token {}", token))).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid authorization format");

    let err = require_auth(&state, Some("Bearer junk")).await.unwrap_err();
    assert_eq!(err.to_string(), "Request is not authorized");

    let ghost = state.tokens.issue(user.id + 99).unwrap();
    let err = require_auth(&state, Some(&format!("Bearer {}", ghost))).await.unwrap_err();
    assert_eq!(err.to_string(), "User not found");
    assert_eq!(err.status_code(), 401);

    teardown_test_db(pool).await;
  }
}
