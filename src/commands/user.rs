//! Account commands: signup, login, profile

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth;
use crate::db::AppState;
use crate::error::AppError;
use crate::models::{Profile, User};
use crate::store::users;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

/// Returned by signup and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
  pub email: String,
  pub token: String,
  pub profile: Profile,
}

impl AuthResponse {
  fn for_user(state: &AppState, user: User) -> Result<Self, AppError> {
    Ok(Self {
      token: state.tokens.issue(user.id)?,
      email: user.email,
      profile: user.profile,
    })
  }
}

pub async fn signup_user(state: &AppState, credentials: Credentials) -> Result<AuthResponse, AppError> {
  let user = auth::signup(state, &credentials.email, &credentials.password).await?;
  AuthResponse::for_user(state, user)
}

pub async fn login_user(state: &AppState, credentials: Credentials) -> Result<AuthResponse, AppError> {
  let user = auth::login(state, &credentials.email, &credentials.password).await?;
  info!(user_id = user.id, "login");
  AuthResponse::for_user(state, user)
}

pub async fn update_profile(
  state: &AppState,
  authorization: Option<&str>,
  profile: Profile,
) -> Result<User, AppError> {
  let user_id = auth::require_auth(state, authorization).await?;

  if profile.age.is_some_and(|age| age < 0)
    || profile.weight.is_some_and(|w| !w.is_finite() || w < 0.0)
    || profile.height.is_some_and(|h| !h.is_finite() || h < 0.0)
  {
    return Err(AppError::validation("Profile values must be non-negative"));
  }

  users::update_profile(&state.db, user_id, &profile)
    .await?
    .ok_or_else(|| AppError::NotFound("User".into()))
}
