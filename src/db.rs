use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::error::AppError;

pub type DbPool = SqlitePool;

/// Application state shared by every command
pub struct AppState {
  pub db: DbPool,
  pub tokens: TokenIssuer,
  pub password_hash_cost: u32,
}

impl AppState {
  pub fn new(db: DbPool, config: &Config) -> Self {
    Self {
      db,
      tokens: TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl_days),
      password_hash_cost: config.password_hash_cost,
    }
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool, AppError> {
  info!(url = database_url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("database initialized");

  Ok(pool)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};

  #[tokio::test]
  async fn test_state_from_config() {
    let pool = setup_test_db().await;
    let config = Config {
      database_url: "sqlite::memory:".into(),
      jwt_secret: "from-config".into(),
      token_ttl_days: 1,
      password_hash_cost: 5,
    };

    let state = AppState::new(pool.clone(), &config);
    assert_eq!(state.password_hash_cost, 5);

    let token = state.tokens.issue(7).unwrap();
    let claims = state.tokens.verify(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
    assert!(TokenIssuer::new(b"other", 1).verify(&token).is_err());

    teardown_test_db(pool).await;
  }
}
