pub mod analysis;
pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod plates;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use db::AppState;
pub use error::AppError;

use crate::config::Config;
use tracing::info;

/// Load configuration, install logging, open the database and run migrations
pub async fn bootstrap() -> Result<AppState, AppError> {
  logging::init();

  let config = Config::from_env()?;
  let pool = db::initialize_db(&config.database_url).await?;
  let state = AppState::new(pool, &config);

  info!("liftlog ready");
  Ok(state)
}
