use std::env;
use std::ops::RangeInclusive;

use crate::auth::{password, token};
use crate::error::AppError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://liftlog.db?mode=rwc";
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
const TOKEN_TTL_DAYS_RANGE: RangeInclusive<i64> = 1..=token::MAX_TTL_DAYS;
const PASSWORD_HASH_COST_RANGE: RangeInclusive<u32> = password::MIN_COST..=password::MAX_COST;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub jwt_secret: String,
  pub token_ttl_days: i64,
  /// bcrypt work factor
  pub password_hash_cost: u32,
}

impl Config {
  /// Read configuration from the process environment, loading `.env` first
  pub fn from_env() -> Result<Self, AppError> {
    dotenvy::dotenv().ok();

    let jwt_secret = env::var("JWT_SECRET")
      .ok()
      .filter(|s| !s.is_empty())
      .ok_or_else(|| AppError::MissingConfig("JWT_SECRET".into()))?;

    Ok(Self {
      database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
      jwt_secret,
      token_ttl_days: parse_in_range("TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS, TOKEN_TTL_DAYS_RANGE)?,
      password_hash_cost: parse_in_range("PASSWORD_HASH_COST", password::DEFAULT_COST, PASSWORD_HASH_COST_RANGE)?,
    })
  }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
  match env::var(name) {
    Ok(raw) => raw
      .trim()
      .parse()
      .map_err(|_| AppError::InvalidConfig(format!("{} must be a number, got {:?}", name, raw))),
    Err(_) => Ok(default),
  }
}

fn parse_in_range<T>(name: &str, default: T, range: RangeInclusive<T>) -> Result<T, AppError>
where
  T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
  let value = parse_var(name, default)?;
  if !range.contains(&value) {
    return Err(AppError::InvalidConfig(format!(
      "{} must be between {} and {}, got {}",
      name,
      range.start(),
      range.end(),
      value
    )));
  }
  Ok(value)
}
