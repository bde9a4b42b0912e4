use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::AppError;
use crate::models::{Profile, User};

const USER_COLUMNS: &str = r#"
  id, email, password_hash, name, age, weight, height, fitness_level,
  created_at, updated_at
"#;

fn user_from_row(row: &SqliteRow) -> Result<User, AppError> {
  let fitness_level: String = row.try_get("fitness_level")?;

  Ok(User {
    id: row.try_get("id")?,
    email: row.try_get("email")?,
    password_hash: row.try_get("password_hash")?,
    profile: Profile {
      name: row.try_get("name")?,
      age: row.try_get("age")?,
      weight: row.try_get("weight")?,
      height: row.try_get("height")?,
      fitness_level: fitness_level.parse().unwrap_or_default(),
    },
    created_at: row.try_get("created_at")?,
    updated_at: row.try_get("updated_at")?,
  })
}

/// Insert a user with an already-hashed password. Emails are unique.
pub async fn create_user(pool: &SqlitePool, email: &str, password_hash: &str) -> Result<User, AppError> {
  let now = Utc::now();
  let result = sqlx::query(
    r#"
    INSERT INTO users (email, password_hash, fitness_level, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?4)
    "#,
  )
  .bind(email)
  .bind(password_hash)
  .bind(Profile::default().fitness_level.as_str())
  .bind(now)
  .execute(pool)
  .await
  .map_err(|e| match e {
    sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::EmailInUse,
    other => AppError::Database(other),
  })?;

  let id = result.last_insert_rowid();
  info!(user_id = id, "user created");

  find_by_id(pool, id)
    .await?
    .ok_or_else(|| AppError::NotFound("User".into()))
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
  let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS))
    .bind(email)
    .fetch_optional(pool)
    .await?;

  row.as_ref().map(user_from_row).transpose()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
  let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS))
    .bind(id)
    .fetch_optional(pool)
    .await?;

  row.as_ref().map(user_from_row).transpose()
}

/// Replace the stored profile. Returns None for an unknown user.
pub async fn update_profile(
  pool: &SqlitePool,
  id: i64,
  profile: &Profile,
) -> Result<Option<User>, AppError> {
  let result = sqlx::query(
    r#"
    UPDATE users SET
      name = ?1,
      age = ?2,
      weight = ?3,
      height = ?4,
      fitness_level = ?5,
      updated_at = ?6
    WHERE id = ?7
    "#,
  )
  .bind(&profile.name)
  .bind(profile.age)
  .bind(profile.weight)
  .bind(profile.height)
  .bind(profile.fitness_level.as_str())
  .bind(Utc::now())
  .bind(id)
  .execute(pool)
  .await?;

  if result.rows_affected() == 0 {
    return Ok(None);
  }

  find_by_id(pool, id).await
}
