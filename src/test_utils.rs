//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeded users and app state
//! - Workout factories

use chrono::Utc;
use sqlx::SqlitePool;

use crate::auth::{password, TokenIssuer};
use crate::db::AppState;
use crate::models::{NewWorkout, User, Workout};
use crate::store::users;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// App state over the given pool with a fixed secret and cheap hashing
pub fn test_state(pool: SqlitePool) -> AppState {
  AppState {
    db: pool,
    tokens: TokenIssuer::new(b"test-secret", 7),
    password_hash_cost: password::MIN_COST,
  }
}

/// Insert a user with a throwaway password hash
pub async fn seed_test_user(pool: &SqlitePool, email: &str) -> User {
  users::create_user(pool, email, "$2b$04$notarealbcrypthash")
    .await
    .expect("Failed to seed user")
}

/// `Authorization` header value for a user
pub fn bearer_for(state: &AppState, user_id: i64) -> String {
  format!("Bearer {}", state.tokens.issue(user_id).expect("Failed to issue token"))
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn new_bilateral(title: &str, load: f64, reps: i64) -> NewWorkout {
  NewWorkout {
    title: title.to_string(),
    load: Some(load),
    reps: Some(reps),
    sets: 1,
    ..NewWorkout::default()
  }
}

pub fn new_unilateral(title: &str, left_load: f64, left_reps: i64, right_load: f64, right_reps: i64) -> NewWorkout {
  NewWorkout {
    title: title.to_string(),
    sets: 1,
    unilateral: true,
    left_load: Some(left_load),
    right_load: Some(right_load),
    left_reps: Some(left_reps),
    right_reps: Some(right_reps),
    ..NewWorkout::default()
  }
}

/// An unsaved unilateral workout, for the pure analysis functions
pub fn mock_unilateral_workout(
  title: &str,
  left_load: f64,
  left_reps: i64,
  right_load: f64,
  right_reps: i64,
) -> Workout {
  let now = Utc::now();
  Workout {
    id: 0,
    user_id: 1,
    title: title.to_string(),
    load: None,
    reps: None,
    sets: 1,
    notes: None,
    unilateral: true,
    left_load: Some(left_load),
    right_load: Some(right_load),
    left_reps: Some(left_reps),
    right_reps: Some(right_reps),
    completed_at: now,
    created_at: now,
    updated_at: now,
  }
}
