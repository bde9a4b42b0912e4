use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;
use crate::models::{NewWorkout, Workout, WorkoutPatch};

/// Most recent workouts first, matching the history list
pub async fn list_for_user(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<Workout>, AppError> {
  let workouts = sqlx::query_as::<_, Workout>(
    r#"
    SELECT * FROM workouts
    WHERE user_id = ?1
    ORDER BY created_at DESC, id DESC
    LIMIT ?2
    "#,
  )
  .bind(user_id)
  .bind(limit)
  .fetch_all(pool)
  .await?;

  Ok(workouts)
}

/// Unilateral workouts in the order they were logged
pub async fn list_unilateral_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Workout>, AppError> {
  let workouts = sqlx::query_as::<_, Workout>(
    "SELECT * FROM workouts WHERE user_id = ?1 AND unilateral = 1 ORDER BY id",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  Ok(workouts)
}

pub async fn find_for_user(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Option<Workout>, AppError> {
  let workout = sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = ?1 AND user_id = ?2")
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

  Ok(workout)
}

pub async fn create_workout(pool: &SqlitePool, user_id: i64, workout: &NewWorkout) -> Result<Workout, AppError> {
  let now = Utc::now();
  let result = sqlx::query(
    r#"
    INSERT INTO workouts (
      user_id, title, load, reps, sets, notes, unilateral,
      left_load, right_load, left_reps, right_reps,
      completed_at, created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12, ?12)
    "#,
  )
  .bind(user_id)
  .bind(&workout.title)
  .bind(workout.load)
  .bind(workout.reps)
  .bind(workout.sets)
  .bind(&workout.notes)
  .bind(workout.unilateral)
  .bind(workout.left_load)
  .bind(workout.right_load)
  .bind(workout.left_reps)
  .bind(workout.right_reps)
  .bind(now)
  .execute(pool)
  .await?;

  let id = result.last_insert_rowid();
  info!(user_id, workout_id = id, unilateral = workout.unilateral, "workout created");

  find_for_user(pool, user_id, id)
    .await?
    .ok_or_else(|| AppError::NotFound("Workout".into()))
}

/// Apply a partial update. Returns None when the workout does not exist or
/// belongs to someone else.
pub async fn update_workout(
  pool: &SqlitePool,
  user_id: i64,
  id: i64,
  patch: &WorkoutPatch,
) -> Result<Option<Workout>, AppError> {
  let result = sqlx::query(
    r#"
    UPDATE workouts SET
      title = COALESCE(?1, title),
      load = COALESCE(?2, load),
      reps = COALESCE(?3, reps),
      sets = COALESCE(?4, sets),
      notes = COALESCE(?5, notes),
      unilateral = COALESCE(?6, unilateral),
      left_load = COALESCE(?7, left_load),
      right_load = COALESCE(?8, right_load),
      left_reps = COALESCE(?9, left_reps),
      right_reps = COALESCE(?10, right_reps),
      completed_at = COALESCE(?11, completed_at),
      updated_at = ?12
    WHERE id = ?13 AND user_id = ?14
    "#,
  )
  .bind(&patch.title)
  .bind(patch.load)
  .bind(patch.reps)
  .bind(patch.sets)
  .bind(&patch.notes)
  .bind(patch.unilateral)
  .bind(patch.left_load)
  .bind(patch.right_load)
  .bind(patch.left_reps)
  .bind(patch.right_reps)
  .bind(patch.completed_at)
  .bind(Utc::now())
  .bind(id)
  .bind(user_id)
  .execute(pool)
  .await?;

  if result.rows_affected() == 0 {
    return Ok(None);
  }

  info!(user_id, workout_id = id, "workout updated");
  find_for_user(pool, user_id, id).await
}

/// Delete and return the removed workout in a single statement
pub async fn delete_workout(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Option<Workout>, AppError> {
  let deleted = sqlx::query_as::<_, Workout>("DELETE FROM workouts WHERE id = ?1 AND user_id = ?2 RETURNING *")
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

  if deleted.is_some() {
    info!(user_id, workout_id = id, "workout deleted");
  }
  Ok(deleted)
}
