use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_NOTES_LEN: usize = 500;
/// Upper bounds accepted for a single entry
pub const MAX_LOAD_KG: f64 = 1000.0;
pub const MAX_REPS: i64 = 1000;

/// A logged exercise entry. Bilateral entries use `load`/`reps`, unilateral
/// entries use the per-side fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
  pub id: i64,
  pub user_id: i64,
  pub title: String,
  pub load: Option<f64>,
  pub reps: Option<i64>,
  pub sets: i64,
  pub notes: Option<String>,
  pub unilateral: bool,
  pub left_load: Option<f64>,
  pub right_load: Option<f64>,
  pub left_reps: Option<i64>,
  pub right_reps: Option<i64>,
  pub completed_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// For inserting new workouts (without id, timestamps)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
  pub title: String,
  pub load: Option<f64>,
  pub reps: Option<i64>,
  pub sets: i64,
  pub notes: Option<String>,
  pub unilateral: bool,
  pub left_load: Option<f64>,
  pub right_load: Option<f64>,
  pub left_reps: Option<i64>,
  pub right_reps: Option<i64>,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutPatch {
  pub title: Option<String>,
  pub load: Option<f64>,
  pub reps: Option<i64>,
  pub sets: Option<i64>,
  pub notes: Option<String>,
  pub unilateral: Option<bool>,
  pub left_load: Option<f64>,
  pub right_load: Option<f64>,
  pub left_reps: Option<i64>,
  pub right_reps: Option<i64>,
  pub completed_at: Option<DateTime<Utc>>,
}
