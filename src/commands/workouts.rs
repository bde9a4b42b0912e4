//! Workout commands: history CRUD and the imbalance report

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{analyze_imbalance, ImbalanceReportEntry, ImbalanceResult, ImbalanceSummary};
use crate::auth::require_auth;
use crate::db::AppState;
use crate::error::AppError;
use crate::models::workout::{MAX_LOAD_KG, MAX_NOTES_LEN, MAX_REPS};
use crate::models::{NewWorkout, Workout, WorkoutPatch};
use crate::store::workouts;

/// Size of the history list
pub const HISTORY_LIMIT: i64 = 50;

const REQUIRED_FIELDS: &str = "Please fill in all required fields";

/// ---------------------------------------------------------------------------
/// Request Validation
/// ---------------------------------------------------------------------------

/// Body of a create request, as submitted by the logging form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateWorkoutRequest {
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
}

/// Zero counts as missing, the way the logging form submits blanks
fn missing_f64(value: Option<f64>) -> bool {
  value.map_or(true, |v| v == 0.0 || v.is_nan())
}

fn missing_i64(value: Option<i64>) -> bool {
  value.map_or(true, |v| v == 0)
}

/// Loads must be finite, non-negative and at most `MAX_LOAD_KG`; reps
/// non-negative and at most `MAX_REPS`
fn check_ranges(loads: [Option<f64>; 3], reps: [Option<i64>; 3]) -> Result<(), AppError> {
  let loads: Vec<f64> = loads.into_iter().flatten().collect();
  let reps: Vec<i64> = reps.into_iter().flatten().collect();

  if loads.iter().any(|v| *v < 0.0 || !v.is_finite()) || reps.iter().any(|v| *v < 0) {
    return Err(AppError::validation("Loads and reps must be non-negative"));
  }
  if loads.iter().any(|v| *v > MAX_LOAD_KG) {
    return Err(AppError::validation(format!("Loads cannot exceed {} kg", MAX_LOAD_KG)));
  }
  if reps.iter().any(|v| *v > MAX_REPS) {
    return Err(AppError::validation(format!("Reps cannot exceed {}", MAX_REPS)));
  }
  Ok(())
}

fn check_notes(notes: Option<&str>) -> Result<(), AppError> {
  if notes.is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
    return Err(AppError::validation(format!(
      "Notes cannot exceed {} characters",
      MAX_NOTES_LEN
    )));
  }
  Ok(())
}

impl CreateWorkoutRequest {
  pub fn validate(self) -> Result<NewWorkout, AppError> {
    let unilateral = self.unilateral.unwrap_or(false);
    let title = self.title.as_deref().map(str::trim).unwrap_or_default().to_string();

    let mut empty_fields = Vec::new();
    if title.is_empty() {
      empty_fields.push("title".to_string());
    }
    if !unilateral && missing_f64(self.load) {
      empty_fields.push("load".to_string());
    }
    if !unilateral && missing_i64(self.reps) {
      empty_fields.push("reps".to_string());
    }
    if unilateral
      && (missing_f64(self.left_load)
        || missing_f64(self.right_load)
        || missing_i64(self.left_reps)
        || missing_i64(self.right_reps))
    {
      empty_fields.push("unilateralFields".to_string());
    }
    if !empty_fields.is_empty() {
      return Err(AppError::Validation {
        message: REQUIRED_FIELDS.to_string(),
        empty_fields,
      });
    }

    check_ranges(
      [self.load, self.left_load, self.right_load],
      [self.reps, self.left_reps, self.right_reps],
    )?;
    check_notes(self.notes.as_deref())?;

    let sets = self.sets.filter(|s| *s > 0).unwrap_or(1);

    Ok(if unilateral {
      NewWorkout {
        title,
        load: None,
        reps: None,
        sets,
        notes: self.notes,
        unilateral: true,
        left_load: self.left_load,
        right_load: self.right_load,
        left_reps: self.left_reps,
        right_reps: self.right_reps,
      }
    } else {
      NewWorkout {
        title,
        load: self.load,
        reps: self.reps,
        sets,
        notes: self.notes,
        unilateral: false,
        left_load: None,
        right_load: None,
        left_reps: None,
        right_reps: None,
      }
    })
  }
}

fn validate_patch(mut patch: WorkoutPatch) -> Result<WorkoutPatch, AppError> {
  if let Some(title) = patch.title.as_mut() {
    *title = title.trim().to_string();
    if title.is_empty() {
      return Err(AppError::Validation {
        message: REQUIRED_FIELDS.to_string(),
        empty_fields: vec!["title".to_string()],
      });
    }
  }
  if patch.sets.is_some_and(|s| s < 1) {
    return Err(AppError::validation("Sets must be at least 1"));
  }
  check_ranges(
    [patch.load, patch.left_load, patch.right_load],
    [patch.reps, patch.left_reps, patch.right_reps],
  )?;
  check_notes(patch.notes.as_deref())?;
  Ok(patch)
}

/// ---------------------------------------------------------------------------
/// History Commands
/// ---------------------------------------------------------------------------

pub async fn get_workouts(state: &AppState, authorization: Option<&str>) -> Result<Vec<Workout>, AppError> {
  let user_id = require_auth(state, authorization).await?;
  workouts::list_for_user(&state.db, user_id, HISTORY_LIMIT).await
}

pub async fn get_workout(state: &AppState, authorization: Option<&str>, id: i64) -> Result<Workout, AppError> {
  let user_id = require_auth(state, authorization).await?;
  workouts::find_for_user(&state.db, user_id, id)
    .await?
    .ok_or_else(|| AppError::NotFound("Workout".into()))
}

pub async fn create_workout(
  state: &AppState,
  authorization: Option<&str>,
  request: CreateWorkoutRequest,
) -> Result<Workout, AppError> {
  let user_id = require_auth(state, authorization).await?;
  let new_workout = request.validate()?;
  workouts::create_workout(&state.db, user_id, &new_workout).await
}

pub async fn update_workout(
  state: &AppState,
  authorization: Option<&str>,
  id: i64,
  patch: WorkoutPatch,
) -> Result<Workout, AppError> {
  let user_id = require_auth(state, authorization).await?;
  let patch = validate_patch(patch)?;
  workouts::update_workout(&state.db, user_id, id, &patch)
    .await?
    .ok_or_else(|| AppError::NotFound("Workout".into()))
}

pub async fn delete_workout(state: &AppState, authorization: Option<&str>, id: i64) -> Result<Workout, AppError> {
  let user_id = require_auth(state, authorization).await?;
  workouts::delete_workout(&state.db, user_id, id)
    .await?
    .ok_or_else(|| AppError::NotFound("Workout".into()))
}

/// ---------------------------------------------------------------------------
/// Imbalance Analysis
/// ---------------------------------------------------------------------------

pub async fn get_imbalance_analysis(
  state: &AppState,
  authorization: Option<&str>,
) -> Result<Vec<ImbalanceResult>, AppError> {
  let user_id = require_auth(state, authorization).await?;
  let unilateral = workouts::list_unilateral_for_user(&state.db, user_id).await?;
  let results = analyze_imbalance(&unilateral);

  info!(
    user_id,
    sessions = unilateral.len(),
    exercises = results.len(),
    "imbalance analysis"
  );
  Ok(results)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceReport {
  pub results: Vec<ImbalanceReportEntry>,
  pub summary: ImbalanceSummary,
}

/// Per-exercise results with coaching notes, plus the balanced /
/// needs-attention tallies
pub async fn get_imbalance_report(
  state: &AppState,
  authorization: Option<&str>,
) -> Result<ImbalanceReport, AppError> {
  let results = get_imbalance_analysis(state, authorization).await?;
  let summary = ImbalanceSummary::compute(&results);
  Ok(ImbalanceReport {
    results: results.into_iter().map(ImbalanceReportEntry::from).collect(),
    summary,
  })
}
