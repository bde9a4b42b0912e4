//! Deterministic imbalance analysis for unilateral exercises
//!
//! Compares the work (load x reps) done by each side across every logged
//! session of an exercise and reports which side is stronger and by how much.
//! Everything here is pure: callers hand in a snapshot of one user's
//! unilateral workouts and get plain values back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Workout;

/// Round to 2 decimal places, half away from zero. Never returns `-0.0`.
///
/// Values too large to scale are already whole and come back unchanged.
pub fn round2(value: f64) -> f64 {
  let scaled = value * 100.0;
  if !scaled.is_finite() {
    return value;
  }
  let rounded = scaled.round() / 100.0;
  if rounded == 0.0 {
    0.0
  } else {
    rounded
  }
}

/// ---------------------------------------------------------------------------
/// Stronger Side
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
  Left,
  Right,
}

impl Side {
  /// Positive imbalance means the left side did more work. Zero goes right.
  pub fn from_imbalance(imbalance: f64) -> Self {
    if imbalance > 0.0 {
      Side::Left
    } else {
      Side::Right
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Side::Left => "left",
      Side::Right => "right",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Per-Exercise Accumulation
/// ---------------------------------------------------------------------------

/// Running totals for one exercise title
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseTotals {
  pub exercise: String,
  /// Sum of left load x left reps over all sessions
  pub left_total: f64,
  pub right_total: f64,
  pub left_reps: i64,
  pub right_reps: i64,
  /// Number of logged sessions (records), not sets
  pub count: u32,
}

impl ExerciseTotals {
  fn new(exercise: &str) -> Self {
    Self {
      exercise: exercise.to_string(),
      left_total: 0.0,
      right_total: 0.0,
      left_reps: 0,
      right_reps: 0,
      count: 0,
    }
  }

  fn add(&mut self, workout: &Workout) {
    let left_load = finite_or_zero(workout.left_load);
    let right_load = finite_or_zero(workout.right_load);
    let left_reps = workout.left_reps.unwrap_or(0);
    let right_reps = workout.right_reps.unwrap_or(0);

    self.left_total = clamp_finite(self.left_total + left_load * left_reps as f64);
    self.right_total = clamp_finite(self.right_total + right_load * right_reps as f64);
    self.left_reps = self.left_reps.saturating_add(left_reps);
    self.right_reps = self.right_reps.saturating_add(right_reps);
    self.count = self.count.saturating_add(1);
  }

  pub fn left_avg(&self) -> f64 {
    if self.count == 0 {
      return 0.0;
    }
    self.left_total / self.count as f64
  }

  pub fn right_avg(&self) -> f64 {
    if self.count == 0 {
      return 0.0;
    }
    self.right_total / self.count as f64
  }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
  value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Saturate overflowed work totals at the largest finite value
fn clamp_finite(value: f64) -> f64 {
  if value.is_nan() {
    0.0
  } else {
    value.clamp(-f64::MAX, f64::MAX)
  }
}

/// Group workouts by exact title, in order of first appearance
pub fn group_by_exercise<'a, I>(workouts: I) -> Vec<ExerciseTotals>
where
  I: IntoIterator<Item = &'a Workout>,
{
  let mut index: HashMap<&'a str, usize> = HashMap::new();
  let mut groups: Vec<ExerciseTotals> = Vec::new();

  for workout in workouts {
    let slot = *index.entry(workout.title.as_str()).or_insert_with(|| {
      groups.push(ExerciseTotals::new(&workout.title));
      groups.len() - 1
    });
    groups[slot].add(workout);
  }

  groups
}

/// ---------------------------------------------------------------------------
/// Imbalance Results
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceResult {
  pub exercise: String,
  /// Average per-session work on the left side (kg x reps)
  pub left_avg: f64,
  pub right_avg: f64,
  /// Signed percentage; positive when the left side is stronger
  pub imbalance: f64,
  pub stronger_side: Side,
}

impl ImbalanceResult {
  pub fn from_totals(totals: &ExerciseTotals) -> Self {
    let left_avg = round2(totals.left_avg());
    let right_avg = round2(totals.right_avg());
    let raw = imbalance_pct(left_avg, right_avg);

    Self {
      exercise: totals.exercise.clone(),
      left_avg,
      right_avg,
      imbalance: round2(raw),
      stronger_side: Side::from_imbalance(raw),
    }
  }

  pub fn severity(&self) -> ImbalanceSeverity {
    ImbalanceSeverity::from_imbalance(self.imbalance)
  }

  pub fn recommendation(&self) -> Option<String> {
    self.severity().recommendation(self.stronger_side, self.imbalance)
  }
}

/// Percentage difference relative to the stronger side.
///
/// Both sides at zero work is reported as 0% rather than NaN, as is any
/// pair of averages the percentage cannot be computed for.
pub fn imbalance_pct(left_avg: f64, right_avg: f64) -> f64 {
  let stronger = left_avg.max(right_avg);
  if stronger <= 0.0 {
    return 0.0;
  }
  let pct = (left_avg - right_avg) / stronger * 100.0;
  if pct.is_finite() {
    pct
  } else {
    0.0
  }
}

/// One result per distinct exercise title, in first-seen order.
///
/// Callers pass only unilateral workouts belonging to a single user.
pub fn analyze_imbalance<'a, I>(workouts: I) -> Vec<ImbalanceResult>
where
  I: IntoIterator<Item = &'a Workout>,
{
  group_by_exercise(workouts)
    .iter()
    .map(ImbalanceResult::from_totals)
    .collect()
}

/// ---------------------------------------------------------------------------
/// Severity & Summary
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceSeverity {
  /// |imbalance| <= 5%
  Balanced,
  /// 5% < |imbalance| <= 10%
  Moderate,
  /// |imbalance| > 10%
  Significant,
}

impl ImbalanceSeverity {
  pub fn from_imbalance(imbalance: f64) -> Self {
    match imbalance.abs() {
      p if p > 10.0 => ImbalanceSeverity::Significant,
      p if p > 5.0 => ImbalanceSeverity::Moderate,
      _ => ImbalanceSeverity::Balanced,
    }
  }

  /// Coaching note for the user, or None when the sides are balanced
  pub fn recommendation(&self, stronger_side: Side, imbalance: f64) -> Option<String> {
    let pct = round2(imbalance.abs());
    match self {
      ImbalanceSeverity::Balanced => None,
      ImbalanceSeverity::Moderate => Some(format!(
        "Your {} side is {}% stronger.",
        stronger_side.as_str(),
        pct
      )),
      ImbalanceSeverity::Significant => Some(format!(
        "Your {} side is {}% stronger. Consider starting sets with your weaker side \
         and incorporating unilateral assistance work.",
        stronger_side.as_str(),
        pct
      )),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceSummary {
  pub exercises_analyzed: usize,
  pub balanced: usize,
  pub needs_attention: usize,
  pub significant: usize,
}

impl ImbalanceSummary {
  pub fn compute(results: &[ImbalanceResult]) -> Self {
    let mut summary = Self {
      exercises_analyzed: results.len(),
      ..Self::default()
    };
    for result in results {
      match result.severity() {
        ImbalanceSeverity::Balanced => summary.balanced += 1,
        ImbalanceSeverity::Moderate => summary.needs_attention += 1,
        ImbalanceSeverity::Significant => summary.significant += 1,
      }
    }
    summary
  }
}

/// One exercise as shown on the analysis page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceReportEntry {
  #[serde(flatten)]
  pub result: ImbalanceResult,
  pub severity: ImbalanceSeverity,
  pub recommendation: Option<String>,
}

impl From<ImbalanceResult> for ImbalanceReportEntry {
  fn from(result: ImbalanceResult) -> Self {
    Self {
      severity: result.severity(),
      recommendation: result.recommendation(),
      result,
    }
  }
}
