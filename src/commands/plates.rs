use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::plates::{BarType, PlateBreakdown, DEFAULT_PLATES};

/// Heaviest load the calculator accepts
pub const MAX_TOTAL_LOAD: f64 = 1000.0;
/// Smallest custom plate accepted
pub const MIN_PLATE: f64 = 0.25;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlateRequest {
  pub total_load: f64,
  /// Explicit bar weight; wins over `bar_type`
  pub bar_weight: Option<f64>,
  pub bar_type: Option<BarType>,
  /// Custom denominations, defaults to the standard kg set
  pub plates: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateCalculation {
  pub bar_weight: f64,
  /// Plates for one side, largest first
  pub plates: Vec<f64>,
  pub per_side: f64,
  pub loaded_weight: f64,
  pub display: String,
}

fn non_negative(value: f64) -> bool {
  value.is_finite() && value >= 0.0
}

/// Validate the typed-in numbers, then run the plate solver
pub fn calculate_plate_loading(request: PlateRequest) -> Result<PlateCalculation, AppError> {
  let bar_weight = request
    .bar_weight
    .unwrap_or_else(|| request.bar_type.unwrap_or_default().weight());

  if !non_negative(request.total_load) || !non_negative(bar_weight) {
    return Err(AppError::validation("Load and bar weight must be non-negative numbers"));
  }
  if request.total_load > MAX_TOTAL_LOAD || bar_weight > MAX_TOTAL_LOAD {
    return Err(AppError::validation(format!("Load cannot exceed {} kg", MAX_TOTAL_LOAD)));
  }

  let available = request.plates.as_deref().unwrap_or(&DEFAULT_PLATES);
  if available.iter().any(|p| !p.is_finite() || *p < MIN_PLATE) {
    return Err(AppError::validation(format!("Plates must be at least {} kg", MIN_PLATE)));
  }

  let breakdown = PlateBreakdown::solve(request.total_load, bar_weight, available);
  debug!(total_load = request.total_load, bar_weight, plates = breakdown.plates.len(), "plates solved");

  Ok(PlateCalculation {
    bar_weight,
    per_side: breakdown.per_side(),
    loaded_weight: breakdown.loaded_weight(),
    display: breakdown.display(),
    plates: breakdown.plates,
  })
}
