//! Barbell plate loading
//!
//! Greedy breakdown of a target load into the plates needed on ONE side of
//! the bar. The greedy pass never backtracks, so for custom denomination sets
//! it can miss an exact combination that exists; the default kg set loads
//! every multiple of 2.5 kg exactly.

use std::iter::repeat_n;

use serde::{Deserialize, Serialize};

use crate::analysis::round2;

pub const DEFAULT_BAR_WEIGHT: f64 = 20.0;
pub const DEFAULT_PLATES: [f64; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

const BAR_ONLY: &str = "Just the bar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarType {
  /// 15 kg women's bar
  Womens,
  /// 20 kg men's bar
  #[default]
  Mens,
  /// 25 kg axle bar
  Axle,
}

impl BarType {
  pub fn weight(&self) -> f64 {
    match self {
      BarType::Womens => 15.0,
      BarType::Mens => 20.0,
      BarType::Axle => 25.0,
    }
  }
}

/// Plates for one side of the bar, largest first.
///
/// Returns an empty list when the load does not exceed the bar. Whatever the
/// smallest plate cannot cover is dropped. The result holds one entry per
/// plate, so callers bound the load before asking.
pub fn calculate_plates(total_load: f64, bar_weight: f64, available: &[f64]) -> Vec<f64> {
  if total_load <= bar_weight {
    return Vec::new();
  }

  let mut denominations: Vec<f64> = available
    .iter()
    .copied()
    .filter(|p| p.is_finite() && *p > 0.0)
    .collect();
  denominations.sort_by(|a, b| b.total_cmp(a));

  let mut remaining = (total_load - bar_weight) / 2.0;
  let mut plates = Vec::new();

  for plate in denominations {
    let count = plate_count(remaining, plate);
    if count == 0 {
      continue;
    }
    plates.extend(repeat_n(plate, count));
    remaining = round2(remaining - count as f64 * plate);
  }

  plates
}

/// How many of `plate` fit in `remaining`, at 2 dp precision
fn plate_count(remaining: f64, plate: f64) -> usize {
  let mut count = (remaining / plate).floor();
  // Division can land just under a whole count (0.3 / 0.1)
  if round2(remaining - (count + 1.0) * plate) >= 0.0 {
    count += 1.0;
  }
  if count.is_finite() && count > 0.0 {
    count as usize
  } else {
    0
  }
}

/// Summary like `"2x25kg + 1x2.5kg"`, largest plate first
pub fn format_plate_display(plates: &[f64]) -> String {
  if plates.is_empty() {
    return BAR_ONLY.to_string();
  }

  let mut sorted = plates.to_vec();
  sorted.sort_by(|a, b| b.total_cmp(a));

  let mut counts: Vec<(f64, usize)> = Vec::new();
  for plate in sorted {
    match counts.last_mut() {
      Some((weight, count)) if *weight == plate => *count += 1,
      _ => counts.push((plate, 1)),
    }
  }

  counts
    .iter()
    .map(|(plate, count)| format!("{}x{}kg", count, plate))
    .collect::<Vec<_>>()
    .join(" + ")
}

/// ---------------------------------------------------------------------------
/// Plate Breakdown
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateBreakdown {
  pub bar_weight: f64,
  /// Plates for one side, largest first
  pub plates: Vec<f64>,
}

impl PlateBreakdown {
  pub fn solve(total_load: f64, bar_weight: f64, available: &[f64]) -> Self {
    Self {
      bar_weight,
      plates: calculate_plates(total_load, bar_weight, available),
    }
  }

  pub fn with_defaults(total_load: f64) -> Self {
    Self::solve(total_load, DEFAULT_BAR_WEIGHT, &DEFAULT_PLATES)
  }

  pub fn per_side(&self) -> f64 {
    round2(self.plates.iter().sum())
  }

  /// Bar plus both sides
  pub fn loaded_weight(&self) -> f64 {
    round2(self.bar_weight + 2.0 * self.per_side())
  }

  pub fn display(&self) -> String {
    format_plate_display(&self.plates)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hundred_on_mens_bar() {
    // 40 per side: 25 then 15 under the greedy pass
    let plates = calculate_plates(100.0, 20.0, &DEFAULT_PLATES);
    assert_eq!(plates, vec![25.0, 15.0]);
    assert_eq!(format_plate_display(&plates), "1x25kg + 1x15kg");
  }

  #[test]
  fn test_custom_set_groups_repeats() {
    let plates = calculate_plates(100.0, 20.0, &[2.5, 10.0, 25.0]);
    assert_eq!(plates, vec![25.0, 10.0, 2.5, 2.5]);
    assert_eq!(format_plate_display(&plates), "1x25kg + 1x10kg + 2x2.5kg");
  }

  #[test]
  fn test_bar_only() {
    let plates = calculate_plates(20.0, 20.0, &DEFAULT_PLATES);
    assert!(plates.is_empty());
    assert_eq!(format_plate_display(&plates), "Just the bar");
  }

  #[test]
  fn test_below_bar_weight() {
    assert!(calculate_plates(15.0, 20.0, &DEFAULT_PLATES).is_empty());
  }

  #[test]
  fn test_small_plates_and_remainder_dropped() {
    // 61.25 per side
    let plates = calculate_plates(142.5, 20.0, &DEFAULT_PLATES);
    assert_eq!(plates, vec![25.0, 25.0, 10.0, 1.25]);

    // 0.5 per side is below the smallest plate
    assert!(calculate_plates(21.0, 20.0, &DEFAULT_PLATES).is_empty());

    // 11.4 per side -> 10 + 1.25, 0.15 left over
    let plates = calculate_plates(42.8, 20.0, &DEFAULT_PLATES);
    assert_eq!(plates, vec![10.0, 1.25]);
  }

  #[test]
  fn test_never_overloads() {
    for tenths in 0..3000 {
      let total = tenths as f64 / 10.0;
      let breakdown = PlateBreakdown::with_defaults(total);
      if total > DEFAULT_BAR_WEIGHT {
        assert!(breakdown.loaded_weight() <= total + 1e-9, "overloaded {}", total);
      } else {
        assert!(breakdown.plates.is_empty());
      }
    }
  }

  #[test]
  fn test_plates_sorted_descending() {
    let plates = calculate_plates(187.5, 20.0, &[1.25, 5.0, 25.0, 2.5, 10.0]);
    let mut sorted = plates.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(plates, sorted);
  }

  #[test]
  fn test_ignores_non_positive_denominations() {
    let plates = calculate_plates(70.0, 20.0, &[0.0, -5.0, 25.0]);
    assert_eq!(plates, vec![25.0]);
  }

  #[test]
  fn test_bar_types() {
    assert_eq!(BarType::Womens.weight(), 15.0);
    assert_eq!(BarType::default().weight(), DEFAULT_BAR_WEIGHT);

    let breakdown = PlateBreakdown::solve(75.0, BarType::Axle.weight(), &DEFAULT_PLATES);
    assert_eq!(breakdown.plates, vec![25.0]);
    assert_eq!(breakdown.loaded_weight(), 75.0);
  }

  #[test]
  fn test_breakdown_summary() {
    let breakdown = PlateBreakdown::with_defaults(102.5);
    assert_eq!(breakdown.plates, vec![25.0, 15.0, 1.25]);
    assert_eq!(breakdown.per_side(), 41.25);
    assert_eq!(breakdown.loaded_weight(), 102.5);
    assert_eq!(breakdown.display(), "1x25kg + 1x15kg + 1x1.25kg");
  }

  #[test]
  fn test_counts_whole_plates_at_once() {
    // 490 per side
    let plates = calculate_plates(1000.0, 20.0, &DEFAULT_PLATES);
    assert_eq!(plates.len(), 20);
    assert_eq!(format_plate_display(&plates), "19x25kg + 1x15kg");

    // 0.3 / 0.1 divides to just under 3
    let plates = calculate_plates(0.6, 0.0, &[0.1]);
    assert_eq!(plates, vec![0.1, 0.1, 0.1]);
  }

  #[test]
  fn test_huge_load_terminates() {
    // 5e17 per side; subtracting a 25 kg plate would not change it
    let plates = calculate_plates(1e18, 20.0, &[25.0, 1e17]);
    assert_eq!(plates, vec![1e17; 5]);
  }

  #[test]
  fn test_solver_is_idempotent() {
    assert_eq!(
      PlateBreakdown::with_defaults(167.5),
      PlateBreakdown::with_defaults(167.5)
    );
  }
}
