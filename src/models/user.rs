use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl FitnessLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      FitnessLevel::Beginner => "beginner",
      FitnessLevel::Intermediate => "intermediate",
      FitnessLevel::Advanced => "advanced",
    }
  }
}

impl std::fmt::Display for FitnessLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for FitnessLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      _ => Err(format!("Unknown fitness level: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
  pub name: Option<String>,
  pub age: Option<i64>,
  pub weight: Option<f64>,
  pub height: Option<f64>,
  pub fitness_level: FitnessLevel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub profile: Profile,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
