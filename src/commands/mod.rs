//! Request handlers, independent of transport
//!
//! Each command takes the shared state plus the caller's `Authorization`
//! header (where one is needed) and returns serde-serializable data.

pub mod plates;
pub mod user;
pub mod workouts;

pub use plates::{calculate_plate_loading, PlateCalculation, PlateRequest};
pub use user::{login_user, signup_user, update_profile, AuthResponse, Credentials};
pub use workouts::{
  create_workout, delete_workout, get_imbalance_analysis, get_imbalance_report, get_workout,
  get_workouts, update_workout, CreateWorkoutRequest, ImbalanceReport,
};
