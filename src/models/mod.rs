pub mod user;
pub mod workout;

pub use user::{FitnessLevel, Profile, User};
pub use workout::{NewWorkout, Workout, WorkoutPatch};
