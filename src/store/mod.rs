//! Owner-scoped persistence for users and workouts
//!
//! Every workout query takes the owning user id; a workout that belongs to
//! someone else is indistinguishable from one that does not exist.

pub mod users;
pub mod workouts;
