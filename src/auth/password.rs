//! bcrypt password hashing
//!
//! Stored hashes use the modular crypt form (`$2b$<cost>$<salt+digest>`), so
//! the cost travels with each hash and can be raised without a migration.

use tokio::task;

use crate::error::AppError;

pub use bcrypt::DEFAULT_COST;

/// Range bcrypt accepts for the work factor
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
  Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
  bcrypt::verify(password, stored).unwrap_or(false)
}

/// `hash_password` on the blocking pool, off the async workers
pub async fn hash_password_blocking(password: &str, cost: u32) -> Result<String, AppError> {
  let password = password.to_owned();
  task::spawn_blocking(move || hash_password(&password, cost)).await?
}

pub async fn verify_password_blocking(password: &str, stored: &str) -> Result<bool, AppError> {
  let (password, stored) = (password.to_owned(), stored.to_owned());
  Ok(task::spawn_blocking(move || verify_password(&password, &stored)).await?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hash_and_verify() {
    let hash = hash_password("Sup3r$ecret!", MIN_COST).unwrap();
    assert!(hash.starts_with("$2b$04$"));
    assert!(verify_password("Sup3r$ecret!", &hash));
    assert!(!verify_password("Sup3r$ecret?", &hash));
  }

  #[test]
  fn test_salt_makes_hashes_differ() {
    let a = hash_password("same password", MIN_COST).unwrap();
    let b = hash_password("same password", MIN_COST).unwrap();
    assert_ne!(a, b);
    assert!(verify_password("same password", &a));
    assert!(verify_password("same password", &b));
  }

  #[test]
  fn test_cost_out_of_range() {
    let err = hash_password("pw", MIN_COST - 1).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(hash_password("pw", MAX_COST + 1).is_err());
  }

  #[test]
  fn test_malformed_hash_never_matches() {
    assert!(!verify_password("pw", ""));
    assert!(!verify_password("pw", "plaintext"));
    assert!(!verify_password("pw", "md5$10$abc$def"));
    assert!(!verify_password("pw", "$2b$04$tooshort"));
  }

  #[tokio::test]
  async fn test_blocking_variants_agree() {
    let hash = hash_password_blocking("pa55word", MIN_COST).await.unwrap();
    assert!(verify_password_blocking("pa55word", &hash).await.unwrap());
    assert!(!verify_password_blocking("pa55wort", &hash).await.unwrap());
  }
}
