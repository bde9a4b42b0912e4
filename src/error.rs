use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Password hashing failed: {0}")]
  PasswordHash(#[from] bcrypt::BcryptError),

  #[error("Background task failed: {0}")]
  Task(#[from] tokio::task::JoinError),

  #[error("{message}")]
  Validation {
    message: String,
    empty_fields: Vec<String>,
  },

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0} not found")]
  NotFound(String),

  #[error("Email already in use")]
  EmailInUse,

  #[error("{0}")]
  InvalidCredentials(String),
}

impl AppError {
  pub fn validation(message: impl Into<String>) -> Self {
    AppError::Validation {
      message: message.into(),
      empty_fields: Vec::new(),
    }
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    AppError::Unauthorized(message.into())
  }

  /// Status a transport layer should answer with
  pub fn status_code(&self) -> u16 {
    match self {
      AppError::Unauthorized(_) => 401,
      AppError::NotFound(_) => 404,
      AppError::MissingConfig(_)
      | AppError::InvalidConfig(_)
      | AppError::Migration(_)
      | AppError::Serialization(_)
      | AppError::PasswordHash(_)
      | AppError::Task(_) => 500,
      AppError::Database(_)
      | AppError::Validation { .. }
      | AppError::EmailInUse
      | AppError::InvalidCredentials(_) => 400,
    }
  }

  /// Fields the caller left empty, for validation failures
  pub fn empty_fields(&self) -> &[String] {
    match self {
      AppError::Validation { empty_fields, .. } => empty_fields,
      _ => &[],
    }
  }
}

impl Serialize for AppError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl From<AppError> for String {
  fn from(err: AppError) -> Self {
    err.to_string()
  }
}
