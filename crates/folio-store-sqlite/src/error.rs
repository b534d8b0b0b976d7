//! Error type for `folio-store-sqlite`.
//!
//! Constraint failures reported by SQLite are lifted out of the generic
//! database error into [`Error::Constraint`], keyed by the extended result
//! code, so callers can tell a dangling reference from a duplicate key.

use std::fmt;

use folio_core::item::ItemId;
use rusqlite::ffi;
use thiserror::Error;

/// Which declared constraint a write violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
  NotNull,
  ForeignKey,
  PrimaryKey,
  Unique,
  Other,
}

impl ConstraintKind {
  fn from_extended_code(code: i32) -> Self {
    match code {
      ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
      ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
      ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Self::PrimaryKey,
      ffi::SQLITE_CONSTRAINT_UNIQUE => Self::Unique,
      _ => Self::Other,
    }
  }
}

impl fmt::Display for ConstraintKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::NotNull => "not-null",
      Self::ForeignKey => "foreign key",
      Self::PrimaryKey => "primary key",
      Self::Unique => "unique",
      Self::Other => "constraint",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("{kind} violation: {message}")]
  Constraint { kind: ConstraintKind, message: String },

  #[error("database error: {0}")]
  Database(#[source] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("item not found: {0}")]
  ItemNotFound(ItemId),

  #[error("collection not found: {0:?}")]
  CollectionNotFound(String),
}

impl Error {
  pub fn constraint_kind(&self) -> Option<ConstraintKind> {
    match self {
      Self::Constraint { kind, .. } => Some(*kind),
      _ => None,
    }
  }

  pub fn is_foreign_key_violation(&self) -> bool {
    self.constraint_kind() == Some(ConstraintKind::ForeignKey)
  }

  pub fn is_not_null_violation(&self) -> bool {
    self.constraint_kind() == Some(ConstraintKind::NotNull)
  }

  /// Duplicate key, whether declared as `PRIMARY KEY` or `UNIQUE`.
  pub fn is_duplicate_key(&self) -> bool {
    matches!(
      self.constraint_kind(),
      Some(ConstraintKind::PrimaryKey | ConstraintKind::Unique)
    )
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        ffi::Error { code: rusqlite::ErrorCode::ConstraintViolation, extended_code },
        message,
      )) => Error::Constraint {
        kind:    ConstraintKind::from_extended_code(extended_code),
        message: message.unwrap_or_else(|| "constraint failed".to_owned()),
      },
      other => Error::Database(other),
    }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self {
    tokio_rusqlite::Error::Rusqlite(err).into()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
