//! Error types for `folio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid collection name: {0:?}")]
  InvalidCollectionName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
