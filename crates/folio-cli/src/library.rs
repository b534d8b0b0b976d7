//! Locating an existing library and creating new ones.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use folio_store_sqlite::SqliteStore;

use crate::paths;

/// Search roots in precedence order. An explicit `--library` replaces the
/// fallbacks entirely; otherwise the configured path comes first, then the
/// user data directory, then the working directory.
pub fn candidates(
  flag: Option<PathBuf>,
  configured: Option<PathBuf>,
  data_dir: Option<PathBuf>,
  cwd: Option<PathBuf>,
) -> Vec<PathBuf> {
  match flag {
    Some(path) => vec![path],
    None => configured.into_iter().chain(data_dir).chain(cwd).collect(),
  }
}

/// Resolve the library file from the CLI flag and the configured path.
pub fn locate(flag: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
  let candidates = candidates(
    flag,
    configured,
    paths::app_data_dir(),
    std::env::current_dir().ok(),
  );
  find(&candidates)
}

fn find(candidates: &[PathBuf]) -> Result<PathBuf> {
  paths::search_library_precedence(candidates).ok_or_else(|| {
    anyhow!("no library found (run `folio init` or pass --library)")
  })
}

/// The library file for an `init` target: the path itself when it already
/// names `folio.sqlite`, otherwise `folio.sqlite` inside it.
pub fn file_for(target: &Path) -> PathBuf {
  if target.file_name().is_some_and(|n| n == paths::LIBRARY_FILE_NAME) {
    target.to_path_buf()
  } else {
    target.join(paths::LIBRARY_FILE_NAME)
  }
}

/// Create (or open) the library at `path`, defaulting to the user data
/// directory. Missing parent directories are created.
pub async fn init(path: Option<PathBuf>) -> Result<PathBuf> {
  let target = match path {
    Some(path) => paths::expand_tilde(&path),
    None => paths::app_data_dir()
      .ok_or_else(|| anyhow!("cannot determine the user data directory"))?,
  };
  let library = file_for(&target);

  if let Some(parent) = library.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  SqliteStore::open(&library)
    .await
    .with_context(|| format!("failed to create library at {}", library.display()))?;
  tracing::info!(library = %library.display(), "library initialised");

  Ok(library)
}
