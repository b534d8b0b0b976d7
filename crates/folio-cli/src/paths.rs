//! Platform directories and library discovery.
//!
//! A library is a single `folio.sqlite` file. Discovery walks each candidate
//! path and its ancestors, stopping at the first match.

use std::path::{Path, PathBuf};

/// File name every library must have.
pub const LIBRARY_FILE_NAME: &str = "folio.sqlite";

const APP_DIR: &str = "folio";

/// Directory holding the default library: `$XDG_DATA_HOME/folio` (or
/// `~/.local/share/folio`) on Linux, `~/Library/Application Support/folio` on
/// macOS, `%APPDATA%\folio` on Windows.
pub fn app_data_dir() -> Option<PathBuf> { dirs::data_dir().map(|d| d.join(APP_DIR)) }

/// Default location of `config.toml`.
pub fn default_config_file() -> Option<PathBuf> {
  dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if s == "~"
    && let Some(home) = dirs::home_dir()
  {
    return home;
  }
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

/// The library at `path` itself: either `path/folio.sqlite` when `path` is a
/// directory, or `path` when it is a file named `folio.sqlite`.
pub fn search_library(path: &Path) -> Option<PathBuf> {
  if path.is_dir() {
    let candidate = path.join(LIBRARY_FILE_NAME);
    return candidate.is_file().then_some(candidate);
  }
  let is_library =
    path.is_file() && path.file_name().is_some_and(|n| n == LIBRARY_FILE_NAME);
  is_library.then(|| path.to_path_buf())
}

/// Search each candidate and then its ancestors, in order.
pub fn search_library_precedence<I, P>(candidates: I) -> Option<PathBuf>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  candidates.into_iter().find_map(|candidate| {
    let resolved = resolve(candidate.as_ref());
    tracing::debug!(candidate = %resolved.display(), "searching for library");
    resolved.ancestors().find_map(search_library)
  })
}

fn resolve(path: &Path) -> PathBuf {
  let expanded = expand_tilde(path);
  std::fs::canonicalize(&expanded)
    .or_else(|_| std::path::absolute(&expanded))
    .unwrap_or(expanded)
}

/// Serialises tests that read or mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
