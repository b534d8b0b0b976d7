//! Runtime settings: an optional TOML file overlaid by `FOLIO_*` variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::paths;

/// Settings read from `config.toml` and the environment.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
  /// Library file, or a directory to start the search from.
  #[serde(default)]
  pub library: Option<PathBuf>,
}

impl Settings {
  /// Load from `file` (or the default config location) and the environment.
  /// A missing file is not an error; a malformed one is.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    let file = file.map(Path::to_path_buf).or_else(paths::default_config_file);

    let mut builder = config::Config::builder();
    if let Some(file) = &file {
      tracing::debug!(config = %file.display(), "reading config");
      builder = builder.add_source(
        config::File::from(file.as_path())
          .format(config::FileFormat::Toml)
          .required(false),
      );
    }

    builder
      .add_source(config::Environment::with_prefix("FOLIO"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::paths::ENV_LOCK;

  #[test]
  fn reads_library_from_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "library = \"/srv/refs\"\n").unwrap();

    let settings = Settings::load(Some(&file)).unwrap();
    assert_eq!(settings.library, Some(PathBuf::from("/srv/refs")));
  }

  #[test]
  fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::fs::write(&file, "library = [").unwrap();

    assert!(Settings::load(Some(&file)).is_err());
  }

  #[test]
  fn file_without_toml_extension_is_read_as_toml() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("folio.conf");
    std::fs::write(&file, "library = \"/srv/refs\"\n").unwrap();

    let settings = Settings::load(Some(&file)).unwrap();
    assert_eq!(settings.library, Some(PathBuf::from("/srv/refs")));
  }

  #[test]
  fn environment_overrides_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "library = \"/srv/refs\"\n").unwrap();

    // SAFETY: env access in this crate's tests is serialised by ENV_LOCK.
    unsafe { std::env::set_var("FOLIO_LIBRARY", dir.path()) };
    let with_file = Settings::load(Some(&file));
    let without_file = Settings::load(Some(&dir.path().join("missing.toml")));
    // SAFETY: as above.
    unsafe { std::env::remove_var("FOLIO_LIBRARY") };

    assert_eq!(with_file.unwrap().library.as_deref(), Some(dir.path()));
    assert_eq!(without_file.unwrap().library.as_deref(), Some(dir.path()));
  }
}
