//! Collections and their membership entries.
//!
//! A collection is identified by its name alone; there is no surrogate key.
//! Membership is recorded as one [`CollectionEntry`] per (collection, item)
//! pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, item::ItemId};

/// Prefix used when generating names for untitled collections.
pub const UNTITLED_PREFIX: &str = "Collection";

/// Surrogate key of a `collection_entry` row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A named grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Collection {
  pub name: String,
}

impl Collection {
  /// Build a collection after validating its name.
  pub fn new(name: impl Into<String>) -> Result<Self> {
    let name = name.into();
    validate_name(&name)?;
    Ok(Self { name })
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

/// A collection name must contain at least one non-whitespace character.
pub fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::InvalidCollectionName(name.to_owned()));
  }
  Ok(())
}

/// Name for the `n`th untitled collection (1-based).
pub fn untitled_name(n: usize) -> String { format!("{UNTITLED_PREFIX} {n}") }

/// The first `Collection N` name not present in `taken`.
pub fn first_free_untitled_name<'a>(
  taken: impl IntoIterator<Item = &'a str>,
) -> String {
  let taken: std::collections::HashSet<&str> = taken.into_iter().collect();
  // At most `taken.len()` numbers are occupied, so this stops by then.
  let mut n = 1;
  while taken.contains(untitled_name(n).as_str()) {
    n += 1;
  }
  untitled_name(n)
}

/// A join row recording that `item` belongs to `collection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
  pub id:         EntryId,
  pub collection: String,
  pub item:       ItemId,
}
