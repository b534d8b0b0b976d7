//! Items: single bibliographic references.
//!
//! An item carries a free-form type discriminator (`book`, `journalArticle`,
//! ...), a map of field values and a map of creators grouped by role. The
//! store keeps `field_data` and `creators` as JSON text columns.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Surrogate key of an `item` row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

// ─── Names ───────────────────────────────────────────────────────────────────

/// A personal or institutional name, split into CSL name parts.
///
/// Institutions and names that resist parsing use `literal` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NameData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub family:                Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub given:                 Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suffix:                Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dropping_particle:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub non_dropping_particle: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub literal:               Option<String>,
}

impl NameData {
  /// A name consisting only of a literal string (e.g. an organisation).
  pub fn literal(value: impl Into<String>) -> Self {
    Self { literal: Some(value.into()), ..Self::default() }
  }

  /// A personal name with family and given parts.
  pub fn person(family: impl Into<String>, given: impl Into<String>) -> Self {
    Self {
      family: Some(family.into()),
      given: Some(given.into()),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    [
      &self.family,
      &self.given,
      &self.suffix,
      &self.dropping_particle,
      &self.non_dropping_particle,
      &self.literal,
    ]
    .iter()
    .all(|part| part.as_deref().is_none_or(str::is_empty))
  }
}

impl fmt::Display for NameData {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(literal) = &self.literal {
      return f.write_str(literal);
    }

    let parts: Vec<&str> = [
      &self.given,
      &self.dropping_particle,
      &self.non_dropping_particle,
      &self.family,
    ]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .filter(|p| !p.is_empty())
    .collect();

    f.write_str(&parts.join(" "))?;
    if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
      write!(f, ", {suffix}")?;
    }
    Ok(())
  }
}

/// Creators grouped by role (`author`, `editor`, `translator`, ...).
/// Order within a role is significant.
pub type Creators = BTreeMap<String, Vec<NameData>>;

/// Field name to value (`title`, `date`, `publisher`, ...).
pub type FieldData = BTreeMap<String, String>;

/// The creator role treated as primary when picking a display creator.
pub const PRIMARY_CREATOR_TYPE: &str = "author";

// ─── Items ───────────────────────────────────────────────────────────────────

/// Input for [`LibraryStore::add_item`](crate::store::LibraryStore::add_item).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
  #[serde(rename = "type")]
  pub item_type:  String,
  #[serde(default)]
  pub field_data: FieldData,
  #[serde(default)]
  pub creators:   Creators,
}

impl NewItem {
  /// An item of the given type with no fields and no creators.
  pub fn new(item_type: impl Into<String>) -> Self {
    Self { item_type: item_type.into(), ..Self::default() }
  }

  pub fn with_field(
    mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.field_data.insert(name.into(), value.into());
    self
  }

  pub fn with_creator(
    mut self,
    creator_type: impl Into<String>,
    name: NameData,
  ) -> Self {
    self.creators.entry(creator_type.into()).or_default().push(name);
    self
  }
}

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id:         ItemId,
  #[serde(rename = "type")]
  pub item_type:  String,
  pub field_data: FieldData,
  pub creators:   Creators,
}

impl Item {
  pub fn from_new(id: ItemId, input: NewItem) -> Self {
    Self {
      id,
      item_type: input.item_type,
      field_data: input.field_data,
      creators: input.creators,
    }
  }

  pub fn title(&self) -> Option<&str> {
    self.field_data.get("title").map(String::as_str)
  }

  /// The first author, or failing that the first creator of any role.
  pub fn main_creator(&self) -> Option<&NameData> {
    self
      .creators
      .get(PRIMARY_CREATOR_TYPE)
      .and_then(|names| names.first())
      .or_else(|| self.creators.values().flatten().next())
  }

  /// Case-insensitive substring search over the type, every field value and
  /// every rendered creator name. An empty query matches everything.
  pub fn matches(&self, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return true;
    }

    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    hit(self.item_type.as_str())
      || self.field_data.values().any(|v| hit(v.as_str()))
      || self
        .creators
        .values()
        .flatten()
        .any(|name| hit(name.to_string().as_str()))
  }

  /// Remove the creator at `index` within `creator_type`. Empty roles are
  /// dropped. Returns the removed name.
  pub fn remove_creator(
    &mut self,
    creator_type: &str,
    index: usize,
  ) -> Option<NameData> {
    let names = self.creators.get_mut(creator_type)?;
    if index >= names.len() {
      return None;
    }
    let removed = names.remove(index);
    if names.is_empty() {
      self.creators.remove(creator_type);
    }
    Some(removed)
  }
}
