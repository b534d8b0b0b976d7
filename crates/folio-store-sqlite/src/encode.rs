//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! `field_data` and `creators` are stored as compact JSON. Creators are
//! written as an object keyed by creator type; reads also accept the flat
//! array form used by Zotero exports, including an empty array.

use folio_core::{
  collection::{Collection, CollectionEntry, EntryId},
  item::{Creators, FieldData, Item, ItemId, NameData},
};
use serde::Deserialize;

use crate::Result;

// ─── Field data ──────────────────────────────────────────────────────────────

pub fn encode_field_data(fields: &FieldData) -> Result<String> {
  Ok(serde_json::to_string(fields)?)
}

pub fn decode_field_data(s: &str) -> Result<FieldData> {
  Ok(serde_json::from_str(s)?)
}

// ─── Creators ────────────────────────────────────────────────────────────────

pub fn encode_creators(creators: &Creators) -> Result<String> {
  Ok(serde_json::to_string(creators)?)
}

/// One element of the flat creator array form.
#[derive(Deserialize)]
struct FlatCreator {
  #[serde(rename = "creatorType")]
  creator_type: String,
  #[serde(flatten)]
  name:         NameData,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCreators {
  Grouped(Creators),
  Flat(Vec<FlatCreator>),
}

pub fn decode_creators(s: &str) -> Result<Creators> {
  Ok(match serde_json::from_str::<StoredCreators>(s)? {
    StoredCreators::Grouped(creators) => creators,
    StoredCreators::Flat(flat) => {
      let mut creators = Creators::new();
      for FlatCreator { creator_type, name } in flat {
        creators.entry(creator_type).or_default().push(name);
      }
      creators
    }
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `item` row.
pub struct RawItem {
  pub id:         i64,
  pub item_type:  String,
  pub field_data: String,
  pub creators:   String,
}

impl RawItem {
  /// Column order expected by [`RawItem::from_row`].
  pub const COLUMNS: &'static str = "id, type, field_data, creators";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      item_type:  row.get(1)?,
      field_data: row.get(2)?,
      creators:   row.get(3)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:         ItemId(self.id),
      item_type:  self.item_type,
      field_data: decode_field_data(&self.field_data)?,
      creators:   decode_creators(&self.creators)?,
    })
  }
}

/// Raw values read directly from a `collection_entry` row.
pub struct RawEntry {
  pub id:         i64,
  pub collection: String,
  pub item:       i64,
}

impl RawEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, collection: row.get(1)?, item: row.get(2)? })
  }

  pub fn into_entry(self) -> CollectionEntry {
    CollectionEntry {
      id:         EntryId(self.id),
      collection: self.collection,
      item:       ItemId(self.item),
    }
  }
}

/// Collection rows are already valid: the name was checked on the way in.
pub fn collection_from_name(name: String) -> Collection { Collection { name } }
