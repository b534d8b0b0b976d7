//! The `LibraryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `folio-store-sqlite`).
//! Front ends depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  collection::{Collection, CollectionEntry},
  item::{Item, ItemId, NewItem},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`LibraryStore::list_items`].
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
  /// Only items with an entry in this collection.
  pub collection: Option<String>,
  /// Case-insensitive text filter; see [`Item::matches`].
  pub text:       Option<String>,
}

impl ItemQuery {
  pub fn in_collection(name: impl Into<String>) -> Self {
    Self { collection: Some(name.into()), ..Self::default() }
  }

  pub fn search(text: impl Into<String>) -> Self {
    Self { text: Some(text.into()), ..Self::default() }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Folio library backend.
///
/// Referential integrity between entries and their parents is the backend's
/// job: deleting an item or a collection removes the entries that reference
/// it, and an entry can never point at a missing item or collection.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait LibraryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Persist a new item and return it with its assigned id.
  fn add_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// List items, ordered by id.
  fn list_items<'a>(
    &'a self,
    query: &'a ItemQuery,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;

  /// Overwrite the type, fields and creators of an existing item.
  fn update_item<'a>(
    &'a self,
    item: &'a Item,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Copy an item into a new row. Collection memberships are not copied.
  fn duplicate_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Delete an item and, by cascade, its collection entries.
  /// Returns `false` if no such item existed.
  fn delete_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Collections ───────────────────────────────────────────────────────

  /// Create a collection. Fails if the name is blank or already taken.
  fn create_collection<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Collection, Self::Error>> + Send + 'a;

  /// Create a collection named `Collection N` for the lowest free `N`.
  fn create_untitled_collection(
    &self,
  ) -> impl Future<Output = Result<Collection, Self::Error>> + Send + '_;

  /// All collections, ordered by name.
  fn list_collections(
    &self,
  ) -> impl Future<Output = Result<Vec<Collection>, Self::Error>> + Send + '_;

  fn get_collection<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Collection>, Self::Error>> + Send + 'a;

  /// Rename a collection, carrying its entries over to the new name.
  fn rename_collection<'a>(
    &'a self,
    old: &'a str,
    new: &'a str,
  ) -> impl Future<Output = Result<Collection, Self::Error>> + Send + 'a;

  /// Delete a collection and, by cascade, its entries. Items are untouched.
  /// Returns `false` if no such collection existed.
  fn delete_collection<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Membership ────────────────────────────────────────────────────────

  /// Record that `item` belongs to `collection`. If the pair is already
  /// recorded the existing entry is returned.
  fn add_to_collection<'a>(
    &'a self,
    collection: &'a str,
    item: ItemId,
  ) -> impl Future<Output = Result<CollectionEntry, Self::Error>> + Send + 'a;

  /// Remove every entry for the pair. Returns the number removed.
  fn remove_from_collection<'a>(
    &'a self,
    collection: &'a str,
    item: ItemId,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Entries of a collection, ordered by entry id.
  fn entries_in_collection<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Vec<CollectionEntry>, Self::Error>> + Send + 'a;

  /// Collections the item belongs to, ordered by name.
  fn collections_of_item(
    &self,
    item: ItemId,
  ) -> impl Future<Output = Result<Vec<Collection>, Self::Error>> + Send + '_;

  /// Replace the item's memberships with exactly `collections` (duplicates in
  /// the input are ignored). Atomic: either all entries change or none do.
  fn set_item_collections<'a>(
    &'a self,
    item: ItemId,
    collections: &'a [String],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
