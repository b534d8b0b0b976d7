//! [`SqliteStore`]: the SQLite implementation of [`LibraryStore`].

use std::{collections::BTreeSet, path::Path};

use rusqlite::OptionalExtension as _;

use folio_core::{
  collection::{self, Collection, CollectionEntry},
  item::{Item, ItemId, NewItem},
  store::{ItemQuery, LibraryStore},
};

use crate::{
  Error, Result,
  encode::{
    RawEntry, RawItem, collection_from_name, encode_creators, encode_field_data,
  },
  schema::{PRAGMAS, SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio library backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tracing::debug!(path = %path.display(), "opening library");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
      })
      .await?;
    tracing::debug!(version = SCHEMA_VERSION, "schema initialised");
    Ok(())
  }

  /// The value of `PRAGMA user_version` for this library.
  pub async fn schema_version(&self) -> Result<i64> {
    Ok(
      self
        .conn
        .call(|conn| {
          Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
        })
        .await?,
    )
  }

  /// Fail with [`Error::ItemNotFound`] unless the item exists.
  async fn require_item(&self, id: ItemId) -> Result<()> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row("SELECT 1 FROM item WHERE id = ?1", [id.0], |_| Ok(()))
            .optional()?
            .is_some(),
        )
      })
      .await?;

    if exists { Ok(()) } else { Err(Error::ItemNotFound(id)) }
  }

  /// Fail with [`Error::CollectionNotFound`] unless the collection exists.
  async fn require_collection(&self, name: &str) -> Result<()> {
    let name_owned = name.to_owned();
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM collection WHERE name = ?1",
              [&name_owned],
              |_| Ok(()),
            )
            .optional()?
            .is_some(),
        )
      })
      .await?;

    if exists {
      Ok(())
    } else {
      Err(Error::CollectionNotFound(name.to_owned()))
    }
  }
}

// ─── LibraryStore impl ───────────────────────────────────────────────────────

impl LibraryStore for SqliteStore {
  type Error = Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn add_item(&self, input: NewItem) -> Result<Item> {
    let item_type  = input.item_type.clone();
    let field_data = encode_field_data(&input.field_data)?;
    let creators   = encode_creators(&input.creators)?;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO item (type, field_data, creators) VALUES (?1, ?2, ?3)",
          rusqlite::params![item_type, field_data, creators],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(item = id, "item added");
    Ok(Item::from_new(ItemId(id), input))
  }

  async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM item WHERE id = ?1", RawItem::COLUMNS),
              [id.0],
              RawItem::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>> {
    if let Some(name) = &query.collection {
      self.require_collection(name).await?;
    }

    let collection = query.collection.clone();
    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(name) = collection {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM item
             WHERE id IN (SELECT item FROM collection_entry WHERE collection = ?1)
             ORDER BY id",
            RawItem::COLUMNS
          ))?;
          stmt
            .query_map([name], RawItem::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn
            .prepare(&format!("SELECT {} FROM item ORDER BY id", RawItem::COLUMNS))?;
          stmt
            .query_map([], RawItem::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    let mut items: Vec<Item> = raws
      .into_iter()
      .map(RawItem::into_item)
      .collect::<Result<_>>()?;

    if let Some(text) = query.text.as_deref() {
      items.retain(|item| item.matches(text));
    }

    Ok(items)
  }

  async fn update_item(&self, item: &Item) -> Result<()> {
    let id         = item.id;
    let item_type  = item.item_type.clone();
    let field_data = encode_field_data(&item.field_data)?;
    let creators   = encode_creators(&item.creators)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE item SET type = ?1, field_data = ?2, creators = ?3 WHERE id = ?4",
          rusqlite::params![item_type, field_data, creators, id.0],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ItemNotFound(id));
    }
    tracing::debug!(item = id.0, "item updated");
    Ok(())
  }

  async fn duplicate_item(&self, id: ItemId) -> Result<Item> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "INSERT INTO item (type, field_data, creators)
                 SELECT type, field_data, creators FROM item WHERE id = ?1
                 RETURNING {}",
                RawItem::COLUMNS
              ),
              [id.0],
              RawItem::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    let item = raw.ok_or(Error::ItemNotFound(id))?.into_item()?;
    tracing::debug!(source = id.0, item = item.id.0, "item duplicated");
    Ok(item)
  }

  async fn delete_item(&self, id: ItemId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM item WHERE id = ?1", [id.0])?)
      })
      .await?;

    if removed > 0 {
      tracing::info!(item = id.0, "item deleted");
    }
    Ok(removed > 0)
  }

  // ── Collections ───────────────────────────────────────────────────────────

  async fn create_collection(&self, name: &str) -> Result<Collection> {
    let collection = Collection::new(name)?;
    let name_owned = collection.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO collection (name) VALUES (?1)", [name_owned])?;
        Ok(())
      })
      .await?;

    tracing::debug!(collection = %collection.name, "collection created");
    Ok(collection)
  }

  async fn create_untitled_collection(&self) -> Result<Collection> {
    let name = self
      .conn
      .call(|conn| {
        let taken = {
          let mut stmt = conn.prepare(
            "SELECT name FROM collection WHERE name LIKE ?1",
          )?;
          stmt
            .query_map([format!("{} %", collection::UNTITLED_PREFIX)], |row| {
              row.get::<_, String>(0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let name =
          collection::first_free_untitled_name(taken.iter().map(String::as_str));
        conn.execute("INSERT INTO collection (name) VALUES (?1)", [&name])?;
        Ok(name)
      })
      .await?;

    tracing::debug!(collection = %name, "untitled collection created");
    Ok(collection_from_name(name))
  }

  async fn list_collections(&self) -> Result<Vec<Collection>> {
    let names: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name FROM collection ORDER BY name")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(names.into_iter().map(collection_from_name).collect())
  }

  async fn get_collection(&self, name: &str) -> Result<Option<Collection>> {
    let name_owned = name.to_owned();
    let found: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name FROM collection WHERE name = ?1",
              [name_owned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(found.map(collection_from_name))
  }

  async fn rename_collection(&self, old: &str, new: &str) -> Result<Collection> {
    let renamed = Collection::new(new)?;
    if old == new {
      self.require_collection(old).await?;
      return Ok(renamed);
    }

    let old_owned = old.to_owned();
    let new_owned = renamed.name.clone();

    // `collection.name` is referenced without ON UPDATE CASCADE, so the row is
    // replaced and the entries re-pointed inside one transaction.
    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row(
            "SELECT 1 FROM collection WHERE name = ?1",
            [&old_owned],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(false);
        }

        tx.execute("INSERT INTO collection (name) VALUES (?1)", [&new_owned])?;
        tx.execute(
          "UPDATE collection_entry SET collection = ?1 WHERE collection = ?2",
          rusqlite::params![new_owned, old_owned],
        )?;
        tx.execute("DELETE FROM collection WHERE name = ?1", [&old_owned])?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::CollectionNotFound(old.to_owned()));
    }
    tracing::info!(from = old, to = %renamed.name, "collection renamed");
    Ok(renamed)
  }

  async fn delete_collection(&self, name: &str) -> Result<bool> {
    let name_owned = name.to_owned();
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM collection WHERE name = ?1", [name_owned])?)
      })
      .await?;

    if removed > 0 {
      tracing::info!(collection = name, "collection deleted");
    }
    Ok(removed > 0)
  }

  // ── Membership ────────────────────────────────────────────────────────────

  async fn add_to_collection(
    &self,
    collection: &str,
    item: ItemId,
  ) -> Result<CollectionEntry> {
    let collection_owned = collection.to_owned();

    let raw = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(
            "SELECT id, collection, item FROM collection_entry
             WHERE collection = ?1 AND item = ?2
             ORDER BY id LIMIT 1",
            rusqlite::params![collection_owned, item.0],
            RawEntry::from_row,
          )
          .optional()?;
        if let Some(entry) = existing {
          return Ok(entry);
        }

        conn.execute(
          "INSERT INTO collection_entry (collection, item) VALUES (?1, ?2)",
          rusqlite::params![collection_owned, item.0],
        )?;
        Ok(RawEntry {
          id:         conn.last_insert_rowid(),
          collection: collection_owned,
          item:       item.0,
        })
      })
      .await?;

    tracing::debug!(collection, item = item.0, entry = raw.id, "entry recorded");
    Ok(raw.into_entry())
  }

  async fn remove_from_collection(
    &self,
    collection: &str,
    item: ItemId,
  ) -> Result<usize> {
    let collection_owned = collection.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.execute(
            "DELETE FROM collection_entry WHERE collection = ?1 AND item = ?2",
            rusqlite::params![collection_owned, item.0],
          )?)
        })
        .await?,
    )
  }

  async fn entries_in_collection(
    &self,
    collection: &str,
  ) -> Result<Vec<CollectionEntry>> {
    self.require_collection(collection).await?;

    let collection_owned = collection.to_owned();
    let raws: Vec<RawEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, collection, item FROM collection_entry
           WHERE collection = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map([collection_owned], RawEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawEntry::into_entry).collect())
  }

  async fn collections_of_item(&self, item: ItemId) -> Result<Vec<Collection>> {
    self.require_item(item).await?;

    let names: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT collection FROM collection_entry
           WHERE item = ?1 ORDER BY collection",
        )?;
        let rows = stmt
          .query_map([item.0], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(names.into_iter().map(collection_from_name).collect())
  }

  async fn set_item_collections(
    &self,
    item: ItemId,
    collections: &[String],
  ) -> Result<()> {
    self.require_item(item).await?;

    let names: BTreeSet<String> = collections.iter().cloned().collect();
    let count = names.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM collection_entry WHERE item = ?1", [item.0])?;
        for name in &names {
          tx.execute(
            "INSERT INTO collection_entry (collection, item) VALUES (?1, ?2)",
            rusqlite::params![name, item.0],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(item = item.0, collections = count, "memberships replaced");
    Ok(())
  }
}
