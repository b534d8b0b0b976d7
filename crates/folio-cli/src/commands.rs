//! Subcommand definitions and their execution against a [`LibraryStore`].

use std::{
  io::Write,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use folio_core::{
  collection::Collection,
  item::{Item, ItemId, NameData, NewItem},
  store::{ItemQuery, LibraryStore},
};
use serde::Serialize;

// ─── Definitions ──────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Create a new library (default: in the user data directory).
  Init {
    /// Directory to create the library in, or the library file path.
    path: Option<PathBuf>,
  },

  #[command(flatten)]
  Store(StoreCommand),
}

/// Commands that operate on an open library.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
  /// Manage collections.
  #[command(subcommand)]
  Collection(CollectionCommand),

  /// Manage items.
  #[command(subcommand)]
  Item(ItemCommand),
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommand {
  /// List all collections.
  List,
  /// Create a collection; without a name, the next free "Collection N".
  Create { name: Option<String> },
  /// Rename a collection, keeping its items.
  Rename { old: String, new: String },
  /// Delete a collection. Its items stay in the library.
  Delete { name: String },
  /// List the items in a collection.
  Items { name: String },
  /// Add an item to a collection.
  Add { name: String, id: i64 },
  /// Remove an item from a collection.
  Remove { name: String, id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
  /// Create an item of the given type (e.g. book, journalArticle).
  New {
    item_type: String,
    /// Initial field value, as NAME=VALUE. Repeatable.
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    fields:    Vec<(String, String)>,
  },
  /// List items.
  List {
    /// Only items in this collection.
    #[arg(long)]
    collection: Option<String>,
    /// Case-insensitive text filter.
    #[arg(short, long)]
    search:     Option<String>,
  },
  /// Show one item with all fields and creators.
  Show { id: i64 },
  /// Copy an item (without its collections).
  Duplicate { id: i64 },
  /// Delete an item; it is removed from every collection.
  Delete { id: i64 },
  /// Set a field value. Date fields (`date`, `accessDate`, ...) must be
  /// YYYY-MM-DD and are stored zero-padded.
  SetField { id: i64, field: String, value: String },
  /// Remove a field.
  ClearField { id: i64, field: String },
  /// Append a creator.
  AddCreator {
    id:           i64,
    creator_type: String,
    #[command(flatten)]
    name:         NameArgs,
  },
  /// Replace the creator at INDEX (0-based) within CREATOR_TYPE. Giving no
  /// name parts removes it.
  EditCreator {
    id:           i64,
    creator_type: String,
    index:        usize,
    #[command(flatten)]
    name:         NameArgs,
  },
  /// Remove the creator at INDEX (0-based) within CREATOR_TYPE.
  RemoveCreator { id: i64, creator_type: String, index: usize },
  /// Show, or with --set replace, the collections of an item.
  Collections {
    id:  i64,
    /// Replace memberships with exactly these collections (none: clear).
    #[arg(long, num_args = 0.., value_name = "NAME")]
    set: Option<Vec<String>>,
  },
}

#[derive(Args, Debug, Default)]
pub struct NameArgs {
  #[arg(long)]
  family:                Option<String>,
  #[arg(long)]
  given:                 Option<String>,
  #[arg(long)]
  suffix:                Option<String>,
  /// Particle dropped when sorting by family name (e.g. "de" in some styles).
  #[arg(long)]
  dropping_particle:     Option<String>,
  /// Particle kept with the family name (e.g. "van" in "van Gogh").
  #[arg(long)]
  non_dropping_particle: Option<String>,
  /// Whole name as one string (institutions, unparsed names).
  #[arg(long, conflicts_with_all = [
    "family", "given", "suffix", "dropping_particle", "non_dropping_particle",
  ])]
  literal:               Option<String>,
}

impl From<NameArgs> for NameData {
  fn from(args: NameArgs) -> Self {
    NameData {
      family:                args.family,
      given:                 args.given,
      suffix:                args.suffix,
      dropping_particle:     args.dropping_particle,
      non_dropping_particle: args.non_dropping_particle,
      literal:               args.literal,
    }
  }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
  let (name, value) = s
    .split_once('=')
    .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
  if name.is_empty() {
    return Err("field name must not be empty".into());
  }
  Ok((name.to_owned(), value.to_owned()))
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `date` itself and any field named like `accessDate`.
fn is_date_field(name: &str) -> bool { name == "date" || name.ends_with("Date") }

/// Validate a field value before storing it. Dates must name a real calendar
/// day and are rewritten as zero-padded `YYYY-MM-DD`.
fn field_value(name: &str, value: String) -> Result<String> {
  if !is_date_field(name) {
    return Ok(value);
  }
  let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
    .with_context(|| format!("invalid {name} {value:?}, expected YYYY-MM-DD"))?;
  Ok(date.format(DATE_FORMAT).to_string())
}

// ─── Output ───────────────────────────────────────────────────────────────────

/// Writes either human-readable lines or JSON documents.
pub struct Output<W> {
  writer: W,
  json:   bool,
}

impl<W: Write> Output<W> {
  pub fn new(writer: W, json: bool) -> Self { Self { writer, json } }

  fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut self.writer, value)?;
    writeln!(self.writer)?;
    Ok(())
  }

  fn message(&mut self, text: &str) -> Result<()> {
    if self.json {
      return self.write_json(&serde_json::json!({ "message": text }));
    }
    writeln!(self.writer, "{text}")?;
    Ok(())
  }

  fn items(&mut self, items: &[Item]) -> Result<()> {
    if self.json {
      return self.write_json(items);
    }
    for item in items {
      writeln!(
        self.writer,
        "{:>5}  {:<16}  {:<40}  {}",
        item.id.0,
        item.item_type,
        item.title().unwrap_or(""),
        item.main_creator().map(ToString::to_string).unwrap_or_default(),
      )?;
    }
    Ok(())
  }

  fn item(&mut self, item: &Item) -> Result<()> {
    if self.json {
      return self.write_json(item);
    }
    writeln!(self.writer, "{:<16}  {}", "id", item.id)?;
    writeln!(self.writer, "{:<16}  {}", "type", item.item_type)?;
    for (field, value) in &item.field_data {
      writeln!(self.writer, "{field:<16}  {value}")?;
    }
    for (creator_type, names) in &item.creators {
      for (i, name) in names.iter().enumerate() {
        writeln!(self.writer, "{:<16}  {name}", format!("{creator_type}.{i}"))?;
      }
    }
    Ok(())
  }

  /// Report the path of a library created by `init`.
  pub fn library(&mut self, path: &Path) -> Result<()> {
    if self.json {
      return self.write_json(&serde_json::json!({ "library": path }));
    }
    writeln!(self.writer, "{}", path.display())?;
    Ok(())
  }

  fn collections(&mut self, collections: &[Collection]) -> Result<()> {
    if self.json {
      return self.write_json(collections);
    }
    for collection in collections {
      writeln!(self.writer, "{collection}")?;
    }
    Ok(())
  }
}

// ─── Execution ────────────────────────────────────────────────────────────────

async fn load_item<S: LibraryStore>(store: &S, id: i64) -> Result<Item> {
  store
    .get_item(ItemId(id))
    .await?
    .ok_or_else(|| anyhow!("item {id} not found"))
}

/// Run a collection or item command against `store`.
pub async fn run<S, W>(
  store: &S,
  command: StoreCommand,
  out: &mut Output<W>,
) -> Result<()>
where
  S: LibraryStore,
  W: Write,
{
  match command {
    StoreCommand::Collection(cmd) => run_collection(store, cmd, out).await,
    StoreCommand::Item(cmd) => run_item(store, cmd, out).await,
  }
}

async fn run_collection<S, W>(
  store: &S,
  command: CollectionCommand,
  out: &mut Output<W>,
) -> Result<()>
where
  S: LibraryStore,
  W: Write,
{
  match command {
    CollectionCommand::List => {
      let collections = store.list_collections().await?;
      out.collections(&collections)
    }
    CollectionCommand::Create { name } => {
      let collection = match name {
        Some(name) => store
          .create_collection(&name)
          .await
          .with_context(|| format!("cannot create collection {name:?}"))?,
        None => store.create_untitled_collection().await?,
      };
      out.collections(std::slice::from_ref(&collection))
    }
    CollectionCommand::Rename { old, new } => {
      let collection = store
        .rename_collection(&old, &new)
        .await
        .with_context(|| format!("cannot rename collection {old:?} to {new:?}"))?;
      out.collections(std::slice::from_ref(&collection))
    }
    CollectionCommand::Delete { name } => {
      if !store.delete_collection(&name).await? {
        bail!("collection {name:?} not found");
      }
      out.message(&format!("deleted collection {name:?}"))
    }
    CollectionCommand::Items { name } => {
      let items = store.list_items(&ItemQuery::in_collection(name)).await?;
      out.items(&items)
    }
    CollectionCommand::Add { name, id } => {
      store
        .add_to_collection(&name, ItemId(id))
        .await
        .with_context(|| format!("cannot add item {id} to {name:?}"))?;
      out.message(&format!("added item {id} to {name:?}"))
    }
    CollectionCommand::Remove { name, id } => {
      let removed = store.remove_from_collection(&name, ItemId(id)).await?;
      if removed == 0 {
        bail!("item {id} is not in collection {name:?}");
      }
      out.message(&format!("removed item {id} from {name:?}"))
    }
  }
}

async fn run_item<S, W>(store: &S, command: ItemCommand, out: &mut Output<W>) -> Result<()>
where
  S: LibraryStore,
  W: Write,
{
  match command {
    ItemCommand::New { item_type, fields } => {
      let mut input = NewItem::new(item_type);
      for (name, value) in fields {
        let value = field_value(&name, value)?;
        input = input.with_field(name, value);
      }
      let item = store.add_item(input).await?;
      out.item(&item)
    }
    ItemCommand::List { collection, search } => {
      let items = store
        .list_items(&ItemQuery { collection, text: search })
        .await?;
      out.items(&items)
    }
    ItemCommand::Show { id } => {
      let item = load_item(store, id).await?;
      out.item(&item)
    }
    ItemCommand::Duplicate { id } => {
      let item = store.duplicate_item(ItemId(id)).await?;
      out.item(&item)
    }
    ItemCommand::Delete { id } => {
      if !store.delete_item(ItemId(id)).await? {
        bail!("item {id} not found");
      }
      out.message(&format!("deleted item {id}"))
    }
    ItemCommand::SetField { id, field, value } => {
      let value = field_value(&field, value)?;
      let mut item = load_item(store, id).await?;
      item.field_data.insert(field, value);
      store.update_item(&item).await?;
      out.item(&item)
    }
    ItemCommand::ClearField { id, field } => {
      let mut item = load_item(store, id).await?;
      if item.field_data.remove(&field).is_none() {
        bail!("item {id} has no field {field:?}");
      }
      store.update_item(&item).await?;
      out.item(&item)
    }
    ItemCommand::AddCreator { id, creator_type, name } => {
      let name = NameData::from(name);
      if name.is_empty() {
        bail!("a creator needs at least one name part");
      }
      let mut item = load_item(store, id).await?;
      item.creators.entry(creator_type).or_default().push(name);
      store.update_item(&item).await?;
      out.item(&item)
    }
    ItemCommand::EditCreator { id, creator_type, index, name } => {
      let name = NameData::from(name);
      let mut item = load_item(store, id).await?;
      let Some(slot) = item
        .creators
        .get_mut(&creator_type)
        .and_then(|names| names.get_mut(index))
      else {
        bail!("item {id} has no {creator_type} at index {index}");
      };
      if name.is_empty() {
        item.remove_creator(&creator_type, index);
      } else {
        *slot = name;
      }
      store.update_item(&item).await?;
      out.item(&item)
    }
    ItemCommand::RemoveCreator { id, creator_type, index } => {
      let mut item = load_item(store, id).await?;
      if item.remove_creator(&creator_type, index).is_none() {
        bail!("item {id} has no {creator_type} at index {index}");
      }
      store.update_item(&item).await?;
      out.item(&item)
    }
    ItemCommand::Collections { id, set } => {
      if let Some(names) = set {
        store
          .set_item_collections(ItemId(id), &names)
          .await
          .with_context(|| format!("cannot set collections of item {id}"))?;
      }
      let collections = store.collections_of_item(ItemId(id)).await?;
      out.collections(&collections)
    }
  }
}

#[cfg(test)]
mod tests {
  use folio_store_sqlite::SqliteStore;

  use super::*;

  async fn exec(store: &SqliteStore, command: StoreCommand) -> Result<String> {
    let mut out = Output::new(Vec::new(), false);
    run(store, command, &mut out).await?;
    Ok(String::from_utf8(out.writer).unwrap())
  }

  async fn exec_json(store: &SqliteStore, command: StoreCommand) -> serde_json::Value {
    let mut out = Output::new(Vec::new(), true);
    run(store, command, &mut out).await.unwrap();
    serde_json::from_slice(&out.writer).unwrap()
  }

  fn item(cmd: ItemCommand) -> StoreCommand { StoreCommand::Item(cmd) }

  fn collection(cmd: CollectionCommand) -> StoreCommand {
    StoreCommand::Collection(cmd)
  }

  fn set_field(id: i64, field: &str, value: &str) -> StoreCommand {
    item(ItemCommand::SetField { id, field: field.into(), value: value.into() })
  }

  #[test]
  fn parse_field_splits_on_first_equals() {
    assert_eq!(
      parse_field("url=https://x.org/?a=b").unwrap(),
      ("url".to_owned(), "https://x.org/?a=b".to_owned())
    );
    assert!(parse_field("title").is_err());
    assert!(parse_field("=x").is_err());
  }

  #[tokio::test]
  async fn new_item_then_edit_fields_and_creators() {
    let store = SqliteStore::open_in_memory().await.unwrap();

    let created = exec_json(
      &store,
      item(ItemCommand::New {
        item_type: "book".into(),
        fields:    vec![("title".into(), "Baudolino".into())],
      }),
    )
    .await;
    assert_eq!(created["type"], "book");
    let id = created["id"].as_i64().unwrap();

    exec(&store, item(ItemCommand::SetField {
      id,
      field: "date".into(),
      value: "2000-01-05".into(),
    }))
    .await
    .unwrap();
    exec(&store, item(ItemCommand::AddCreator {
      id,
      creator_type: "author".into(),
      name: NameArgs {
        family: Some("Eco".into()),
        given: Some("Umberto".into()),
        ..NameArgs::default()
      },
    }))
    .await
    .unwrap();

    let shown = exec(&store, item(ItemCommand::Show { id })).await.unwrap();
    assert!(shown.contains("Baudolino"));
    assert!(shown.contains("2000-01-05"));
    assert!(shown.contains("author.0"));
    assert!(shown.contains("Umberto Eco"));

    exec(&store, item(ItemCommand::RemoveCreator {
      id,
      creator_type: "author".into(),
      index: 0,
    }))
    .await
    .unwrap();
    exec(&store, item(ItemCommand::ClearField { id, field: "date".into() }))
      .await
      .unwrap();

    let stored = store.get_item(ItemId(id)).await.unwrap().unwrap();
    assert!(stored.creators.is_empty());
    assert!(!stored.field_data.contains_key("date"));
  }

  #[tokio::test]
  async fn empty_creator_is_rejected() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let item_id = store.add_item(NewItem::new("book")).await.unwrap().id.0;

    let err = exec(&store, item(ItemCommand::AddCreator {
      id:           item_id,
      creator_type: "author".into(),
      name:         NameArgs::default(),
    }))
    .await
    .unwrap_err();
    assert!(err.to_string().contains("name part"));
  }

  #[tokio::test]
  async fn collection_lifecycle() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store.add_item(NewItem::new("book").with_field("title", "Rose")).await.unwrap().id.0;

    let out = exec(&store, collection(CollectionCommand::Create { name: None }))
      .await
      .unwrap();
    assert_eq!(out.trim(), "Collection 1");

    exec(&store, collection(CollectionCommand::Rename {
      old: "Collection 1".into(),
      new: "Books".into(),
    }))
    .await
    .unwrap();
    exec(&store, collection(CollectionCommand::Add { name: "Books".into(), id }))
      .await
      .unwrap();

    let listed = exec(&store, collection(CollectionCommand::Items { name: "Books".into() }))
      .await
      .unwrap();
    assert!(listed.contains("Rose"));

    let memberships = exec_json(&store, item(ItemCommand::Collections { id, set: None })).await;
    assert_eq!(memberships, serde_json::json!([{ "name": "Books" }]));

    exec(&store, collection(CollectionCommand::Delete { name: "Books".into() }))
      .await
      .unwrap();
    assert!(store.get_item(ItemId(id)).await.unwrap().is_some());
    assert!(store.collections_of_item(ItemId(id)).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn set_collections_replaces_memberships() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store.add_item(NewItem::new("book")).await.unwrap().id.0;
    store.create_collection("A").await.unwrap();
    store.create_collection("B").await.unwrap();

    let out = exec(&store, item(ItemCommand::Collections {
      id,
      set: Some(vec!["B".into(), "A".into()]),
    }))
    .await
    .unwrap();
    assert_eq!(out, "A\nB\n");

    let out = exec(&store, item(ItemCommand::Collections { id, set: Some(vec![]) }))
      .await
      .unwrap();
    assert!(out.is_empty());
  }

  #[tokio::test]
  async fn missing_targets_report_errors() {
    let store = SqliteStore::open_in_memory().await.unwrap();

    let err = exec(&store, item(ItemCommand::Show { id: 9 })).await.unwrap_err();
    assert!(err.to_string().contains("item 9 not found"));

    let err = exec(&store, collection(CollectionCommand::Delete { name: "X".into() }))
      .await
      .unwrap_err();
    assert!(err.to_string().contains("not found"));

    let err = exec(&store, collection(CollectionCommand::Add { name: "X".into(), id: 1 }))
      .await
      .unwrap_err();
    let store_err = err.downcast_ref::<folio_store_sqlite::Error>().unwrap();
    assert!(store_err.is_foreign_key_violation());
  }

  #[tokio::test]
  async fn search_filters_listing() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.add_item(NewItem::new("book").with_field("title", "Rose")).await.unwrap();
    store.add_item(NewItem::new("book").with_field("title", "Pendulum")).await.unwrap();

    let out = exec(&store, item(ItemCommand::List {
      collection: None,
      search:     Some("pend".into()),
    }))
    .await
    .unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Pendulum"));
  }

  #[test]
  fn date_fields_are_recognised_by_name() {
    assert!(is_date_field("date"));
    assert!(is_date_field("accessDate"));
    assert!(!is_date_field("title"));
    assert!(!is_date_field("dateline"));
  }

  #[tokio::test]
  async fn set_field_pads_dates() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store.add_item(NewItem::new("webpage")).await.unwrap().id.0;

    exec(&store, set_field(id, "date", "2000-1-5")).await.unwrap();
    exec(&store, set_field(id, "accessDate", "2024-02-29")).await.unwrap();
    exec(&store, set_field(id, "title", "2000-1-5")).await.unwrap();

    let stored = store.get_item(ItemId(id)).await.unwrap().unwrap();
    assert_eq!(stored.field_data["date"], "2000-01-05");
    assert_eq!(stored.field_data["accessDate"], "2024-02-29");
    assert_eq!(stored.field_data["title"], "2000-1-5");
  }

  #[tokio::test]
  async fn set_field_rejects_impossible_dates() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store
      .add_item(NewItem::new("book").with_field("date", "1980-01-01"))
      .await
      .unwrap()
      .id
      .0;

    for bad in ["2000-13-45", "2023-02-29", "last year", "2000/01/05"] {
      let err = exec(&store, set_field(id, "date", bad)).await.unwrap_err();
      assert!(err.to_string().contains("expected YYYY-MM-DD"), "{bad}: {err}");
    }

    let err = exec(&store, item(ItemCommand::New {
      item_type: "book".into(),
      fields:    vec![("date".into(), "2000-13-45".into())],
    }))
    .await
    .unwrap_err();
    assert!(err.to_string().contains("invalid date"));

    let stored = store.get_item(ItemId(id)).await.unwrap().unwrap();
    assert_eq!(stored.field_data["date"], "1980-01-01");
    assert_eq!(store.list_items(&ItemQuery::default()).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn edit_creator_replaces_name_in_place() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store
      .add_item(
        NewItem::new("book")
          .with_creator("author", NameData::literal("Gogh"))
          .with_creator("author", NameData::person("Eco", "Umberto")),
      )
      .await
      .unwrap()
      .id
      .0;

    exec(&store, item(ItemCommand::EditCreator {
      id,
      creator_type: "author".into(),
      index: 0,
      name: NameArgs {
        family: Some("Gogh".into()),
        given: Some("Vincent".into()),
        non_dropping_particle: Some("van".into()),
        ..NameArgs::default()
      },
    }))
    .await
    .unwrap();

    let stored = store.get_item(ItemId(id)).await.unwrap().unwrap();
    let authors = &stored.creators["author"];
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].to_string(), "Vincent van Gogh");
    assert_eq!(authors[0].literal, None);
    assert_eq!(authors[1].to_string(), "Umberto Eco");
  }

  #[tokio::test]
  async fn edit_creator_with_empty_name_removes_it() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store
      .add_item(
        NewItem::new("book")
          .with_creator("editor", NameData::person("Weaver", "William"))
          .with_creator("author", NameData::person("Eco", "Umberto")),
      )
      .await
      .unwrap()
      .id
      .0;

    exec(&store, item(ItemCommand::EditCreator {
      id,
      creator_type: "editor".into(),
      index: 0,
      name: NameArgs { dropping_particle: Some(String::new()), ..NameArgs::default() },
    }))
    .await
    .unwrap();

    let stored = store.get_item(ItemId(id)).await.unwrap().unwrap();
    assert!(!stored.creators.contains_key("editor"));
    assert_eq!(stored.creators["author"].len(), 1);

    let err = exec(&store, item(ItemCommand::EditCreator {
      id,
      creator_type: "author".into(),
      index: 4,
      name: NameArgs::default(),
    }))
    .await
    .unwrap_err();
    assert!(err.to_string().contains("no author at index 4"));
  }

  #[tokio::test]
  async fn add_creator_accepts_particles() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let id = store.add_item(NewItem::new("book")).await.unwrap().id.0;

    let shown = exec_json(&store, item(ItemCommand::AddCreator {
      id,
      creator_type: "author".into(),
      name: NameArgs {
        family: Some("Fontaine".into()),
        given: Some("Jean".into()),
        dropping_particle: Some("de".into()),
        non_dropping_particle: Some("La".into()),
        ..NameArgs::default()
      },
    }))
    .await;
    assert_eq!(
      shown["creators"]["author"][0],
      serde_json::json!({
        "family": "Fontaine",
        "given": "Jean",
        "dropping-particle": "de",
        "non-dropping-particle": "La",
      })
    );
  }

  #[test]
  fn library_path_respects_json_flag() {
    let path = Path::new("/srv/refs/folio.sqlite");

    let mut text = Output::new(Vec::new(), false);
    text.library(path).unwrap();
    assert_eq!(String::from_utf8(text.writer).unwrap(), "/srv/refs/folio.sqlite\n");

    let mut json = Output::new(Vec::new(), true);
    json.library(path).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json.writer).unwrap();
    assert_eq!(value, serde_json::json!({ "library": "/srv/refs/folio.sqlite" }));
  }
}
