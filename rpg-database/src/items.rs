use std::collections::BTreeMap;

use sqlx::types::Json;
use tracing::debug;

use crate::model::ServerItem;
use crate::{Database, DatabaseError, Result, key};

const UPSERT_ITEM: &str = "INSERT INTO server_items (guild_id, name, description, meta) \
     VALUES ($1, $2, $3, $4) \
     ON CONFLICT (guild_id, name) DO UPDATE \
     SET description = EXCLUDED.description, meta = EXCLUDED.meta";

/// All items of a guild keyed by exact item name.
pub async fn get_guild_items(db: &Database, guild_id: u64) -> Result<BTreeMap<String, ServerItem>> {
    let items = sqlx::query_as::<_, ServerItem>(
        "SELECT name, description, meta FROM server_items WHERE guild_id = $1",
    )
    .bind(key(guild_id))
    .fetch_all(db.pool())
    .await?;

    Ok(items
        .into_iter()
        .map(|item| (item.name.clone(), item))
        .collect())
}

/// Look up a single item by its exact name.
pub async fn get_item(db: &Database, guild_id: u64, name: &str) -> Result<Option<ServerItem>> {
    let item = sqlx::query_as::<_, ServerItem>(
        "SELECT name, description, meta FROM server_items WHERE guild_id = $1 AND name = $2",
    )
    .bind(key(guild_id))
    .bind(name)
    .fetch_optional(db.pool())
    .await?;

    Ok(item)
}

pub async fn count_items(db: &Database, guild_id: u64) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM server_items WHERE guild_id = $1")
        .bind(key(guild_id))
        .fetch_one(db.pool())
        .await?;

    Ok(count.max(0) as u64)
}

/// Create or replace a single item.
pub async fn new_item(db: &Database, guild_id: u64, item: &ServerItem) -> Result<()> {
    sqlx::query(UPSERT_ITEM)
        .bind(key(guild_id))
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(Json(&item.meta))
        .execute(db.pool())
        .await?;

    Ok(())
}

/// Create or replace many items in one transaction.
pub async fn new_items<'a>(
    db: &Database,
    guild_id: u64,
    items: impl IntoIterator<Item = &'a ServerItem>,
) -> Result<u64> {
    let mut tx = db.pool().begin().await?;
    let mut written = 0_u64;

    for item in items {
        sqlx::query(UPSERT_ITEM)
            .bind(key(guild_id))
            .bind(&item.name)
            .bind(item.description.as_deref())
            .bind(Json(&item.meta))
            .execute(&mut *tx)
            .await?;
        written += 1;
    }

    tx.commit().await?;
    debug!(guild_id, written, "stored server items");

    Ok(written)
}

/// Remove an item by exact name.
///
/// Returns [`DatabaseError::ItemNotFound`] when nothing matched.
pub async fn remove_item(db: &Database, guild_id: u64, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM server_items WHERE guild_id = $1 AND name = $2")
        .bind(key(guild_id))
        .bind(name)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::ItemNotFound(name.to_owned()));
    }

    Ok(())
}

/// Remove every listed item that exists; missing names are ignored.
pub async fn remove_items(db: &Database, guild_id: u64, names: &[String]) -> Result<u64> {
    let result = sqlx::query("DELETE FROM server_items WHERE guild_id = $1 AND name = ANY($2)")
        .bind(key(guild_id))
        .bind(names)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected())
}
