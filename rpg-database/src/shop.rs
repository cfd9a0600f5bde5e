use tracing::debug;

use crate::model::ShopEntry;
use crate::{Database, Result, key};

/// Add or replace shop listings in one transaction.
pub async fn add_shop_items(db: &Database, guild_id: u64, entries: &[ShopEntry]) -> Result<u64> {
    let mut tx = db.pool().begin().await?;

    for entry in entries {
        sqlx::query(
            "INSERT INTO shop_items (guild_id, item_name, buy, sell, level) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (guild_id, item_name) DO UPDATE \
             SET buy = EXCLUDED.buy, sell = EXCLUDED.sell, level = EXCLUDED.level",
        )
        .bind(key(guild_id))
        .bind(&entry.item_name)
        .bind(entry.buy)
        .bind(entry.sell)
        .bind(entry.level)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    debug!(guild_id, count = entries.len(), "stored shop entries");

    Ok(entries.len() as u64)
}

/// Remove listings for the given item names; missing names are ignored.
pub async fn remove_shop_items(db: &Database, guild_id: u64, names: &[String]) -> Result<u64> {
    let result =
        sqlx::query("DELETE FROM shop_items WHERE guild_id = $1 AND item_name = ANY($2)")
            .bind(key(guild_id))
            .bind(names)
            .execute(db.pool())
            .await?;

    Ok(result.rows_affected())
}
