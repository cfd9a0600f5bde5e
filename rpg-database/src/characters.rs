use crate::{Database, Result, key};

pub async fn count_characters(db: &Database, guild_id: u64) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM characters WHERE guild_id = $1")
        .bind(key(guild_id))
        .fetch_one(db.pool())
        .await?;

    Ok(count.max(0) as u64)
}
