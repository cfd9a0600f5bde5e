use crate::model::GuildSettings;
use crate::{Database, Result, key};

const SELECT_SETTINGS: &str = "SELECT guild_id, start_money, currency, language, exp_enabled, \
     prefix, hide_inventory, wipe_on_leave, message_delete_secs, maps, default_map \
     FROM guild_settings WHERE guild_id = $1";

/// Load the settings for a guild, falling back to defaults when none are stored.
pub async fn get_guild_data(db: &Database, guild_id: u64) -> Result<GuildSettings> {
    let settings = sqlx::query_as::<_, GuildSettings>(SELECT_SETTINGS)
        .bind(key(guild_id))
        .fetch_optional(db.pool())
        .await?;

    Ok(settings.unwrap_or_else(|| GuildSettings::defaults(guild_id)))
}

/// Read only the configured language code.
pub async fn get_language(db: &Database, guild_id: u64) -> Result<String> {
    Ok(get_guild_data(db, guild_id).await?.language)
}

/// Set the money new characters start with.
pub async fn set_start(db: &Database, guild_id: u64, amount: f64) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, start_money) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET start_money = EXCLUDED.start_money",
    )
    .bind(key(guild_id))
    .bind(amount)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn set_currency(db: &Database, guild_id: u64, currency: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, currency) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET currency = EXCLUDED.currency",
    )
    .bind(key(guild_id))
    .bind(currency)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn set_language(db: &Database, guild_id: u64, language: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, language) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET language = EXCLUDED.language",
    )
    .bind(key(guild_id))
    .bind(language)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Set the reply auto-delete delay in seconds. `0` disables auto-delete.
pub async fn set_delete_time(db: &Database, guild_id: u64, seconds: u64) -> Result<()> {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);

    sqlx::query(
        "INSERT INTO guild_settings (guild_id, message_delete_secs) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET message_delete_secs = EXCLUDED.message_delete_secs",
    )
    .bind(key(guild_id))
    .bind(seconds)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn set_prefix(db: &Database, guild_id: u64, prefix: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, prefix) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET prefix = EXCLUDED.prefix",
    )
    .bind(key(guild_id))
    .bind(prefix)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn set_default_map(db: &Database, guild_id: u64, map: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, default_map) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET default_map = EXCLUDED.default_map",
    )
    .bind(key(guild_id))
    .bind(map)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Whether player data is wiped when a member leaves the guild.
pub async fn set_leave_setting(db: &Database, guild_id: u64, wipe: bool) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, wipe_on_leave) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET wipe_on_leave = EXCLUDED.wipe_on_leave",
    )
    .bind(key(guild_id))
    .bind(wipe)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn set_hide_inventory(db: &Database, guild_id: u64, hide: bool) -> Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, hide_inventory) VALUES ($1, $2) \
         ON CONFLICT (guild_id) DO UPDATE SET hide_inventory = EXCLUDED.hide_inventory",
    )
    .bind(key(guild_id))
    .bind(hide)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Every guild with a custom prefix, used to warm the prefix cache.
pub async fn custom_prefixes(db: &Database) -> Result<Vec<(u64, String)>> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT guild_id, prefix FROM guild_settings WHERE prefix IS NOT NULL",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows
        .into_iter()
        .map(|(guild_id, prefix)| (guild_id as u64, prefix))
        .collect())
}
