/// Default currency name shown when a guild never set one.
pub const DEFAULT_CURRENCY: &str = "dollars";
/// Default guild language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Per-guild configuration record.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct GuildSettings {
    #[sqlx(try_from = "i64")]
    pub guild_id: u64,
    pub start_money: f64,
    pub currency: String,
    pub language: String,
    pub exp_enabled: bool,
    /// Custom message prefix. The default prefix keeps working alongside it.
    pub prefix: Option<String>,
    pub hide_inventory: bool,
    pub wipe_on_leave: bool,
    /// Seconds before bot replies are removed, `0` meaning never.
    #[sqlx(try_from = "i64")]
    pub message_delete_secs: u64,
    pub maps: Vec<String>,
    pub default_map: Option<String>,
}

impl GuildSettings {
    /// Settings used for guilds that have no stored row yet.
    pub fn defaults(guild_id: u64) -> Self {
        Self {
            guild_id,
            start_money: 0.0,
            currency: DEFAULT_CURRENCY.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            exp_enabled: true,
            prefix: None,
            hide_inventory: false,
            wipe_on_leave: false,
            message_delete_secs: 0,
            maps: Vec::new(),
            default_map: None,
        }
    }
}
