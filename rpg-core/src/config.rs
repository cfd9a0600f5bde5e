use std::{env, path::PathBuf};

use anyhow::Context as _;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOCALE_DIR: &str = "locales";
const DEFAULT_CATALOG_DIR: &str = "data/catalogs";

/// Runtime configuration read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub locale_dir: PathBuf,
    pub catalog_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discord_token = lookup("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS `{raw}`"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let locale_dir = lookup("LOCALE_DIR").unwrap_or_else(|| DEFAULT_LOCALE_DIR.to_owned());
        let catalog_dir = lookup("CATALOG_DIR").unwrap_or_else(|| DEFAULT_CATALOG_DIR.to_owned());

        Ok(Self {
            discord_token,
            database_url,
            database_max_connections,
            locale_dir: locale_dir.into(),
            catalog_dir: catalog_dir.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_keys() {
        let config =
            Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "t"), ("DATABASE_URL", "u")]))
                .unwrap();

        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.locale_dir, PathBuf::from("locales"));
        assert_eq!(config.catalog_dir, PathBuf::from("data/catalogs"));
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "u")])).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn bad_connection_count_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "t"),
            ("DATABASE_URL", "u"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(result.is_err());
    }
}
