use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Freeform item attributes keyed by lower-cased attribute name.
pub type ItemMeta = BTreeMap<String, String>;

/// Meta key holding a thumbnail URL for the item.
pub const IMAGE_META_KEY: &str = "image";
/// Meta key holding the message shown when the item is used.
pub const USED_META_KEY: &str = "used";

/// A server-defined in-game object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServerItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[sqlx(json)]
    pub meta: ItemMeta,
}

impl ServerItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn image(&self) -> Option<&str> {
        self.meta.get(IMAGE_META_KEY).map(String::as_str)
    }
}

/// Buy/sell price and level requirement for an item in a guild shop.
#[derive(Clone, Debug, PartialEq)]
pub struct ShopEntry {
    pub item_name: String,
    pub buy: f64,
    pub sell: f64,
    pub level: i32,
}

impl ShopEntry {
    /// A buy-only listing with no level requirement.
    pub fn buy_only(item_name: impl Into<String>, buy: f64) -> Self {
        Self {
            item_name: item_name.into(),
            buy,
            sell: 0.0,
            level: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_deserialize_without_optional_fields() {
        let item: ServerItem = serde_json::from_str(r#"{"name": "Rope"}"#).unwrap();
        assert_eq!(item.name, "Rope");
        assert!(item.description.is_none());
        assert!(item.meta.is_empty());
    }

    #[test]
    fn image_reads_the_image_meta_key() {
        let mut item = ServerItem::new("Lantern");
        assert_eq!(item.image(), None);

        item.meta
            .insert(IMAGE_META_KEY.to_owned(), "http://example.com/l.png".to_owned());
        assert_eq!(item.image(), Some("http://example.com/l.png"));
    }
}
