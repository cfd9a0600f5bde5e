//! Bundled item packs (D&D, D&D magic, Pokemon, Star Wars) guilds can import.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::Context as _;
use tracing::{info, warn};

use rpg_database::model::{ServerItem, ShopEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Dnd,
    DndMagic,
    Pokemon,
    StarWars,
}

impl CatalogKind {
    pub const ALL: [Self; 4] = [Self::Dnd, Self::DndMagic, Self::Pokemon, Self::StarWars];

    /// Name used on the command line and as the catalog file stem.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dnd => "dnd",
            Self::DndMagic => "dndmagic",
            Self::Pokemon => "pokemon",
            Self::StarWars => "starwars",
        }
    }

    /// Human-readable name used in replies.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dnd => "D&D",
            Self::DndMagic => "D&D magic",
            Self::Pokemon => "Pokemon",
            Self::StarWars => "Star Wars",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == raw)
    }

    /// Buy price of a catalog item, read from its `Cost` attribute.
    ///
    /// D&D costs use every digit of the value (`1,500 gp` -> 1500). Star Wars
    /// costs only use the first space-separated token (`200 credits/day` -> 200).
    pub fn cost_of(self, item: &ServerItem) -> Option<f64> {
        let raw = item.meta.get("Cost").or_else(|| item.meta.get("cost"))?;

        let relevant = match self {
            Self::StarWars => raw.split(' ').next().unwrap_or_default(),
            _ => raw.as_str(),
        };

        let digits: String = relevant.chars().filter(char::is_ascii_digit).collect();
        digits.parse::<u64>().ok().map(|cost| cost as f64)
    }
}

/// Items of one bundled pack keyed by name.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, ServerItem>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = ServerItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &ServerItem> {
        self.items.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Buy-only shop entries for every item with a parseable cost.
    pub fn shop_entries(&self, kind: CatalogKind) -> Vec<ShopEntry> {
        self.items
            .values()
            .filter_map(|item| {
                kind.cost_of(item)
                    .map(|cost| ShopEntry::buy_only(item.name.clone(), cost))
            })
            .collect()
    }
}

/// Every bundled pack, loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    dnd: ItemCatalog,
    dnd_magic: ItemCatalog,
    pokemon: ItemCatalog,
    star_wars: ItemCatalog,
}

impl Catalogs {
    /// Load `<kind>.json` for every pack; missing files give empty packs.
    pub fn load_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut catalogs = Self::default();

        for kind in CatalogKind::ALL {
            let path = dir.join(format!("{}.json", kind.key()));
            if !path.is_file() {
                warn!(catalog = kind.key(), path = %path.display(), "catalog file not found");
                continue;
            }

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            let catalog = parse_catalog(&raw)
                .with_context(|| format!("invalid catalog file {}", path.display()))?;

            info!(catalog = kind.key(), items = catalog.len(), "loaded item catalog");
            *catalogs.get_mut(kind) = catalog;
        }

        Ok(catalogs)
    }

    pub fn get(&self, kind: CatalogKind) -> &ItemCatalog {
        match kind {
            CatalogKind::Dnd => &self.dnd,
            CatalogKind::DndMagic => &self.dnd_magic,
            CatalogKind::Pokemon => &self.pokemon,
            CatalogKind::StarWars => &self.star_wars,
        }
    }

    fn get_mut(&mut self, kind: CatalogKind) -> &mut ItemCatalog {
        match kind {
            CatalogKind::Dnd => &mut self.dnd,
            CatalogKind::DndMagic => &mut self.dnd_magic,
            CatalogKind::Pokemon => &mut self.pokemon,
            CatalogKind::StarWars => &mut self.star_wars,
        }
    }
}

/// Parse a catalog file: a JSON object of item name to item.
///
/// Entries without a `name` take the object key.
pub fn parse_catalog(raw: &str) -> anyhow::Result<ItemCatalog> {
    let entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;

    let items = entries
        .into_iter()
        .map(|(key, mut value)| {
            if let Some(object) = value.as_object_mut() {
                object
                    .entry("name")
                    .or_insert_with(|| serde_json::Value::String(key.clone()));
            }
            serde_json::from_value::<ServerItem>(value)
                .with_context(|| format!("invalid catalog entry `{key}`"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ItemCatalog::from_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_cost(cost: &str) -> ServerItem {
        let mut item = ServerItem::new("Blaster");
        item.meta.insert("Cost".to_owned(), cost.to_owned());
        item
    }

    #[test]
    fn dnd_costs_use_every_digit() {
        assert_eq!(CatalogKind::Dnd.cost_of(&item_with_cost("1,500 gp")), Some(1500.0));
        assert_eq!(CatalogKind::Dnd.cost_of(&item_with_cost("varies")), None);
    }

    #[test]
    fn star_wars_costs_use_the_first_token() {
        let item = item_with_cost("200 credits (5 per day)");
        assert_eq!(CatalogKind::StarWars.cost_of(&item), Some(200.0));
        assert_eq!(CatalogKind::Dnd.cost_of(&item), Some(2005.0));
    }

    #[test]
    fn items_without_cost_are_left_out_of_the_shop() {
        let catalog = ItemCatalog::from_items([item_with_cost("25 gp"), ServerItem::new("Rock")]);
        let entries = catalog.shop_entries(CatalogKind::Dnd);

        assert_eq!(entries, vec![ShopEntry::buy_only("Blaster", 25.0)]);
    }

    #[test]
    fn kinds_parse_from_their_keys() {
        assert_eq!(CatalogKind::parse("dndmagic"), Some(CatalogKind::DndMagic));
        assert_eq!(CatalogKind::parse("starwars"), Some(CatalogKind::StarWars));
        assert_eq!(CatalogKind::parse("DnD"), None);
    }

    #[test]
    fn catalog_entries_default_their_name_to_the_key() {
        let raw = r#"{
            "Rope": {"description": "50 feet", "meta": {"Cost": "1 gp"}},
            "Torch": {"name": "Torch", "meta": {}}
        }"#;
        let catalog = parse_catalog(raw).unwrap();

        assert_eq!(catalog.names(), vec!["Rope".to_owned(), "Torch".to_owned()]);
        let rope = catalog.items().next().unwrap();
        assert_eq!(rope.description.as_deref(), Some("50 feet"));
    }
}
