use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, ImageSource};

use rpg_database::model::{GuildSettings, ServerItem, item::IMAGE_META_KEY};
use rpg_utils::{DEFAULT_PREFIX, embed::GuildBadge, parse::format_amount};

const MAX_EMBED_TOTAL: usize = 6000;
const MAX_TITLE: usize = 256;
const MAX_FIELDS: usize = 25;
const MAX_FIELD_NAME: usize = 256;
const MAX_FIELD_VALUE: usize = 1024;
const MAX_DESCRIPTION: usize = 4096;

/// Record counts shown next to the stored settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuildCounts {
    pub items: u64,
    pub characters: u64,
}

/// Name/value pairs of the settings overview, already translated.
pub fn settings_fields(
    settings: &GuildSettings,
    counts: GuildCounts,
    tr: impl Fn(&str) -> String,
) -> Vec<(String, String)> {
    let maps = if settings.maps.is_empty() {
        tr("None")
    } else {
        settings
            .maps
            .iter()
            .map(|map| {
                if settings.default_map.as_deref() == Some(map.as_str()) {
                    format!("**{map}**")
                } else {
                    map.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let delete_time = match settings.message_delete_secs {
        0 => tr("Never"),
        secs => secs.to_string(),
    };

    vec![
        (
            tr("Starting Money"),
            format!("{} {}", format_amount(settings.start_money), settings.currency),
        ),
        (tr("Items"), format!("{} {}", counts.items, tr("items"))),
        (
            tr("Characters"),
            format!("{} {}", counts.characters, tr("characters")),
        ),
        (tr("Maps"), maps),
        (tr("Currency"), settings.currency.clone()),
        (tr("Language"), settings.language.clone()),
        (tr("Experience Enabled"), settings.exp_enabled.to_string()),
        (
            tr("Prefix"),
            settings
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_owned()),
        ),
        (tr("Hide Inventories"), settings.hide_inventory.to_string()),
        (
            tr("Wipe Userdata on Leave"),
            settings.wipe_on_leave.to_string(),
        ),
        (tr("Message Auto Delete Time"), delete_time),
    ]
}

pub fn settings_embed(
    fields: Vec<(String, String)>,
    badge: &GuildBadge,
    color: u32,
) -> anyhow::Result<Embed> {
    let builder = EmbedBuilder::new().color(color).author(badge.to_author());
    let builder = fields.into_iter().fold(builder, |builder, (name, value)| {
        builder.field(EmbedFieldBuilder::new(name, value).inline())
    });

    Ok(builder.validate()?.build())
}

/// Detail view of one server item.
///
/// The `image` attribute becomes the thumbnail; every other attribute is a field.
/// Parts are shortened, and trailing attributes dropped, so the whole embed
/// stays within Discord's total length limit.
pub fn item_info_embed(
    item: &ServerItem,
    badge: &GuildBadge,
    name_label: &str,
    color: u32,
) -> anyhow::Result<Embed> {
    let mut budget = EmbedBudget::new(MAX_EMBED_TOTAL);
    budget.charge(&badge.name);

    let title = budget.fit(&item.name, MAX_TITLE).unwrap_or_default();
    let label = budget.fit(name_label, MAX_FIELD_NAME).unwrap_or_default();
    let name_value = budget.fit(&item.name, MAX_FIELD_VALUE).unwrap_or_default();

    let mut builder = EmbedBuilder::new()
        .title(title)
        .color(color)
        .author(badge.to_author())
        .field(EmbedFieldBuilder::new(label, name_value).inline());

    let description = item
        .description
        .as_deref()
        .filter(|text| !text.is_empty())
        .and_then(|text| budget.fit(text, MAX_DESCRIPTION));
    if let Some(description) = description {
        builder = builder.description(description);
    }

    if let Some(Ok(thumbnail)) = item.image().map(|url| ImageSource::url(url)) {
        builder = builder.thumbnail(thumbnail);
    }

    let attributes = item
        .meta
        .iter()
        .filter(|(key, value)| key.as_str() != IMAGE_META_KEY && !value.is_empty())
        .take(MAX_FIELDS - 1);

    for (key, value) in attributes {
        let Some(name) = budget.fit(key, MAX_FIELD_NAME) else {
            break;
        };
        let Some(value) = budget.fit(value, MAX_FIELD_VALUE) else {
            break;
        };
        builder = builder.field(EmbedFieldBuilder::new(name, value).inline());
    }

    Ok(builder.validate()?.build())
}

/// Characters left for the counted parts of an embed.
struct EmbedBudget {
    remaining: usize,
}

impl EmbedBudget {
    fn new(total: usize) -> Self {
        Self { remaining: total }
    }

    fn charge(&mut self, text: &str) {
        self.remaining = self.remaining.saturating_sub(text.chars().count());
    }

    /// Cut `text` to its own limit and to what is left, then charge it.
    ///
    /// `None` once nothing fits.
    fn fit(&mut self, text: &str, max: usize) -> Option<String> {
        let fitted = truncate(text, max.min(self.remaining));
        if fitted.is_empty() {
            return None;
        }

        self.charge(&fitted);
        Some(fitted)
    }
}

/// Cut `text` to at most `max` characters.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => text[..index].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(text: &str) -> String {
        text.to_owned()
    }

    fn badge() -> GuildBadge {
        GuildBadge {
            name: "Tavern".to_owned(),
            icon_url: None,
        }
    }

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> &'a str {
        fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value.as_str())
            .unwrap()
    }

    #[test]
    fn default_settings_render_defaults() {
        let settings = GuildSettings::defaults(1);
        let fields = settings_fields(
            &settings,
            GuildCounts {
                items: 3,
                characters: 0,
            },
            identity,
        );

        assert_eq!(fields.len(), 11);
        assert_eq!(field(&fields, "Starting Money"), "0 dollars");
        assert_eq!(field(&fields, "Items"), "3 items");
        assert_eq!(field(&fields, "Maps"), "None");
        assert_eq!(field(&fields, "Prefix"), "rp!");
        assert_eq!(field(&fields, "Experience Enabled"), "true");
        assert_eq!(field(&fields, "Message Auto Delete Time"), "Never");
    }

    #[test]
    fn default_map_is_bolded() {
        let mut settings = GuildSettings::defaults(1);
        settings.maps = vec!["Harbor".to_owned(), "Keep".to_owned()];
        settings.default_map = Some("Keep".to_owned());
        settings.message_delete_secs = 30;
        settings.prefix = Some("!".to_owned());

        let fields = settings_fields(&settings, GuildCounts::default(), identity);
        assert_eq!(field(&fields, "Maps"), "Harbor\n**Keep**");
        assert_eq!(field(&fields, "Message Auto Delete Time"), "30");
        assert_eq!(field(&fields, "Prefix"), "!");
    }

    #[test]
    fn labels_go_through_the_translator() {
        let settings = GuildSettings::defaults(1);
        let fields = settings_fields(&settings, GuildCounts::default(), |text| {
            format!("<{text}>")
        });

        assert_eq!(fields[0].0, "<Starting Money>");
        assert_eq!(field(&fields, "<Items>"), "0 <items>");
    }

    #[test]
    fn settings_embed_validates() {
        let settings = GuildSettings::defaults(1);
        let fields = settings_fields(&settings, GuildCounts::default(), identity);
        let embed = settings_embed(fields, &badge(), 0x12_34_56).unwrap();

        assert_eq!(embed.fields.len(), 11);
        assert_eq!(embed.author.unwrap().name, "Tavern");
    }

    #[test]
    fn item_info_moves_image_to_thumbnail() {
        let mut item = ServerItem::new("Lantern");
        item.description = Some("Lights the way".to_owned());
        item.meta.insert("image".to_owned(), "https://example.com/l.png".to_owned());
        item.meta.insert("used".to_owned(), "You light the lantern".to_owned());

        let embed = item_info_embed(&item, &badge(), "Name", 0).unwrap();

        assert_eq!(embed.title.as_deref(), Some("Lantern"));
        assert_eq!(embed.description.as_deref(), Some("Lights the way"));
        assert_eq!(
            embed.thumbnail.map(|thumbnail| thumbnail.url).as_deref(),
            Some("https://example.com/l.png")
        );
        let names: Vec<&str> = embed.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "used"]);
    }

    #[test]
    fn item_info_caps_attribute_fields() {
        let mut item = ServerItem::new("Bag");
        for index in 0..40 {
            item.meta.insert(format!("k{index:02}"), "v".to_owned());
        }

        let embed = item_info_embed(&item, &badge(), "Name", 0).unwrap();
        assert_eq!(embed.fields.len(), 25);
    }

    fn embed_length(embed: &Embed) -> usize {
        let count = |text: &str| text.chars().count();

        embed.title.as_deref().map_or(0, count)
            + embed.description.as_deref().map_or(0, count)
            + embed.author.as_ref().map_or(0, |author| count(&author.name))
            + embed
                .fields
                .iter()
                .map(|field| count(&field.name) + count(&field.value))
                .sum::<usize>()
    }

    #[test]
    fn item_info_stays_within_the_total_length() {
        let mut item = ServerItem::new("Tome");
        item.description = Some("d".repeat(4000));
        item.meta.insert("lore".to_owned(), "l".repeat(1024));
        item.meta.insert("runes".to_owned(), "r".repeat(1024));

        let embed = item_info_embed(&item, &badge(), "Name", 0).unwrap();

        assert_eq!(embed.description.as_deref().map(str::len), Some(4000));
        assert!(embed_length(&embed) <= MAX_EMBED_TOTAL);
        assert_eq!(embed.fields[1].value.len(), 1024);
        assert!(embed.fields.len() == 3 && !embed.fields[2].value.is_empty());
    }

    #[test]
    fn oversized_attributes_are_dropped_once_the_budget_is_spent() {
        let mut item = ServerItem::new("Codex");
        item.description = Some("d".repeat(4096));
        for index in 0..10 {
            item.meta.insert(format!("page{index}"), "p".repeat(1024));
        }

        let embed = item_info_embed(&item, &badge(), "Name", 0).unwrap();

        assert!(embed_length(&embed) <= MAX_EMBED_TOTAL);
        assert!(embed.fields.len() < 11);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
