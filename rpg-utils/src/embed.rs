use twilight_model::{
    channel::message::embed::{Embed, EmbedAuthor},
    id::{Id, marker::GuildMarker},
    util::ImageHash,
};
use twilight_util::builder::embed::{
    EmbedAuthorBuilder, EmbedBuilder, EmbedFooterBuilder, ImageSource,
};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Visual extras applied to a paginated embed.
#[derive(Clone, Debug)]
pub struct PageStyle {
    pub color: u32,
    pub author: Option<GuildBadge>,
    pub thumbnail_url: Option<String>,
    pub footer_note: Option<String>,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_EMBED_COLOR,
            author: None,
            thumbnail_url: None,
            footer_note: None,
        }
    }
}

/// Guild name and icon shown in an embed author line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildBadge {
    pub name: String,
    pub icon_url: Option<String>,
}

impl GuildBadge {
    pub fn new(guild_id: Id<GuildMarker>, name: impl Into<String>, icon: Option<ImageHash>) -> Self {
        Self {
            name: name.into(),
            icon_url: icon.map(|hash| guild_icon_url(guild_id, hash)),
        }
    }

    /// Build the embed author, dropping the icon if its URL is rejected.
    pub fn to_author(&self) -> EmbedAuthor {
        let builder = EmbedAuthorBuilder::new(self.name.clone());

        match self.icon_url.as_deref().map(|url| ImageSource::url(url)) {
            Some(Ok(icon)) => builder.icon_url(icon).build(),
            _ => builder.build(),
        }
    }
}

/// CDN URL of a guild icon.
pub fn guild_icon_url(guild_id: Id<GuildMarker>, icon: ImageHash) -> String {
    let extension = if icon.is_animated() { "gif" } else { "png" };
    format!(
        "https://cdn.discordapp.com/icons/{}/{}.{}",
        guild_id.get(),
        icon,
        extension
    )
}

/// Footer text for a page: `Page x/y`, optionally followed by a note.
pub fn page_footer(page: usize, total_pages: usize, footer_note: Option<&str>) -> String {
    let page = page.max(1);
    let total_pages = total_pages.max(1);
    let note = footer_note.filter(|note| !note.is_empty());

    match (total_pages > 1, note) {
        (true, Some(note)) => format!("Page {page}/{total_pages} \u{2022} {note}"),
        (true, None) => format!("Page {page}/{total_pages}"),
        (false, Some(note)) => note.to_owned(),
        (false, None) => String::new(),
    }
}

/// Build a standard paginated embed with consistent styling.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
    style: &PageStyle,
) -> anyhow::Result<Embed> {
    let footer_text = page_footer(page, total_pages, style.footer_note.as_deref());

    let mut builder = EmbedBuilder::new()
        .title(title)
        .color(style.color)
        .description(description);

    if let Some(author) = &style.author {
        builder = builder.author(author.to_author());
    }

    if let Some(Ok(thumbnail)) = style.thumbnail_url.as_deref().map(|url| ImageSource::url(url)) {
        builder = builder.thumbnail(thumbnail);
    }

    if !footer_text.is_empty() {
        builder = builder.footer(EmbedFooterBuilder::new(footer_text).build());
    }

    Ok(builder.validate()?.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_only_shows_page_counter_for_multiple_pages() {
        assert_eq!(page_footer(1, 1, None), "");
        assert_eq!(page_footer(2, 3, None), "Page 2/3");
        assert_eq!(page_footer(1, 1, Some("note")), "note");
        assert_eq!(page_footer(1, 2, Some("note")), "Page 1/2 \u{2022} note");
    }

    #[test]
    fn paginated_embed_carries_author_and_footer() {
        let style = PageStyle {
            author: Some(GuildBadge {
                name: "Tavern".to_owned(),
                icon_url: None,
            }),
            ..PageStyle::default()
        };

        let embed = build_paginated_embed("Server Items", "**a**\nAxe", 1, 2, &style).unwrap();
        assert_eq!(embed.title.as_deref(), Some("Server Items"));
        assert_eq!(embed.author.map(|author| author.name).as_deref(), Some("Tavern"));
        assert_eq!(embed.footer.map(|footer| footer.text).as_deref(), Some("Page 1/2"));
    }
}
