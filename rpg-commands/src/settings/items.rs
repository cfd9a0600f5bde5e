use std::sync::Arc;

use twilight_model::{
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
    id::{Id, marker::GuildMarker},
};

use super::embeds::truncate;
use crate::CommandMeta;
use crate::respond::{Responder, guild_badge, random_color};
use rpg_core::Context;
use rpg_database::{guilds, items};
use rpg_utils::{
    embed::{GuildBadge, PageStyle},
    pagination::{
        DEFAULT_TIMEOUT_SECS, PageAction, PageView, PaginationInteractionValidation,
        PaginationModalSubmitValidation, build_paginated_view, clamp_page,
        open_jump_modal_from_token, page_window, resolve_modal_target_page,
        respond_ephemeral_message, send_paginated_message, total_pages,
        update_paginated_interaction_message, validate_interaction_for_command_prefix,
        validate_jump_modal_for_command_prefix,
    },
    permissions::PermissionTier,
};

pub const META: CommandMeta = CommandMeta {
    name: "items",
    aliases: &[],
    group: Some("settings"),
    desc: "See all of the server's custom items, optionally only those starting with a letter.",
    category: "items",
    usage: "rp!settings items [letter]",
    tier: PermissionTier::Member,
};

/// Pagination family for the item listing.
pub const VIEW_FAMILY: &str = "items";

const GROUPS_PER_PAGE: usize = 4;
const DESCRIPTION_LIMIT: usize = 4096;
const NAV_HINT: &str = "Use the buttons below to change pages";
const ITEMS_THUMBNAIL_URL: &str =
    "https://mir-s3-cdn-cf.behance.net/project_modules/disp/196b9d18843737.562d0472d523f.png";

/// Item names sharing a lower-cased first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGroup {
    pub letter: String,
    pub names: Vec<String>,
}

/// Group item names by lower-cased first character.
///
/// Names are sorted first; groups keep the order of their first member.
pub fn group_by_letter(names: impl IntoIterator<Item = String>) -> Vec<LetterGroup> {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();

    let mut groups: Vec<LetterGroup> = Vec::new();
    for name in names {
        let Some(first) = name.chars().next() else {
            continue;
        };
        let letter: String = first.to_lowercase().collect();

        match groups.iter_mut().find(|group| group.letter == letter) {
            Some(group) => group.names.push(name),
            None => groups.push(LetterGroup {
                letter,
                names: vec![name],
            }),
        }
    }

    groups
}

/// View key for a listing, `items` or `items|<code points>` when filtered.
///
/// Code points are joined with `-`, group keys can span several of them.
pub fn view_key(letter: Option<&str>) -> String {
    match letter {
        Some(letter) => {
            let codes: Vec<String> = letter
                .chars()
                .map(|ch| u32::from(ch).to_string())
                .collect();
            format!("{VIEW_FAMILY}|{}", codes.join("-"))
        }
        None => VIEW_FAMILY.to_owned(),
    }
}

/// Recover the letter filter from a view key.
pub fn letter_from_view_key(key: &str) -> Option<String> {
    let (_, codes) = key.split_once('|')?;
    codes
        .split('-')
        .map(|code| code.parse::<u32>().ok().and_then(char::from_u32))
        .collect()
}

/// The whole filter argument, lower-cased the way group keys are.
fn letter_filter(arg: Option<&str>) -> Option<String> {
    let arg = arg?.trim();
    (!arg.is_empty()).then(|| arg.to_lowercase())
}

/// Keep only the group for `letter`, or all groups when unfiltered.
///
/// Returns `None` when the filter matches nothing.
pub fn select_groups(groups: Vec<LetterGroup>, letter: Option<&str>) -> Option<Vec<LetterGroup>> {
    let Some(letter) = letter else {
        return Some(groups);
    };

    let matching: Vec<LetterGroup> = groups
        .into_iter()
        .filter(|group| group.letter == letter)
        .collect();

    (!matching.is_empty()).then_some(matching)
}

/// Render one page of letter groups.
pub fn render_page(nav_hint: &str, groups: &[LetterGroup], page: usize) -> String {
    let (start, end) = page_window(groups.len(), GROUPS_PER_PAGE, page);

    let body = groups[start..end]
        .iter()
        .map(|group| format!("**{}**\n{}", group.letter, group.names.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n");

    truncate(&format!("{nav_hint}\n\n{body}"), DESCRIPTION_LIMIT)
}

struct Listing {
    groups: Vec<LetterGroup>,
    title: String,
    nav_hint: String,
    style: PageStyle,
}

impl Listing {
    fn total_pages(&self) -> usize {
        total_pages(self.groups.len(), GROUPS_PER_PAGE)
    }

    fn view(&self, key: &str, page: usize, owner: u64) -> anyhow::Result<PageView> {
        let total = self.total_pages();
        let page = clamp_page(page, total);

        build_paginated_view(
            key,
            &self.title,
            render_page(&self.nav_hint, &self.groups, page),
            page,
            total,
            owner,
            DEFAULT_TIMEOUT_SECS,
            &self.style,
        )
    }
}

fn items_style(badge: GuildBadge) -> PageStyle {
    PageStyle {
        color: random_color(),
        author: Some(badge),
        thumbnail_url: Some(ITEMS_THUMBNAIL_URL.to_owned()),
        footer_note: None,
    }
}

/// Page through the guild's items, four first-letter groups per page.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let names = items::get_guild_items(&ctx.db, reply.guild_key())
        .await?
        .into_keys();
    let groups = group_by_letter(names);
    if groups.is_empty() {
        return reply.say("No items to display").await;
    }

    let letter = letter_filter(arg);
    let Some(groups) = select_groups(groups, letter.as_deref()) else {
        return reply.say("No entries found for that letter").await;
    };

    let listing = Listing {
        groups,
        title: reply.tr("Server Items"),
        nav_hint: reply.tr(NAV_HINT),
        style: items_style(reply.guild_badge().await),
    };

    let total = listing.total_pages();
    let view = listing.view(&view_key(letter.as_deref()), 1, msg.author.id.get())?;

    let message = send_paginated_message(
        Arc::clone(&ctx.http),
        msg.channel_id,
        view,
        total,
        DEFAULT_TIMEOUT_SECS,
    )
    .await?;
    reply.expire(&message);

    Ok(())
}

/// Rebuild the listing for an interaction. `None` once nothing is left to show.
async fn load_listing(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    letter: Option<&str>,
) -> anyhow::Result<Option<Listing>> {
    let names = items::get_guild_items(&ctx.db, guild_id.get())
        .await?
        .into_keys();
    let Some(groups) = select_groups(group_by_letter(names), letter) else {
        return Ok(None);
    };
    if groups.is_empty() {
        return Ok(None);
    }

    let language = guilds::get_language(&ctx.db, guild_id.get()).await?;
    let tr = |text: &str| ctx.translator.translate(&language, text).to_owned();

    Ok(Some(Listing {
        groups,
        title: tr("Server Items"),
        nav_hint: tr(NAV_HINT),
        style: items_style(guild_badge(&ctx.http, guild_id).await),
    }))
}

/// Handle navigation button presses on an item listing.
pub async fn handle_pagination_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let (actor_id, token) =
        match validate_interaction_for_command_prefix(http, &interaction, VIEW_FAMILY).await? {
            PaginationInteractionValidation::NotForCommand => return Ok(false),
            PaginationInteractionValidation::HandledInvalid => return Ok(true),
            PaginationInteractionValidation::Valid {
                actor_user_id,
                token,
            } => (actor_user_id, token),
        };

    let Some(guild_id) = interaction.guild_id else {
        return Ok(false);
    };

    let letter = letter_from_view_key(&token.command);
    let Some(listing) = load_listing(&ctx, guild_id, letter.as_deref()).await? else {
        respond_ephemeral_message(http, &interaction, "No items to display").await?;
        return Ok(true);
    };
    let total = listing.total_pages();

    if token.action == PageAction::Jump {
        open_jump_modal_from_token(http, &interaction, &token, total).await?;
        return Ok(true);
    }

    let view = listing.view(&token.command, token.page, actor_id)?;
    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &interaction,
        view,
        total,
        DEFAULT_TIMEOUT_SECS,
    )
    .await?;

    Ok(true)
}

/// Handle jump-to-page modal submits on an item listing.
pub async fn handle_pagination_modal_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let (actor_id, command, entered_page, total_pages_hint) =
        match validate_jump_modal_for_command_prefix(http, &interaction, VIEW_FAMILY).await? {
            PaginationModalSubmitValidation::NotForCommand => return Ok(false),
            PaginationModalSubmitValidation::HandledInvalid => return Ok(true),
            PaginationModalSubmitValidation::Valid {
                actor_user_id,
                command,
                requested_page,
                total_pages_hint,
            } => (actor_user_id, command, requested_page, total_pages_hint),
        };

    let Some(guild_id) = interaction.guild_id else {
        return Ok(false);
    };

    let letter = letter_from_view_key(&command);
    let Some(listing) = load_listing(&ctx, guild_id, letter.as_deref()).await? else {
        respond_ephemeral_message(http, &interaction, "No items to display").await?;
        return Ok(true);
    };

    let total = listing.total_pages();
    let target_page = resolve_modal_target_page(entered_page, total, total_pages_hint);
    let view = listing.view(&command, target_page, actor_id)?;

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &interaction,
        view,
        total,
        DEFAULT_TIMEOUT_SECS,
    )
    .await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn groups_follow_sorted_first_appearance() {
        let groups = group_by_letter(names(&["bow", "Axe", "apple", "Bread"]));

        assert_eq!(
            groups,
            vec![
                LetterGroup {
                    letter: "a".to_owned(),
                    names: names(&["Axe", "apple"]),
                },
                LetterGroup {
                    letter: "b".to_owned(),
                    names: names(&["Bread", "bow"]),
                },
            ]
        );
    }

    #[test]
    fn letter_filter_selects_one_group() {
        let groups = group_by_letter(names(&["Axe", "Bow"]));

        let selected = select_groups(groups.clone(), Some("b")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].names, names(&["Bow"]));

        assert!(select_groups(groups.clone(), Some("z")).is_none());
        assert_eq!(select_groups(groups, None).unwrap().len(), 2);
    }

    #[test]
    fn filter_argument_is_case_folded() {
        assert_eq!(letter_filter(Some("A")).as_deref(), Some("a"));
        assert_eq!(letter_filter(Some("  ")), None);
        assert_eq!(letter_filter(None), None);
    }

    #[test]
    fn filter_must_match_a_whole_group_key() {
        let groups = group_by_letter(names(&["Axe", "Bow"]));
        let filter = letter_filter(Some("ab"));

        assert!(select_groups(groups, filter.as_deref()).is_none());
    }

    #[test]
    fn multi_char_lowercase_letters_still_match() {
        let groups = group_by_letter(names(&["\u{130}stanbul rug"]));
        let filter = letter_filter(Some("\u{130}"));

        let selected = select_groups(groups, filter.as_deref()).unwrap();
        assert_eq!(selected[0].names, names(&["\u{130}stanbul rug"]));

        let key = view_key(filter.as_deref());
        assert_eq!(key, "items|105-775");
        assert_eq!(letter_from_view_key(&key), filter);
    }

    #[test]
    fn view_keys_carry_the_letter() {
        assert_eq!(view_key(None), "items");
        assert_eq!(view_key(Some("a")), "items|97");
        assert_eq!(letter_from_view_key("items|97").as_deref(), Some("a"));
        assert_eq!(letter_from_view_key("items"), None);
        assert_eq!(letter_from_view_key("items|x"), None);
    }

    #[test]
    fn pages_hold_four_groups() {
        let groups = group_by_letter(names(&["a", "b", "c", "d", "e"]));

        let first = render_page("hint", &groups, 1);
        assert!(first.starts_with("hint\n\n**a**\na"));
        assert!(first.contains("**d**"));
        assert!(!first.contains("**e**"));

        let second = render_page("hint", &groups, 2);
        assert!(second.contains("**e**\ne"));
    }
}
