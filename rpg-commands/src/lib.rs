pub mod guild;
pub mod loading;
pub mod respond;
pub mod settings;
pub mod utility;

use tracing::debug;
use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};

use rpg_core::{Context, catalog::CatalogKind};
use rpg_utils::{DEFAULT_PREFIX, permissions::PermissionTier};

#[derive(Clone, Copy)]
enum InteractionRoute {
    ItemsButtons,
    ItemsModal,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(&str, InteractionRoute); 2] = [
        ("pg:items", InteractionRoute::ItemsButtons),
        ("pgm:items", InteractionRoute::ItemsModal),
    ];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Parent command for subcommands such as `settings additem`.
    pub group: Option<&'static str>,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
    pub tier: PermissionTier,
}

impl CommandMeta {
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const COMMANDS: &[CommandMeta] = &[
    settings::META,
    settings::iteminfo::META,
    settings::items::META,
    settings::additem::META,
    settings::removeitem::META,
    guild::start::META,
    guild::language::META,
    guild::currency::META,
    guild::delete_after::META,
    guild::default_map::META,
    guild::prefix::SET_META,
    guild::prefix::SHOW_META,
    guild::toggles::WIPE_ON_LEAVE_META,
    guild::toggles::HIDE_INVENTORY_META,
    loading::catalog::LOAD_DND_META,
    loading::catalog::LOAD_DND_MAGIC_META,
    loading::catalog::LOAD_POKEMON_META,
    loading::catalog::LOAD_STAR_WARS_META,
    loading::catalog::LOAD_DND_SHOP_META,
    loading::catalog::LOAD_MAGIC_SHOP_META,
    loading::catalog::LOAD_STAR_WARS_SHOP_META,
    loading::catalog::UNLOAD_META,
    loading::file::META,
    utility::usage::META,
    // Add new commands here
];

/// Find a command by name or alias within a group (`None` = top level).
pub fn find_command(group: Option<&str>, name: &str) -> Option<&'static CommandMeta> {
    COMMANDS
        .iter()
        .find(|command| command.group == group && command.answers_to(name))
}

/// A prefixed message split into command name and arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Lower-cased command name.
    pub command: String,
    /// Everything after the command name, trimmed.
    pub rest: Option<&'a str>,
    /// First word of `rest`.
    pub arg1: Option<&'a str>,
}

/// Split off the first whitespace-separated word.
pub fn split_first_word(raw: Option<&str>) -> (Option<&str>, Option<&str>) {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return (None, None);
    };

    let mut parts = value.splitn(2, char::is_whitespace);
    let first = parts.next().filter(|word| !word.is_empty());
    let tail = parts
        .next()
        .map(str::trim)
        .filter(|remaining| !remaining.is_empty());

    (first, tail)
}

/// Parse a message that starts with the default prefix or the guild's custom one.
///
/// When both match, the longer prefix wins.
pub fn parse_invocation<'a>(content: &'a str, custom_prefix: Option<&str>) -> Option<Invocation<'a>> {
    let content = content.trim();

    let body = [Some(DEFAULT_PREFIX), custom_prefix]
        .into_iter()
        .flatten()
        .filter(|prefix| !prefix.is_empty())
        .filter_map(|prefix| content.strip_prefix(prefix).map(|body| (prefix.len(), body)))
        .max_by_key(|(len, _)| *len)
        .map(|(_, body)| body)?;

    if body.starts_with(char::is_whitespace) {
        return None;
    }

    let (command, rest) = split_first_word(Some(body));
    let command = command?.to_lowercase();
    let (arg1, _) = split_first_word(rest);

    Some(Invocation {
        command,
        rest,
        arg1,
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let custom_prefix = match msg.guild_id {
        Some(guild_id) => ctx.prefixes.get(guild_id.get()).await,
        None => None,
    };

    let content = msg.content.clone();
    let Some(invocation) = parse_invocation(&content, custom_prefix.as_deref()) else {
        return Ok(());
    };

    let Some(command) = find_command(None, &invocation.command) else {
        return Ok(());
    };

    debug!(
        command = command.name,
        guild_id = msg.guild_id.map(|id| id.get()),
        "dispatching command"
    );

    let Invocation { rest, arg1, .. } = invocation;

    match command.name {
        "settings" => settings::run(ctx, msg, rest).await?,
        "setstart" => guild::start::run(ctx, msg, arg1).await?,
        "language" => guild::language::run(ctx, msg, arg1).await?,
        "currency" => guild::currency::run(ctx, msg, arg1).await?,
        "deleteafter" => guild::delete_after::run(ctx, msg, arg1).await?,
        "setdefaultmap" => guild::default_map::run(ctx, msg, rest).await?,
        "setprefix" => guild::prefix::set(ctx, msg, arg1).await?,
        "prefix" => guild::prefix::show(ctx, msg).await?,
        "wipeonleave" => guild::toggles::wipe_on_leave(ctx, msg, arg1).await?,
        "hideinv" => guild::toggles::hide_inventory(ctx, msg, arg1).await?,
        "loaddnd" => loading::catalog::load_items(ctx, msg, CatalogKind::Dnd).await?,
        "loaddndmagic" => loading::catalog::load_items(ctx, msg, CatalogKind::DndMagic).await?,
        "loadpokemon" => loading::catalog::load_items(ctx, msg, CatalogKind::Pokemon).await?,
        "loadstarwars" => loading::catalog::load_items(ctx, msg, CatalogKind::StarWars).await?,
        "loaddndshop" => loading::catalog::load_shop(ctx, msg, CatalogKind::Dnd).await?,
        "loadmagicshop" => loading::catalog::load_shop(ctx, msg, CatalogKind::DndMagic).await?,
        "loadstarwarsshop" => loading::catalog::load_shop(ctx, msg, CatalogKind::StarWars).await?,
        "unload" => loading::catalog::unload(ctx, msg, arg1).await?,
        "loaditems" => loading::file::run(ctx, msg).await?,
        "usage" => utility::usage::run(ctx, msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let custom_id = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => data.custom_id.clone(),
        Some(InteractionData::ModalSubmit(data)) => data.custom_id.clone(),
        _ => return Ok(()),
    };

    let Some(route) = route_interaction(&custom_id) else {
        return Ok(());
    };

    match route {
        InteractionRoute::ItemsButtons => {
            let _handled =
                settings::items::handle_pagination_interaction(ctx, interaction).await?;
        }
        InteractionRoute::ItemsModal => {
            let _handled =
                settings::items::handle_pagination_modal_interaction(ctx, interaction).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_commands_are_parsed() {
        let invocation = parse_invocation("rp!Settings additem Long Sword", None).unwrap();
        assert_eq!(invocation.command, "settings");
        assert_eq!(invocation.rest, Some("additem Long Sword"));
        assert_eq!(invocation.arg1, Some("additem"));
    }

    #[test]
    fn custom_prefix_works_alongside_the_default() {
        let invocation = parse_invocation("!prefix", Some("!")).unwrap();
        assert_eq!(invocation.command, "prefix");
        assert_eq!(invocation.rest, None);

        assert!(parse_invocation("rp!prefix", Some("!")).is_some());
        assert!(parse_invocation("!prefix", None).is_none());
    }

    #[test]
    fn longest_matching_prefix_wins() {
        let invocation = parse_invocation("rp!!setstart 5", Some("rp!!")).unwrap();
        assert_eq!(invocation.command, "setstart");
        assert_eq!(invocation.arg1, Some("5"));
    }

    #[test]
    fn prefix_must_touch_the_command() {
        assert!(parse_invocation("rp! settings", None).is_none());
        assert!(parse_invocation("rp!", None).is_none());
        assert!(parse_invocation("hello rp!settings", None).is_none());
    }

    #[test]
    fn aliases_resolve_to_their_command() {
        assert_eq!(find_command(None, "conf").map(|c| c.name), Some("settings"));
        assert_eq!(find_command(None, "s").map(|c| c.name), Some("settings"));
        assert_eq!(
            find_command(Some("settings"), "deleteitem").map(|c| c.name),
            Some("removeitem")
        );
        assert!(find_command(None, "additem").is_none());
    }

    #[test]
    fn command_names_are_unique_per_group() {
        for (index, command) in COMMANDS.iter().enumerate() {
            for other in &COMMANDS[index + 1..] {
                if command.group != other.group {
                    continue;
                }
                assert!(
                    !other.answers_to(command.name)
                        && command.aliases.iter().all(|alias| !other.answers_to(alias)),
                    "`{}` collides with `{}`",
                    command.name,
                    other.name
                );
            }
        }
    }

    #[test]
    fn interaction_routes_match_pagination_ids() {
        assert!(matches!(
            route_interaction("pg:items|97:next:2:3:1:1"),
            Some(InteractionRoute::ItemsButtons)
        ));
        assert!(matches!(
            route_interaction("pgm:items:3:1:1"),
            Some(InteractionRoute::ItemsModal)
        ));
        assert!(route_interaction("pg:shop:next:2:3:1:1").is_none());
    }
}
