use tracing::{info, warn};
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::{Context, catalog::CatalogKind};
use rpg_database::{items, shop};
use rpg_utils::permissions::PermissionTier;

const fn load_meta(name: &'static str, desc: &'static str, usage: &'static str) -> CommandMeta {
    CommandMeta {
        name,
        aliases: &[],
        group: None,
        desc,
        category: "loading",
        usage,
        tier: PermissionTier::Admin,
    }
}

pub const LOAD_DND_META: CommandMeta = load_meta(
    "loaddnd",
    "Load every D&D item into the server items. Requires Bot Admin.",
    "rp!loaddnd",
);

pub const LOAD_DND_MAGIC_META: CommandMeta = load_meta(
    "loaddndmagic",
    "Load every D&D magic item into the server items. Requires Bot Admin.",
    "rp!loaddndmagic",
);

pub const LOAD_POKEMON_META: CommandMeta = load_meta(
    "loadpokemon",
    "Load every Pokemon item into the server items. Requires Bot Admin.",
    "rp!loadpokemon",
);

pub const LOAD_STAR_WARS_META: CommandMeta = load_meta(
    "loadstarwars",
    "Load every Star Wars item into the server items. Requires Bot Admin.",
    "rp!loadstarwars",
);

pub const LOAD_DND_SHOP_META: CommandMeta = load_meta(
    "loaddndshop",
    "Put every priced D&D item in the shop. Run loaddnd first. Requires Bot Admin.",
    "rp!loaddndshop",
);

pub const LOAD_MAGIC_SHOP_META: CommandMeta = load_meta(
    "loadmagicshop",
    "Put every priced D&D magic item in the shop. Run loaddndmagic first. Requires Bot Admin.",
    "rp!loadmagicshop",
);

pub const LOAD_STAR_WARS_SHOP_META: CommandMeta = load_meta(
    "loadstarwarsshop",
    "Put every priced Star Wars item in the shop. Run loadstarwars first. Requires Bot Admin.",
    "rp!loadstarwarsshop",
);

pub const UNLOAD_META: CommandMeta = CommandMeta {
    name: "unload",
    aliases: &[],
    group: None,
    desc: "Remove a loaded item pack and its shop listings. \
           Requires Bot Moderator or Bot Admin.",
    category: "loading",
    usage: "rp!unload <dnd|dndmagic|pokemon|starwars>",
    tier: PermissionTier::Moderator,
};

/// Copy a bundled catalog into the guild's items.
pub async fn load_items(
    ctx: Context,
    msg: Box<MessageCreate>,
    kind: CatalogKind,
) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, PermissionTier::Admin).await? else {
        return Ok(());
    };

    let catalog = ctx.catalogs.get(kind);
    if catalog.is_empty() {
        warn!(catalog = kind.key(), "loading an empty catalog");
    }

    let written = items::new_items(&ctx.db, reply.guild_key(), catalog.items()).await?;
    info!(guild_id = reply.guild_key(), catalog = kind.key(), written, "loaded catalog items");

    reply
        .say_with("Successfully added all {} items!", &[kind.label()])
        .await
}

/// List every priced catalog item in the guild shop.
pub async fn load_shop(
    ctx: Context,
    msg: Box<MessageCreate>,
    kind: CatalogKind,
) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, PermissionTier::Admin).await? else {
        return Ok(());
    };

    let entries = ctx.catalogs.get(kind).shop_entries(kind);
    let written = shop::add_shop_items(&ctx.db, reply.guild_key(), &entries).await?;
    info!(guild_id = reply.guild_key(), catalog = kind.key(), written, "loaded catalog shop");

    reply
        .say_with("Successfully added all {} items to shop!", &[kind.label()])
        .await
}

/// Remove a catalog's items and shop listings from the guild.
pub async fn unload(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, UNLOAD_META.tier).await? else {
        return Ok(());
    };

    let Some(kind) = parse_unload_target(arg1) else {
        return reply
            .say("That is not a valid input, look at `rp!usage unload`")
            .await;
    };

    let names = ctx.catalogs.get(kind).names();
    let removed_items = items::remove_items(&ctx.db, reply.guild_key(), &names).await?;
    let removed_listings = shop::remove_shop_items(&ctx.db, reply.guild_key(), &names).await?;
    info!(
        guild_id = reply.guild_key(),
        catalog = kind.key(),
        removed_items,
        removed_listings,
        "unloaded catalog"
    );

    reply
        .say_with("Successfully removed all {} items!", &[kind.label()])
        .await
}

/// Pack named by the `unload` argument, in any letter case.
pub fn parse_unload_target(raw: Option<&str>) -> Option<CatalogKind> {
    CatalogKind::parse(&raw?.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_names_ignore_case() {
        assert_eq!(parse_unload_target(Some("StarWars")), Some(CatalogKind::StarWars));
        assert_eq!(parse_unload_target(Some("DNDMAGIC")), Some(CatalogKind::DndMagic));
        assert_eq!(parse_unload_target(Some("dnd")), Some(CatalogKind::Dnd));
    }

    #[test]
    fn unknown_or_missing_packs_are_rejected() {
        assert_eq!(parse_unload_target(Some("star wars")), None);
        assert_eq!(parse_unload_target(Some("pathfinder")), None);
        assert_eq!(parse_unload_target(None), None);
    }
}
