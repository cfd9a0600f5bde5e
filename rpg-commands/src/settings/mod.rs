pub mod additem;
pub mod embeds;
pub mod iteminfo;
pub mod items;
pub mod removeitem;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::respond::{Responder, random_color};
use crate::{CommandMeta, find_command, split_first_word};
use embeds::{GuildCounts, settings_embed, settings_fields};
use rpg_core::Context;
use rpg_database::{characters, items as item_store};
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "settings",
    aliases: &["s", "configuration", "conf"],
    group: None,
    desc: "Get the current server settings.",
    category: "settings",
    usage: "rp!settings [iteminfo|items|additem|removeitem]",
    tier: PermissionTier::Member,
};

/// Show the settings overview, or run a `settings` subcommand.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let (sub, args) = split_first_word(rest);

    let Some(sub) = sub else {
        return overview(ctx, msg).await;
    };

    let sub = sub.to_lowercase();
    let Some(command) = find_command(Some(META.name), &sub) else {
        return overview(ctx, msg).await;
    };

    match command.name {
        "iteminfo" => iteminfo::run(ctx, msg, args).await,
        "items" => items::run(ctx, msg, args).await,
        "additem" => additem::run(ctx, msg, args).await,
        "removeitem" => removeitem::run(ctx, msg, args).await,
        _ => overview(ctx, msg).await,
    }
}

async fn overview(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let counts = GuildCounts {
        items: item_store::count_items(&ctx.db, reply.guild_key()).await?,
        characters: characters::count_characters(&ctx.db, reply.guild_key()).await?,
    };

    let fields = settings_fields(&reply.settings, counts, |text| reply.tr(text));
    let badge = reply.guild_badge().await;
    let embed = settings_embed(fields, &badge, random_color())?;

    reply.send_embed(embed).await
}
