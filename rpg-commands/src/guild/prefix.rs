use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::{DEFAULT_PREFIX, permissions::PermissionTier};

pub const SET_META: CommandMeta = CommandMeta {
    name: "setprefix",
    aliases: &[],
    group: None,
    desc: "Set a custom command prefix for this server. The default prefix keeps working. \
           Requires Bot Admin.",
    category: "settings",
    usage: "rp!setprefix <prefix>",
    tier: PermissionTier::Admin,
};

pub const SHOW_META: CommandMeta = CommandMeta {
    name: "prefix",
    aliases: &[],
    group: None,
    desc: "Show the command prefix for this server.",
    category: "settings",
    usage: "rp!prefix",
    tier: PermissionTier::Member,
};

pub async fn set(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, SET_META.tier).await? else {
        return Ok(());
    };

    let Some(prefix) = arg1 else {
        return reply.usage(SET_META.usage).await;
    };

    guilds::set_prefix(&ctx.db, reply.guild_key(), prefix).await?;
    ctx.prefixes.set(reply.guild_key(), prefix).await;
    info!(guild_id = reply.guild_key(), prefix, "updated server prefix");

    reply.say("Updated server prefix").await
}

pub async fn show(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, SHOW_META.tier).await? else {
        return Ok(());
    };

    let prefix = reply
        .settings
        .prefix
        .clone()
        .unwrap_or_else(|| DEFAULT_PREFIX.to_owned());

    reply.send_raw(&format!("`{prefix}`")).await
}
