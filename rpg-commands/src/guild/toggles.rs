//! Boolean guild switches.

use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::{parse::parse_bool, permissions::PermissionTier};

pub const WIPE_ON_LEAVE_META: CommandMeta = CommandMeta {
    name: "wipeonleave",
    aliases: &[],
    group: None,
    desc: "Wipe a member's user data when they leave the server. Requires Bot Admin.",
    category: "settings",
    usage: "rp!wipeonleave <true|false>",
    tier: PermissionTier::Admin,
};

pub const HIDE_INVENTORY_META: CommandMeta = CommandMeta {
    name: "hideinv",
    aliases: &[],
    group: None,
    desc: "Hide character inventories from other members. Requires Bot Admin.",
    category: "settings",
    usage: "rp!hideinv <true|false>",
    tier: PermissionTier::Admin,
};

const INVALID_BOOL_MESSAGE: &str = "That is not a valid true/false value";

pub async fn wipe_on_leave(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, WIPE_ON_LEAVE_META.tier).await? else {
        return Ok(());
    };

    let Some(raw) = arg1 else {
        return reply.usage(WIPE_ON_LEAVE_META.usage).await;
    };
    let Some(wipe) = parse_bool(raw) else {
        return reply.say(INVALID_BOOL_MESSAGE).await;
    };

    guilds::set_leave_setting(&ctx.db, reply.guild_key(), wipe).await?;
    info!(guild_id = reply.guild_key(), wipe, "updated wipe-on-leave");

    reply.say("Updated server setting").await
}

pub async fn hide_inventory(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, HIDE_INVENTORY_META.tier).await? else {
        return Ok(());
    };

    let Some(raw) = arg1 else {
        return reply.usage(HIDE_INVENTORY_META.usage).await;
    };
    let Some(hide) = parse_bool(raw) else {
        return reply.say(INVALID_BOOL_MESSAGE).await;
    };

    guilds::set_hide_inventory(&ctx.db, reply.guild_key(), hide).await?;
    info!(guild_id = reply.guild_key(), hide, "updated inventory visibility");

    reply.say("Updated inventory setting").await
}
