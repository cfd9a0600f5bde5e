use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "setdefaultmap",
    aliases: &[],
    group: None,
    desc: "Set the map shown by default. Requires Bot Admin.",
    category: "settings",
    usage: "rp!setdefaultmap <map>",
    tier: PermissionTier::Admin,
};

/// The map name is taken as-is, it may contain spaces.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(map) = rest else {
        return reply.usage(META.usage).await;
    };

    guilds::set_default_map(&ctx.db, reply.guild_key(), map).await?;
    info!(guild_id = reply.guild_key(), map, "updated default map");

    reply.say("Updated default map").await
}
