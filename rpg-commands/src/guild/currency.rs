use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "currency",
    aliases: &[],
    group: None,
    desc: "Set the server currency name. Requires Bot Admin.",
    category: "settings",
    usage: "rp!currency <currency>",
    tier: PermissionTier::Admin,
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(currency) = arg1 else {
        return reply.usage(META.usage).await;
    };

    guilds::set_currency(&ctx.db, reply.guild_key(), currency).await?;
    info!(guild_id = reply.guild_key(), currency, "updated guild currency");

    reply.say("Currency successfully set!").await
}
