use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::{
    parse::{format_amount, parse_number},
    permissions::PermissionTier,
};

pub const META: CommandMeta = CommandMeta {
    name: "setstart",
    aliases: &[],
    group: None,
    desc: "Set the amount of money a character starts with. Requires Bot Moderator or Bot Admin.",
    category: "settings",
    usage: "rp!setstart <amount>",
    tier: PermissionTier::Moderator,
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(raw) = arg1 else {
        return reply.usage(META.usage).await;
    };

    let amount = match parse_number(raw) {
        Ok(amount) => amount,
        Err(error) => return reply.say(error.message()).await,
    };

    guilds::set_start(&ctx.db, reply.guild_key(), amount).await?;
    info!(guild_id = reply.guild_key(), amount, "updated starting money");

    let amount = format_amount(amount);
    reply
        .say_with(
            "Starting amount changed to {} {}",
            &[amount.as_str(), reply.settings.currency.as_str()],
        )
        .await
}
