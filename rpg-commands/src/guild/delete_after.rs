use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "deleteafter",
    aliases: &[],
    group: None,
    desc: "Delete the bot's replies after this many seconds, 0 to keep them. \
           Requires Bot Moderator or Bot Admin.",
    category: "settings",
    usage: "rp!deleteafter <seconds>",
    tier: PermissionTier::Moderator,
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(seconds) = parse_delete_secs(arg1) else {
        return reply.usage(META.usage).await;
    };

    guilds::set_delete_time(&ctx.db, reply.guild_key(), seconds).await?;
    info!(guild_id = reply.guild_key(), seconds, "updated reply auto-delete");

    reply.say("Updated settings").await
}

/// Whole seconds, `0` for never. Negative or fractional input is rejected.
pub fn parse_delete_secs(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whole_seconds_including_zero() {
        assert_eq!(parse_delete_secs(Some("0")), Some(0));
        assert_eq!(parse_delete_secs(Some("45")), Some(45));
    }

    #[test]
    fn rejects_negative_and_non_integer_input() {
        assert_eq!(parse_delete_secs(Some("-5")), None);
        assert_eq!(parse_delete_secs(Some("2.5")), None);
        assert_eq!(parse_delete_secs(Some("soon")), None);
        assert_eq!(parse_delete_secs(None), None);
    }
}
