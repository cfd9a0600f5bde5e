use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::{DatabaseError, items};
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "removeitem",
    aliases: &["deleteitem"],
    group: Some("settings"),
    desc: "Remove a custom item. Requires Bot Moderator or Bot Admin.",
    category: "items",
    usage: "rp!settings removeitem <item>",
    tier: PermissionTier::Moderator,
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, name: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(name) = name else {
        return reply.usage(META.usage).await;
    };

    match items::remove_item(&ctx.db, reply.guild_key(), name).await {
        Ok(()) => {
            info!(guild_id = reply.guild_key(), item = name, "removed server item");
            reply.say_with("Successfully removed {}", &[name]).await
        }
        Err(DatabaseError::ItemNotFound(_)) => reply.say("That item doesn't exist").await,
        Err(source) => Err(source.into()),
    }
}
