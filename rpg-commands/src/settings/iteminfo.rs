use twilight_model::gateway::payload::incoming::MessageCreate;

use super::embeds::item_info_embed;
use crate::CommandMeta;
use crate::respond::{Responder, random_color};
use rpg_core::Context;
use rpg_database::items;
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "iteminfo",
    aliases: &[],
    group: Some("settings"),
    desc: "Get info on a server item.",
    category: "items",
    usage: "rp!settings iteminfo <item>",
    tier: PermissionTier::Member,
};

/// Show a server item: description, thumbnail and attributes.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, name: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(name) = name else {
        return reply.usage(META.usage).await;
    };

    let Some(item) = items::get_item(&ctx.db, reply.guild_key(), name).await? else {
        return reply.say("Item doesnt exist!").await;
    };

    let badge = reply.guild_badge().await;
    let embed = item_info_embed(&item, &badge, &reply.tr("Name"), random_color())?;

    reply.send_embed(embed).await
}
