use std::time::Duration;

use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::{
    items,
    model::{ItemMeta, ServerItem},
};
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "additem",
    aliases: &[],
    group: Some("settings"),
    desc: "Add a custom item through a short dialog. Use the `image` key for a thumbnail \
           and the `used` key for a message shown when the item is used. \
           Requires Bot Moderator or Bot Admin.",
    category: "items",
    usage: "rp!settings additem <name>",
    tier: PermissionTier::Moderator,
};

const DESCRIPTION_TIMEOUT: Duration = Duration::from_secs(120);
const ATTRIBUTES_TIMEOUT: Duration = Duration::from_secs(60);

const DESCRIPTION_PROMPT: &str = "Describe the item (a description for the item)";
const ATTRIBUTES_PROMPT: &str = "Additional information? (Attributes formatted in a list i.e \
     `color: 400, value: 200` Set an image for this item with the `image` key i.e. \
     `image: http://example.com/image.png` Set this item as usable by adding `used` key i.e. \
     `used: You open the jar and the bird flies away`";

/// What the author answered to the attributes prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum AttributesReply {
    Cancel,
    Skip,
    Attributes(ItemMeta),
    Invalid,
}

/// Interactively create a server item: name from the command, then a
/// description and optional `key: value` attributes from follow-up messages.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, name: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(name) = name else {
        return reply.usage(META.usage).await;
    };

    let channel_id = msg.channel_id.get();
    let author_id = msg.author.id.get();

    reply.say(DESCRIPTION_PROMPT).await?;
    let Some(description) = ctx
        .replies
        .wait_for_reply(channel_id, author_id, DESCRIPTION_TIMEOUT)
        .await
    else {
        return reply.say("Timed out! Try again").await;
    };

    if is_keyword(&description, "cancel") {
        return reply.say("Cancelling!").await;
    }

    let mut item = ServerItem::new(name);
    item.description = Some(description);

    reply.say(ATTRIBUTES_PROMPT).await?;
    loop {
        let Some(response) = ctx
            .replies
            .wait_for_reply(channel_id, author_id, ATTRIBUTES_TIMEOUT)
            .await
        else {
            return reply.say("Timed out! Try again").await;
        };

        match parse_attributes_reply(&response) {
            AttributesReply::Cancel => return reply.say("Cancelling!").await,
            AttributesReply::Skip => {
                reply.say("Skipping!").await?;
                break;
            }
            AttributesReply::Attributes(meta) => {
                item.meta = meta;
                break;
            }
            AttributesReply::Invalid => reply.say("Invalid syntax, try again.").await?,
        }
    }

    items::new_item(&ctx.db, reply.guild_key(), &item).await?;
    info!(
        guild_id = reply.guild_key(),
        item = %item.name,
        attributes = item.meta.len(),
        "created server item"
    );

    reply.say("Item successfully created").await
}

fn is_keyword(content: &str, keyword: &str) -> bool {
    content.trim().eq_ignore_ascii_case(keyword)
}

pub fn parse_attributes_reply(content: &str) -> AttributesReply {
    if is_keyword(content, "cancel") {
        return AttributesReply::Cancel;
    }

    if is_keyword(content, "skip") {
        return AttributesReply::Skip;
    }

    match parse_attributes(content) {
        Some(meta) => AttributesReply::Attributes(meta),
        None => AttributesReply::Invalid,
    }
}

/// Parse `key: value` pairs separated by newlines, or by commas when the
/// message is a single line.
///
/// Keys are trimmed and lower-cased, values trimmed. Any malformed pair
/// rejects the whole message.
pub fn parse_attributes(content: &str) -> Option<ItemMeta> {
    let separator = if content.contains('\n') { '\n' } else { ',' };
    let mut meta = ItemMeta::new();

    for pair in content.split(separator) {
        let mut parts = pair.split(": ");
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };

        let key = key.trim().to_lowercase();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return None;
        }

        meta.insert(key, value.to_owned());
    }

    Some(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> ItemMeta {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn comma_separated_pairs_are_parsed() {
        assert_eq!(
            parse_attributes("Color: 400, value: 200"),
            Some(meta(&[("color", "400"), ("value", "200")]))
        );
    }

    #[test]
    fn newlines_take_precedence_over_commas() {
        let content = "used: You open the jar, and the bird flies away\nimage: http://x.test/a.png";
        assert_eq!(
            parse_attributes(content),
            Some(meta(&[
                ("used", "You open the jar, and the bird flies away"),
                ("image", "http://x.test/a.png"),
            ]))
        );
    }

    #[test]
    fn malformed_pairs_reject_the_whole_message() {
        assert_eq!(parse_attributes("color 400"), None);
        assert_eq!(parse_attributes("color: 400, value"), None);
        assert_eq!(parse_attributes("a: b: c"), None);
        assert_eq!(parse_attributes("color: "), None);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_attributes_reply("CANCEL"), AttributesReply::Cancel);
        assert_eq!(parse_attributes_reply(" skip "), AttributesReply::Skip);
        assert_eq!(parse_attributes_reply("nonsense"), AttributesReply::Invalid);
        assert_eq!(
            parse_attributes_reply("used: You used this item!"),
            AttributesReply::Attributes(meta(&[("used", "You used this item!")]))
        );
    }
}
