use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::guilds;
use rpg_utils::{permissions::PermissionTier, translation::Translator};

pub const META: CommandMeta = CommandMeta {
    name: "language",
    aliases: &[],
    group: None,
    desc: "Show or change the language the bot answers in. Requires Bot Admin.",
    category: "settings",
    usage: "rp!language [language]",
    tier: PermissionTier::Admin,
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(language) = arg1 else {
        return reply
            .say_with(
                "The guild language is set to {}",
                &[reply.settings.language.as_str()],
            )
            .await;
    };

    let Some(language) = pick_language(&ctx.translator, language) else {
        return reply.say("That is not a valid language!").await;
    };

    guilds::set_language(&ctx.db, reply.guild_key(), &language).await?;
    info!(guild_id = reply.guild_key(), %language, "updated guild language");

    // Confirm in the new language.
    let confirmation = ctx.translator.translate(&language, "Language successfully set!");
    reply.send_raw(confirmation).await
}

/// Lower-cased language code, if a locale exists for it.
pub fn pick_language(translator: &Translator, raw: &str) -> Option<String> {
    let language = raw.trim().to_lowercase();
    translator.is_supported(&language).then_some(language)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn translator() -> Translator {
        Translator::from_locales(HashMap::from([("es".to_owned(), HashMap::new())]))
    }

    #[test]
    fn known_codes_are_case_folded() {
        let translator = translator();
        assert_eq!(pick_language(&translator, "ES").as_deref(), Some("es"));
        assert_eq!(pick_language(&translator, "en").as_deref(), Some("en"));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(pick_language(&translator(), "klingon"), None);
    }
}
