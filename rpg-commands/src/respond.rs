use std::sync::Arc;

use tracing::warn;
use twilight_http::Client;
use twilight_model::{
    channel::message::{Message, embed::Embed},
    gateway::payload::incoming::MessageCreate,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker},
    },
};

use rpg_core::Context;
use rpg_database::{guilds, model::GuildSettings};
use rpg_utils::{
    cleanup::schedule_message_delete,
    embed::GuildBadge,
    permissions::{PermissionTier, has_message_tier},
    translation::{Translator, fill},
};

pub const GUILD_ONLY_MESSAGE: &str = "This command only works in servers.";
pub const PERMISSION_DENIED_MESSAGE: &str = "You are not permitted to use this command.";

/// Reply channel for one command invocation inside a guild.
///
/// Translates into the guild language and applies the guild's reply
/// auto-delete delay to everything it sends.
pub struct Responder {
    http: Arc<Client>,
    translator: Arc<Translator>,
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Id<GuildMarker>,
    pub settings: GuildSettings,
}

impl Responder {
    /// Check guild context and permission tier, then load the guild settings.
    ///
    /// Returns `Ok(None)` after replying when the invocation is rejected.
    pub async fn open(
        ctx: &Context,
        msg: &MessageCreate,
        tier: PermissionTier,
    ) -> anyhow::Result<Option<Self>> {
        let Some(guild_id) = msg.guild_id else {
            ctx.http
                .create_message(msg.channel_id)
                .content(GUILD_ONLY_MESSAGE)
                .await?;
            return Ok(None);
        };

        let settings = guilds::get_guild_data(&ctx.db, guild_id.get()).await?;
        let responder = Self {
            http: Arc::clone(&ctx.http),
            translator: Arc::clone(&ctx.translator),
            channel_id: msg.channel_id,
            guild_id,
            settings,
        };

        if !has_message_tier(&ctx.http, msg, tier).await? {
            responder.say(PERMISSION_DENIED_MESSAGE).await?;
            return Ok(None);
        }

        Ok(Some(responder))
    }

    pub fn guild_key(&self) -> u64 {
        self.guild_id.get()
    }

    /// Translate a source string into the guild language.
    pub fn tr(&self, text: &str) -> String {
        self.translator
            .translate(&self.settings.language, text)
            .to_owned()
    }

    /// Send a translated message.
    pub async fn say(&self, text: &str) -> anyhow::Result<()> {
        let content = self.tr(text);
        self.send_raw(&content).await
    }

    /// Send a translated template with `{}` placeholders filled in order.
    pub async fn say_with(&self, template: &str, args: &[&str]) -> anyhow::Result<()> {
        let content = fill(&self.tr(template), args);
        self.send_raw(&content).await
    }

    /// Send the usage line for a command.
    pub async fn usage(&self, usage: &str) -> anyhow::Result<()> {
        let content = format!("{}: `{usage}`", self.tr("Usage"));
        self.send_raw(&content).await
    }

    /// Send content verbatim, without translation.
    pub async fn send_raw(&self, content: &str) -> anyhow::Result<()> {
        let message = self
            .http
            .create_message(self.channel_id)
            .content(content)
            .await?
            .model()
            .await?;
        self.expire(&message);

        Ok(())
    }

    pub async fn send_embed(&self, embed: Embed) -> anyhow::Result<()> {
        let message = self
            .http
            .create_message(self.channel_id)
            .embeds(&[embed])
            .await?
            .model()
            .await?;
        self.expire(&message);

        Ok(())
    }

    /// Apply the guild's auto-delete delay to a message the bot sent.
    pub fn expire(&self, message: &Message) {
        schedule_message_delete(
            Arc::clone(&self.http),
            message.channel_id,
            message.id,
            self.settings.message_delete_secs,
        );
    }

    pub async fn guild_badge(&self) -> GuildBadge {
        guild_badge(&self.http, self.guild_id).await
    }
}

/// Guild name and icon for embed author lines.
///
/// Falls back to a bare guild label when the guild can't be fetched.
pub async fn guild_badge(http: &Client, guild_id: Id<GuildMarker>) -> GuildBadge {
    let guild = match http.guild(guild_id).await {
        Ok(response) => response.model().await,
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), "failed to fetch guild");
            return fallback_badge(guild_id);
        }
    };

    match guild {
        Ok(guild) => GuildBadge::new(guild_id, guild.name, guild.icon),
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), "failed to decode guild");
            fallback_badge(guild_id)
        }
    }
}

fn fallback_badge(guild_id: Id<GuildMarker>) -> GuildBadge {
    GuildBadge {
        name: format!("Server {}", guild_id.get()),
        icon_url: None,
    }
}

/// Random embed color, like every settings embed uses.
pub fn random_color() -> u32 {
    rand::random_range(0..=0x00FF_FFFF)
}
