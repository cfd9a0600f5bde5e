use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use rpg_commands::{handle_interaction, handle_message};
use rpg_core::{Context, catalog::Catalogs, config::Config, prefix::PrefixCache};
use rpg_database::{Database, MIGRATOR, guilds};
use rpg_utils::translation::Translator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.discord_token.clone()));
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&db_pool).await?;
    info!("PostgreSQL connection established.");
    let db = Database::new(db_pool);

    let prefixes = PrefixCache::new(guilds::custom_prefixes(&db).await?);
    let translator = Translator::load_dir(&config.locale_dir)?;
    info!(languages = ?translator.languages(), "loaded translations");
    let catalogs = Catalogs::load_dir(&config.catalog_dir)?;

    let ctx = Context::new(Arc::clone(&http), db, prefixes, translator, catalogs);

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), config.discord_token, intents);

    info!("RPG bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("RPG bot is ready");
            }

            Event::MessageCreate(msg) => {
                if msg.author.bot {
                    continue;
                }

                // Replies to an open dialog are consumed, not parsed as commands.
                if ctx
                    .replies
                    .offer(msg.channel_id.get(), msg.author.id.get(), &msg.content)
                    .await
                {
                    continue;
                }

                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "message handler failed");
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_interaction(ctx, interaction).await {
                        error!(?source, "interaction handler failed");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
