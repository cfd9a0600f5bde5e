use std::sync::Arc;

use twilight_http::Client;

use rpg_database::Database;
use rpg_utils::translation::Translator;

pub mod catalog;
pub mod config;
pub mod prefix;
pub mod standby;

use catalog::Catalogs;
use prefix::PrefixCache;
use standby::ReplyWaiter;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub db: Database,
    pub replies: ReplyWaiter,
    pub prefixes: PrefixCache,
    pub translator: Arc<Translator>,
    pub catalogs: Arc<Catalogs>,
    /// Plain HTTP client for fetching message attachments.
    pub downloads: reqwest::Client,
}

impl Context {
    pub fn new(
        http: Arc<Client>,
        db: Database,
        prefixes: PrefixCache,
        translator: Translator,
        catalogs: Catalogs,
    ) -> Self {
        Self {
            http,
            db,
            replies: ReplyWaiter::new(),
            prefixes,
            translator: Arc::new(translator),
            catalogs: Arc::new(catalogs),
            downloads: reqwest::Client::new(),
        }
    }

    /// Download a message attachment into memory.
    pub async fn download(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let bytes = self
            .downloads
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}
