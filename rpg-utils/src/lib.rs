/// Delayed deletion of bot replies.
pub mod cleanup;
/// Generic embed builders shared across commands.
pub mod embed;
/// Default message-command prefix; a guild's custom prefix works alongside it.
pub const DEFAULT_PREFIX: &str = "rp!";
/// Shared pagination helpers and interaction utilities.
pub mod pagination;
/// Argument converters.
pub mod parse;
/// Permission tiers.
pub mod permissions;
/// Shared time helpers.
pub mod time;
/// Guild-language lookup.
pub mod translation;
