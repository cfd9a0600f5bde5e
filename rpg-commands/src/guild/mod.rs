//! Top-level guild configuration commands.

pub mod currency;
pub mod default_map;
pub mod delete_after;
pub mod language;
pub mod prefix;
pub mod start;
pub mod toggles;
