pub mod guild;
pub mod item;

pub use guild::GuildSettings;
pub use item::{ItemMeta, ServerItem, ShopEntry};
