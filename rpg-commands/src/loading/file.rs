use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::respond::Responder;
use rpg_core::Context;
use rpg_database::{
    items,
    model::{ServerItem, ShopEntry},
    shop,
};
use rpg_utils::permissions::PermissionTier;

pub const META: CommandMeta = CommandMeta {
    name: "loaditems",
    aliases: &[],
    group: None,
    desc: "Load every item from the attached CSV file. Columns: name, description, \
           buyprice, sellprice, and any extra attributes. Requires Bot Admin.",
    category: "loading",
    usage: "rp!loaditems (with a .csv attachment)",
    tier: PermissionTier::Admin,
};

/// Largest accepted attachment, 1 MiB.
const MAX_FILE_SIZE: u64 = 1 << 20;
const DEFAULT_DESCRIPTION: &str = "No description.";
const RESERVED_COLUMNS: [&str; 4] = ["name", "description", "buyprice", "sellprice"];

/// Items and shop listings read from a CSV file.
#[derive(Debug, Default, PartialEq)]
pub struct CsvImport {
    pub items: Vec<ServerItem>,
    pub shop: Vec<ShopEntry>,
}

/// Why an attachment can't be imported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentProblem {
    Missing,
    TooLarge,
}

impl AttachmentProblem {
    pub fn message(self) -> &'static str {
        match self {
            Self::Missing => "This command needs to have a file attached!",
            Self::TooLarge => "This file is too large!",
        }
    }
}

/// Size check for the attached file, `None` when nothing is attached.
///
/// Exactly 1 MiB is still accepted.
pub fn check_attachment_size(size: Option<u64>) -> Result<(), AttachmentProblem> {
    match size {
        None => Err(AttachmentProblem::Missing),
        Some(size) if size > MAX_FILE_SIZE => Err(AttachmentProblem::TooLarge),
        Some(_) => Ok(()),
    }
}

#[derive(Debug)]
pub enum ImportError {
    MissingName,
    InvalidPrice { item: String, value: String },
    Malformed(csv::Error),
}

impl ImportError {
    /// Source text of the reply, before translation and placeholder filling.
    fn template(&self) -> &'static str {
        match self {
            Self::MissingName => "Error: There is an item with a missing name!",
            Self::InvalidPrice { .. } => "Error: `{}` is not a valid price for {}!",
            Self::Malformed(_) => "Error: That file is not a valid CSV file!",
        }
    }
}

pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let attachment = msg.attachments.last();
    if let Err(problem) = check_attachment_size(attachment.map(|file| file.size)) {
        return reply.say(problem.message()).await;
    }
    let Some(attachment) = attachment else {
        return Ok(());
    };

    let data = ctx.download(&attachment.url).await?;
    let import = match parse_item_csv(&data) {
        Ok(import) => import,
        Err(error) => {
            info!(guild_id = reply.guild_key(), ?error, "rejected item file");
            return match &error {
                ImportError::InvalidPrice { item, value } => {
                    reply
                        .say_with(error.template(), &[value.as_str(), item.as_str()])
                        .await
                }
                _ => reply.say(error.template()).await,
            };
        }
    };

    let listed = shop::add_shop_items(&ctx.db, reply.guild_key(), &import.shop).await?;
    let written = items::new_items(&ctx.db, reply.guild_key(), &import.items).await?;
    info!(
        guild_id = reply.guild_key(),
        file = %attachment.filename,
        written,
        listed,
        "loaded items from file"
    );

    reply.say("Successfully loaded all items!").await
}

/// Parse an item CSV. The first row holds the column names.
///
/// Nothing is returned unless every row is valid.
pub fn parse_item_csv(data: &[u8]) -> Result<CsvImport, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers().map_err(ImportError::Malformed)?.clone();
    let mut import = CsvImport::default();

    for record in reader.records() {
        let record = record.map_err(ImportError::Malformed)?;
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .and_then(|index| record.get(index))
                .unwrap_or_default()
        };

        let name = column("name");
        if name.is_empty() {
            return Err(ImportError::MissingName);
        }

        let description = match column("description") {
            "" => DEFAULT_DESCRIPTION,
            description => description,
        };

        let mut item = ServerItem::new(name);
        item.description = Some(description.to_owned());
        item.meta = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, value)| !RESERVED_COLUMNS.contains(header) && !value.is_empty())
            .map(|(header, value)| (header.to_owned(), value.to_owned()))
            .collect();

        let buy = parse_price(name, column("buyprice"))?;
        let sell = parse_price(name, column("sellprice"))?;
        if buy != 0.0 || sell != 0.0 {
            import.shop.push(ShopEntry {
                item_name: name.to_owned(),
                buy,
                sell,
                level: 0,
            });
        }

        import.items.push(item);
    }

    Ok(import)
}

/// Blank prices count as zero.
fn parse_price(item: &str, raw: &str) -> Result<f64, ImportError> {
    if raw.is_empty() {
        return Ok(0.0);
    }

    raw.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ImportError::InvalidPrice {
            item: item.to_owned(),
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_size_limit_is_inclusive() {
        assert_eq!(check_attachment_size(Some(0)), Ok(()));
        assert_eq!(check_attachment_size(Some(1 << 20)), Ok(()));
        assert_eq!(
            check_attachment_size(Some((1 << 20) + 1)),
            Err(AttachmentProblem::TooLarge)
        );
    }

    #[test]
    fn a_missing_attachment_is_reported() {
        let problem = check_attachment_size(None).unwrap_err();
        assert_eq!(problem, AttachmentProblem::Missing);
        assert_eq!(problem.message(), "This command needs to have a file attached!");
    }

    #[test]
    fn rows_become_items_and_shop_listings() {
        let csv = "name,description,buyprice,sellprice,weight,color\n\
                   Rope,50 feet of rope,10,5,2 lb,\n\
                   Pebble,,0,0,,grey\n";

        let import = parse_item_csv(csv.as_bytes()).unwrap();
        assert_eq!(import.items.len(), 2);

        let rope = &import.items[0];
        assert_eq!(rope.name, "Rope");
        assert_eq!(rope.description.as_deref(), Some("50 feet of rope"));
        assert_eq!(rope.meta.get("weight").map(String::as_str), Some("2 lb"));
        assert!(!rope.meta.contains_key("color"));
        assert!(!rope.meta.contains_key("buyprice"));

        let pebble = &import.items[1];
        assert_eq!(pebble.description.as_deref(), Some(DEFAULT_DESCRIPTION));
        assert_eq!(pebble.meta.get("color").map(String::as_str), Some("grey"));

        assert_eq!(
            import.shop,
            vec![ShopEntry {
                item_name: "Rope".to_owned(),
                buy: 10.0,
                sell: 5.0,
                level: 0,
            }]
        );
    }

    #[test]
    fn price_columns_are_optional() {
        let import = parse_item_csv(b"name\nLantern\n").unwrap();
        assert_eq!(import.items.len(), 1);
        assert!(import.shop.is_empty());
    }

    #[test]
    fn a_missing_name_rejects_the_file() {
        let result = parse_item_csv(b"name,description\nRope,ok\n,nameless\n");
        assert!(matches!(result, Err(ImportError::MissingName)));
    }

    #[test]
    fn bad_prices_name_the_item() {
        let result = parse_item_csv(b"name,buyprice\nRope,cheap\n");
        match result {
            Err(ImportError::InvalidPrice { item, value }) => {
                assert_eq!(item, "Rope");
                assert_eq!(value, "cheap");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
