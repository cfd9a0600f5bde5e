use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::respond::Responder;
use crate::{COMMANDS, CommandMeta};
use rpg_core::Context;
use rpg_utils::{DEFAULT_PREFIX, permissions::PermissionTier};

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    aliases: &[],
    group: None,
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "rp!usage <command>",
    tier: PermissionTier::Member,
};

/// Look a command up by name or alias, top level first, then subcommands.
pub fn lookup(raw_name: &str) -> Option<&'static CommandMeta> {
    let name = raw_name.trim().trim_start_matches(DEFAULT_PREFIX).to_lowercase();

    COMMANDS
        .iter()
        .filter(|command| command.answers_to(&name))
        .min_by_key(|command| command.group.is_some())
}

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(reply) = Responder::open(&ctx, &msg, META.tier).await? else {
        return Ok(());
    };

    let Some(raw_name) = arg1 else {
        return reply.usage(META.usage).await;
    };

    match lookup(raw_name) {
        Some(command) => reply.usage(command.usage).await,
        None => {
            let name = raw_name.trim().to_lowercase();
            reply.say_with("Unknown command: `{}`", &[name.as_str()]).await
        }
    }
}
