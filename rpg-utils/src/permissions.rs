use twilight_http::Client;
use twilight_model::{gateway::payload::incoming::MessageCreate, guild::Permissions};

/// Permission tier required by a settings command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionTier {
    /// Anyone in the guild.
    Member,
    /// Bot moderators: members who can manage messages.
    Moderator,
    /// Bot admins: members who can manage the server.
    Admin,
}

impl PermissionTier {
    pub fn required(self) -> Permissions {
        match self {
            Self::Member => Permissions::empty(),
            Self::Moderator => Permissions::MANAGE_MESSAGES,
            Self::Admin => Permissions::MANAGE_GUILD,
        }
    }

    /// Whether a resolved permission set satisfies this tier.
    pub fn allows(self, perms: Permissions) -> bool {
        perms.contains(Permissions::ADMINISTRATOR) || perms.contains(self.required())
    }
}

/// Resolve the invoking author's effective guild permissions for a message command.
///
/// Returns `Ok(None)` when the message is not from a guild context.
pub async fn resolve_message_author_permissions(
    http: &Client,
    msg: &MessageCreate,
) -> anyhow::Result<Option<Permissions>> {
    if let Some(perms) = msg.member.as_ref().and_then(|m| m.permissions) {
        return Ok(Some(perms));
    }

    let Some(guild_id) = msg.guild_id else {
        return Ok(None);
    };

    let guild = http.guild(guild_id).await?.model().await?;
    if guild.owner_id == msg.author.id {
        return Ok(Some(Permissions::all()));
    }

    let member = http
        .guild_member(guild_id, msg.author.id)
        .await?
        .model()
        .await?;

    let resolved = guild
        .roles
        .iter()
        .filter(|role| role.id == guild_id.cast() || member.roles.contains(&role.id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions);

    Ok(Some(resolved))
}

/// Check whether the message author meets a permission tier.
///
/// Returns `Ok(false)` when the message is outside a guild context.
pub async fn has_message_tier(
    http: &Client,
    msg: &MessageCreate,
    tier: PermissionTier,
) -> anyhow::Result<bool> {
    if tier == PermissionTier::Member {
        return Ok(msg.guild_id.is_some());
    }

    let Some(perms) = resolve_message_author_permissions(http, msg).await? else {
        return Ok(false);
    };

    Ok(tier.allows(perms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_passes_every_tier() {
        let perms = Permissions::ADMINISTRATOR;
        assert!(PermissionTier::Moderator.allows(perms));
        assert!(PermissionTier::Admin.allows(perms));
    }

    #[test]
    fn moderators_are_not_admins() {
        let perms = Permissions::MANAGE_MESSAGES | Permissions::SEND_MESSAGES;
        assert!(PermissionTier::Moderator.allows(perms));
        assert!(!PermissionTier::Admin.allows(perms));
        assert!(PermissionTier::Member.allows(Permissions::empty()));
    }
}
