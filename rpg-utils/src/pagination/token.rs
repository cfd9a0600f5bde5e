//! Stateless pagination token encoding, parsing, and validation.

use crate::time::now_unix_secs;

const TOKEN_PREFIX: &str = "pg";
const MODAL_TOKEN_PREFIX: &str = "pgm";

/// Button action carried by a pagination token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Prev,
    Next,
    Jump,
}

impl PageAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Jump => "jump",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "jump" => Some(Self::Jump),
            _ => None,
        }
    }
}

/// Parsed pagination token data from a button custom ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationToken {
    /// Logical view key, e.g. `items` or `items|97`.
    pub command: String,
    pub action: PageAction,
    /// Target page number, 1-based.
    pub page: usize,
    pub total_pages: usize,
    /// User that owns this pagination session.
    pub user_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Parsed jump-modal token data from a modal custom ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModalToken {
    pub command: String,
    /// Total page count at modal-open time.
    pub total_pages: usize,
    pub user_id: u64,
    pub expires_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationValidationError {
    Invalid,
    WrongUser,
    Expired,
    OutOfRange,
}

/// Build a compact custom ID carrying stateless pagination state.
pub fn build_custom_id(
    command: &str,
    action: PageAction,
    target_page: usize,
    total_pages: usize,
    user_id: u64,
    expires_at: u64,
) -> String {
    let action = action.as_str();
    format!("{TOKEN_PREFIX}:{command}:{action}:{target_page}:{total_pages}:{user_id}:{expires_at}")
}

pub fn parse_custom_id(custom_id: &str) -> Option<PaginationToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let action = PageAction::parse(parts.next()?)?;
    let page = parts.next()?.parse::<usize>().ok()?;
    let total_pages = parts.next()?.parse::<usize>().ok()?;
    let user_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationToken {
        command,
        action,
        page,
        total_pages,
        user_id,
        expires_at,
    })
}

/// Validate a parsed token against the pressing user, expiry, and page bounds.
pub fn validate_token(
    token: PaginationToken,
    actor_user_id: u64,
    now: u64,
) -> Result<PaginationToken, PaginationValidationError> {
    if token.user_id != actor_user_id {
        return Err(PaginationValidationError::WrongUser);
    }

    if now > token.expires_at {
        return Err(PaginationValidationError::Expired);
    }

    if token.page == 0 || token.page > token.total_pages {
        return Err(PaginationValidationError::OutOfRange);
    }

    Ok(token)
}

pub fn build_modal_custom_id(
    command: &str,
    total_pages: usize,
    user_id: u64,
    expires_at: u64,
) -> String {
    format!("{MODAL_TOKEN_PREFIX}:{command}:{total_pages}:{user_id}:{expires_at}")
}

pub fn parse_modal_custom_id(custom_id: &str) -> Option<PaginationModalToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != MODAL_TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let total_pages = parts.next()?.parse::<usize>().ok()?;
    let user_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationModalToken {
        command,
        total_pages,
        user_id,
        expires_at,
    })
}

pub fn is_expired(expires_at: u64) -> bool {
    now_unix_secs() > expires_at
}

/// Whether a token's view key belongs to a command family (`items`, `items|97`).
pub fn belongs_to_family(command: &str, family: &str) -> bool {
    command == family
        || command
            .strip_prefix(family)
            .is_some_and(|rest| rest.starts_with('|'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_id_survives_a_round_trip() {
        let id = build_custom_id("items|97", PageAction::Next, 2, 3, 42, 1_000);
        assert_eq!(id, "pg:items|97:next:2:3:42:1000");

        let token = parse_custom_id(&id).unwrap();
        assert_eq!(token.command, "items|97");
        assert_eq!(token.action, PageAction::Next);
        assert_eq!(token.page, 2);
        assert_eq!(token.total_pages, 3);
    }

    #[test]
    fn custom_id_with_extra_segments_is_rejected() {
        assert!(parse_custom_id("pg:items:next:2:3:42:1000:extra").is_none());
        assert!(parse_custom_id("pg:items:sideways:2:3:42:1000").is_none());
        assert!(parse_custom_id("terminate:confirm:1:2:0").is_none());
    }

    #[test]
    fn validation_checks_owner_expiry_and_bounds() {
        let token = parse_custom_id("pg:items:next:2:3:42:1000").unwrap();

        assert_eq!(
            validate_token(token.clone(), 7, 10),
            Err(PaginationValidationError::WrongUser)
        );
        assert_eq!(
            validate_token(token.clone(), 42, 1_001),
            Err(PaginationValidationError::Expired)
        );
        assert!(validate_token(token, 42, 1_000).is_ok());

        let out_of_range = parse_custom_id("pg:items:next:4:3:42:1000").unwrap();
        assert_eq!(
            validate_token(out_of_range, 42, 10),
            Err(PaginationValidationError::OutOfRange)
        );
    }

    #[test]
    fn modal_id_round_trips() {
        let id = build_modal_custom_id("items", 5, 42, 99);
        let token = parse_modal_custom_id(&id).unwrap();
        assert_eq!(token.total_pages, 5);
        assert_eq!(token.user_id, 42);
        assert!(parse_modal_custom_id("pg:items:next:2:3:42:1000").is_none());
    }

    #[test]
    fn family_matching_requires_separator() {
        assert!(belongs_to_family("items", "items"));
        assert!(belongs_to_family("items|97", "items"));
        assert!(!belongs_to_family("itemsx", "items"));
        assert!(!belongs_to_family("help", "items"));
    }
}
