//! Validation of pagination button presses and jump-modal submits.

use twilight_http::Client;
use twilight_model::{
    application::interaction::{InteractionData, modal::ModalInteractionComponent},
    gateway::payload::incoming::InteractionCreate,
};

use super::respond::{
    PAGINATION_EXPIRED_MESSAGE, PAGINATION_INVALID_MESSAGE, PAGINATION_WRONG_USER_MESSAGE,
    respond_ephemeral_message,
};
use super::token::{
    PaginationToken, PaginationValidationError, belongs_to_family, is_expired, parse_custom_id,
    parse_modal_custom_id, validate_token,
};
use crate::time::now_unix_secs;

/// Outcome of validating a pagination button press.
#[derive(Debug, Clone)]
pub enum PaginationInteractionValidation {
    /// Interaction does not target this command family.
    NotForCommand,
    /// Interaction was invalid and already acknowledged with a user-facing response.
    HandledInvalid,
    Valid {
        actor_user_id: u64,
        token: PaginationToken,
    },
}

/// Outcome of validating a jump-modal submit.
#[derive(Debug, Clone)]
pub enum PaginationModalSubmitValidation {
    NotForCommand,
    HandledInvalid,
    Valid {
        actor_user_id: u64,
        command: String,
        requested_page: usize,
        total_pages_hint: usize,
    },
}

/// Validate a pagination button press for a command family such as `items`.
///
/// View keys like `items|97` belong to the `items` family.
pub async fn validate_interaction_for_command_prefix(
    http: &Client,
    interaction: &InteractionCreate,
    command_prefix: &str,
) -> anyhow::Result<PaginationInteractionValidation> {
    let Some(InteractionData::MessageComponent(component_data)) = interaction.data.as_ref() else {
        return Ok(PaginationInteractionValidation::NotForCommand);
    };

    let Some(token) = parse_custom_id(&component_data.custom_id) else {
        return Ok(PaginationInteractionValidation::NotForCommand);
    };

    if !belongs_to_family(&token.command, command_prefix) {
        return Ok(PaginationInteractionValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, "Unable to determine interaction user.")
            .await?;
        return Ok(PaginationInteractionValidation::HandledInvalid);
    };

    let rejection = match validate_token(token, actor_user_id, now_unix_secs()) {
        Ok(token) => {
            return Ok(PaginationInteractionValidation::Valid {
                actor_user_id,
                token,
            });
        }
        Err(PaginationValidationError::WrongUser) => PAGINATION_WRONG_USER_MESSAGE,
        Err(PaginationValidationError::Expired) => PAGINATION_EXPIRED_MESSAGE,
        Err(_) => PAGINATION_INVALID_MESSAGE,
    };

    respond_ephemeral_message(http, interaction, rejection).await?;
    Ok(PaginationInteractionValidation::HandledInvalid)
}

/// Extract the `page` text input value from a modal submit interaction.
fn parse_jump_modal_page(interaction: &InteractionCreate) -> Option<usize> {
    let InteractionData::ModalSubmit(modal_data) = interaction.data.as_ref()? else {
        return None;
    };

    modal_data
        .components
        .iter()
        .filter_map(|component| match component {
            ModalInteractionComponent::ActionRow(row) => Some(&row.components),
            _ => None,
        })
        .flatten()
        .find_map(|nested| match nested {
            ModalInteractionComponent::TextInput(text_input) if text_input.custom_id == "page" => {
                Some(text_input.value.trim().parse::<usize>().ok())
            }
            _ => None,
        })
        .flatten()
        .filter(|page| *page >= 1)
}

/// Validate a jump-modal submit for a command family.
pub async fn validate_jump_modal_for_command_prefix(
    http: &Client,
    interaction: &InteractionCreate,
    command_prefix: &str,
) -> anyhow::Result<PaginationModalSubmitValidation> {
    let Some(InteractionData::ModalSubmit(modal_data)) = interaction.data.as_ref() else {
        return Ok(PaginationModalSubmitValidation::NotForCommand);
    };

    let Some(modal_token) = parse_modal_custom_id(&modal_data.custom_id) else {
        return Ok(PaginationModalSubmitValidation::NotForCommand);
    };

    if !belongs_to_family(&modal_token.command, command_prefix) {
        return Ok(PaginationModalSubmitValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, "Unable to determine interaction user.")
            .await?;
        return Ok(PaginationModalSubmitValidation::HandledInvalid);
    };

    if modal_token.user_id != actor_user_id {
        respond_ephemeral_message(http, interaction, PAGINATION_WRONG_USER_MESSAGE).await?;
        return Ok(PaginationModalSubmitValidation::HandledInvalid);
    }

    if is_expired(modal_token.expires_at) {
        respond_ephemeral_message(http, interaction, PAGINATION_EXPIRED_MESSAGE).await?;
        return Ok(PaginationModalSubmitValidation::HandledInvalid);
    }

    let Some(requested_page) = parse_jump_modal_page(interaction) else {
        respond_ephemeral_message(http, interaction, "Please enter a valid page number.").await?;
        return Ok(PaginationModalSubmitValidation::HandledInvalid);
    };

    Ok(PaginationModalSubmitValidation::Valid {
        actor_user_id,
        command: modal_token.command,
        requested_page,
        total_pages_hint: modal_token.total_pages,
    })
}
