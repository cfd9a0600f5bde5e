//! Pagination UI component builders.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::token::{PageAction, build_custom_id};
use crate::time::now_unix_secs;

/// Build previous/jump/next buttons for a paginated message.
///
/// Single-page views get no components at all.
pub fn build_nav_components(
    command: &str,
    current_page: usize,
    total_pages: usize,
    user_id: u64,
    timeout_secs: u64,
) -> Vec<Component> {
    if total_pages <= 1 {
        return vec![];
    }

    let expires_at = now_unix_secs().saturating_add(timeout_secs);
    let prev_page = current_page.saturating_sub(1).max(1);
    let next_page = (current_page + 1).min(total_pages);

    let button = |action, page, label: &str, disabled| {
        Component::Button(Button {
            id: None,
            custom_id: Some(build_custom_id(
                command,
                action,
                page,
                total_pages,
                user_id,
                expires_at,
            )),
            disabled,
            emoji: None,
            label: Some(label.to_owned()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        })
    };

    vec![Component::ActionRow(ActionRow {
        id: None,
        components: vec![
            button(PageAction::Prev, prev_page, "\u{2B05}", current_page <= 1),
            button(PageAction::Jump, current_page, "*", false),
            button(PageAction::Next, next_page, "\u{27A1}", current_page >= total_pages),
        ],
    })]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(components: &[Component]) -> Vec<&Button> {
        let Some(Component::ActionRow(row)) = components.first() else {
            return vec![];
        };

        row.components
            .iter()
            .filter_map(|component| match component {
                Component::Button(button) => Some(button),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn single_page_has_no_navigation() {
        assert!(build_nav_components("items", 1, 1, 42, 120).is_empty());
    }

    #[test]
    fn edges_disable_the_matching_button() {
        let first = build_nav_components("items", 1, 3, 42, 120);
        let first = buttons(&first);
        assert!(first[0].disabled);
        assert!(!first[2].disabled);

        let last = build_nav_components("items", 3, 3, 42, 120);
        let last = buttons(&last);
        assert!(!last[0].disabled);
        assert!(last[2].disabled);
    }
}
