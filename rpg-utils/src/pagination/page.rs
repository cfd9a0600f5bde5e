//! Pure pagination math.

pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Resolve a modal-entered page using the modal's total-pages hint.
///
/// The hint goes stale when items change after the modal opened, so the
/// target is bounded by both the current total and the hinted total.
pub fn resolve_modal_target_page(
    entered_page: usize,
    current_total_pages: usize,
    hinted_total_pages: usize,
) -> usize {
    let max_allowed_page = current_total_pages.min(hinted_total_pages.max(1));
    clamp_page(entered_page, max_allowed_page)
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = (start + safe_per_page).min(total_items);
    (start.min(total_items), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 4), 0);
        assert_eq!(total_pages(4, 4), 1);
        assert_eq!(total_pages(5, 4), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn windows_stay_inside_the_item_list() {
        assert_eq!(page_window(10, 4, 1), (0, 4));
        assert_eq!(page_window(10, 4, 3), (8, 10));
        assert_eq!(page_window(10, 4, 9), (10, 10));
    }

    #[test]
    fn modal_page_respects_stale_hint() {
        assert_eq!(resolve_modal_target_page(9, 5, 3), 3);
        assert_eq!(resolve_modal_target_page(9, 2, 3), 2);
        assert_eq!(resolve_modal_target_page(0, 2, 3), 1);
    }
}
