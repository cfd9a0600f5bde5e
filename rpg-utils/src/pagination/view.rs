//! Embed and component composition for paginated views.

use twilight_model::channel::message::{component::Component, embed::Embed};

use crate::embed::{PageStyle, build_paginated_embed};

use super::components::build_nav_components;
use super::page::clamp_page;

/// One rendered page: embed plus navigation controls.
pub struct PageView {
    pub embed: Embed,
    pub components: Vec<Component>,
}

/// Build a paginated embed + navigation controls from a pre-rendered description.
#[allow(clippy::too_many_arguments)]
pub fn build_paginated_view(
    command: &str,
    title: &str,
    description: String,
    page: usize,
    total_pages: usize,
    owner_user_id: u64,
    timeout_secs: u64,
    style: &PageStyle,
) -> anyhow::Result<PageView> {
    let page = clamp_page(page, total_pages);
    let total_pages = total_pages.max(1);

    let embed = build_paginated_embed(title, description, page, total_pages, style)?;
    let components = build_nav_components(command, page, total_pages, owner_user_id, timeout_secs);

    Ok(PageView { embed, components })
}
