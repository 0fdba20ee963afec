//! Turns module descriptors into topic cards and wires the call-to-action.

use crate::dom::{ClickEvent, Document, NodeId, ScrollBehavior, CLICK};
use crate::domain::model::ModuleDescriptor;
use crate::utils::error::{Result, TopicsError};
use std::rc::Rc;

/// Appends one card per module to the element matching `container_selector`.
///
/// Each card is `<div class="{card_class}"><h3>title</h3><ul><li>item</li>…</ul></div>`,
/// in input order. The container is never cleared, so a second call
/// appends a second set of cards. When nothing matches the selector the
/// call fails before touching the document.
pub fn render(
    document: &mut Document,
    modules: &[ModuleDescriptor],
    container_selector: &str,
    card_class: &str,
) -> Result<Vec<NodeId>> {
    let container = document
        .query_selector(container_selector)?
        .ok_or_else(|| TopicsError::MountPointNotFound {
            selector: container_selector.to_string(),
        })?;

    let mut cards = Vec::with_capacity(modules.len());
    for module in modules {
        let card = document.create_element("div");
        document.set_class_name(card, card_class)?;

        let title = document.create_element("h3");
        document.set_text_content(title, &module.title)?;

        let list = document.create_element("ul");
        for item in &module.items {
            let li = document.create_element("li");
            document.set_text_content(li, item)?;
            document.append_child(list, li)?;
        }

        document.append_child(card, title)?;
        document.append_child(card, list)?;
        document.append_child(container, card)?;
        cards.push(card);
    }

    tracing::debug!(
        "Rendered {} topic cards into {}",
        cards.len(),
        container_selector
    );
    Ok(cards)
}

/// Makes the element matching `button_selector` smooth-scroll to the
/// element named by its `href` fragment instead of navigating.
///
/// The href is read when the click happens. An unknown or unusable fragment
/// leaves the click as a no-op (default navigation is still suppressed).
pub fn wire_smooth_scroll(document: &mut Document, button_selector: &str) -> Result<NodeId> {
    let button = document
        .query_selector(button_selector)?
        .ok_or_else(|| TopicsError::ActionElementNotFound {
            selector: button_selector.to_string(),
        })?;

    let handler = |document: &mut Document, event: &mut ClickEvent| {
        event.prevent_default();

        let Some(href) = document.attribute(event.target(), "href").map(str::to_string) else {
            tracing::debug!("Call-to-action has no href, nothing to scroll to");
            return;
        };

        // ids are matched verbatim, not parsed as a selector
        let target = href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .and_then(|id| document.get_element_by_id(id));
        match target {
            Some(target) => {
                if let Err(e) = document.scroll_into_view(target, ScrollBehavior::Smooth) {
                    tracing::debug!("Smooth scroll to {} failed: {}", href, e);
                }
            }
            None => tracing::debug!("Scroll target {} not found", href),
        }
    };

    document.add_event_listener(button, CLICK, Rc::new(handler))?;
    Ok(button)
}
