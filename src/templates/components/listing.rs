use maud::{html, Markup};

use crate::domain::attributes::{Layout, ListingAttributes};

/// Wrapping container for a rendered listing. CSS-facing classes encode
/// the layout and column count; grid layouts also get an explicit
/// column-count style hint.
pub fn listing_container(attrs: &ListingAttributes, cards: Vec<Markup>) -> Markup {
    let classes = format!(
        "property-listings-block layout-{} columns-{}",
        attrs.layout.as_str(),
        attrs.columns
    );
    let grid_style = (attrs.layout == Layout::Grid)
        .then(|| format!("grid-template-columns: repeat({}, 1fr);", attrs.columns));

    html! {
        div class=(classes) style=[grid_style] {
            @for card in &cards {
                (card)
            }
        }
    }
}

pub fn no_properties() -> Markup {
    html! {
        div class="property-listings-empty" {
            p { "No properties found." }
        }
    }
}

pub fn config_error() -> Markup {
    html! {
        div class="property-listings-error" {
            p { "Properties content type is not registered." }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_container_carries_column_hint() {
        let attrs = ListingAttributes {
            columns: 4,
            ..Default::default()
        };
        let out = listing_container(&attrs, vec![]).into_string();
        assert!(out.contains("layout-grid"));
        assert!(out.contains("columns-4"));
        assert!(out.contains("repeat(4, 1fr)"));
    }

    #[test]
    fn non_grid_layouts_skip_the_style_hint() {
        let attrs = ListingAttributes {
            layout: Layout::List,
            ..Default::default()
        };
        let out = listing_container(&attrs, vec![]).into_string();
        assert!(out.contains("layout-list"));
        assert!(!out.contains("style"));
    }
}
