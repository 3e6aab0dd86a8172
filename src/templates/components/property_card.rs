use maud::{html, Markup};

use crate::domain::attributes::{ImageVariant, ListingAttributes};
use crate::domain::format::{excerpt, format_price, format_size};
use crate::domain::meta::PropertyMeta;
use crate::stores::ListingItem;

/// Markup for one listing item. Every interpolated value goes through
/// maud's output escaping; nothing is emitted pre-escaped.
pub fn property_card(item: &ListingItem, meta: &PropertyMeta, attrs: &ListingAttributes) -> Markup {
    html! {
        article class=(format!("property-item {}-item", attrs.layout.as_str())) {
            (card_image(item, attrs))
            div class="property-details" {
                h3 class="property-title" {
                    a href=(item.permalink) { (item.title) }
                }

                @if attrs.show_location && !meta.location.is_empty() {
                    div class="property-location" { "📍 " (meta.location) }
                }

                @let price = format_price(&meta.price, &attrs.price_prefix);
                @if attrs.show_price && !price.is_empty() {
                    div class="property-price" { (price) }
                }

                @if attrs.show_meta_row {
                    (meta_row(meta, attrs))
                }

                @if attrs.show_excerpt {
                    div class="property-excerpt" { (card_excerpt(item, attrs)) }
                }

                @if attrs.show_agent && !meta.agent.is_empty() {
                    div class="property-agent" {
                        strong { "Agent: " } (meta.agent)
                    }
                }

                @if attrs.show_status && !meta.status.is_empty() {
                    div class="property-status" {
                        strong { "Status: " } (meta.status.join(", "))
                    }
                }

                @if attrs.show_year_built && !meta.year_built.is_empty() {
                    div class="property-year-built" {
                        strong { "Year Built: " } (meta.year_built)
                    }
                }
            }
        }
    }
}

fn card_image(item: &ListingItem, attrs: &ListingAttributes) -> Markup {
    html! {
        div class="property-image-wrap" {
            a href=(item.permalink) {
                @match &item.thumbnail_url {
                    Some(url) => {
                        img class="property-image"
                            src=(sized_thumbnail(url, attrs.image_variant))
                            alt=(item.title)
                            loading="lazy";
                    }
                    None => {
                        div class="property-image-placeholder" { "No Image" }
                    }
                }
            }
            @if attrs.show_featured_badge && item.is_featured {
                span class="featured-label" { "Featured" }
            }
        }
    }
}

/// Compact Beds/Baths/Size/Garage row. Each entry is gated by both its
/// own show-flag and a non-empty value.
fn meta_row(meta: &PropertyMeta, attrs: &ListingAttributes) -> Markup {
    html! {
        div class="property-meta" {
            @if attrs.show_bedrooms && !meta.bedrooms.is_empty() {
                span class="meta-bedrooms" { (meta.bedrooms) " Beds" }
            }
            @if attrs.show_bathrooms && !meta.bathrooms.is_empty() {
                span class="meta-bathrooms" { (meta.bathrooms) " Baths" }
            }
            @let size = format_size(&meta.size, &attrs.size_suffix);
            @if attrs.show_size && !size.is_empty() {
                span class="meta-size" { (size) }
            }
            @if attrs.show_garage && !meta.garage.is_empty() {
                span class="meta-garage" { (meta.garage) " Garage" }
            }
        }
    }
}

fn card_excerpt(item: &ListingItem, attrs: &ListingAttributes) -> String {
    // Fall back to the long-form body when no short excerpt was written.
    let source = if item.excerpt.trim().is_empty() {
        &item.body
    } else {
        &item.excerpt
    };
    excerpt(source, attrs.excerpt_words as usize)
}

/// Rewrites a thumbnail URL to its size-variant file: "-{variant}" is
/// inserted before the extension. The full variant is the original file.
pub(crate) fn sized_thumbnail(url: &str, variant: ImageVariant) -> String {
    if variant == ImageVariant::Full {
        return url.to_string();
    }
    match url.rfind('.') {
        Some(dot) if dot > url.rfind('/').map(|s| s + 1).unwrap_or(0) => {
            format!("{}-{}{}", &url[..dot], variant.as_str(), &url[dot..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_thumbnail_inserts_variant_before_extension() {
        assert_eq!(
            sized_thumbnail("/media/42.jpg", ImageVariant::Medium),
            "/media/42-medium.jpg"
        );
        assert_eq!(
            sized_thumbnail("/media/42.jpg", ImageVariant::Full),
            "/media/42.jpg"
        );
        // No extension: leave the URL alone rather than guessing.
        assert_eq!(
            sized_thumbnail("/media/42", ImageVariant::Large),
            "/media/42"
        );
        // Dot only in a directory segment
        assert_eq!(
            sized_thumbnail("/v1.2/media/42", ImageVariant::Large),
            "/v1.2/media/42"
        );
    }

    #[test]
    fn card_escapes_interpolated_values() {
        let item = ListingItem {
            id: 1,
            title: "<script>alert(1)</script>".to_string(),
            permalink: "/properties/1".to_string(),
            thumbnail_url: None,
            is_featured: false,
            excerpt: String::new(),
            body: String::new(),
        };
        let meta = PropertyMeta {
            location: "Bad \"<place>\"".to_string(),
            ..Default::default()
        };
        let out = property_card(&item, &meta, &ListingAttributes::default()).into_string();

        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<place>"));
    }

    #[test]
    fn featured_badge_requires_flag_and_marker() {
        let mut item = ListingItem {
            id: 1,
            title: "Villa".to_string(),
            permalink: "/properties/1".to_string(),
            thumbnail_url: Some("/media/1.jpg".to_string()),
            is_featured: true,
            excerpt: String::new(),
            body: String::new(),
        };
        let meta = PropertyMeta::default();
        let attrs = ListingAttributes::default();

        let out = property_card(&item, &meta, &attrs).into_string();
        assert!(out.contains("featured-label"));

        item.is_featured = false;
        let out = property_card(&item, &meta, &attrs).into_string();
        assert!(!out.contains("featured-label"));

        item.is_featured = true;
        let attrs = ListingAttributes {
            show_featured_badge: false,
            ..Default::default()
        };
        let out = property_card(&item, &meta, &attrs).into_string();
        assert!(!out.contains("featured-label"));
    }

    #[test]
    fn meta_row_entries_gate_on_flag_and_value() {
        let item = ListingItem {
            id: 1,
            title: "Villa".to_string(),
            permalink: "/properties/1".to_string(),
            thumbnail_url: None,
            is_featured: false,
            excerpt: String::new(),
            body: String::new(),
        };
        let meta = PropertyMeta {
            bedrooms: "3".to_string(),
            size: "2500".to_string(),
            ..Default::default()
        };

        let out = property_card(&item, &meta, &ListingAttributes::default()).into_string();
        assert!(out.contains("3 Beds"));
        assert!(out.contains("2,500 sq ft"));
        // Empty values render nothing, even with the flag on.
        assert!(!out.contains("meta-bathrooms"));
        assert!(!out.contains("meta-garage"));

        let attrs = ListingAttributes {
            show_bedrooms: false,
            ..Default::default()
        };
        let out = property_card(&item, &meta, &attrs).into_string();
        assert!(!out.contains("meta-bedrooms"));
    }
}
