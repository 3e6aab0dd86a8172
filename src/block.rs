use maud::Markup;
use serde_json::{Map, Value};

use crate::cache::ListingCache;
use crate::domain::attributes::ListingAttributes;
use crate::domain::query::build_query;
use crate::errors::ServerError;
use crate::stores::{CacheStore, ContentStore, ListingItem};
use crate::templates::components::{config_error, listing_container, no_properties, property_card};

/// Server-side renderer for one property listing invocation. Holds its
/// collaborators by reference; constructed fresh per request by the
/// owning handler, never as a process-wide singleton.
pub struct PropertyListingBlock<'a> {
    content: &'a dyn ContentStore,
    cache: ListingCache<'a>,
}

impl<'a> PropertyListingBlock<'a> {
    pub fn new(content: &'a dyn ContentStore, cache: &'a dyn CacheStore) -> Self {
        Self {
            content,
            cache: ListingCache::new(cache),
        }
    }

    /// Renders a listing from an arbitrary caller attribute map. Total:
    /// malformed attributes are normalized, empty results and missing
    /// registration produce their own terminal markup, and storage
    /// failures degrade to the no-results output rather than erroring.
    pub fn render(&self, raw: &Map<String, Value>) -> Markup {
        let attrs = ListingAttributes::normalize(raw);
        self.render_normalized(&attrs)
    }

    pub fn render_normalized(&self, attrs: &ListingAttributes) -> Markup {
        if !self.content.property_type_registered() {
            return config_error();
        }

        let items = match self.resolve(attrs) {
            Ok(items) => items,
            Err(e) => {
                eprintln!("Listing query failed, rendering empty result: {e}");
                return no_properties();
            }
        };
        if items.is_empty() {
            return no_properties();
        }

        let mut cards = Vec::with_capacity(items.len());
        for item in &items {
            let meta = match self.content.property_meta(item.id) {
                Ok(meta) => meta,
                Err(e) => {
                    eprintln!("Meta projection failed for item {}: {e}", item.id);
                    Default::default()
                }
            };
            cards.push(property_card(item, &meta, attrs));
        }

        listing_container(attrs, cards)
    }

    /// Cache-then-query resolution. Hits re-fetch live rows for the
    /// cached identifiers in cached order; misses run the built query
    /// and store the resulting id list.
    fn resolve(&self, attrs: &ListingAttributes) -> Result<Vec<ListingItem>, ServerError> {
        if let Some(ids) = self.cache.lookup(attrs) {
            let items = self.content.get_by_ids(&ids)?;
            if !items.is_empty() {
                return Ok(items);
            }
            // Every cached id has since been unpublished; fall through
            // to a fresh query.
        }

        let descriptor = build_query(attrs);
        let items = self.content.query(&descriptor)?;
        if !items.is_empty() {
            let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
            self.cache.store(attrs, &ids);
        }
        Ok(items)
    }
}
