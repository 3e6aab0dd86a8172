use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write;

use crate::domain::attributes::ListingAttributes;
use crate::stores::CacheStore;

pub const CACHE_TTL_SECS: i64 = 15 * 60;
pub const CACHE_KEY_PREFIX: &str = "property_listings_";

/// Deterministic cache key for an attribute set: SHA-256 over every field
/// in a fixed order, hex-encoded under the shared key prefix. Equal
/// attribute values always hash to the same key.
pub fn fingerprint(attrs: &ListingAttributes) -> String {
    let mut hasher = Sha256::new();

    let mut feed = |label: &str, value: &str| {
        hasher.update(label.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
        hasher.update(b";");
    };

    feed("count", &attrs.count.to_string());
    feed("sort_field", attrs.sort_field.as_str());
    feed("sort_direction", attrs.sort_direction.as_sql());
    feed("layout", attrs.layout.as_str());
    feed("columns", &attrs.columns.to_string());
    feed("show_featured_badge", bool_str(attrs.show_featured_badge));
    feed("show_price", bool_str(attrs.show_price));
    feed("show_location", bool_str(attrs.show_location));
    feed("show_size", bool_str(attrs.show_size));
    feed("show_bedrooms", bool_str(attrs.show_bedrooms));
    feed("show_bathrooms", bool_str(attrs.show_bathrooms));
    feed("show_garage", bool_str(attrs.show_garage));
    feed("show_year_built", bool_str(attrs.show_year_built));
    feed("show_agent", bool_str(attrs.show_agent));
    feed("show_status", bool_str(attrs.show_status));
    feed("show_excerpt", bool_str(attrs.show_excerpt));
    feed("show_meta_row", bool_str(attrs.show_meta_row));
    feed("excerpt_words", &attrs.excerpt_words.to_string());
    feed("image_variant", attrs.image_variant.as_str());
    feed("price_prefix", &attrs.price_prefix);
    feed("size_suffix", &attrs.size_suffix);
    feed("category_filter", &attrs.category_filter);
    feed("status_filter", &attrs.status_filter);
    feed("featured_only", bool_str(attrs.featured_only));

    let digest = hasher.finalize();
    let mut key = String::from(CACHE_KEY_PREFIX);
    for byte in digest {
        let _ = write!(key, "{byte:02x}");
    }
    key
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Wire shape of one cache entry. A named object leaves room to grow the
/// payload without invalidating the key scheme.
#[derive(Serialize, Deserialize)]
struct CachedIds {
    ids: Vec<i64>,
}

/// Identifier-list cache in front of the content query. Best-effort: any
/// cache-layer failure is logged and treated as a miss, never surfaced.
pub struct ListingCache<'a> {
    store: &'a dyn CacheStore,
}

impl<'a> ListingCache<'a> {
    pub fn new(store: &'a dyn CacheStore) -> Self {
        Self { store }
    }

    /// Returns the cached ordered id list for this attribute set, if a
    /// non-empty, unexpired entry exists.
    pub fn lookup(&self, attrs: &ListingAttributes) -> Option<Vec<i64>> {
        let key = fingerprint(attrs);
        match self.store.get(&key) {
            Ok(Some(json)) => serde_json::from_str::<CachedIds>(&json)
                .ok()
                .map(|entry| entry.ids)
                .filter(|ids| !ids.is_empty()),
            Ok(None) => None,
            Err(e) => {
                eprintln!("Listing cache read failed, treating as miss: {e}");
                None
            }
        }
    }

    /// Writes the ordered id list under this attribute set's fingerprint.
    pub fn store(&self, attrs: &ListingAttributes, ids: &[i64]) {
        let key = fingerprint(attrs);
        let entry = CachedIds { ids: ids.to_vec() };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Listing cache serialization failed, skipping store: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&key, &json, CACHE_TTL_SECS) {
            eprintln!("Listing cache write failed, skipping store: {e}");
        }
    }
}
