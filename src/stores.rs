use crate::domain::meta::PropertyMeta;
use crate::domain::query::QueryDescriptor;
use crate::errors::ServerError;

/// One content entry as the rendering pipeline sees it. Read-only view
/// over the content store, valid for the duration of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    pub id: i64,
    pub title: String,
    pub permalink: String,
    /// None means no featured image; the card falls back to a placeholder.
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub excerpt: String,
    pub body: String,
}

/// Content store contract consumed by the listing pipeline.
pub trait ContentStore {
    /// Whether the property content type has been registered.
    fn property_type_registered(&self) -> bool;

    /// Executes a structured query, returning items in sort order.
    fn query(&self, descriptor: &QueryDescriptor) -> Result<Vec<ListingItem>, ServerError>;

    /// Fetches live items for a list of identifiers, preserving the given
    /// order. Identifiers that no longer resolve are skipped.
    fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<ListingItem>, ServerError>;

    /// Projects one item's meta fields into a flat record.
    fn property_meta(&self, id: i64) -> Result<PropertyMeta, ServerError>;
}

/// Best-effort key/value cache with per-entry TTL.
pub trait CacheStore {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError>;
    fn set(&self, key: &str, value: &str, ttl_secs: i64) -> Result<(), ServerError>;
    fn delete_prefix(&self, prefix: &str) -> Result<(), ServerError>;
}
