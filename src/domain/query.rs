use crate::domain::attributes::{ListingAttributes, SortDirection, SortField};
use crate::domain::meta::META_FEATURED;

pub const PROPERTY_TYPE: &str = "property";
pub const STATUS_PUBLISH: &str = "publish";

pub const TAXONOMY_CATEGORY: &str = "property_category";
pub const TAXONOMY_STATUS: &str = "property_status";
pub const TAXONOMY_TYPE: &str = "property_type";

/// Equality filter on a single meta field.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaFilter {
    pub key: &'static str,
    pub value: String,
}

/// Term filter on one taxonomy, matched by slug.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxFilter {
    pub taxonomy: &'static str,
    pub term: String,
}

/// Structured content query. Filters are present only when the
/// corresponding attribute is set; empty filter structures are never
/// attached. Multiple taxonomy filters combine with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub post_type: &'static str,
    pub status: &'static str,
    pub limit: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub meta_filter: Option<MetaFilter>,
    pub tax_filters: Vec<TaxFilter>,
}

/// Translates a validated attribute set into a query descriptor.
pub fn build_query(attrs: &ListingAttributes) -> QueryDescriptor {
    let meta_filter = if attrs.featured_only {
        Some(MetaFilter {
            key: META_FEATURED,
            value: "1".to_string(),
        })
    } else {
        None
    };

    // Category clause always precedes status so equal attribute sets
    // produce identical descriptors.
    let mut tax_filters = Vec::new();
    if !attrs.category_filter.is_empty() {
        tax_filters.push(TaxFilter {
            taxonomy: TAXONOMY_TYPE,
            term: attrs.category_filter.clone(),
        });
    }
    if !attrs.status_filter.is_empty() {
        tax_filters.push(TaxFilter {
            taxonomy: TAXONOMY_STATUS,
            term: attrs.status_filter.clone(),
        });
    }

    QueryDescriptor {
        post_type: PROPERTY_TYPE,
        status: STATUS_PUBLISH,
        limit: attrs.count,
        sort_field: attrs.sort_field,
        sort_direction: attrs.sort_direction,
        meta_filter,
        tax_filters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_attributes_attach_no_filters() {
        let q = build_query(&ListingAttributes::default());
        assert_eq!(q.post_type, PROPERTY_TYPE);
        assert_eq!(q.status, STATUS_PUBLISH);
        assert_eq!(q.limit, 6);
        assert_eq!(q.meta_filter, None);
        assert!(q.tax_filters.is_empty());
    }

    #[test]
    fn category_filter_yields_single_type_clause() {
        let attrs = ListingAttributes {
            category_filter: "villa".to_string(),
            ..Default::default()
        };
        let q = build_query(&attrs);
        assert_eq!(
            q.tax_filters,
            vec![TaxFilter {
                taxonomy: TAXONOMY_TYPE,
                term: "villa".to_string()
            }]
        );
        assert_eq!(q.meta_filter, None);
    }

    #[test]
    fn both_filters_keep_category_before_status() {
        let attrs = ListingAttributes {
            category_filter: "condo".to_string(),
            status_filter: "for-rent".to_string(),
            ..Default::default()
        };
        let q = build_query(&attrs);
        assert_eq!(q.tax_filters.len(), 2);
        assert_eq!(q.tax_filters[0].taxonomy, TAXONOMY_TYPE);
        assert_eq!(q.tax_filters[0].term, "condo");
        assert_eq!(q.tax_filters[1].taxonomy, TAXONOMY_STATUS);
        assert_eq!(q.tax_filters[1].term, "for-rent");
    }

    #[test]
    fn featured_only_adds_meta_equality_filter() {
        let attrs = ListingAttributes {
            featured_only: true,
            ..Default::default()
        };
        let q = build_query(&attrs);
        let filter = q.meta_filter.expect("featured filter missing");
        assert_eq!(filter.key, META_FEATURED);
        assert_eq!(filter.value, "1");
    }
}
