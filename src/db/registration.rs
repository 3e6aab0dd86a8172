use chrono::Utc;
use rusqlite::params;

use crate::cache::CACHE_KEY_PREFIX;
use crate::db::connection::Database;
use crate::db::transients::SqliteCache;
use crate::domain::meta::{
    META_AGENT, META_BATHROOMS, META_BEDROOMS, META_FEATURED, META_GARAGE, META_LOCATION,
    META_PRICE, META_SIZE, META_YEAR,
};
use crate::domain::query::{PROPERTY_TYPE, TAXONOMY_CATEGORY, TAXONOMY_STATUS, TAXONOMY_TYPE};
use crate::errors::ServerError;
use crate::stores::CacheStore;

const DEFAULT_STATUS_TERMS: &[(&str, &str)] = &[
    ("for-sale", "For Sale"),
    ("for-rent", "For Rent"),
    ("sold", "Sold"),
    ("rented", "Rented"),
];

const DEFAULT_TYPE_TERMS: &[(&str, &str)] = &[
    ("house", "House"),
    ("apartment", "Apartment"),
    ("condo", "Condo"),
    ("villa", "Villa"),
    ("commercial", "Commercial"),
    ("land", "Land"),
];

// (key, description, field_type); field_type selects the write sanitizer.
const META_FIELDS: &[(&str, &str, &str)] = &[
    (META_PRICE, "Property price", "string"),
    (META_LOCATION, "Property location", "string"),
    (META_SIZE, "Property size", "string"),
    (META_BEDROOMS, "Number of bedrooms", "string"),
    (META_BATHROOMS, "Number of bathrooms", "string"),
    (META_GARAGE, "Number of garage spaces", "string"),
    (META_YEAR, "Year built", "string"),
    (META_AGENT, "Property agent", "string"),
    (META_FEATURED, "Is property featured", "boolean"),
];

/// Handle to the capabilities registered at startup.
#[derive(Debug)]
pub struct Registration {
    pub content_type: &'static str,
    pub taxonomies: Vec<&'static str>,
    pub meta_field_count: usize,
}

/// One-shot install, invoked once at startup in place of event-driven
/// hook registration: content type, taxonomies with default terms, and
/// meta field definitions. Idempotent; existing rows are left alone.
pub fn install(db: &Database) -> Result<Registration, ServerError> {
    let now = Utc::now().naive_utc();
    let taxonomies = vec![TAXONOMY_CATEGORY, TAXONOMY_STATUS, TAXONOMY_TYPE];

    db.with_conn(|conn| {
        conn.execute(
            "INSERT OR IGNORE INTO content_types (name, registered_at) VALUES (?1, ?2)",
            params![PROPERTY_TYPE, now],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

        for taxonomy in &taxonomies {
            conn.execute(
                "INSERT OR IGNORE INTO taxonomies (name) VALUES (?1)",
                params![taxonomy],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        for (slug, name) in DEFAULT_STATUS_TERMS {
            conn.execute(
                "INSERT OR IGNORE INTO terms (taxonomy, slug, name) VALUES (?1, ?2, ?3)",
                params![TAXONOMY_STATUS, slug, name],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        for (slug, name) in DEFAULT_TYPE_TERMS {
            conn.execute(
                "INSERT OR IGNORE INTO terms (taxonomy, slug, name) VALUES (?1, ?2, ?3)",
                params![TAXONOMY_TYPE, slug, name],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        for (key, description, field_type) in META_FIELDS {
            conn.execute(
                "INSERT OR IGNORE INTO meta_fields (post_type, meta_key, description, field_type) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![PROPERTY_TYPE, key, description, field_type],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        Ok(())
    })?;

    Ok(Registration {
        content_type: PROPERTY_TYPE,
        taxonomies,
        meta_field_count: META_FIELDS.len(),
    })
}

/// Deactivation cleanup: purges every fingerprinted cache entry. Content
/// itself is left in place.
pub fn uninstall(db: &Database) -> Result<(), ServerError> {
    SqliteCache::new(db).delete_prefix(CACHE_KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::make_db_without_install;

    #[test]
    fn install_registers_type_taxonomies_and_terms() {
        let db = make_db_without_install();
        let reg = install(&db).unwrap();

        assert_eq!(reg.content_type, "property");
        assert_eq!(reg.taxonomies.len(), 3);
        assert_eq!(reg.meta_field_count, 9);

        let term_count: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM terms", [], |row| row.get(0))
                    .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(term_count, 10);
    }

    #[test]
    fn install_is_idempotent() {
        let db = make_db_without_install();
        install(&db).unwrap();
        install(&db).unwrap();

        let type_count: i64 = db
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM content_types WHERE name = 'property'",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(type_count, 1);
    }

    #[test]
    fn uninstall_purges_fingerprinted_transients_only() {
        let db = make_db_without_install();
        install(&db).unwrap();

        let cache = SqliteCache::new(&db);
        cache.set("property_listings_x", "[1]", 60).unwrap();
        cache.set("unrelated", "[2]", 60).unwrap();

        uninstall(&db).unwrap();

        assert_eq!(cache.get("property_listings_x").unwrap(), None);
        assert_eq!(cache.get("unrelated").unwrap(), Some("[2]".to_string()));
    }
}
