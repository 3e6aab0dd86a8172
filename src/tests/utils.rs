use chrono::{Duration, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::connection::{init_db, Database};
use crate::db::properties::{insert_property, set_property_meta, set_property_term, NewProperty};
use crate::db::registration;
use crate::domain::meta::{
    META_AGENT, META_BATHROOMS, META_BEDROOMS, META_FEATURED, META_GARAGE, META_LOCATION,
    META_PRICE, META_SIZE, META_YEAR,
};
use crate::domain::query::{TAXONOMY_STATUS, TAXONOMY_TYPE};

/// Fresh file-backed database with the production schema applied but no
/// registration run — for exercising the unregistered-type path.
pub fn make_db_without_install() -> Database {
    let path = std::env::temp_dir().join(format!(
        "property_listings_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize test DB");
    db
}

/// Fresh database with schema and registration, matching startup.
pub fn make_db() -> Database {
    let db = make_db_without_install();
    registration::install(&db).expect("Registration failed");
    db
}

/// One seedable property. Empty strings skip the meta write entirely so
/// missing-field projection can be exercised.
pub struct SeedProperty {
    pub title: &'static str,
    pub status: &'static str,
    pub price: &'static str,
    pub location: &'static str,
    pub size: &'static str,
    pub bedrooms: &'static str,
    pub bathrooms: &'static str,
    pub garage: &'static str,
    pub year_built: &'static str,
    pub agent: &'static str,
    pub featured: bool,
    pub thumbnail: Option<&'static str>,
    pub type_slug: Option<&'static str>,
    pub status_slug: Option<&'static str>,
    pub excerpt: &'static str,
    pub body: &'static str,
    /// Days before now for created_at/modified_at, to control date sort.
    pub age_days: i64,
}

impl Default for SeedProperty {
    fn default() -> Self {
        SeedProperty {
            title: "Test Property",
            status: "publish",
            price: "",
            location: "",
            size: "",
            bedrooms: "",
            bathrooms: "",
            garage: "",
            year_built: "",
            agent: "",
            featured: false,
            thumbnail: None,
            type_slug: None,
            status_slug: None,
            excerpt: "",
            body: "",
            age_days: 0,
        }
    }
}

pub fn seed_property(db: &Database, seed: &SeedProperty) -> i64 {
    let when = Utc::now().naive_utc() - Duration::days(seed.age_days);
    let prop = NewProperty {
        title: seed.title.to_string(),
        permalink: format!("/properties/{}", slugify(seed.title)),
        status: seed.status.to_string(),
        excerpt: seed.excerpt.to_string(),
        body: seed.body.to_string(),
        thumbnail_url: seed.thumbnail.map(|s| s.to_string()),
        created_at: when,
        modified_at: when,
    };
    let id = insert_property(db, &prop).expect("insert_property failed");

    let meta_values = [
        (META_PRICE, seed.price),
        (META_LOCATION, seed.location),
        (META_SIZE, seed.size),
        (META_BEDROOMS, seed.bedrooms),
        (META_BATHROOMS, seed.bathrooms),
        (META_GARAGE, seed.garage),
        (META_YEAR, seed.year_built),
        (META_AGENT, seed.agent),
    ];
    for (key, value) in meta_values {
        if !value.is_empty() {
            set_property_meta(db, id, key, value).expect("set_property_meta failed");
        }
    }
    if seed.featured {
        set_property_meta(db, id, META_FEATURED, "1").expect("set featured failed");
    }
    if let Some(slug) = seed.type_slug {
        set_property_term(db, id, TAXONOMY_TYPE, slug).expect("set type term failed");
    }
    if let Some(slug) = seed.status_slug {
        set_property_term(db, id, TAXONOMY_STATUS, slug).expect("set status term failed");
    }

    id
}

/// Force every cache entry to read as expired.
pub fn expire_all_transients(db: &Database) {
    db.with_conn(|conn| {
        conn.execute("UPDATE transients SET expires_at = 0", [])
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))?;
        Ok(())
    })
    .expect("expiring transients failed");
}

fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
