use chrono::{NaiveDateTime, Utc};
use rusqlite::params;
use std::collections::HashMap;

use crate::db::connection::Database;
use crate::domain::format::sanitize_text;
use crate::domain::meta::{
    PropertyMeta, META_AGENT, META_BATHROOMS, META_BEDROOMS, META_FEATURED, META_GARAGE,
    META_LOCATION, META_PRICE, META_SIZE, META_YEAR,
};
use crate::domain::attributes::SortField;
use crate::domain::query::{QueryDescriptor, PROPERTY_TYPE, TAXONOMY_STATUS, TAXONOMY_TYPE};
use crate::errors::ServerError;
use crate::stores::{ContentStore, ListingItem};

const ITEM_COLUMNS: &str = "p.id, p.title, p.permalink, p.thumbnail_url, p.excerpt, p.body, \
     COALESCE(fm.meta_value, '') AS featured";

fn featured_join() -> String {
    format!("LEFT JOIN post_meta fm ON fm.post_id = p.id AND fm.meta_key = '{META_FEATURED}'")
}

/// Content store over the `posts` / `post_meta` / `post_terms` tables.
pub struct SqliteContent<'a> {
    db: &'a Database,
}

impl<'a> SqliteContent<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl ContentStore for SqliteContent<'_> {
    fn property_type_registered(&self) -> bool {
        let result = self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM content_types WHERE name = ?1",
                    params![PROPERTY_TYPE],
                    |row| row.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            Ok(count > 0)
        });
        match result {
            Ok(registered) => registered,
            Err(e) => {
                eprintln!("Content type lookup failed: {e}");
                false
            }
        }
    }

    fn query(&self, descriptor: &QueryDescriptor) -> Result<Vec<ListingItem>, ServerError> {
        let mut sql = format!("SELECT {ITEM_COLUMNS} FROM posts p {}", featured_join());
        let mut values: Vec<String> = Vec::new();

        if let Some(filter) = &descriptor.meta_filter {
            sql.push_str(
                " JOIN post_meta mf ON mf.post_id = p.id \
                 AND mf.meta_key = ? AND mf.meta_value = ?",
            );
            values.push(filter.key.to_string());
            values.push(filter.value.clone());
        }

        // One join per taxonomy filter gives the AND relation.
        for (i, filter) in descriptor.tax_filters.iter().enumerate() {
            sql.push_str(&format!(
                " JOIN post_terms t{i} ON t{i}.post_id = p.id \
                 AND t{i}.taxonomy = ? AND t{i}.term_slug = ?"
            ));
            values.push(filter.taxonomy.to_string());
            values.push(filter.term.clone());
        }

        // The sort join has to land before the WHERE clause.
        let sort_expr = match descriptor.sort_field {
            SortField::Date => "p.created_at".to_string(),
            SortField::Modified => "p.modified_at".to_string(),
            SortField::Title => "p.title COLLATE NOCASE".to_string(),
            SortField::Price => meta_sort_join(&mut sql, META_PRICE),
            SortField::Size => meta_sort_join(&mut sql, META_SIZE),
        };

        sql.push_str(" WHERE p.post_type = ? AND p.status = ?");
        values.push(descriptor.post_type.to_string());
        values.push(descriptor.status.to_string());

        let dir = descriptor.sort_direction.as_sql();
        // p.id breaks ties so the order is reproducible across runs.
        sql.push_str(&format!(" ORDER BY {sort_expr} {dir}, p.id {dir}"));
        sql.push_str(&format!(" LIMIT {}", descriptor.limit));

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params_from_iter(values.iter()), row_to_item)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let mut items = Vec::new();
            for row in rows {
                items.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
            Ok(items)
        })
    }

    fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<ListingItem>, ServerError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM posts p {} \
             WHERE p.post_type = '{PROPERTY_TYPE}' AND p.status = 'publish' \
             AND p.id IN ({placeholders})",
            featured_join()
        );

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params_from_iter(ids.iter()), row_to_item)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let mut by_id: HashMap<i64, ListingItem> = HashMap::new();
            for row in rows {
                let item = row.map_err(|e| ServerError::DbError(e.to_string()))?;
                by_id.insert(item.id, item);
            }

            // Cached order wins; ids that no longer resolve are dropped.
            Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
        })
    }

    fn property_meta(&self, id: i64) -> Result<PropertyMeta, ServerError> {
        self.db.with_conn(|conn| {
            let mut meta = PropertyMeta::default();

            let mut stmt = conn
                .prepare("SELECT meta_key, meta_value FROM post_meta WHERE post_id = ?1")
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![id], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            for row in rows {
                let (key, value) = row.map_err(|e| ServerError::DbError(e.to_string()))?;
                match key.as_str() {
                    META_PRICE => meta.price = value,
                    META_LOCATION => meta.location = value,
                    META_SIZE => meta.size = value,
                    META_BEDROOMS => meta.bedrooms = value,
                    META_BATHROOMS => meta.bathrooms = value,
                    META_GARAGE => meta.garage = value,
                    META_YEAR => meta.year_built = value,
                    META_AGENT => meta.agent = value,
                    _ => {}
                }
            }

            let mut stmt = conn
                .prepare(
                    "SELECT t.name FROM post_terms pt \
                     JOIN terms t ON t.taxonomy = pt.taxonomy AND t.slug = pt.term_slug \
                     WHERE pt.post_id = ?1 AND pt.taxonomy = ?2 \
                     ORDER BY t.name",
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![id, TAXONOMY_STATUS], |row| row.get::<_, String>(0))
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            for row in rows {
                meta.status
                    .push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
            }

            Ok(meta)
        })
    }
}

fn meta_sort_join(sql: &mut String, meta_key: &str) -> String {
    sql.push_str(&format!(
        " LEFT JOIN post_meta sm ON sm.post_id = p.id AND sm.meta_key = '{meta_key}'"
    ));
    "CAST(sm.meta_value AS REAL)".to_string()
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListingItem> {
    let featured: String = row.get(6)?;
    Ok(ListingItem {
        id: row.get(0)?,
        title: row.get(1)?,
        permalink: row.get(2)?,
        thumbnail_url: row.get(3)?,
        excerpt: row.get(4)?,
        body: row.get(5)?,
        is_featured: featured == "1" || featured == "true",
    })
}

/// Write-side record for one property. Only the write path and tests use
/// this; the rendering pipeline never mutates content.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub permalink: String,
    pub status: String,
    pub excerpt: String,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl Default for NewProperty {
    fn default() -> Self {
        let now = Utc::now().naive_utc();
        NewProperty {
            title: String::new(),
            permalink: String::new(),
            status: "publish".to_string(),
            excerpt: String::new(),
            body: String::new(),
            thumbnail_url: None,
            created_at: now,
            modified_at: now,
        }
    }
}

pub fn insert_property(db: &Database, prop: &NewProperty) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO posts (post_type, status, title, permalink, excerpt, body, \
             thumbnail_url, created_at, modified_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                PROPERTY_TYPE,
                prop.status,
                prop.title,
                prop.permalink,
                prop.excerpt,
                prop.body,
                prop.thumbnail_url,
                prop.created_at,
                prop.modified_at,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(conn.last_insert_rowid())
    })
}

/// Stores one meta value, applying the sanitizer registered for the field
/// at install time. Unregistered keys are rejected.
pub fn set_property_meta(
    db: &Database,
    post_id: i64,
    meta_key: &str,
    value: &str,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let field_type: String = conn
            .query_row(
                "SELECT field_type FROM meta_fields WHERE post_type = ?1 AND meta_key = ?2",
                params![PROPERTY_TYPE, meta_key],
                |row| row.get(0),
            )
            .map_err(|_| {
                ServerError::BadRequest(format!("Unregistered meta field: {meta_key}"))
            })?;

        let sanitized = match field_type.as_str() {
            "boolean" => {
                let truthy = !matches!(value.trim(), "" | "0") && !value.eq_ignore_ascii_case("false");
                if truthy { "1".to_string() } else { "0".to_string() }
            }
            _ => sanitize_text(value),
        };

        conn.execute(
            "INSERT OR REPLACE INTO post_meta (post_id, meta_key, meta_value) \
             VALUES (?1, ?2, ?3)",
            params![post_id, meta_key, sanitized],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

/// Attaches a taxonomy term to a property by slug.
pub fn set_property_term(
    db: &Database,
    post_id: i64,
    taxonomy: &str,
    term_slug: &str,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT OR IGNORE INTO post_terms (post_id, taxonomy, term_slug) \
             VALUES (?1, ?2, ?3)",
            params![post_id, taxonomy, term_slug],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

/// Seeds a handful of demo properties on an empty database so a fresh
/// server has something to render. No-op once any property rows exist.
pub fn seed_demo_properties(db: &Database) -> Result<usize, ServerError> {
    let existing: i64 = db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE post_type = ?1",
            params![PROPERTY_TYPE],
            |row| row.get(0),
        )
        .map_err(|e| ServerError::DbError(e.to_string()))
    })?;
    if existing > 0 {
        return Ok(0);
    }

    // (title, price, location, size, beds, baths, type, status, featured)
    let demos: &[(&str, &str, &str, &str, &str, &str, &str, &str, bool)] = &[
        (
            "Seaside Villa", "875000", "Naples, FL", "3200", "4", "3",
            "villa", "for-sale", true,
        ),
        (
            "Downtown Loft", "2400", "Austin, TX", "950", "1", "1",
            "apartment", "for-rent", false,
        ),
        (
            "Suburban Family Home", "425000", "Columbus, OH", "2100", "3", "2",
            "house", "for-sale", false,
        ),
    ];

    for (title, price, location, size, beds, baths, type_slug, status_slug, featured) in demos {
        let slug: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        let id = insert_property(
            db,
            &NewProperty {
                title: title.to_string(),
                permalink: format!("/properties/{slug}"),
                body: format!("{title} in {location}."),
                ..Default::default()
            },
        )?;
        set_property_meta(db, id, META_PRICE, price)?;
        set_property_meta(db, id, META_LOCATION, location)?;
        set_property_meta(db, id, META_SIZE, size)?;
        set_property_meta(db, id, META_BEDROOMS, beds)?;
        set_property_meta(db, id, META_BATHROOMS, baths)?;
        if *featured {
            set_property_meta(db, id, META_FEATURED, "1")?;
        }
        set_property_term(db, id, TAXONOMY_TYPE, type_slug)?;
        set_property_term(db, id, TAXONOMY_STATUS, status_slug)?;
    }

    Ok(demos.len())
}
