use maud::{html, Markup};
use serde_json::{json, Map, Value};

use crate::block::PropertyListingBlock;
use crate::db::connection::Database;
use crate::db::properties::SqliteContent;
use crate::db::transients::SqliteCache;
use crate::templates::page_layout;

pub fn home_page(db: &Database) -> Markup {
    let content = SqliteContent::new(db);
    let cache = SqliteCache::new(db);
    let block = PropertyListingBlock::new(&content, &cache);

    // Front page shows a short strip of the newest properties.
    let mut raw = Map::new();
    raw.insert("postsToShow".to_string(), json!(3));
    raw.insert("showExcerpt".to_string(), Value::Bool(false));

    page_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Find your next property" }
                p { a href="/properties" { "Browse all properties" } }
                (block.render(&raw))
            }
        },
    )
}
