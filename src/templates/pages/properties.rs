use maud::{html, Markup};
use serde_json::{Map, Value};

use crate::block::PropertyListingBlock;
use crate::db::connection::Database;
use crate::db::properties::SqliteContent;
use crate::db::transients::SqliteCache;
use crate::templates::page_layout;

pub fn properties_page(db: &Database, raw: &Map<String, Value>) -> Markup {
    let content = SqliteContent::new(db);
    let cache = SqliteCache::new(db);
    let block = PropertyListingBlock::new(&content, &cache);

    page_layout(
        "Properties",
        html! {
            main class="container" {
                h1 { "Properties" }
                (block.render(raw))
            }
        },
    )
}
