use maud::{html, Markup, PreEscaped, DOCTYPE};

pub fn page_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(BLOCK_CSS)) }
            }
            body {
                header class="site-header" {
                    h3 { "Property Listings" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/properties" { "Properties" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}

const BLOCK_CSS: &str = "
.site-header { display: flex; align-items: center; gap: 24px; padding: 12px 24px; }
.site-header nav ul { display: flex; gap: 16px; list-style: none; }
.container { max-width: 1100px; margin: 0 auto; padding: 0 16px; }
.property-listings-block { margin: 20px 0; }
.property-listings-block.layout-grid { display: grid; gap: 20px; }
.property-item { border: 1px solid #ddd; border-radius: 8px; overflow: hidden; background: #fff; }
.property-image-wrap { position: relative; }
.property-image-wrap img { width: 100%; height: 200px; object-fit: cover; }
.property-image-placeholder { background: #f0f0f0; height: 200px; display: flex; align-items: center; justify-content: center; color: #666; }
.featured-label { background: #ff5a5f; color: white; padding: 5px 10px; position: absolute; top: 10px; left: 10px; font-size: 12px; font-weight: bold; border-radius: 3px; }
.property-details { padding: 15px; }
.property-title { margin: 0 0 10px 0; font-size: 1.2em; }
.property-title a { text-decoration: none; color: #333; }
.property-price { font-size: 1.3em; font-weight: bold; color: #ff5a5f; margin: 10px 0; }
.property-meta { display: flex; gap: 15px; margin: 10px 0; flex-wrap: wrap; }
.property-meta span { display: flex; align-items: center; gap: 5px; }
.property-excerpt { margin: 10px 0; color: #666; }
";
