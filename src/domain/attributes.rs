use serde_json::{Map, Value};

use crate::domain::format::sanitize_text;

pub const MAX_COUNT: i64 = 50;
pub const MAX_COLUMNS: i64 = 6;
pub const MAX_EXCERPT_WORDS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Modified,
    Title,
    Price,
    Size,
}

impl SortField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(SortField::Date),
            "modified" => Some(SortField::Modified),
            "title" => Some(SortField::Title),
            "price" => Some(SortField::Price),
            "size" => Some(SortField::Size),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Modified => "modified",
            SortField::Title => "title",
            SortField::Price => "price",
            SortField::Size => "size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid,
    List,
    Masonry,
    Carousel,
}

impl Layout {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(Layout::Grid),
            "list" => Some(Layout::List),
            "masonry" => Some(Layout::Masonry),
            "carousel" => Some(Layout::Carousel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::List => "list",
            Layout::Masonry => "masonry",
            Layout::Carousel => "carousel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageVariant {
    Thumbnail,
    Medium,
    MediumLarge,
    Large,
    Full,
}

impl ImageVariant {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "thumbnail" => Some(ImageVariant::Thumbnail),
            "medium" => Some(ImageVariant::Medium),
            "medium_large" => Some(ImageVariant::MediumLarge),
            "large" => Some(ImageVariant::Large),
            "full" => Some(ImageVariant::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageVariant::Thumbnail => "thumbnail",
            ImageVariant::Medium => "medium",
            ImageVariant::MediumLarge => "medium_large",
            ImageVariant::Large => "large",
            ImageVariant::Full => "full",
        }
    }
}

/// Validated configuration for one listing invocation. Every field is
/// guaranteed in-range/in-enum once `normalize` has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingAttributes {
    pub count: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub layout: Layout,
    pub columns: u32,
    pub show_featured_badge: bool,
    pub show_price: bool,
    pub show_location: bool,
    pub show_size: bool,
    pub show_bedrooms: bool,
    pub show_bathrooms: bool,
    pub show_garage: bool,
    pub show_year_built: bool,
    pub show_agent: bool,
    pub show_status: bool,
    pub show_excerpt: bool,
    pub show_meta_row: bool,
    pub excerpt_words: u32,
    pub image_variant: ImageVariant,
    pub price_prefix: String,
    pub size_suffix: String,
    pub category_filter: String,
    pub status_filter: String,
    pub featured_only: bool,
}

impl Default for ListingAttributes {
    fn default() -> Self {
        ListingAttributes {
            count: 6,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
            layout: Layout::Grid,
            columns: 3,
            show_featured_badge: true,
            show_price: true,
            show_location: true,
            show_size: true,
            show_bedrooms: true,
            show_bathrooms: true,
            show_garage: true,
            show_year_built: true,
            show_agent: true,
            show_status: true,
            show_excerpt: true,
            show_meta_row: true,
            excerpt_words: 20,
            image_variant: ImageVariant::MediumLarge,
            price_prefix: "$".to_string(),
            size_suffix: "sq ft".to_string(),
            category_filter: String::new(),
            status_filter: String::new(),
            featured_only: false,
        }
    }
}

impl ListingAttributes {
    /// Builds a fully valid attribute set from an arbitrary caller map.
    /// Total over any input: missing keys, wrong types and out-of-range
    /// values all fall back to the default or the nearest valid bound.
    pub fn normalize(raw: &Map<String, Value>) -> Self {
        let d = ListingAttributes::default();

        ListingAttributes {
            count: clamp_int(raw, "postsToShow", d.count as i64, 1, MAX_COUNT),
            sort_field: enum_attr(raw, "orderBy", SortField::parse, d.sort_field),
            sort_direction: enum_attr(raw, "order", SortDirection::parse, d.sort_direction),
            layout: enum_attr(raw, "layout", Layout::parse, d.layout),
            columns: clamp_int(raw, "columns", d.columns as i64, 1, MAX_COLUMNS),
            show_featured_badge: bool_attr(raw, "showFeatured", d.show_featured_badge),
            show_price: bool_attr(raw, "showPrice", d.show_price),
            show_location: bool_attr(raw, "showLocation", d.show_location),
            show_size: bool_attr(raw, "showSize", d.show_size),
            show_bedrooms: bool_attr(raw, "showBedrooms", d.show_bedrooms),
            show_bathrooms: bool_attr(raw, "showBathrooms", d.show_bathrooms),
            show_garage: bool_attr(raw, "showGarage", d.show_garage),
            show_year_built: bool_attr(raw, "showYearBuilt", d.show_year_built),
            show_agent: bool_attr(raw, "showAgent", d.show_agent),
            show_status: bool_attr(raw, "showStatus", d.show_status),
            show_excerpt: bool_attr(raw, "showExcerpt", d.show_excerpt),
            show_meta_row: bool_attr(raw, "showMeta", d.show_meta_row),
            excerpt_words: clamp_int(raw, "excerptLength", d.excerpt_words as i64, 1, MAX_EXCERPT_WORDS),
            image_variant: enum_attr(raw, "imageSize", ImageVariant::parse, d.image_variant),
            price_prefix: text_attr(raw, "pricePrefix", &d.price_prefix),
            size_suffix: text_attr(raw, "sizeSuffix", &d.size_suffix),
            category_filter: text_attr(raw, "categoryFilter", &d.category_filter),
            status_filter: text_attr(raw, "statusFilter", &d.status_filter),
            featured_only: bool_attr(raw, "featuredOnly", d.featured_only),
        }
    }
}

fn clamp_int(raw: &Map<String, Value>, key: &str, default: i64, min: i64, max: i64) -> u32 {
    let n = match raw.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64))
            .unwrap_or(default),
        _ => default,
    };
    n.clamp(min, max) as u32
}

fn bool_attr(raw: &Map<String, Value>, key: &str, default: bool) -> bool {
    match raw.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(default),
        Some(Value::String(s)) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Some(Value::Null) => false,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        None => default,
    }
}

fn text_attr(raw: &Map<String, Value>, key: &str, default: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => sanitize_text(s),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn enum_attr<T, P>(raw: &Map<String, Value>, key: &str, parse: P, default: T) -> T
where
    P: Fn(&str) -> Option<T>,
{
    match raw.get(key) {
        Some(Value::String(s)) => parse(s.trim()).unwrap_or(default),
        _ => default,
    }
}
