// Fixed meta field names, carried over from the source data model.
pub const META_PRICE: &str = "fave_property_price";
pub const META_LOCATION: &str = "fave_property_location";
pub const META_SIZE: &str = "fave_property_size";
pub const META_BEDROOMS: &str = "fave_property_bedrooms";
pub const META_BATHROOMS: &str = "fave_property_bathrooms";
pub const META_GARAGE: &str = "fave_property_garage";
pub const META_YEAR: &str = "fave_property_year";
pub const META_AGENT: &str = "fave_agents";
pub const META_FEATURED: &str = "fave_featured";

/// Flat projection of one property's meta fields, built per item per
/// render and discarded afterwards. Missing fields stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMeta {
    pub price: String,
    pub location: String,
    pub size: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub garage: String,
    pub year_built: String,
    pub agent: String,
    /// Ordered display names from the property_status taxonomy.
    pub status: Vec<String>,
}
