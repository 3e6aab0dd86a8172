pub mod listing;
pub mod property_card;

pub use listing::{config_error, listing_container, no_properties};
pub use property_card::property_card;
