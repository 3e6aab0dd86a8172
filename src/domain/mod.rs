pub mod attributes;
pub mod format;
pub mod meta;
pub mod query;
