pub mod connection;
pub mod properties;
pub mod registration;
pub mod transients;
