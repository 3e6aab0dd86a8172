pub mod components;
pub mod layouts;
pub mod pages;

pub use layouts::page::page_layout;
