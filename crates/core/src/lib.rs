#![forbid(unsafe_code)]

pub mod access;
pub mod catalog;
pub mod model;
pub mod time;

pub use catalog::{Catalog, CatalogError, CatalogStats};
pub use time::Clock;
