pub mod aggregator;
pub mod catalog_service;
pub mod decoder;

pub use catalog_service::{CatalogOptions, CatalogService};
