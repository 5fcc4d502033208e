//! Core data structures for the paper catalog.

mod paper;

pub use paper::{parse_catalog, CatalogSnapshot, PaperRecord};
