//! Domain layer
//!
//! Collection catalog, record access, scoring, search and correlation.

pub mod correlation;
pub mod records;
pub mod registry;
pub mod scoring;
pub mod search;
