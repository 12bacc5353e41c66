//! Catalogue Adapters - Declarative action sources.
//!
//! Contains adapters that build `ActionDefinition`s from configuration
//! files so hosts can declare their dialogue without code.

mod yaml_catalogue;

pub use yaml_catalogue::{CatalogueError, YamlActionCatalogue};
