// Pokedex Catalog Schema - Shared type definitions
// This crate holds the wire-shaped structures that the catalog returns to
// its consumers: the canonical record, the comparison result, and the
// closed set of type tags the effectiveness chart is authored over.

// Re-export the main types
pub use comparison_data::*;
pub use pokemon_types::*;
pub use record_data::*;

pub mod comparison_data;
pub mod pokemon_types;
pub mod record_data;
