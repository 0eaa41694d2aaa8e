// In: src/lib.rs

//! Pokedex Catalog
//!
//! Normalizes Pokemon records stored in several historical shapes into one
//! canonical form, and compares two records head to head using base stats
//! and a fixed type-effectiveness chart.

// --- MODULE DECLARATIONS ---
pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod import;
pub mod mcp_interface;
pub mod store;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    // Comparison output
    AdvantageList,
    // Record data
    BaseStats,
    CanonicalRecord,
    ComparisonResult,
    LegacyStatsView,
    LocalizedName,
    PokemonType,
    Scores,
    Stat,
    StatMatchup,
    StatsComparison,
    TypeAdvantage,
    Winner,
};

// --- From this crate's modules (`src/`) ---

// Engine entry points.
pub use engine::{compare, compare_records, normalize, normalize_value, RawRecord, TypeChart};

// Host layers.
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use import::{import_file, import_records, ImportOptions};
pub use store::{MemoryStore, RecordStore};

// Crate-specific error and result types.
pub use errors::{CatalogError, CatalogResult, EngineError, EngineResult, MissingSide};
