use crate::engine::type_chart::TypeChart;
use schema::{BaseStats, CanonicalRecord, LocalizedName};

/// A builder for canonical test records with common defaults.
///
/// # Example
/// ```
/// let record = TestRecordBuilder::new(6)
///     .with_types(&["fire", "flying"])
///     .with_stats([78, 84, 78, 109, 85, 100])
///     .build();
/// ```
pub struct TestRecordBuilder {
    id: i64,
    english: String,
    types: Vec<String>,
    stats: BaseStats,
}

impl TestRecordBuilder {
    /// Creates a new builder with no types and all stats zero.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            english: format!("Test #{}", id),
            types: Vec::new(),
            stats: BaseStats::default(),
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Sets stats in HP, ATK, DEF, SP.ATK, SP.DEF, SPD order.
    pub fn with_stats(mut self, stats: [u32; 6]) -> Self {
        self.stats = BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            special_attack: stats[3],
            special_defense: stats[4],
            speed: stats[5],
        };
        self
    }

    pub fn build(self) -> CanonicalRecord {
        CanonicalRecord {
            id: self.id,
            name: LocalizedName {
                english: self.english,
                ..Default::default()
            },
            types: self.types,
            stats: self.stats,
            image: String::new(),
            evolutions: Vec::new(),
        }
    }
}

/// The builtin chart, panicking with a clear message if it fails to parse.
pub fn test_chart() -> TypeChart {
    match TypeChart::builtin() {
        Ok(chart) => chart,
        Err(err) => panic!("Failed to load builtin type chart: {}", err),
    }
}

/// Flat stat line used when only types should decide a comparison.
pub const EVEN_STATS: [u32; 6] = [50, 50, 50, 50, 50, 50];
