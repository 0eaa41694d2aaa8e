use crate::errors::{CatalogError, CatalogResult};
use schema::PokemonType;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The chart shipped with the crate, authored in RON.
const BUILTIN_CHART: &str = include_str!("../../data/type_chart.ron");

/// Defensive profile of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Matchups {
    /// Attacking types that are super effective against this type.
    #[serde(default)]
    pub weaknesses: Vec<PokemonType>,
    /// Attacking types that are not very effective against this type.
    #[serde(default)]
    pub resistances: Vec<PokemonType>,
    /// Attacking types this type takes no damage from.
    #[serde(default)]
    pub immunities: Vec<PokemonType>,
}

static NO_MATCHUPS: Matchups = Matchups {
    weaknesses: Vec::new(),
    resistances: Vec::new(),
    immunities: Vec::new(),
};

impl Matchups {
    pub fn is_empty(&self) -> bool {
        self.weaknesses.is_empty() && self.resistances.is_empty() && self.immunities.is_empty()
    }

    pub fn is_weak_to(&self, tag: &str) -> bool {
        Self::contains(&self.weaknesses, tag)
    }

    pub fn resists(&self, tag: &str) -> bool {
        Self::contains(&self.resistances, tag)
    }

    pub fn is_immune_to(&self, tag: &str) -> bool {
        Self::contains(&self.immunities, tag)
    }

    fn contains(list: &[PokemonType], tag: &str) -> bool {
        PokemonType::from_tag(tag).is_some_and(|ty| list.contains(&ty))
    }
}

/// Immutable type-effectiveness relation. Built once at startup and shared
/// by reference across every comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    profiles: BTreeMap<PokemonType, Matchups>,
}

impl TypeChart {
    /// Parse the chart embedded in the crate.
    pub fn builtin() -> CatalogResult<TypeChart> {
        Self::from_ron_str(BUILTIN_CHART)
    }

    /// Parse a chart from RON text: a map of type to its matchups.
    pub fn from_ron_str(content: &str) -> CatalogResult<TypeChart> {
        let profiles: BTreeMap<PokemonType, Matchups> =
            ron::from_str(content).map_err(|e| CatalogError::TypeChart(e.to_string()))?;
        Ok(TypeChart { profiles })
    }

    /// Load an override chart from a RON file. A file defining no types at
    /// all is rejected.
    pub fn load(path: &Path) -> CatalogResult<TypeChart> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let chart = Self::from_ron_str(&content)?;
        if chart.is_empty() {
            return Err(CatalogError::TypeChart(format!(
                "{} defines no types",
                path.display()
            )));
        }
        if chart.len() < 18 {
            log::warn!(
                "Type chart {} only defines {} of 18 types; the rest have no matchups",
                path.display(),
                chart.len()
            );
        }
        Ok(chart)
    }

    /// Matchups for a free-form type tag. Unknown tags get an empty
    /// profile rather than an error.
    pub fn effectiveness_of(&self, tag: &str) -> &Matchups {
        PokemonType::from_tag(tag)
            .map(|ty| self.profile(ty))
            .unwrap_or(&NO_MATCHUPS)
    }

    pub fn profile(&self, ty: PokemonType) -> &Matchups {
        self.profiles.get(&ty).unwrap_or(&NO_MATCHUPS)
    }

    /// Number of types with an authored profile.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn chart() -> TypeChart {
        TypeChart::builtin().expect("builtin chart should parse")
    }

    #[test]
    fn test_builtin_covers_all_types() {
        let chart = chart();
        assert_eq!(chart.len(), 18);
        for ty in PokemonType::iter() {
            assert!(!chart.profile(ty).is_empty(), "{} has no matchups", ty);
        }
    }

    #[rstest]
    #[case("fire", "water", true)]
    #[case("Fire", "WATER", true)]
    #[case("water", "fire", false)]
    #[case("grass", "flying", true)]
    #[case("steel", "fighting", true)]
    fn test_weaknesses(#[case] defender: &str, #[case] attacker: &str, #[case] weak: bool) {
        assert_eq!(chart().effectiveness_of(defender).is_weak_to(attacker), weak);
    }

    #[rstest]
    #[case("ground", "electric")]
    #[case("flying", "ground")]
    #[case("ghost", "normal")]
    #[case("ghost", "fighting")]
    #[case("dark", "psychic")]
    #[case("steel", "poison")]
    #[case("fairy", "dragon")]
    #[case("normal", "ghost")]
    fn test_immunities(#[case] defender: &str, #[case] attacker: &str) {
        assert!(chart().effectiveness_of(defender).is_immune_to(attacker));
    }

    #[test]
    fn test_resistances() {
        let chart = chart();
        assert!(chart.effectiveness_of("water").resists("fire"));
        assert!(chart.effectiveness_of("steel").resists("fairy"));
        assert!(!chart.effectiveness_of("fire").resists("water"));
    }

    #[test]
    fn test_unknown_tags_have_no_matchups() {
        let chart = chart();
        assert!(chart.effectiveness_of("sound").is_empty());
        assert!(chart.effectiveness_of("").is_empty());
        assert!(!chart.effectiveness_of("fire").is_weak_to("lava"));
    }

    #[test]
    fn test_custom_chart_from_ron() {
        let chart = TypeChart::from_ron_str("{ Fire: (weaknesses: [Water]) }").unwrap();
        assert_eq!(chart.len(), 1);
        assert!(chart.effectiveness_of("fire").is_weak_to("water"));
        assert!(chart.effectiveness_of("fire").resistances.is_empty());
        assert!(chart.effectiveness_of("water").is_empty());
    }

    #[test]
    fn test_empty_override_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.ron");
        std::fs::write(&path, "{}").unwrap();

        assert!(TypeChart::from_ron_str("{}").unwrap().is_empty());
        assert!(matches!(
            TypeChart::load(&path),
            Err(CatalogError::TypeChart(_))
        ));
    }

    #[test]
    fn test_malformed_chart_is_rejected() {
        let err = TypeChart::from_ron_str("{ Lava: () }").unwrap_err();
        assert!(matches!(err, CatalogError::TypeChart(_)));
    }
}
