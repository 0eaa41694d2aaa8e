use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of type tags the effectiveness chart is authored over.
///
/// Stored records carry types as free-form strings; `PokemonType` is only
/// what a tag resolves to when it names one of the known types. Parsing is
/// case-insensitive and displays as the lowercase tag used on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Resolve a free-form tag from a stored record, ignoring case and
    /// surrounding whitespace. Unknown tags resolve to `None`.
    pub fn from_tag(tag: &str) -> Option<PokemonType> {
        tag.trim().parse().ok()
    }
}
