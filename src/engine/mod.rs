//! Record normalization and head-to-head comparison.
//!
//! Raw stored documents go through [`raw::RawRecord`] and [`normalize`]
//! into [`schema::CanonicalRecord`]s; two of those plus the shared
//! [`TypeChart`] go through [`compare`] into a [`schema::ComparisonResult`].
//! Apart from [`TypeChart::load`], nothing in here performs I/O, and no
//! state is mutable once built.

pub mod compare;
pub mod normalize;
pub mod raw;
pub mod type_chart;

pub use compare::{compare, compare_records};
pub use normalize::{normalize, normalize_value};
pub use raw::RawRecord;
pub use type_chart::{Matchups, TypeChart};

#[cfg(test)]
mod tests;
