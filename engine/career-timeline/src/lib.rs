//! Career Timeline
//!
//! Turns raw club-membership records into the ordered, loan-labelled career
//! shown in the guessing game, and scores how hard that career is to guess.
//!
//! The crate is pure: no I/O, no shared state. Each call works on a single
//! player's records.

pub mod classifier;
pub mod difficulty;
pub mod normalizer;
pub mod types;

pub use classifier::{classify, classify_with, OwnerPeriod, OwnerPeriods, SelfContainment};
pub use difficulty::{compute_difficulty, BigClubs};
pub use normalizer::{normalize, normalize_years, parse_year};
pub use types::*;

/// Normalize, classify and score one player's raw stints
pub fn build_career(
    id: impl Into<String>,
    name: impl Into<String>,
    raw: &[RawStint],
    policy: SelfContainment,
    big_clubs: &BigClubs,
) -> CareerRecord {
    let normalized = normalizer::normalize_all(raw);
    let (career, _) = classify_with(&normalized, policy, OwnerPeriods::new());
    let difficulty = compute_difficulty(&career, big_clubs);

    CareerRecord { id: id.into(), name: name.into(), career, difficulty }
}
