//! Loan classification
//!
//! Stints are scanned in chronological order. The first stint seen at a
//! club fixes that club's owner period; any later stint that fits inside an
//! already recorded owner period is treated as a loan.

use crate::types::{ClassifiedStint, NormalizedStint};
use tracing::debug;

/// Effective start used when a stint has no start year
pub const OPEN_START: i32 = 0;

/// Effective end used when a stint has no end year
pub const OPEN_END: i32 = 9999;

/// Inclusive year interval a club held the player's registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerPeriod {
    pub start: i32,
    pub end: i32,
}

impl OwnerPeriod {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Whether `[start, end]` lies within this period, bounds inclusive
    pub fn contains(&self, start: i32, end: i32) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Whether a club's own owner period may mark its later stints as loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfContainment {
    /// Compare against every recorded owner period, the club's own included
    #[default]
    Include,
    /// Compare only against other clubs' periods
    Exclude,
}

/// First-occurrence owner periods for one career, in insertion order.
///
/// Scoped to a single classification run. Once a club is recorded its
/// interval never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerPeriods {
    periods: Vec<(String, OwnerPeriod)>,
}

impl OwnerPeriods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, club: &str) -> Option<OwnerPeriod> {
        self.periods.iter().find(|(name, _)| name == club).map(|(_, period)| *period)
    }

    pub fn contains_club(&self, club: &str) -> bool {
        self.get(club).is_some()
    }

    /// Record `club`'s owner period unless one already exists.
    ///
    /// Returns `true` if the period was inserted.
    pub fn record(&mut self, club: &str, period: OwnerPeriod) -> bool {
        if self.contains_club(club) {
            return false;
        }
        self.periods.push((club.to_string(), period));
        true
    }

    /// First recorded owner (in insertion order) whose period contains
    /// `[start, end]`
    pub fn find_owner(
        &self,
        club: &str,
        start: i32,
        end: i32,
        policy: SelfContainment,
    ) -> Option<&str> {
        self.periods
            .iter()
            .filter(|(name, _)| policy == SelfContainment::Include || name != club)
            .find(|(_, period)| period.contains(start, end))
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Sort stints chronologically; a missing start sorts first.
///
/// The sort is stable, so stints sharing a start year keep source order.
pub fn sort_chronologically(stints: &[NormalizedStint]) -> Vec<NormalizedStint> {
    let mut sorted = stints.to_vec();
    sorted.sort_by_key(|stint| stint.start.or(OPEN_START));
    sorted
}

/// Classify a career using the default policy and a fresh owner map
pub fn classify(stints: &[NormalizedStint]) -> Vec<ClassifiedStint> {
    classify_with(stints, SelfContainment::default(), OwnerPeriods::new()).0
}

/// Classify a career against `owners`, returning the labelled stints and
/// the owner map as it stands after the scan.
pub fn classify_with(
    stints: &[NormalizedStint],
    policy: SelfContainment,
    mut owners: OwnerPeriods,
) -> (Vec<ClassifiedStint>, OwnerPeriods) {
    let mut career = Vec::with_capacity(stints.len());

    for stint in sort_chronologically(stints) {
        let start = stint.start.or(OPEN_START);
        let end = stint.end.or(OPEN_END);

        // Scan before recording so a club's first stint never matches itself
        let loan = match owners.find_owner(&stint.club_name, start, end, policy) {
            Some(owner) => {
                debug!(
                    "{} ({}) falls inside {}'s owner period",
                    stint.club_name, stint.years, owner
                );
                true
            }
            None => false,
        };

        owners.record(&stint.club_name, OwnerPeriod::new(start, end));

        career.push(ClassifiedStint {
            club_name: stint.club_name,
            start: stint.start,
            end: stint.end,
            years: stint.years,
            appearances: stint.appearances,
            goals: stint.goals,
            loan,
        });
    }

    (career, owners)
}
