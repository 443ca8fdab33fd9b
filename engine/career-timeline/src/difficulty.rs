//! Quiz difficulty heuristic
//!
//! Starts from a neutral 50 and applies independent adjustments:
//!
//! | rule                                   | delta |
//! |----------------------------------------|-------|
//! | last club is a big club                | +25   |
//! | first club is a big club               | -10   |
//! | at most 3 distinct clubs               | +20   |
//! | more than 8 distinct clubs             | -20   |
//! | any big club / no big club             | ±15   |
//! | each loan stint (capped at -15 total)  | -5    |
//!
//! The sum is clamped to 0..=100 before it is mapped to a tier.

use std::collections::HashSet;

use crate::types::{ClassifiedStint, Difficulty, DifficultyLevel};

pub const BASELINE_SCORE: i32 = 50;
pub const LAST_CLUB_BIG_BONUS: i32 = 25;
pub const FIRST_CLUB_BIG_PENALTY: i32 = 10;
pub const FEW_CLUBS_MAX: usize = 3;
pub const FEW_CLUBS_BONUS: i32 = 20;
pub const MANY_CLUBS_MIN: usize = 9;
pub const MANY_CLUBS_PENALTY: i32 = 20;
pub const BIG_CLUB_PRESENCE: i32 = 15;
pub const LOAN_PENALTY: i32 = 5;
pub const LOAN_PENALTY_CAP: i32 = 15;

/// Clubs recognisable enough to make a career easier to guess
pub const DEFAULT_BIG_CLUBS: [&str; 22] = [
    "FC Barcelona",
    "Real Madrid",
    "Atlético de Madrid",
    "Manchester United",
    "Manchester City",
    "Liverpool",
    "Chelsea",
    "Arsenal",
    "Tottenham Hotspur",
    "Bayern Munich",
    "Borussia Dortmund",
    "Juventus",
    "AC Milan",
    "Inter Milan",
    "Napoli",
    "Paris Saint-Germain",
    "Olympique Lyonnais",
    "Olympique de Marseille",
    "Ajax",
    "PSV Eindhoven",
    "Porto",
    "Benfica",
];

/// Reference set of big clubs, matched by exact label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigClubs {
    names: HashSet<String>,
}

impl BigClubs {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, club: &str) -> bool {
        self.names.contains(club)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for BigClubs {
    fn default() -> Self {
        Self::new(DEFAULT_BIG_CLUBS)
    }
}

/// Clamp a raw score into 0..=100
pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Unclamped score for a classified career
pub fn raw_score(career: &[ClassifiedStint], big_clubs: &BigClubs) -> i32 {
    let clubs: Vec<&str> = career
        .iter()
        .map(|stint| stint.club_name.as_str())
        .filter(|club| !club.is_empty())
        .collect();
    let unique: HashSet<&str> = clubs.iter().copied().collect();

    let mut score = BASELINE_SCORE;

    if clubs.last().is_some_and(|club| big_clubs.contains(club)) {
        score += LAST_CLUB_BIG_BONUS;
    }

    if clubs.first().is_some_and(|club| big_clubs.contains(club)) {
        score -= FIRST_CLUB_BIG_PENALTY;
    }

    if unique.len() <= FEW_CLUBS_MAX {
        score += FEW_CLUBS_BONUS;
    } else if unique.len() >= MANY_CLUBS_MIN {
        score -= MANY_CLUBS_PENALTY;
    }

    if unique.iter().any(|club| big_clubs.contains(club)) {
        score += BIG_CLUB_PRESENCE;
    } else {
        score -= BIG_CLUB_PRESENCE;
    }

    let loans = career.iter().filter(|stint| stint.loan).count() as i32;
    score -= (loans * LOAN_PENALTY).min(LOAN_PENALTY_CAP);

    score
}

/// Score a classified career and map it to a tier
pub fn compute_difficulty(career: &[ClassifiedStint], big_clubs: &BigClubs) -> Difficulty {
    let score = clamp_score(raw_score(career, big_clubs));
    Difficulty { score, level: DifficultyLevel::from_score(score) }
}
