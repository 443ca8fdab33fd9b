use serde::{Deserialize, Serialize};

/// A calendar year extracted from a source date, or the absence of one.
///
/// Source data is frequently incomplete, so `Absent` is an ordinary value
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Year {
    Known(i32),
    #[default]
    Absent,
}

impl Year {
    /// The year as an `Option`
    pub fn known(self) -> Option<i32> {
        match self {
            Year::Known(year) => Some(year),
            Year::Absent => None,
        }
    }

    /// The year, or `default` when absent
    pub fn or(self, default: i32) -> i32 {
        self.known().unwrap_or(default)
    }
}

impl From<Option<i32>> for Year {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Year::Absent, Year::Known)
    }
}

impl From<Year> for Option<i32> {
    fn from(year: Year) -> Self {
        year.known()
    }
}

/// A club membership record exactly as the upstream source reported it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawStint {
    /// Club label (e.g., "Sporting CP")
    pub club_name: String,
    /// Start date, usually ISO-8601 (e.g., "2002-08-01T00:00:00Z")
    pub start_date: Option<String>,
    /// End date, same format as `start_date`
    pub end_date: Option<String>,
    /// League appearances, when recorded
    pub appearances: Option<u32>,
    /// League goals, when recorded
    pub goals: Option<u32>,
}

impl RawStint {
    /// Create a stint with only a club label
    pub fn new(club_name: impl Into<String>) -> Self {
        Self { club_name: club_name.into(), ..Self::default() }
    }

    /// Set the start and end date literals
    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// Set appearance and goal counts
    pub fn with_stats(mut self, appearances: Option<u32>, goals: Option<u32>) -> Self {
        self.appearances = appearances;
        self.goals = goals;
        self
    }
}

/// A stint with its dates reduced to years and a display range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStint {
    pub club_name: String,
    pub start: Year,
    pub end: Year,
    /// Display range: "2003–2008", "2003–" or empty
    pub years: String,
    pub appearances: Option<u32>,
    pub goals: Option<u32>,
}

/// A normalized stint labelled as loan or permanent.
///
/// Serializes to the `{team, years, apps, goals, loan}` shape consumed by
/// the quiz client. The typed years are not part of that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedStint {
    #[serde(rename = "team")]
    pub club_name: String,

    #[serde(skip)]
    pub start: Year,

    #[serde(skip)]
    pub end: Year,

    pub years: String,

    #[serde(rename = "apps")]
    pub appearances: Option<u32>,

    pub goals: Option<u32>,

    pub loan: bool,
}

impl ClassifiedStint {
    /// Drop the loan label, recovering the normalized stint
    pub fn to_normalized(&self) -> NormalizedStint {
        NormalizedStint {
            club_name: self.club_name.clone(),
            start: self.start,
            end: self.end,
            years: self.years.clone(),
            appearances: self.appearances,
            goals: self.goals,
        }
    }
}

/// Quiz difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// Map a clamped score to its tier
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            DifficultyLevel::Easy
        } else if score >= 40 {
            DifficultyLevel::Medium
        } else {
            DifficultyLevel::Hard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty score (0-100) and its tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub score: u8,
    pub level: DifficultyLevel,
}

/// The terminal per-player artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    /// Opaque upstream identifier (e.g., "Q11571")
    pub id: String,
    /// Display name as it appeared in the input list
    pub name: String,
    /// Chronologically ordered, classified stints
    pub career: Vec<ClassifiedStint>,
    pub difficulty: Difficulty,
}
