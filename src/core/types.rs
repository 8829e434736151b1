use serde::{Deserialize, Serialize};

/// Unique identifier for a combination in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationId(pub u32);

impl CombinationId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CombinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CombinationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Which of the two catalog data sets a record or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Colors,
    Combinations,
}

impl Dataset {
    /// File name of this data set inside a catalog directory
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Colors => "colors.json",
            Self::Combinations => "combinations.json",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Colors => write!(f, "reference colors"),
            Self::Combinations => write!(f, "combinations"),
        }
    }
}

/// Rough closeness bucket for a ΔE distance, used in text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Closeness {
    Distant,
    Similar,
    Close,
    Exact,
}

impl Closeness {
    #[must_use]
    pub fn from_distance(distance: f64) -> Self {
        if distance <= 0.0 {
            Self::Exact
        } else if distance <= 5.0 {
            Self::Close
        } else if distance <= 15.0 {
            Self::Similar
        } else {
            Self::Distant
        }
    }
}

impl std::fmt::Display for Closeness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distant => write!(f, "distant"),
            Self::Similar => write!(f, "similar"),
            Self::Close => write!(f, "close"),
            Self::Exact => write!(f, "exact"),
        }
    }
}
