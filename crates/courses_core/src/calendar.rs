//! Academic term identifiers and calendar helpers.
//!
//! A term id is the four-digit year followed by a season digit:
//! `1` spring, `2` summer, `3` fall. `20153` is fall 2015.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    fn digit(self) -> char {
        match self {
            Self::Spring => '1',
            Self::Summer => '2',
            Self::Fall => '3',
        }
    }

    fn from_digit(value: char) -> Option<Self> {
        match value {
            '1' => Some(Self::Spring),
            '2' => Some(Self::Summer),
            '3' => Some(Self::Fall),
            _ => None,
        }
    }
}

/// Parsed academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Semester {
    pub year: u16,
    pub season: Season,
}

impl Semester {
    /// Parses a term id such as `20153`.
    ///
    /// Returns `None` for anything that is not exactly four year digits and a
    /// known season digit. Surrounding whitespace is rejected, since term ids
    /// are matched byte for byte against stored instances.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != 5 || !value.is_ascii() {
            return None;
        }

        let (year_text, season_text) = value.split_at(4);
        if !year_text.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        let year = year_text.parse::<u16>().ok()?;
        let season = Season::from_digit(season_text.chars().next()?)?;
        Some(Self { year, season })
    }

    /// Term id string, the inverse of `parse`.
    pub fn id(&self) -> String {
        format!("{:04}{}", self.year, self.season.digit())
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let season = match self.season {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        };
        write!(f, "{season} {}", self.year)
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
