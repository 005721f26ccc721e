//! Strict due-date text format.
//!
//! Patterns are built from `dd`, `MM` and `yyyy` plus literal separators,
//! e.g. `dd-MM-yyyy`. Every digit field must have exactly its token's width.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// Default display and input pattern.
pub const DEFAULT_DATE_PATTERN: &str = "dd-MM-yyyy";

/// Earliest year a due date may have. There is no year 0.
pub const MIN_YEAR: i32 = 1;

/// Latest year a due date may have; `yyyy` is four digits wide.
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    fn width(self) -> usize {
        match self {
            Self::Day | Self::Month => 2,
            Self::Year => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Field(Field),
    Literal(char),
}

/// A parsed date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    pieces: Vec<Piece>,
}

impl DateFormat {
    /// Compile a pattern such as `dd-MM-yyyy`.
    ///
    /// Returns a description of the problem when the pattern contains
    /// unknown letters, repeats a field, or misses one.
    pub fn new(pattern: &str) -> Result<Self, String> {
        let mut pieces = Vec::new();
        let mut seen = Vec::new();
        let mut rest = pattern;

        while let Some(c) = rest.chars().next() {
            let field = if rest.starts_with("yyyy") {
                Some(Field::Year)
            } else if rest.starts_with("dd") {
                Some(Field::Day)
            } else if rest.starts_with("MM") {
                Some(Field::Month)
            } else {
                None
            };

            match field {
                Some(field) => {
                    if seen.contains(&field) {
                        return Err(format!("date pattern '{}' repeats a field", pattern));
                    }
                    seen.push(field);
                    pieces.push(Piece::Field(field));
                    rest = &rest[field.width()..];
                }
                None if c.is_alphanumeric() => {
                    return Err(format!(
                        "date pattern '{}' has unsupported character '{}' (use dd, MM, yyyy)",
                        pattern, c
                    ));
                }
                None => {
                    pieces.push(Piece::Literal(c));
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        if seen.len() != 3 {
            return Err(format!(
                "date pattern '{}' must contain dd, MM and yyyy",
                pattern
            ));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            pieces,
        })
    }

    /// The pattern text as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse date text. The whole text must match and name a real date.
    pub fn parse(&self, text: &str) -> Result<NaiveDate, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            text: text.to_string(),
            pattern: self.pattern.clone(),
        };

        let (mut day, mut month, mut year) = (0u32, 0u32, 0i32);
        let mut rest = text;

        for piece in &self.pieces {
            match piece {
                Piece::Literal(expected) => {
                    let mut chars = rest.chars();
                    if chars.next() != Some(*expected) {
                        return Err(invalid());
                    }
                    rest = chars.as_str();
                }
                Piece::Field(field) => {
                    let width = field.width();
                    let digits = rest.get(..width).ok_or_else(invalid)?;
                    if !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid());
                    }
                    let value: u32 = digits.parse().map_err(|_| invalid())?;
                    match field {
                        Field::Day => day = value,
                        Field::Month => month = value,
                        Field::Year => year = value as i32,
                    }
                    rest = &rest[width..];
                }
            }
        }

        if !rest.is_empty() || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }

    /// Format a date with this pattern.
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(c) => out.push(*c),
                Piece::Field(Field::Day) => out.push_str(&format!("{:02}", date.day())),
                Piece::Field(Field::Month) => out.push_str(&format!("{:02}", date.month())),
                Piece::Field(Field::Year) => out.push_str(&format!("{:04}", date.year())),
            }
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
            pieces: vec![
                Piece::Field(Field::Day),
                Piece::Literal('-'),
                Piece::Field(Field::Month),
                Piece::Literal('-'),
                Piece::Field(Field::Year),
            ],
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
