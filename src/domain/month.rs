//! Month-granularity calendar values and their two textual encodings.
//!
//! Storage encoding is `YYYY-MM` (only the first seven characters of a longer
//! value such as `YYYY-MM-DD` are significant); display encoding is `MM/YYYY`.

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Width of both encodings.
pub const ENCODED_LEN: usize = 7;

static STORAGE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})").expect("storage pattern compiles"));

static DISPLAY_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{4})$").expect("display pattern compiles"));

/// A calendar month with year in `[1900, 2100]` and month in `[1, 12]`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthYearError {
    input: String,
}

impl fmt::Display for ParseMonthYearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a month in MM/YYYY or YYYY-MM form", self.input)
    }
}

impl std::error::Error for ParseMonthYearError {}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Parses either encoding. Never panics; any other shape is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(caps) = STORAGE_PREFIX.captures(text) {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            return Self::new(year, month);
        }

        if let Some(caps) = DISPLAY_EXACT.captures(text) {
            let month = caps[1].parse().ok()?;
            let year = caps[2].parse().ok()?;
            return Self::new(year, month);
        }

        None
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `MM/YYYY`
    pub fn to_display(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }

    /// `YYYY-MM`
    pub fn to_storage(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("MonthYear always holds a representable month")
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .expect("MonthYear always holds a representable month")
    }

    /// Signed number of months from `self` to `other` (0 for the same month).
    pub fn months_until(&self, other: &MonthYear) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// Number of calendar months covered by `self..=other`.
    pub fn inclusive_span(&self, other: &MonthYear) -> i32 {
        self.months_until(other) + 1
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthYear::parse(s).ok_or_else(|| ParseMonthYearError {
            input: s.to_string(),
        })
    }
}

/// `YYYY-MM` → `MM/YYYY`.
pub fn storage_to_display(storage: &str) -> Option<String> {
    if !STORAGE_PREFIX.is_match(storage) {
        return None;
    }
    MonthYear::parse(storage).map(|m| m.to_display())
}

/// `MM/YYYY` → `YYYY-MM`.
pub fn display_to_storage(display: &str) -> Option<String> {
    if !DISPLAY_EXACT.is_match(display) {
        return None;
    }
    MonthYear::parse(display).map(|m| m.to_storage())
}

/// The fixed-width storage prefix of `text`, usable as a lexicographic sort key.
///
/// Returns `None` unless `text` starts with a valid `YYYY-MM`.
pub fn storage_key(text: &str) -> Option<&str> {
    let month = MonthYear::parse(text)?;
    if !STORAGE_PREFIX.is_match(text) {
        return None;
    }
    let key = &text[..ENCODED_LEN];
    debug_assert_eq!(key, month.to_storage());
    Some(key)
}

/// What a date input shows when primed with an upstream value.
///
/// Storage text is re-rendered as `MM/YYYY`, display text keeps its leading
/// `MM/YYYY` and anything else shows nothing.
pub fn display_value_for(upstream: &str) -> String {
    if STORAGE_PREFIX.is_match(upstream) {
        let year = &upstream[..4];
        let month = &upstream[5..7];
        return format!("{}/{}", month, year);
    }
    if let Some(prefix) = upstream.get(..ENCODED_LEN) {
        if DISPLAY_EXACT.is_match(prefix) {
            return prefix.to_string();
        }
    }
    String::new()
}

/// Formats a stored date for messages; unparseable text is echoed back.
pub fn format_for_display(text: &str) -> String {
    MonthYear::parse(text)
        .map(|m| m.to_display())
        .unwrap_or_else(|| text.to_string())
}
