//! Pairwise conflict detection across a period set.
//!
//! All pairs are scanned, so every conflicting pair is reported. The scan is
//! quadratic; period sets entered by hand stay in the dozens.

use crate::domain::model::{ErrorKind, Period, PeriodField, ValidationError};
use crate::domain::month::MonthYear;
use chrono::NaiveDate;

/// Closed day interval covering whole months: first day of the start month
/// through the last day of the end month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthInterval {
    pub fn new(start: MonthYear, end: MonthYear) -> Self {
        Self {
            start: start.first_day(),
            end: end.last_day(),
        }
    }

    pub fn intersects(&self, other: &MonthInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

struct Dated<'a> {
    index: usize,
    period: &'a Period,
    start: MonthYear,
    end: MonthYear,
    interval: MonthInterval,
}

impl Dated<'_> {
    fn describe(&self) -> String {
        format!("period {} ({} - {})", self.index + 1, self.start, self.end)
    }
}

/// Emits two `overlap` errors for every intersecting pair `i < j`.
///
/// Periods whose dates do not both parse are skipped here; the per-period
/// rules already report them.
pub fn detect_overlaps(periods: &[Period]) -> Vec<ValidationError> {
    let dated: Vec<Dated<'_>> = periods
        .iter()
        .enumerate()
        .filter_map(|(index, period)| {
            let start = MonthYear::parse(&period.start_date)?;
            let end = MonthYear::parse(&period.end_date)?;
            Some(Dated {
                index,
                period,
                start,
                end,
                interval: MonthInterval::new(start, end),
            })
        })
        .collect();

    let mut errors = Vec::new();
    for (pos, first) in dated.iter().enumerate() {
        for second in &dated[pos + 1..] {
            if !first.interval.intersects(&second.interval) {
                continue;
            }
            tracing::debug!(
                "Periods {} and {} overlap",
                first.index + 1,
                second.index + 1
            );
            errors.push(ValidationError::new(
                &first.period.id,
                PeriodField::EndDate,
                ErrorKind::Overlap,
                capitalize(format!("{} overlaps with {}", first.describe(), second.describe())),
            ));
            errors.push(ValidationError::new(
                &second.period.id,
                PeriodField::StartDate,
                ErrorKind::Overlap,
                capitalize(format!("{} overlaps with {}", second.describe(), first.describe())),
            ));
        }
    }
    errors
}

fn capitalize(message: String) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => message,
    }
}
