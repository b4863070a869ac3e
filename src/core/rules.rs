//! Structural checks on a single period, independent of all other periods.

use crate::domain::bounds::ValidationRules;
use crate::domain::model::{ErrorKind, Period, PeriodField, ValidationError};
use crate::domain::month::MonthYear;
use chrono::{Months, NaiveDate};

/// Collects every finding for `period` (at position `index`) without stopping
/// at the first one.
pub fn validate_period(
    index: usize,
    period: &Period,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let n = index + 1;
    let id = &period.id;
    let mut errors = Vec::new();

    // required
    if period.start_date.is_empty() {
        errors.push(ValidationError::new(
            id,
            PeriodField::StartDate,
            ErrorKind::Required,
            format!("Period {}: please enter a start month", n),
        ));
    }
    if period.end_date.is_empty() {
        errors.push(ValidationError::new(
            id,
            PeriodField::EndDate,
            ErrorKind::Required,
            format!("Period {}: please enter an end month", n),
        ));
    }
    let salary = period.monthly_salary;
    if !salary.is_some_and(|s| s > 0.0) {
        errors.push(ValidationError::new(
            id,
            PeriodField::MonthlySalary,
            ErrorKind::Required,
            format!("Period {}: please enter a valid monthly salary", n),
        ));
    }

    let start = parse_present(&period.start_date);
    let end = parse_present(&period.end_date);

    if start == Some(None) {
        errors.push(ValidationError::new(
            id,
            PeriodField::StartDate,
            ErrorKind::Invalid,
            format!("Period {}: start month is not valid", n),
        ));
    }
    if end == Some(None) {
        errors.push(ValidationError::new(
            id,
            PeriodField::EndDate,
            ErrorKind::Invalid,
            format!("Period {}: end month is not valid", n),
        ));
    }

    let start = start.flatten();
    let end = end.flatten();

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            errors.push(ValidationError::new(
                id,
                PeriodField::EndDate,
                ErrorKind::Range,
                format!(
                    "Period {}: end month must be on or after the start month ({} - {})",
                    n, s, e
                ),
            ));
        }
    }

    if let Some(s) = start {
        if s.year() < rules.min_start_year {
            errors.push(ValidationError::new(
                id,
                PeriodField::StartDate,
                ErrorKind::Invalid,
                format!("Period {}: year must not be before {}", n, rules.min_start_year),
            ));
        }
    }

    if let Some(e) = end {
        if beyond_horizon(e, today, rules.future_horizon_months) {
            errors.push(ValidationError::new(
                id,
                PeriodField::EndDate,
                ErrorKind::Invalid,
                format!("Period {}: end month is too far in the future", n),
            ));
        }
    }

    if let (Some(s), Some(e)) = (start, end) {
        let span = s.inclusive_span(&e);
        if s <= e && i64::from(span) > i64::from(rules.max_span_months) {
            errors.push(ValidationError::new(
                id,
                PeriodField::EndDate,
                ErrorKind::Range,
                format!(
                    "Period {}: period is too long ({} months, at most {} allowed)",
                    n, span, rules.max_span_months
                ),
            ));
        }
    }

    if let Some(s) = salary.filter(|s| *s != 0.0) {
        if s < rules.min_salary {
            errors.push(ValidationError::new(
                id,
                PeriodField::MonthlySalary,
                ErrorKind::Invalid,
                format!(
                    "Period {}: monthly salary is too low (minimum {})",
                    n, rules.min_salary
                ),
            ));
        }
        if s > rules.max_salary {
            errors.push(ValidationError::new(
                id,
                PeriodField::MonthlySalary,
                ErrorKind::Invalid,
                format!(
                    "Period {}: monthly salary is too high (maximum {})",
                    n, rules.max_salary
                ),
            ));
        }
    }

    errors
}

/// `None` for empty text, `Some(parsed)` otherwise.
fn parse_present(text: &str) -> Option<Option<MonthYear>> {
    if text.is_empty() {
        None
    } else {
        Some(MonthYear::parse(text))
    }
}

/// True when `end` starts after `today + horizon` months.
///
/// The horizon keeps today's day-of-month, clamped to the last day of the
/// target month (31 Jan + 1 month is 28/29 Feb).
pub fn beyond_horizon(end: MonthYear, today: NaiveDate, horizon_months: u32) -> bool {
    match today.checked_add_months(Months::new(horizon_months)) {
        Some(limit) => end.first_day() > limit,
        None => false,
    }
}
