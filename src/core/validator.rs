use crate::core::overlap::detect_overlaps;
use crate::core::rules::validate_period;
use crate::domain::bounds::ValidationRules;
use crate::domain::model::{Period, ValidationResult};
use crate::domain::ports::{Clock, SystemClock};

pub const EMPTY_SET_MESSAGE: &str = "Please add at least one contribution period";

/// Combines the per-period rules and the overlap scan into one result.
///
/// Pure with respect to the period snapshot: the same input on the same day
/// always yields the same result.
pub struct PeriodValidator<C: Clock = SystemClock> {
    rules: ValidationRules,
    clock: C,
}

impl PeriodValidator<SystemClock> {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules,
            clock: SystemClock,
        }
    }
}

impl Default for PeriodValidator<SystemClock> {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

impl<C: Clock> PeriodValidator<C> {
    pub fn with_clock(rules: ValidationRules, clock: C) -> Self {
        Self { rules, clock }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn validate(&self, periods: &[Period]) -> ValidationResult {
        if periods.is_empty() {
            tracing::debug!("Rejecting empty period set");
            return ValidationResult::global(EMPTY_SET_MESSAGE);
        }

        let today = self.clock.today();
        let mut errors: Vec<_> = periods
            .iter()
            .enumerate()
            .flat_map(|(index, period)| validate_period(index, period, &self.rules, today))
            .collect();
        errors.extend(detect_overlaps(periods));

        tracing::debug!(
            "Validated {} period(s): {} error(s)",
            periods.len(),
            errors.len()
        );
        ValidationResult::from_errors(errors)
    }
}

/// Validates with the default bounds against today's date.
pub fn validate_periods(periods: &[Period]) -> ValidationResult {
    PeriodValidator::<SystemClock>::default().validate(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ErrorKind;
    use crate::domain::ports::FixedClock;
    use chrono::NaiveDate;

    fn validator() -> PeriodValidator<FixedClock> {
        PeriodValidator::with_clock(
            ValidationRules::default(),
            FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()),
        )
    }

    #[test]
    fn test_empty_set_sets_global_error_only() {
        let result = validator().validate(&[]);
        assert!(!result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.global_error.as_deref(), Some(EMPTY_SET_MESSAGE));
    }

    #[test]
    fn test_clean_set_is_valid() {
        let result = validator().validate(&[
            Period::new("2010-01", "2013-12", 5_000_000.0),
            Period::new("2014-01", "2023-12", 10_000_000.0),
        ]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.global_error.is_none());
    }

    #[test]
    fn test_rule_errors_precede_overlap_errors() {
        let result = validator().validate(&[
            Period::new("2020-01", "2020-06", 5_000_000.0),
            Period::new("2020-03", "2020-04", 500.0),
        ]);
        let kinds: Vec<ErrorKind> = result.errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::Invalid, ErrorKind::Overlap, ErrorKind::Overlap]);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let periods = vec![
            Period::new("2020-01", "2020-03", 5_000_000.0),
            Period::new("2020-03", "2019-06", 0.0),
            Period::new("", "13/2020", 2_000_000_000.0),
        ];
        let v = validator();
        let snapshot = periods.clone();
        assert_eq!(v.validate(&periods), v.validate(&periods));
        assert_eq!(periods, snapshot);
    }
}
