use crate::domain::month::{MAX_YEAR, MIN_YEAR};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SALARY: f64 = 1_000_000.0;
pub const DEFAULT_MAX_SALARY: f64 = 1_000_000_000.0;
pub const DEFAULT_MIN_START_YEAR: i32 = 1990;
pub const DEFAULT_FUTURE_HORIZON_MONTHS: u32 = 12;
pub const DEFAULT_MAX_SPAN_MONTHS: u32 = 600;

/// Months from January of `MIN_YEAR` through December of `MAX_YEAR`.
pub const MAX_REPRESENTABLE_SPAN_MONTHS: u32 = ((MAX_YEAR - MIN_YEAR + 1) * 12) as u32;

/// Tunable bounds applied by the per-period rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_salary: f64,
    pub max_salary: f64,
    pub min_start_year: i32,
    /// How far past today an end month may lie.
    pub future_horizon_months: u32,
    /// Longest allowed period, counted inclusively in months.
    pub max_span_months: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_salary: DEFAULT_MIN_SALARY,
            max_salary: DEFAULT_MAX_SALARY,
            min_start_year: DEFAULT_MIN_START_YEAR,
            future_horizon_months: DEFAULT_FUTURE_HORIZON_MONTHS,
            max_span_months: DEFAULT_MAX_SPAN_MONTHS,
        }
    }
}
