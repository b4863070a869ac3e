pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use crate::core::submission::{SubmissionGate, SubmissionOutcome};
pub use crate::core::validator::{validate_periods, PeriodValidator};
pub use domain::bounds::ValidationRules;
pub use domain::model::{
    ErrorKind, Period, PeriodField, PeriodId, ValidationError, ValidationResult,
};
pub use domain::month::MonthYear;
pub use utils::error::{PeriodError, Result};
