pub mod input;
pub mod merge;
pub mod overlap;
pub mod rules;
pub mod submission;
pub mod validator;

pub use crate::domain::bounds::ValidationRules;
pub use crate::domain::model::{Period, PeriodId, ValidationError, ValidationResult};
pub use crate::domain::ports::{Clock, ConfigProvider, PayoutService};
pub use crate::utils::error::Result;
