use crate::core::validator::PeriodValidator;
use crate::domain::bounds::ValidationRules;
use crate::domain::model::{CalculationRequest, PayoutPeriod, Period, ValidationResult};
use crate::domain::month::MonthYear;
use crate::domain::ports::{Clock, PayoutService, SystemClock};
use crate::utils::error::{PeriodError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Validation failed; the service was not called.
    Rejected(ValidationResult),
    /// The service's response, passed through as is.
    Accepted(serde_json::Value),
}

/// Forwards a period set to the payout service only when it validates.
pub struct SubmissionGate<S: PayoutService, C: Clock = SystemClock> {
    validator: PeriodValidator<C>,
    service: S,
    calculation_year: String,
}

impl<S: PayoutService> SubmissionGate<S> {
    pub fn new(service: S, rules: ValidationRules, calculation_year: impl Into<String>) -> Self {
        Self {
            validator: PeriodValidator::new(rules),
            service,
            calculation_year: calculation_year.into(),
        }
    }
}

impl<S: PayoutService, C: Clock> SubmissionGate<S, C> {
    pub fn with_validator(
        service: S,
        validator: PeriodValidator<C>,
        calculation_year: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            service,
            calculation_year: calculation_year.into(),
        }
    }

    pub async fn submit(&self, periods: &[Period]) -> Result<SubmissionOutcome> {
        let result = self.validator.validate(periods);
        if !result.is_valid {
            tracing::info!(
                "Submission blocked: {} validation error(s)",
                result.errors.len()
            );
            return Ok(SubmissionOutcome::Rejected(result));
        }

        let request = build_request(periods, &self.calculation_year)?;
        tracing::info!(
            "Submitting {} period(s) for calculation year {}",
            request.periods.len(),
            request.calculation_year
        );
        let response = self.service.calculate(&request).await?;
        Ok(SubmissionOutcome::Accepted(response))
    }
}

/// Converts validated periods into the service's display-encoded form.
pub fn build_request(periods: &[Period], calculation_year: &str) -> Result<CalculationRequest> {
    let periods = periods
        .iter()
        .enumerate()
        .map(|(index, period)| -> Result<PayoutPeriod> {
            let start = parse_for_request(index, "start_date", &period.start_date)?;
            let end = parse_for_request(index, "end_date", &period.end_date)?;
            let monthly_salary = period.monthly_salary.ok_or_else(|| PeriodError::ProcessingError {
                message: format!("Period {} has no monthly salary", index + 1),
            })?;
            Ok(PayoutPeriod {
                start_date: start.to_display(),
                end_date: end.to_display(),
                monthly_salary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CalculationRequest {
        periods,
        calculation_year: calculation_year.to_string(),
    })
}

fn parse_for_request(index: usize, field: &str, text: &str) -> Result<MonthYear> {
    text.parse::<MonthYear>()
        .map_err(|e| PeriodError::ProcessingError {
            message: format!("Period {} has an unparseable {}: {}", index + 1, field, e),
        })
}
