use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of a period, unique within a period set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(String);

impl PeriodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One contribution period as entered by a person or extracted by OCR.
///
/// Dates are kept as text exactly as supplied (either encoding, empty when not
/// entered); the validators parse them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default = "PeriodId::generate")]
    pub id: PeriodId,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub monthly_salary: Option<f64>,
}

impl Period {
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        monthly_salary: f64,
    ) -> Self {
        Self {
            id: PeriodId::generate(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            monthly_salary: Some(monthly_salary),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = PeriodId::new(id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodField {
    StartDate,
    EndDate,
    MonthlySalary,
}

impl PeriodField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodField::StartDate => "start_date",
            PeriodField::EndDate => "end_date",
            PeriodField::MonthlySalary => "monthly_salary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// A mandatory value is missing.
    Required,
    /// A value is present but malformed or out of bounds.
    Invalid,
    /// The period is internally inconsistent or too long.
    Range,
    /// The period conflicts with another period.
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub period_id: PeriodId,
    pub field: Option<PeriodField>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(
        period_id: &PeriodId,
        field: PeriodField,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            period_id: period_id.clone(),
            field: Some(field),
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_error: Option<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            global_error: None,
        }
    }

    pub fn global(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: Vec::new(),
            global_error: Some(message.into()),
        }
    }

    pub fn errors_for<'a>(
        &'a self,
        period_id: &'a PeriodId,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| &e.period_id == period_id)
    }

    /// First message attached to `field` of the given period, for inline display.
    pub fn field_error(&self, period_id: &PeriodId, field: PeriodField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| &e.period_id == period_id && e.field == Some(field))
            .map(|e| e.message.as_str())
    }

    pub fn has_errors(&self, period_id: &PeriodId) -> bool {
        self.errors_for(period_id).next().is_some()
    }

    /// Errors not tied to a single field, shown as a banner on the period.
    pub fn period_level_errors<'a>(
        &'a self,
        period_id: &'a PeriodId,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors_for(period_id).filter(|e| e.field.is_none())
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}

/// One period as the payout service expects it: display-encoded months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutPeriod {
    pub start_date: String,
    pub end_date: String,
    pub monthly_salary: f64,
}

/// Request body forwarded to the payout-computation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub periods: Vec<PayoutPeriod>,
    pub calculation_year: String,
}
