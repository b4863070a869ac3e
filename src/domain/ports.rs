use crate::domain::bounds::ValidationRules;
use crate::domain::model::CalculationRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of "today" for the future-date bound.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub trait ConfigProvider: Send + Sync {
    fn rules(&self) -> ValidationRules;
    fn service_endpoint(&self) -> Option<&str>;
    fn calculation_year(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
}

/// The external payout-computation collaborator.
///
/// The response is passed through untouched.
#[async_trait]
pub trait PayoutService: Send + Sync {
    async fn calculate(&self, request: &CalculationRequest) -> Result<serde_json::Value>;
}
