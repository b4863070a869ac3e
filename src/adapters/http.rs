use crate::domain::model::CalculationRequest;
use crate::domain::ports::{ConfigProvider, PayoutService};
use crate::utils::error::{PeriodError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the remote payout-computation service (`POST {endpoint}/calculate`).
///
/// Failures are reported as they happen; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpPayoutService {
    client: Client,
    endpoint: String,
}

impl HttpPayoutService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let endpoint = config
            .service_endpoint()
            .ok_or_else(|| PeriodError::MissingConfigError {
                field: "service.endpoint".to_string(),
            })?;
        Self::new(
            endpoint,
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    pub fn calculate_url(&self) -> String {
        format!("{}/calculate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl PayoutService for HttpPayoutService {
    async fn calculate(&self, request: &CalculationRequest) -> Result<serde_json::Value> {
        let url = self.calculate_url();
        tracing::debug!("Posting {} period(s) to {}", request.periods.len(), url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        tracing::debug!("Payout service response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PeriodError::ServiceError {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pulls `detail` out of an error body when the service sends one.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
