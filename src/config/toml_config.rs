use crate::domain::bounds::{ValidationRules, MAX_REPRESENTABLE_SPAN_MONTHS};
use crate::domain::month::{MAX_YEAR, MIN_YEAR};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PeriodError, Result};
use crate::utils::validation::{
    validate_finite_number, validate_non_empty_string, validate_ordered_bounds,
    validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CALCULATION_YEAR: &str = "2025";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rules: ValidationRules,
    pub service: Option<ServiceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub calculation_year: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PeriodError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PeriodError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAYOUT_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let rules = &self.rules;
        validate_finite_number("rules.min_salary", rules.min_salary)?;
        validate_finite_number("rules.max_salary", rules.max_salary)?;
        if !(rules.min_salary > 0.0) {
            return Err(PeriodError::InvalidConfigValueError {
                field: "rules.min_salary".to_string(),
                value: rules.min_salary.to_string(),
                reason: "Value must be greater than 0".to_string(),
            });
        }
        validate_ordered_bounds(
            "rules.min_salary",
            rules.min_salary,
            "rules.max_salary",
            rules.max_salary,
        )?;
        validate_range("rules.min_start_year", rules.min_start_year, MIN_YEAR, MAX_YEAR)?;
        validate_range(
            "rules.max_span_months",
            rules.max_span_months,
            1,
            MAX_REPRESENTABLE_SPAN_MONTHS,
        )?;

        if let Some(service) = &self.service {
            validate_url("service.endpoint", &service.endpoint)?;

            if let Some(year) = &service.calculation_year {
                validate_non_empty_string("service.calculation_year", year)?;
                let parsed: i32 =
                    year.trim()
                        .parse()
                        .map_err(|_| PeriodError::InvalidConfigValueError {
                            field: "service.calculation_year".to_string(),
                            value: year.clone(),
                            reason: "Value must be a four-digit year".to_string(),
                        })?;
                validate_range("service.calculation_year", parsed, MIN_YEAR, MAX_YEAR)?;
            }

            if let Some(timeout) = service.timeout_seconds {
                validate_positive_number("service.timeout_seconds", timeout, 1)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn rules(&self) -> ValidationRules {
        self.rules.clone()
    }

    fn service_endpoint(&self) -> Option<&str> {
        self.service.as_ref().map(|s| s.endpoint.as_str())
    }

    fn calculation_year(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.calculation_year.as_deref())
            .unwrap_or(DEFAULT_CALCULATION_YEAR)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.service
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
