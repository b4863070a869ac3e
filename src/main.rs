use clap::Parser;
use period_guard::adapters::http::HttpPayoutService;
use period_guard::adapters::source::load_periods;
use period_guard::core::merge::sort_by_storage_start;
use period_guard::domain::ports::ConfigProvider;
use period_guard::utils::error::ErrorSeverity;
use period_guard::utils::{logger, validation::Validate};
use period_guard::{
    AppConfig, CliConfig, Period, PeriodError, PeriodValidator, SubmissionGate, SubmissionOutcome,
    ValidationResult,
};

/// Exit code when the period set fails validation.
const EXIT_INVALID: i32 = 4;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    match run(&config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ period-guard failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<i32, PeriodError> {
    let app = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    app.validate()?;

    let mut periods: Vec<Period> = Vec::new();
    for input in &cli.inputs {
        let loaded = load_periods(input, cli.format)?;
        tracing::info!("Loaded {} period(s) from {}", loaded.len(), input);
        periods.extend(loaded);
    }
    if cli.sort {
        sort_by_storage_start(&mut periods);
    }

    if cli.submit {
        let service = HttpPayoutService::from_config(&app)?;
        let gate = SubmissionGate::new(service, app.rules(), app.calculation_year());
        return match gate.submit(&periods).await? {
            SubmissionOutcome::Rejected(result) => {
                report(&periods, &result, cli.json)?;
                Ok(EXIT_INVALID)
            }
            SubmissionOutcome::Accepted(response) => {
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(0)
            }
        };
    }

    let result = PeriodValidator::new(app.rules()).validate(&periods);
    report(&periods, &result, cli.json)?;
    Ok(if result.is_valid { 0 } else { EXIT_INVALID })
}

fn report(periods: &[Period], result: &ValidationResult, json: bool) -> Result<(), PeriodError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if let Some(global) = &result.global_error {
        println!("❌ {}", global);
        return Ok(());
    }

    if result.is_valid {
        println!("✅ {} period(s) are valid", periods.len());
        return Ok(());
    }

    println!("❌ {} problem(s) found", result.errors.len());
    for (index, period) in periods.iter().enumerate() {
        if !result.has_errors(&period.id) {
            continue;
        }
        println!(
            "\nPeriod {} [{} - {}]",
            index + 1,
            display_or_blank(&period.start_date),
            display_or_blank(&period.end_date)
        );
        for error in result.errors_for(&period.id) {
            let field = error.field.map(|f| f.as_str()).unwrap_or("period");
            println!("  - {}: {}", field, error.message);
        }
    }
    Ok(())
}

fn display_or_blank(text: &str) -> String {
    if text.is_empty() {
        "?".to_string()
    } else {
        period_guard::domain::month::format_for_display(text)
    }
}
