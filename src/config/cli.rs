use crate::adapters::source::InputFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "period-guard")]
#[command(about = "Check contribution periods before they are sent for payout calculation")]
pub struct CliConfig {
    /// Period files (JSON or CSV); several files are concatenated in order
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input format, inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Order periods by start month before validating
    #[arg(long)]
    pub sort: bool,

    /// Print the validation result as JSON
    #[arg(long)]
    pub json: bool,

    /// Forward valid periods to the configured payout service
    #[arg(long)]
    pub submit: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::try_parse_from([
            "period-guard",
            "a.json",
            "b.csv",
            "--sort",
            "--format",
            "csv",
            "-c",
            "rules.toml",
        ])
        .unwrap();

        assert_eq!(config.inputs, vec!["a.json", "b.csv"]);
        assert!(config.sort);
        assert_eq!(config.format, Some(InputFormat::Csv));
        assert_eq!(config.config.as_deref(), Some("rules.toml"));
        assert!(!config.submit);
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(CliConfig::try_parse_from(["period-guard"]).is_err());
    }
}
