use crate::adapters::ocr::decode_ocr_value;
use crate::domain::model::{Period, PeriodId};
use crate::utils::error::{PeriodError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// 從檔案載入期間清單
pub fn load_periods<P: AsRef<Path>>(path: P, format: Option<InputFormat>) -> Result<Vec<Period>> {
    let path = path.as_ref();
    let format = format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| PeriodError::ProcessingError {
            message: format!(
                "Cannot tell the format of '{}'; pass --format json or --format csv",
                path.display()
            ),
        })?;

    tracing::debug!("Loading periods from {} as {:?}", path.display(), format);
    let file = std::fs::File::open(path)?;
    match format {
        InputFormat::Json => {
            let mut content = String::new();
            std::io::BufReader::new(file).read_to_string(&mut content)?;
            parse_json_periods(&content)
        }
        InputFormat::Csv => read_csv_periods(file),
    }
}

/// Accepts a bare array of periods or an OCR response object.
pub fn parse_json_periods(content: &str) -> Result<Vec<Period>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let ocr_shaped = value.get("periods").is_some();
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(_) if ocr_shaped => Ok(decode_ocr_value(value)?),
        _ => Err(PeriodError::ProcessingError {
            message: "Expected a JSON array of periods or an object with a 'periods' list"
                .to_string(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    monthly_salary: Option<f64>,
}

pub fn read_csv_periods<R: Read>(reader: R) -> Result<Vec<Period>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut periods = Vec::new();
    for record in csv_reader.deserialize() {
        let record: CsvRecord = record?;
        let id = match record.id.filter(|id| !id.is_empty()) {
            Some(id) => PeriodId::new(id),
            None => PeriodId::generate(),
        };
        periods.push(Period {
            id,
            start_date: record.start_date,
            end_date: record.end_date,
            monthly_salary: record.monthly_salary,
        });
    }
    Ok(periods)
}
