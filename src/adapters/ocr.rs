//! Schema-checked decoding of OCR extraction output.
//!
//! The extraction service answers with
//! `{"periods": [{"start_date": "YYYY-MM-DD", "end_date": ..., "monthly_salary": ...}]}`.
//! Every record is checked field by field so that a malformed extraction is
//! reported instead of reaching the validators in the wrong shape.

use crate::domain::model::{Period, PeriodId};
use crate::domain::month::storage_key;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("response is not a period list: {0}")]
    Malformed(String),

    #[error("record {index}, field '{field}': {reason}")]
    Record {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    periods: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    start_date: Option<Value>,
    #[serde(default)]
    end_date: Option<Value>,
    #[serde(default)]
    monthly_salary: Option<Value>,
}

pub fn decode_ocr_response(body: &str) -> Result<Vec<Period>, DecodeError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    decode_records(raw.periods)
}

/// Same as [`decode_ocr_response`] for an already parsed JSON value.
pub fn decode_ocr_value(value: Value) -> Result<Vec<Period>, DecodeError> {
    let raw: RawResponse =
        serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    decode_records(raw.periods)
}

fn decode_records(records: Vec<RawRecord>) -> Result<Vec<Period>, DecodeError> {
    let periods = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| -> Result<Period, DecodeError> {
            Ok(Period {
                id: PeriodId::generate(),
                start_date: decode_date(index, "start_date", record.start_date)?,
                end_date: decode_date(index, "end_date", record.end_date)?,
                monthly_salary: Some(decode_salary(index, record.monthly_salary)?),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    tracing::debug!("Decoded {} OCR period(s)", periods.len());
    Ok(periods)
}

fn decode_date(index: usize, field: &'static str, value: Option<Value>) -> Result<String, DecodeError> {
    let text = match value {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(DecodeError::Record {
                index,
                field,
                reason: format!("expected a date string, found {}", other),
            })
        }
        None => {
            return Err(DecodeError::Record {
                index,
                field,
                reason: "missing".to_string(),
            })
        }
    };

    storage_key(text.trim())
        .map(str::to_string)
        .ok_or_else(|| DecodeError::Record {
            index,
            field,
            reason: format!("'{}' is not in YYYY-MM or YYYY-MM-DD form", text),
        })
}

fn decode_salary(index: usize, value: Option<Value>) -> Result<f64, DecodeError> {
    let field = "monthly_salary";
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        // OCR often keeps the thousands separators ("5.000.000")
        Some(Value::String(text)) => {
            let digits: String = text
                .chars()
                .filter(|c| !matches!(c, '.' | ',' | ' '))
                .collect();
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(DecodeError::Record {
                    index,
                    field,
                    reason: format!("'{}' is not a whole amount", text),
                });
            }
            digits.parse::<f64>().ok()
        }
        Some(other) => {
            return Err(DecodeError::Record {
                index,
                field,
                reason: format!("expected a number, found {}", other),
            })
        }
        None => {
            return Err(DecodeError::Record {
                index,
                field,
                reason: "missing".to_string(),
            })
        }
    };

    match amount {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(a),
        _ => Err(DecodeError::Record {
            index,
            field,
            reason: "amount must be a non-negative number".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_normalizes_dates_and_assigns_ids() {
        let periods = decode_ocr_response(
            r#"{"periods": [
                {"start_date": "2010-01-01", "end_date": "2013-12-31", "monthly_salary": 5000000},
                {"start_date": "2014-01", "end_date": "2023-12-01", "monthly_salary": "10.000.000"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].start_date, "2010-01");
        assert_eq!(periods[0].end_date, "2013-12");
        assert_eq!(periods[1].monthly_salary, Some(10_000_000.0));
        assert_ne!(periods[0].id, periods[1].id);
    }

    #[test]
    fn test_decode_reports_field_and_index() {
        let err = decode_ocr_response(
            r#"{"periods": [
                {"start_date": "2010-01-01", "end_date": "2013-12-31", "monthly_salary": 5000000},
                {"start_date": "01/2014", "end_date": "2023-12-01", "monthly_salary": 1}
            ]}"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            DecodeError::Record {
                index: 1,
                field: "start_date",
                reason: "'01/2014' is not in YYYY-MM or YYYY-MM-DD form".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let err = decode_ocr_response(
            r#"{"periods": [{"start_date": "2010-01", "end_date": 2013, "monthly_salary": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::Record { field: "end_date", .. }));

        let err = decode_ocr_response(
            r#"{"periods": [{"start_date": "2010-01", "end_date": "2013-01", "monthly_salary": "5 triệu"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::Record { field: "monthly_salary", .. }));

        let err = decode_ocr_response(
            r#"{"periods": [{"start_date": "2010-01", "end_date": "2013-01", "monthly_salary": -3}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::Record { field: "monthly_salary", .. }));
    }

    #[test]
    fn test_decode_rejects_missing_list() {
        assert!(matches!(
            decode_ocr_response(r#"{"items": []}"#),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(decode_ocr_response("not json"), Err(DecodeError::Malformed(_))));
    }
}
