use crate::domain::model::Period;
use crate::domain::month::storage_key;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrStatus {
    Pending,
    Processing,
    Success,
    Error,
}

/// Periods extracted from one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrBatch {
    pub image_id: String,
    pub status: OcrStatus,
    #[serde(default)]
    pub periods: Vec<Period>,
}

/// Concatenates the periods of successful batches and orders them by start.
pub fn merge_batches(batches: &[OcrBatch]) -> Vec<Period> {
    let mut merged = Vec::new();
    for batch in batches {
        if batch.status == OcrStatus::Success {
            merged.extend(batch.periods.iter().cloned());
        } else {
            tracing::warn!(
                "Skipping OCR batch '{}' with status {:?}",
                batch.image_id,
                batch.status
            );
        }
    }
    sort_by_storage_start(&mut merged);
    merged
}

/// Stable sort on the fixed-width `YYYY-MM` prefix of each start date.
///
/// The prefix is zero-padded and most-significant first, so byte order is
/// calendar order. Periods without such a prefix keep their relative order
/// after all keyed periods.
pub fn sort_by_storage_start(periods: &mut [Period]) {
    periods.sort_by(|a, b| {
        match (storage_key(&a.start_date), storage_key(&b.start_date)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
