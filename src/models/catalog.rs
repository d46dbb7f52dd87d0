use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;

/// Outcome of one aggregation pass over the source directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub products: Vec<Product>,
    /// Filename -> reason, for files that contributed nothing.
    pub file_errors: BTreeMap<String, String>,
    /// Elements dropped inside otherwise readable files.
    pub skipped_records: usize,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub products: usize,
    pub file_errors: usize,
    pub skipped_records: usize,
}

impl From<&AggregateResult> for RefreshResponse {
    fn from(result: &AggregateResult) -> Self {
        Self {
            products: result.products.len(),
            file_errors: result.file_errors.len(),
            skipped_records: result.skipped_records,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SnapshotInfo {
    pub pass: u64,
    pub built_at: DateTime<Utc>,
    pub products: usize,
}
