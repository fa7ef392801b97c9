//! Report rows built from probe results.

use crate::scanner::ProbeResult;
use serde::Serialize;

/// One line of the inventory, in display column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub base_url: String,
    pub status: u16,
    pub title: Option<String>,
    pub length: usize,
    pub server: Option<String>,
}

impl ReportRow {
    /// Column names, in order.
    pub const COLUMNS: [&'static str; 5] = ["URL", "Status", "Title", "Length", "Server"];

    /// Cell values as display strings; absent values are empty.
    pub fn cells(&self) -> [String; 5] {
        [
            self.base_url.clone(),
            self.status.to_string(),
            self.title.clone().unwrap_or_default(),
            self.length.to_string(),
            self.server.clone().unwrap_or_default(),
        ]
    }
}

impl From<&ProbeResult> for ReportRow {
    fn from(result: &ProbeResult) -> Self {
        Self {
            base_url: result.base_url.clone(),
            status: result.status,
            title: result.title.clone(),
            length: result.length,
            server: result.server.clone(),
        }
    }
}

/// Order results by ascending status code and shape them into rows.
///
/// The results are sorted in place, so every export built from the same
/// slice afterwards shares the row order. The sort is stable: results
/// sharing a status keep the order in which they were recorded.
pub fn build_rows(results: &mut [ProbeResult]) -> Vec<ReportRow> {
    results.sort_by_key(|r| r.status);
    results.iter().map(ReportRow::from).collect()
}
