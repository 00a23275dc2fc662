use crate::github::RepoId;
use crate::stats::{format_duration, LatencySummary};

/// Column headings of the latency table, in display order.
pub const HEADER: [&str; 5] = ["Name", "p25", "p50 (Median)", "p75", "Count"];

/// One reviewer's line in the latency table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Reviewer's GitHub login
    pub name: String,
    /// Percentiles and sample count, in seconds
    pub summary: LatencySummary,
}

impl SummaryRow {
    /// Cell text for each column of `HEADER`.
    pub fn cells(&self) -> [String; 5] {
        [
            self.name.clone(),
            format_duration(self.summary.p25),
            format_duration(self.summary.p50),
            format_duration(self.summary.p75),
            self.summary.count.to_string(),
        ]
    }
}

/// Complete review latency report for one repository.
#[derive(Debug)]
pub struct Report {
    pub repo: RepoId,
    /// One row per reviewer, sorted by login
    pub rows: Vec<SummaryRow>,
}
