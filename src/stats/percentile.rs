/// Percentile summary of one reviewer's latency samples, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub count: usize,
}

/// Summarize a sample set. Returns `None` for an empty set.
///
/// Sample order does not matter; values are ranked before interpolating.
pub fn summarize(samples: &[f64]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(LatencySummary {
        p25: percentile_of_sorted(&sorted, 25.0),
        p50: percentile_of_sorted(&sorted, 50.0),
        p75: percentile_of_sorted(&sorted, 75.0),
        count: sorted.len(),
    })
}

/// Linear-interpolation percentile over ascending `sorted` values.
///
/// The rank of percentile `pct` is `pct / 100 * (n - 1)`; a fractional rank
/// interpolates between its two neighbouring values. `pct` is clamped to
/// `0..=100`. `sorted` must be non-empty.
fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = pct.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lower = (rank.floor() as usize).min(last);
    let upper = (rank.ceil() as usize).min(last);
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Render a number of seconds the way Go prints a `time.Duration`:
/// `0s`, `45s`, `1m0s`, `26h3m4s`. Fractions are truncated toward zero
/// first, so only whole seconds are ever shown.
pub fn format_duration(seconds: f64) -> String {
    // `as` saturates on overflow and maps NaN to 0.
    let whole = seconds.trunc() as i64;
    let sign = if whole < 0 { "-" } else { "" };
    let total = whole.unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}
