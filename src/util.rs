use std::time::Duration;

/// Share of `correct` in `answered`, as a rounded percentage.
/// Nothing answered yet counts as 0%.
pub fn accuracy_percent(correct: usize, answered: usize) -> u32 {
    let denominator = answered.max(1) as f64;
    ((correct as f64 / denominator) * 100.0).round() as u32
}

/// Minutes and zero-padded seconds, e.g. `3:07`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
