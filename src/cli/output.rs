//! Console formatting helpers for CLI reports

use crate::analysis::CurveSummary;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print the aggregate of a training experiment
pub fn print_curve_summary(summary: &CurveSummary) {
    print_section("Training Summary");
    print_kv("Runs", &format_number(summary.runs));
    print_kv("Epochs", &format_number(summary.epochs));
    print_kv("Final mean", &format!("{:.6}", summary.final_mean));
    if let Some(last) = summary.std_dev.last() {
        print_kv("Final std dev", &format!("{last:.6}"));
    }
    print_kv("Ewma of mean", &format!("{:.6}", summary.smoothed));
}

/// Print evaluation returns
pub fn print_returns(returns: &[f64], mean: f64) {
    print_section("Evaluation");
    print_kv("Episodes", &format_number(returns.len()));
    print_kv("Mean return", &format!("{mean:.6}"));
    let best = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst = returns.iter().copied().fold(f64::INFINITY, f64::min);
    print_kv("Best return", &format!("{best:.6}"));
    print_kv("Worst return", &format!("{worst:.6}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
