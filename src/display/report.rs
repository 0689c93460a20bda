//! Report formatting utilities for terminal output
//!
//! Small helpers shared by the month and year views.

use crate::models::Money;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Format a variance with colour hints: red when over budget, green when under
pub fn format_variance_colored(variance: Money) -> String {
    if variance.is_positive() {
        format!("{}+{}{}", RED, variance, RESET)
    } else if variance.is_negative() {
        format!("{}{}{}", GREEN, variance, RESET)
    } else {
        variance.to_string()
    }
}

/// Format a variance without colour, signed so over budget reads "+£50.00"
pub fn format_variance(variance: Money) -> String {
    if variance.is_positive() {
        format!("+{}", variance)
    } else {
        variance.to_string()
    }
}

/// Format a money amount red when negative (e.g. disposable income)
pub fn format_money_colored(amount: Money) -> String {
    if amount.is_negative() {
        format!("{}{}{}", RED, amount, RESET)
    } else {
        amount.to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation, full at `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
