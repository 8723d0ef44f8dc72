//! Rupee display formatting shared by the summary, the PDF body, and chart ticks.

const CURRENCY_PREFIX: &str = "Rs.";

/// Rounds to the nearest whole rupee and groups digits in threes: `Rs.5,954,000`.
pub fn format_rupees(amount: f64) -> String {
    format!("{CURRENCY_PREFIX}{}", group_thousands(amount))
}

/// `low - high` range text built from [`format_rupees`].
pub fn format_rupee_range(low: f64, high: f64) -> String {
    format!("{} - {}", format_rupees(low), format_rupees(high))
}

/// Whole-number digit grouping without a currency prefix.
pub fn group_thousands(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
