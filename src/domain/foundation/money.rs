//! Number rendering for user-facing money amounts.

/// Rounds to the nearest integer and groups digits in thousands with commas.
///
/// `255000000.4` renders as `255,000,000`; non-finite values render as-is.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
