//! Number formatting for tables and chart labels.

/// `$1,234.56` style, with a leading minus for negatives.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let fraction = cents - whole * 100.0;
    format!("{sign}${}.{:02}", group_thousands(whole), fraction as u64)
}

/// Signed percentage with one decimal, e.g. `+12.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Short axis label: `$85k`, `$1.5M`, `$450`.
pub fn format_axis(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{sign}${}M", trim_number(abs / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("{sign}${}k", trim_number(abs / 1_000.0))
    } else {
        format!("{sign}${}", trim_number(abs))
    }
}

/// Plain number with at most two decimals and no trailing zeros.
pub fn trim_number(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
