// ---------------------------------------------------------------------------
// Number formatting for metrics, axes and table cells
// ---------------------------------------------------------------------------

/// Shown wherever a statistic has no data behind it.
pub const NO_DATA: &str = "N/A";

/// Whole dollars with thousands separators: `$1,234,567`. Halves round to
/// the even dollar.
pub fn price(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
    format!("{sign}${}", group_digits(&digits))
}

pub fn optional_price(value: Option<f64>) -> String {
    value.map(price).unwrap_or_else(|| NO_DATA.to_string())
}

/// Integer with thousands separators: `12,500`.
pub fn thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short axis labels: `$350k`, `$1.2M`.
pub fn compact_price(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.0}k", value / 1_000.0)
    } else {
        format!("${value:.0}")
    }
}
