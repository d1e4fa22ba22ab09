//! Display formatting for currency amounts and percentages.
//!
//! Inputs are assumed non-negative and finite; the upstream data provider
//! validates before anything reaches the panel core.

/// Format a value with thousands separators and a fixed number of fractional
/// digits. Fiat values always render with a `$` prefix and 2 fractional
/// digits, regardless of `digits`.
pub fn currency_formatter(value: f64, fiat: bool, digits: usize) -> String {
    let digits = if fiat { 2 } else { digits };
    let raw = format!("{:.*}", digits, value);
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw.as_str(), None),
    };

    let mut out = String::new();
    if fiat {
        out.push('$');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Abbreviate a pool-level total for the dashboard header: `$1.5B`, `$24.3M`,
/// `$45.6K`, falling back to plain fiat formatting below a thousand.
pub fn total_abbrev(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        currency_formatter(value, true, 0)
    }
}

/// Render a percentage value for embedding in text: whole numbers drop the
/// fractional part (`125`), everything else keeps one digit (`82.5`).
pub fn percent_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
