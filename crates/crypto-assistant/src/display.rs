//! Number formatting for prompts and the metrics panel

use rust_decimal::Decimal;

/// Placeholder for a missing value
pub const NOT_AVAILABLE: &str = "N/A";

/// `$97,500.00`; sub-dollar prices keep up to six decimals (`$0.000022`)
pub fn format_usd(value: Decimal) -> String {
    let negative = value.is_sign_negative() && !value.is_zero();
    let abs = value.abs();

    let text = if abs < Decimal::ONE && !abs.is_zero() {
        let raw = format!("{:.6}", abs.round_dp(6));
        let trimmed = raw.trim_end_matches('0');
        let decimals = trimmed.split_once('.').map_or(0, |(_, frac)| frac.len());
        if decimals < 2 {
            format!("{:.2}", abs.round_dp(2))
        } else {
            trimmed.to_string()
        }
    } else {
        format!("{:.2}", abs.round_dp(2))
    };

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}${}", group_thousands(int_part))
    } else {
        format!("{sign}${}.{frac_part}", group_thousands(int_part))
    }
}

/// `$1,930,000,000,000`
pub fn format_usd_whole(value: Decimal) -> String {
    let rounded = format!("{:.0}", value.abs().round_dp(0));
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded))
}

/// `2.50%`
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

pub fn or_na<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
