//! Number rendering in the Paraguayan Spanish style: `.` groups thousands,
//! `,` separates decimals. Missing values render as an em-dash.

const MISSING: &str = "—";

/// `1234567.891` with 2 decimals → `1.234.567,89`.
///
/// Spanish locales leave four-digit integers ungrouped (`1234`), grouping
/// starts at five digits (`12.345`).
pub fn fmt_num(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn fmt_usd(value: f64) -> String {
    prefixed("USD ", value, 0)
}

pub fn fmt_pyg(value: f64) -> String {
    prefixed("₲ ", value, 0)
}

pub fn fmt_area(value: f64) -> String {
    if value.is_finite() {
        format!("{} m²", fmt_num(value, 1))
    } else {
        MISSING.to_string()
    }
}

fn prefixed(prefix: &str, value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{prefix}{}", fmt_num(value, decimals))
    } else {
        MISSING.to_string()
    }
}
