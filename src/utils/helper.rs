/// Decimals of the native coin on EVM chains (wei → ETH)
pub const NATIVE_DECIMALS: u32 = 18;

/// Format a USD amount as `$1,234.56`
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = group_thousands(&(cents / 100).to_string());
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, whole, cents % 100)
}

/// Insert `,` every three digits of an unsigned integer string
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render an integer amount in `10^decimals` base units with fixed precision.
///
/// Integer arithmetic keeps wei values exact; returns `None` for input that is
/// not an unsigned integer.
pub fn format_units(raw: &str, decimals: u32, precision: u32) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let precision = precision.min(decimals);

    match raw.parse::<u128>() {
        Ok(value) => {
            let drop = 10u128.pow(decimals - precision);
            let scaled = value / drop + u128::from(value % drop >= drop / 2 && drop > 1);
            let unit = 10u128.pow(precision);
            let whole = scaled / unit;
            if precision == 0 {
                Some(whole.to_string())
            } else {
                Some(format!(
                    "{}.{:0width$}",
                    whole,
                    scaled % unit,
                    width = precision as usize
                ))
            }
        }
        // Beyond u128: fall back to float, precision loss is invisible at this size
        Err(_) => {
            let value = raw.parse::<f64>().ok()? / 10f64.powi(decimals as i32);
            Some(format!("{:.*}", precision as usize, value))
        }
    }
}

/// `(latest - first) / first * 100`, 0 when there is no base to compare with
pub fn percentage_change(first: f64, latest: f64) -> f64 {
    if first == 0.0 || !first.is_finite() || !latest.is_finite() {
        return 0.0;
    }
    (latest - first) / first * 100.0
}

/// Signed percentage with two decimals, e.g. `+4.20%`
pub fn format_percentage(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, change)
}

/// Truncate a string to a maximum length
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an address for display (truncated)
pub fn format_address(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
