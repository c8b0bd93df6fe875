//! Currency formatting for job budgets.
//!
//! Budgets are display strings (`"KSh 3,000"`, `"KSh 5,000/month"`); these
//! helpers normalise free-form input into that shape and extract the numeric
//! amount for sorting and placeholders.

/// Currency prefix used throughout the marketplace.
pub const DEFAULT_CURRENCY: &str = "KSh";

/// Amount shown in budget placeholders when the user has not typed anything.
pub const DEFAULT_PLACEHOLDER_AMOUNT: f64 = 5000.0;

/// Format a numeric amount as `"<currency> 1,234"` with no fraction digits.
pub fn format_currency(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{currency} 0");
    }
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let grouped = group_thousands(&digits);
    if rounded < 0.0 {
        format!("{currency} -{grouped}")
    } else {
        format!("{currency} {grouped}")
    }
}

/// Format a free-form amount string (`"3000"`, `"KSh 2,500"`) as currency.
///
/// Input without any parseable number formats as zero.
pub fn format_currency_str(amount: &str, currency: &str) -> String {
    format_currency(parse_currency(amount), currency)
}

/// Extract the numeric amount from a currency string.
///
/// Everything except digits, `.` and `-` is stripped first, then the longest
/// leading decimal number is parsed. Returns `0.0` when nothing parses.
pub fn parse_currency(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + 1;
    }

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

/// Placeholder text for budget inputs, e.g. `"KSh 5,000"`.
pub fn currency_placeholder(amount: f64) -> String {
    format_currency(amount, DEFAULT_CURRENCY)
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
