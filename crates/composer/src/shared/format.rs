//! Per-field input formatters
//!
//! Every text input passes through the formatter named by its `FieldSpec`
//! before being stored in the draft. Formatting is purely input-sanitizing
//! and idempotent: `format(format(x)) == format(x)` for every formatter.

use contracts::shared::metadata::InputFormat;

/// Dispatch on the field's declared input format
pub fn apply(format: InputFormat, input: &str) -> String {
    match format {
        InputFormat::Integer => format_integer(input),
        InputFormat::Decimal => format_decimal(input),
        InputFormat::Percentage => format_percentage(input),
        InputFormat::Date => format_date(input),
    }
}

/// Base-10 integer coercion, "0" when nothing parses
pub fn format_integer(input: &str) -> String {
    let trimmed = input.trim();
    let mut digits = String::new();
    for (i, ch) in trimmed.chars().enumerate() {
        if i == 0 && ch == '-' {
            digits.push(ch);
        } else if ch.is_ascii_digit() {
            digits.push(ch);
        } else {
            break;
        }
    }
    digits.parse::<i64>().map_or_else(|_| "0".to_string(), |n| n.to_string())
}

/// Decimal input accepting both `.` and `,`, normalized to `.`
/// Keeps digits, an optional leading sign and the first separator only.
pub fn format_decimal(input: &str) -> String {
    let mut out = String::new();
    let mut seen_separator = false;
    for ch in input.trim().chars() {
        match ch {
            '-' if out.is_empty() => out.push('-'),
            '0'..='9' => out.push(ch),
            '.' | ',' if !seen_separator => {
                out.push('.');
                seen_separator = true;
            }
            _ => {}
        }
    }
    out
}

/// Decimal clamped to [0, 100]
pub fn format_percentage(input: &str) -> String {
    let decimal = format_decimal(input);
    match decimal.parse::<f64>() {
        Ok(v) if v > 100.0 => "100".to_string(),
        Ok(v) if v < 0.0 => "0".to_string(),
        _ => decimal,
    }
}

/// Digits and `-` shaped towards `YYYY-MM-DD`
///
/// Existing separators are stripped and re-inserted after the 4th and 6th
/// digit, so partially typed and already formatted dates both come out the
/// same way. Output is capped at 10 characters.
pub fn format_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    let mut out = String::with_capacity(10);
    for (i, ch) in digits.chars().enumerate() {
        if i == 4 || i == 6 {
            out.push('-');
        }
        out.push(ch);
    }
    out
}
