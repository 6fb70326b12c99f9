//! en-AU currency formatting and loan amount text parsing

/// Format as Australian dollars with two decimals, e.g. `$1,777.49`
///
/// Non-finite amounts have no grouping and print as `$inf`, `$-inf` or `$NaN`.
pub fn format_currency(amount: f64) -> String {
    format_dollars(amount, 2)
}

/// Format as Australian dollars rounded to whole dollars, e.g. `$311`
pub fn format_currency_whole(amount: f64) -> String {
    format_dollars(amount, 0)
}

/// Format a loan amount with digit grouping and no symbol, e.g. `300,000`
pub fn format_loan_amount(amount: f64) -> String {
    let (negative, int_part, _) = split_rounded(amount, 0);
    let grouped = group_thousands(&int_part);
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Parse loan amount text the way the form does: commas are removed and the
/// leading run of digits is read. Returns `None` when no digits lead the text
/// or the value is negative.
pub fn parse_loan_amount(text: &str) -> Option<u64> {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    let trimmed = cleaned.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: u64 = digits[..end].parse().ok()?;
    if negative && value != 0 {
        None
    } else {
        Some(value)
    }
}

/// Read the leading decimal number of a rate field, e.g. `"6.5%"` -> 6.5
///
/// Leading whitespace is skipped and anything after the number is ignored.
/// Returns `None` when the text does not start with a number.
pub fn parse_rate_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn format_dollars(amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }
    let (negative, int_part, frac_part) = split_rounded(amount, decimals);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(&int_part));
    if decimals > 0 {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Round to `decimals` places and split into sign, integer digits and fraction digits
fn split_rounded(amount: f64, decimals: usize) -> (bool, String, String) {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (formatted, String::new()),
    };
    // "-0.00" prints as "$0.00"
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.bytes().all(|b| b == b'0');
    (amount < 0.0 && !is_zero, int_part, frac_part)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
