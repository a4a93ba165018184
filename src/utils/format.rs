//! Number formatting for KPI cards and tables.

/// Group the integer digits of `value` (rounded to `decimals`) with `separator`.
fn group_thousands(value: f64, decimals: usize, separator: char, decimal_mark: char) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    // "-0" is not a useful display value
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match decimal_part {
        Some(dec) => format!("{}{}{}{}", sign, grouped, decimal_mark, dec),
        None => format!("{}{}", sign, grouped),
    }
}

/// Whole currency amount with comma thousands separators, e.g. `$1,234,567`.
pub fn format_currency(value: f64) -> String {
    let digits = group_thousands(value, 0, ',', '.');
    match digits.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", digits),
    }
}

/// Amount in millions with dot thousands separators, e.g. `1.235 M`.
pub fn format_millions(value: f64) -> String {
    format!("{} M", group_thousands(value / 1_000_000.0, 0, '.', ','))
}

/// Percentage with a fixed number of decimals, e.g. `12.5%`.
pub fn format_pct(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn test_millions() {
        assert_eq!(format_millions(2_400_000.0), "2 M");
        assert_eq!(format_millions(1_234_400_000.0), "1.234 M");
        assert_eq!(format_millions(0.0), "0 M");
    }

    #[test]
    fn test_pct() {
        assert_eq!(format_pct(12.34, 1), "12.3%");
        assert_eq!(format_pct(80.0, 2), "80.00%");
    }
}
