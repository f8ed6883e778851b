//! Number formatting for KPI cards and table cells.

/// Format with a fixed number of decimals and `,` between thousands.
///
/// ```
/// use inventory_dashboard::format::format_number;
///
/// assert_eq!(format_number(1234567.891, 0), "1,234,568");
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(2.5, 0), "3");
/// ```
///
/// Ties round away from zero.
pub fn format_number(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    let value = if rounded.is_finite() { rounded } else { value };
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0" after rounding reads as plain zero.
    let sign = if grouped.chars().all(|c| c == '0' || c == ',')
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{sign}{grouped}.{d}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Like [`format_number`] with at most `max_decimals`, dropping trailing
/// zeros: `1234.5` reads `"1,234.5"` and `10.0` reads `"10"`.
pub fn format_number_trimmed(value: f64, max_decimals: usize) -> String {
    let formatted = format_number(value, max_decimals);
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Integer count with thousands grouping.
pub fn format_count(n: usize) -> String {
    format_number(n as f64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(1234567.0, 0), "1,234,567");
        assert_eq!(format_number(100000.0, 0), "100,000");
    }

    #[test]
    fn fixed_decimals_and_rounding() {
        assert_eq!(format_number(60.0, 1), "60.0");
        assert_eq!(format_number(2.26, 1), "2.3");
        assert_eq!(format_number(1999.96, 1), "2,000.0");
        assert_eq!(format_number(10.4, 0), "10");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_number(0.5, 0), "1");
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(320.5, 0), "321");
        assert_eq!(format_number(0.25, 1), "0.3");
        assert_eq!(format_number(-2.5, 0), "-3");
        assert_eq!(format_number(1234.5, 0), "1,235");
    }

    #[test]
    fn trimmed_keeps_up_to_max_decimals() {
        assert_eq!(format_number_trimmed(1234.5, 3), "1,234.5");
        assert_eq!(format_number_trimmed(10.0, 3), "10");
        assert_eq!(format_number_trimmed(0.1234, 3), "0.123");
        assert_eq!(format_number_trimmed(2.0006, 3), "2.001");
        assert_eq!(format_number_trimmed(-0.0001, 3), "0");
        assert_eq!(format_number_trimmed(1000.0, 3), "1,000");
    }

    #[test]
    fn negatives_keep_sign() {
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
        assert_eq!(format_number(-47.0, 0), "-47");
        assert_eq!(format_number(-0.2, 0), "0");
    }

    #[test]
    fn counts() {
        assert_eq!(format_count(12345), "12,345");
    }
}
