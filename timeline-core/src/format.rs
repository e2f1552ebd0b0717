//! Permissive parsing and display formatting for stat values such as `78%`,
//! `1.4B` or `20 yrs`.

/// Labels that are always displayed as whole numbers.
const INTEGER_LABELS: [&str; 3] = ["Approval", "Importance", "Timeline"];

/// Unit letters that mark order-of-magnitude values (trillion, billion, million).
const MAGNITUDE_UNITS: [char; 3] = ['T', 'B', 'M'];

fn is_numeric_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '-'
}

/// Extracts the number embedded in a stat string.
///
/// Every character other than `0-9`, `.` and `-` is dropped, then the longest
/// leading float is parsed. Returns `NaN` when nothing numeric is left.
pub fn parse_stat_number(raw: &str) -> f64 {
    let digits: String = raw.chars().filter(|ch| is_numeric_char(*ch)).collect();
    let bytes = digits.as_bytes();

    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut seen_digit = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            seen_digit = true;
            end = frac_end;
        } else if seen_digit {
            end = frac_start;
        }
    }

    if !seen_digit {
        return f64::NAN;
    }

    digits[..end].trim_end_matches('.').parse().unwrap_or(f64::NAN)
}

/// The non-numeric remainder of a stat string, e.g. `%` for `78%`.
pub fn stat_unit(raw: &str) -> String {
    raw.chars().filter(|ch| !is_numeric_char(*ch)).collect()
}

/// How an interpolated stat is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    Integer,
    OneDecimal,
    TwoDecimals,
}

impl StatFormat {
    pub fn for_stat(label: &str, unit: &str) -> Self {
        if INTEGER_LABELS.contains(&label) {
            StatFormat::Integer
        } else if unit.contains(&MAGNITUDE_UNITS[..]) {
            StatFormat::OneDecimal
        } else {
            StatFormat::TwoDecimals
        }
    }

    pub fn render(self, value: f64, unit: &str) -> String {
        match self {
            // Half-up rounding; `+ 0.0` turns `-0` into `0`.
            StatFormat::Integer => format!("{}{unit}", (value + 0.5).floor() + 0.0),
            StatFormat::OneDecimal => format!("{}{unit}", to_fixed(value, 1)),
            StatFormat::TwoDecimals => format!("{}{unit}", to_fixed(value, 2)),
        }
    }
}

/// Renders `value` with `digits` decimals, rounding exact ties away from zero.
///
/// The formatter already rounds on the exact binary value, so only a value
/// whose expansion stops at a `5` right after the last kept digit needs care.
fn to_fixed(value: f64, digits: usize) -> String {
    let value = value + 0.0;
    // A tie has at most `digits + 1` fractional decimals, so it is a multiple of 2^-(digits + 1).
    let exact_tie = (value * 2f64.powi(digits as i32 + 1)).fract() == 0.0
        && format!("{:.*}", digits + 1, value).ends_with('5');
    if !exact_tie {
        return format!("{value:.digits$}");
    }

    let scale = 10f64.powi(digits as i32);
    let rounded = ((value.abs() * scale).floor() + 1.0) / scale;
    format!("{:.digits$}", rounded.copysign(value))
}

/// Formats `value` using the label and unit of the stored stat string `template`.
pub fn format_stat_value(label: &str, template: &str, value: f64) -> String {
    let unit = stat_unit(template);
    StatFormat::for_stat(label, &unit).render(value, &unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_out_of_decorated_strings() {
        assert_eq!(parse_stat_number("78%"), 78.0);
        assert_eq!(parse_stat_number("1.4B"), 1.4);
        assert_eq!(parse_stat_number("20 yrs"), 20.0);
        assert_eq!(parse_stat_number("-3.5 pts"), -3.5);
        assert_eq!(parse_stat_number(".5x"), 0.5);
        assert_eq!(parse_stat_number("12.x"), 12.0);
    }

    #[test]
    fn parse_stops_at_second_separator() {
        assert_eq!(parse_stat_number("1.2.3"), 1.2);
        assert_eq!(parse_stat_number("4-5"), 4.0);
    }

    #[test]
    fn unparsable_values_become_nan() {
        assert!(parse_stat_number("n/a").is_nan());
        assert!(parse_stat_number("-").is_nan());
        assert!(parse_stat_number("").is_nan());
        assert_eq!(format_stat_value("Funding", "B", f64::NAN), "NaNB");
        assert_eq!(format_stat_value("Approval", "%", f64::NAN), "NaN%");
    }

    #[test]
    fn unit_is_everything_but_the_number() {
        assert_eq!(stat_unit("78%"), "%");
        assert_eq!(stat_unit("20 yrs"), " yrs");
        assert_eq!(stat_unit("1.4B"), "B");
    }

    #[test]
    fn chooses_format_by_label_then_unit() {
        assert_eq!(StatFormat::for_stat("Approval", "B"), StatFormat::Integer);
        assert_eq!(StatFormat::for_stat("Funding", "B"), StatFormat::OneDecimal);
        assert_eq!(StatFormat::for_stat("Compute", "TFLOPs"), StatFormat::OneDecimal);
        assert_eq!(StatFormat::for_stat("Papers", "K"), StatFormat::TwoDecimals);
    }

    #[test]
    fn integer_rounding_is_half_up() {
        assert_eq!(format_stat_value("Approval", "0%", 49.5), "50%");
        assert_eq!(format_stat_value("Approval", "0%", -0.4), "0%");
        assert_eq!(format_stat_value("Timeline", "0 yrs", 7.49), "7 yrs");
    }

    #[test]
    fn decimal_ties_round_away_from_zero() {
        assert_eq!(format_stat_value("Funding", "0.0B", 2.25), "2.3B");
        assert_eq!(format_stat_value("Papers", "0.00K", 0.125), "0.13K");
        assert_eq!(format_stat_value("Funding", "0.0B", -2.25), "-2.3B");
        // 1.005 is stored just below the tie.
        assert_eq!(format_stat_value("Latency", "0.00s", 1.005), "1.00s");
        assert_eq!(format_stat_value("Funding", "0.0B", 2.35), "2.4B");
    }

    #[test]
    fn final_values_reproduce_stored_strings() {
        for (label, stored) in [
            ("Approval", "78%"),
            ("Timeline", "20 yrs"),
            ("Funding", "190.0B"),
            ("Parameters", "1.8T"),
            ("Papers", "112.75K"),
            ("Latency", "0.05s"),
        ] {
            let value = parse_stat_number(stored);
            assert_eq!(format_stat_value(label, stored, value), stored);
        }
    }
}
