use crate::duration::SessionDuration;
use crate::models::PlaytimeBreakdown;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use playtime_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by half an ULP at the target precision so exact midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` looks like "0.50"; keep ".50".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format fractional hours for chart labels.
///
/// ```
/// use playtime_core::formatting::format_hours;
///
/// assert_eq!(format_hours(2.5), "2.5h");
/// assert_eq!(format_hours(1234.0), "1,234.0h");
/// ```
pub fn format_hours(hours: f64) -> String {
    format!("{}h", format_number(hours, 1))
}

/// Compact `"3h 30m 0s"` rendering of a breakdown.
///
/// ```
/// use playtime_core::formatting::format_breakdown;
/// use playtime_core::models::PlaytimeBreakdown;
///
/// let b = PlaytimeBreakdown::from_total_seconds(12_600);
/// assert_eq!(format_breakdown(&b), "3h 30m 0s");
/// ```
pub fn format_breakdown(b: &PlaytimeBreakdown) -> String {
    format!("{}h {}m {}s", b.hours, b.minutes, b.seconds)
}

/// Console line reported for each processed log file.
pub fn format_session_line(file_name: &str, duration: &SessionDuration) -> String {
    format!("Played in {}: {}.", file_name, duration)
}

/// Console summary line for the whole run.
pub fn format_total_line(b: &PlaytimeBreakdown) -> String {
    format!(
        "Total played: {} hours, {} minutes, {} seconds.",
        b.hours, b.minutes, b.seconds
    )
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let remainder = s.len() % 3;
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
        assert_eq!(format_number(3.45, 1), "3.5");
    }

    #[test]
    fn test_format_hours_small() {
        assert_eq!(format_hours(0.0), "0.0h");
        assert_eq!(format_hours(0.25), "0.3h");
    }

    #[test]
    fn test_format_session_line() {
        let line = format_session_line(
            "Game Build(9123) 02 Jan 24 (20 15 01).log",
            &SessionDuration::from_seconds(9_015),
        );
        assert_eq!(
            line,
            "Played in Game Build(9123) 02 Jan 24 (20 15 01).log: 2:30:15."
        );
    }

    #[test]
    fn test_format_total_line() {
        let b = PlaytimeBreakdown::from_total_seconds(12_600);
        assert_eq!(
            format_total_line(&b),
            "Total played: 3 hours, 30 minutes, 0 seconds."
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("5"), "5");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
