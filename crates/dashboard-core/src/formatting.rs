//! Display formatting shared by the dashboard views.

use chrono::Month;

use crate::models::Selection;

/// Format a ride count with thousands separators.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Format a percentage with one decimal place, e.g. `"12.5%"`.
///
/// ```
/// use dashboard_core::formatting::format_share;
///
/// assert_eq!(format_share(1, 8), "12.5%");
/// assert_eq!(format_share(0, 0), "0.0%");
/// ```
pub fn format_share(part: u64, whole: u64) -> String {
    format!("{:.1}%", share(part, whole))
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
pub fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Axis label for an hour of day: `8` → `"8:00"`.
pub fn hour_label(hour: u8) -> String {
    format!("{hour}:00")
}

/// English month name for a 1-based month number.
///
/// Returns `None` for values outside 1–12.
pub fn month_name(month: u8) -> Option<&'static str> {
    Month::try_from(month).ok().map(|m| m.name())
}

/// One-line description of a selection, e.g.
/// `"Years: 2018, 2019 | Months: Jun, Jul"`. An empty picker reads `all`.
pub fn selection_summary(selection: &Selection) -> String {
    let years = if selection.years.is_empty() {
        "all".to_string()
    } else {
        selection
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let months = if selection.months.is_empty() {
        "all".to_string()
    } else {
        selection
            .months
            .iter()
            .map(|&m| month_name(m).map_or_else(|| m.to_string(), |n| n[..3].to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("Years: {years} | Months: {months}")
}

/// Insert `,` between every group of three digits, counting from the right.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_groups() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_share_handles_zero_whole() {
        assert_eq!(share(5, 0), 0.0);
    }

    #[test]
    fn test_share_rounding() {
        assert_eq!(format_share(1, 3), "33.3%");
        assert_eq!(format_share(2, 3), "66.7%");
        assert_eq!(format_share(3, 3), "100.0%");
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "0:00");
        assert_eq!(hour_label(23), "23:00");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(6), Some("June"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_selection_summary() {
        let sel = Selection::new([2019, 2018], [8, 6, 7]);
        assert_eq!(
            selection_summary(&sel),
            "Years: 2018, 2019 | Months: Jun, Jul, Aug"
        );
        assert_eq!(
            selection_summary(&Selection::all()),
            "Years: all | Months: all"
        );
        assert_eq!(
            selection_summary(&Selection::new([], [12])),
            "Years: all | Months: Dec"
        );
    }
}
