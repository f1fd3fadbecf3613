use chrono::Month;

/// Number of rows in the chart grid.
pub const MONTH_COUNT: usize = 12;

/// Month labels in calendar order. Row `i` of the chart grid shows `MONTHS[i]`.
/// This ordering is fixed for the life of the process and shared by the grid
/// renderer, the month label strip, and the map layer filter.
pub const MONTHS: [&str; MONTH_COUNT] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Row index of a month label in the canonical ordering.
pub fn month_index(label: &str) -> Option<usize> {
    MONTHS.iter().position(|month| *month == label)
}

/// Calendar month number (1-12) for a month label.
pub fn month_number(label: &str) -> Option<u32> {
    label
        .parse::<Month>()
        .ok()
        .map(|month| month.number_from_month())
}

/// Canonical label for a calendar month number (1-12).
pub fn month_label(number: u32) -> Option<&'static str> {
    MONTHS.get(number.checked_sub(1)? as usize).copied()
}

/// Grouped responses can carry composite labels like `"January-1"`; only the
/// leading month name takes part in matrix row lookup.
pub fn atomic_month_label(raw: &str) -> &str {
    raw.split('-').next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("January"), Some(0));
        assert_eq!(month_index("March"), Some(2));
        assert_eq!(month_index("December"), Some(11));
        assert_eq!(month_index("Brumaire"), None);
        // case-sensitive exact match
        assert_eq!(month_index("january"), None);
    }

    #[test]
    fn test_month_number_roundtrip() {
        for (index, label) in MONTHS.iter().enumerate() {
            let number = month_number(label).unwrap();
            assert_eq!(number as usize, index + 1);
            assert_eq!(month_label(number), Some(*label));
        }
        assert_eq!(month_number("Nonuary"), None);
        assert_eq!(month_label(0), None);
        assert_eq!(month_label(13), None);
    }

    #[test]
    fn test_atomic_month_label() {
        assert_eq!(atomic_month_label("January-1"), "January");
        assert_eq!(atomic_month_label("June"), "June");
        assert_eq!(atomic_month_label(""), "");
    }
}
