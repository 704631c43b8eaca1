//! Date and date-range canonicalization
//!
//! Canonical dates are `MM/YYYY`, `MM/YYYY - MM/YYYY` or `MM/YYYY - Present`.
//! Anything that cannot be read as a month and a year collapses to an empty
//! string rather than a partially formatted value.

use regex::Regex;
use std::sync::LazyLock;

/// Separators between the two ends of a range. `to` only as a whole word so
/// month names such as "october" survive the split.
static RANGE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:-|–|—|\bto\b)\s*").expect("valid range separator regex"));

static MONTH_YEAR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\s]+").expect("valid month/year split regex"));

const MONTHS: [(&str, &str, &str); 12] = [
    ("jan", "january", "01"),
    ("feb", "february", "02"),
    ("mar", "march", "03"),
    ("apr", "april", "04"),
    ("may", "may", "05"),
    ("jun", "june", "06"),
    ("jul", "july", "07"),
    ("aug", "august", "08"),
    ("sep", "september", "09"),
    ("oct", "october", "10"),
    ("nov", "november", "11"),
    ("dec", "december", "12"),
];

pub const PRESENT: &str = "Present";

/// Two-digit month number for a month name or 3-letter abbreviation
pub fn month_number(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches('.');
    MONTHS
        .iter()
        .find(|(short, long, _)| token == *short || token == *long)
        .map(|(_, _, number)| *number)
}

/// Normalize a free-text date or date range.
///
/// ```
/// use resume_parser::parsing::dates::normalize_date;
///
/// assert_eq!(normalize_date("Jan 2020 - Present"), "01/2020 - Present");
/// assert_eq!(normalize_date("03/2018 to 11/2019"), "03/2018 - 11/2019");
/// assert_eq!(normalize_date("sometime"), "");
/// assert_eq!(normalize_date("Spring 2020 - Present"), "");
/// ```
pub fn normalize_date(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    let normalized = RANGE_SEPARATOR
        .split(&lowered)
        .map(normalize_side)
        .filter(|side| !side.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");

    // a range must open on a month and year
    if is_canonical(&normalized) {
        normalized
    } else {
        String::new()
    }
}

fn normalize_side(side: &str) -> String {
    let side = side.trim();
    if side == "present" {
        return PRESENT.to_string();
    }

    let mut tokens = MONTH_YEAR_SPLIT.split(side).filter(|t| !t.is_empty());
    let (Some(month), Some(year)) = (tokens.next(), tokens.next()) else {
        return String::new();
    };

    if !is_year(year) {
        return String::new();
    }

    if let Some(number) = month_number(month) {
        format!("{}/{}", number, year)
    } else if is_month(month) {
        format!("{}/{}", month, year)
    } else {
        String::new()
    }
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}

/// Two digits from `01` to `12`
fn is_month(token: &str) -> bool {
    token.len() == 2
        && token.chars().all(|c| c.is_ascii_digit())
        && token
            .parse::<u8>()
            .map(|month| (1..=12).contains(&month))
            .unwrap_or(false)
}

fn is_month_year(value: &str) -> bool {
    value
        .split_once('/')
        .map(|(month, year)| is_month(month) && is_year(year))
        .unwrap_or(false)
}

/// True when `value` is already in one of the canonical shapes (or empty)
pub fn is_canonical(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match value.split_once(" - ") {
        Some((start, end)) => is_month_year(start) && (end == PRESENT || is_month_year(end)),
        None => is_month_year(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];

    #[test]
    fn test_every_month_to_present() {
        for (index, name) in FULL_NAMES.iter().enumerate() {
            let expected = format!("{:02}/2021 - Present", index + 1);
            assert_eq!(normalize_date(&format!("{} 2021 - Present", name)), expected);

            let short = &name[..3];
            assert_eq!(normalize_date(&format!("{} 2021 - Present", short)), expected);
            assert_eq!(
                normalize_date(&format!("{} 2021 - present", short.to_uppercase())),
                expected
            );
        }
    }

    #[test]
    fn test_numeric_range_is_idempotent() {
        let value = "03/2018 - 11/2019";
        assert_eq!(normalize_date(value), value);
        assert_eq!(normalize_date(&normalize_date(value)), value);

        let open = "07/2020 - Present";
        assert_eq!(normalize_date(open), open);
    }

    #[test]
    fn test_separators() {
        assert_eq!(normalize_date("Jan 2020 – Dec 2021"), "01/2020 - 12/2021");
        assert_eq!(normalize_date("Jan 2020 to Dec 2021"), "01/2020 - 12/2021");
        assert_eq!(normalize_date("Oct 2019 to October 2020"), "10/2019 - 10/2020");
        assert_eq!(normalize_date("Sept. 2019"), "");
        assert_eq!(normalize_date("Sep. 2019"), "09/2019");
    }

    #[test]
    fn test_single_side() {
        assert_eq!(normalize_date("May 2015"), "05/2015");
        assert_eq!(normalize_date("05/2015"), "05/2015");
    }

    #[test]
    fn test_unparseable_yields_empty() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("2020"), "");
        assert_eq!(normalize_date("Jan 20"), "");
        assert_eq!(normalize_date("5/2020"), "");
        assert_eq!(normalize_date("foo 2020 - bar 2021"), "");
        assert_eq!(normalize_date("foo 2020 - Present"), "");
        assert_eq!(normalize_date("Spring 2020 - Present"), "");
        assert_eq!(normalize_date("Present"), "");
        assert_eq!(normalize_date("Jan 2020 - Feb 2021 - Mar 2022"), "");
    }

    #[test]
    fn test_numeric_month_out_of_range() {
        assert_eq!(normalize_date("13/2020 - 00/2021"), "");
        assert_eq!(normalize_date("00/2020"), "");
        assert_eq!(normalize_date("12/2020 - 13/2021"), "12/2020");
        assert_eq!(normalize_date("12/2020 - 01/2021"), "12/2020 - 01/2021");
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("01/2020 - Present"));
        assert!(is_canonical("01/2020 - 02/2021"));
        assert!(is_canonical("01/2020"));
        assert!(is_canonical(""));
        assert!(!is_canonical("January 2020"));
        assert!(!is_canonical("1/2020"));
        assert!(!is_canonical("Present"));
        assert!(!is_canonical("Present - 01/2020"));
        assert!(!is_canonical("13/2020"));
        assert!(!is_canonical("00/2020 - Present"));
        assert!(!is_canonical("01/2020 - 02/2021 - Present"));
    }
}
