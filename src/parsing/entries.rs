//! Splits a section body into entries (one job, one degree, one project)
//!
//! An entry starts at a line beginning with an uppercase ASCII letter. Two
//! kinds of uppercase line stay with the entry above them instead: a line that
//! is nothing but a date range, and a sentence line ending in terminal
//! punctuation. A line with a `|` separator or a date range in it always
//! reads as a title, so `Manager | Bar Co.` still opens an entry. Any other
//! uppercase-initial body line also opens a new entry; that over-splitting is
//! a known limitation of the boundary rule.

use crate::parsing::dates::normalize_date;
use regex::Regex;
use std::sync::LazyLock;

/// Textual month-year ranges (optionally open-ended) or numeric `M/YYYY` ranges.
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|January|February|March|April|",
        r"June|July|August|September|October|November|December)\.?\s+\d{4}\s*(?:-|–|—|to)?\s*",
        r"(?:Present|\w+\.?\s+\d{4})?\b",
        r"|\b\d{1,2}/\d{4}\s*(?:-|–|—|to)?\s*(?:\d{1,2}/\d{4}|Present)?\b",
    ))
    .expect("valid date range regex")
});

const SENTENCE_ENDINGS: [char; 4] = ['.', '!', '?', ';'];

/// Raw entry before it is mapped into a category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub content: Vec<String>,
    /// Canonical date, empty when none was found
    pub date: String,
    /// Title minus the date, cut at the first `|`
    pub organization: String,
}

/// Find the first date range in `text`
pub fn find_date_range(text: &str) -> Option<regex::Match<'_>> {
    DATE_RANGE.find(text)
}

/// True when the whole line is a date range
pub fn is_date_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty()
        && find_date_range(line)
            .map(|m| m.start() == 0 && m.end() == line.len())
            .unwrap_or(false)
}

pub fn tokenize_entries(section: &str) -> Vec<Entry> {
    split_entries(section)
        .into_iter()
        .map(|lines| build_entry(&lines))
        .collect()
}

fn split_entries(section: &str) -> Vec<Vec<&str>> {
    let mut entries: Vec<Vec<&str>> = Vec::new();

    for line in section.split('\n') {
        let starts_entry = line.starts_with(|c: char| c.is_ascii_uppercase()) && !continues_entry(line);
        match entries.last_mut() {
            Some(current) if !starts_entry => current.push(line),
            _ => entries.push(vec![line]),
        }
    }

    entries.retain(|lines| lines.iter().any(|line| !line.trim().is_empty()));
    entries
}

fn continues_entry(line: &str) -> bool {
    is_date_line(line) || is_sentence(line)
}

fn is_sentence(line: &str) -> bool {
    line.trim_end().ends_with(SENTENCE_ENDINGS) && !line.contains('|') && find_date_range(line).is_none()
}

fn build_entry(lines: &[&str]) -> Entry {
    let title = lines.first().map(|l| l.trim_end()).unwrap_or_default().to_string();
    let mut content: Vec<String> = lines
        .iter()
        .skip(1)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let (date, remainder) = match find_date_range(&title) {
        Some(found) => (
            normalize_date(found.as_str()),
            format!("{}{}", &title[..found.start()], &title[found.end()..]),
        ),
        None if content.first().map(|l| is_date_line(l)).unwrap_or(false) => {
            let date_line = content.remove(0);
            (normalize_date(&date_line), title.clone())
        }
        None => (String::new(), title.clone()),
    };

    let organization = remainder.split('|').next().unwrap_or_default().trim().to_string();

    Entry {
        title,
        content,
        date,
        organization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_date() {
        let entries = tokenize_entries("Acme Corp | Engineer | Jan 2019 - Mar 2021\n- Wrote services\n  more work");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "01/2019 - 03/2021");
        assert_eq!(entries[0].organization, "Acme Corp");
        assert_eq!(entries[0].content, vec!["- Wrote services", "more work"]);
    }

    #[test]
    fn test_date_line_attaches_to_entry() {
        let entries = tokenize_entries("Senior Engineer | Acme Corp\nJan 2020 - Present\nBuilt things.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Senior Engineer | Acme Corp");
        assert_eq!(entries[0].date, "01/2020 - Present");
        assert_eq!(entries[0].organization, "Senior Engineer");
        assert_eq!(entries[0].content, vec!["Built things."]);
    }

    #[test]
    fn test_multiple_entries() {
        let section = "Engineer | Acme | 01/2018 - 12/2019\n- built APIs\nDeveloper | Initech | 01/2020 - Present\n- fixed TPS reports";
        let entries = tokenize_entries(section);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "01/2018 - 12/2019");
        assert_eq!(entries[1].organization, "Developer");
        assert_eq!(entries[1].date, "01/2020 - Present");
        assert_eq!(entries[1].content, vec!["- fixed TPS reports"]);
    }

    #[test]
    fn test_titles_ending_in_period_open_entries() {
        let section = "Engineer | Foo Inc.\n- built\nManager | Bar Co.\n- managed\nDirector, Baz Ltd. Jan 2021 - Present\nRan the place.";
        let entries = tokenize_entries(section);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].content, vec!["- built"]);
        assert_eq!(entries[1].title, "Manager | Bar Co.");
        assert_eq!(entries[1].organization, "Manager");
        assert_eq!(entries[1].content, vec!["- managed"]);
        assert_eq!(entries[2].date, "01/2021 - Present");
        assert_eq!(entries[2].content, vec!["Ran the place."]);
    }

    #[test]
    fn test_uppercase_fragment_over_splits() {
        let entries = tokenize_entries("Engineer | Acme\nLed the migration");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title, "Led the migration");
        assert!(entries[1].content.is_empty());
    }

    #[test]
    fn test_content_excludes_title() {
        let entries = tokenize_entries("University of Somewhere | May 2015\n  gpa 3.9  ");
        assert_eq!(entries[0].content, vec!["gpa 3.9"]);
        assert!(!entries[0].content.contains(&entries[0].title));
        assert_eq!(entries[0].organization, "University of Somewhere");
        assert_eq!(entries[0].date, "05/2015");
    }

    #[test]
    fn test_empty_section_has_no_entries() {
        assert!(tokenize_entries("").is_empty());
        assert!(tokenize_entries("\n\n").is_empty());
    }

    #[test]
    fn test_is_date_line() {
        assert!(is_date_line("Jan 2020 - Present"));
        assert!(is_date_line("  06/2017 – 08/2019 "));
        assert!(!is_date_line("Joined in Jan 2020"));
        assert!(!is_date_line(""));
    }
}
