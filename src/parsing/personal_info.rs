//! Contact-block extraction
//!
//! Both extractors read the first paragraph of the resume text. [`extract_line_based`] works on fixed line
//! positions; [`extract_nlp_assisted`] tokenizes the paragraph and matches
//! entity-shaped tokens, returning the matched text rather than whole lines.

use crate::parsing::model::PersonalInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static LINE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}[-.]?\d{3}[-.]?\d{4}").expect("Invalid phone regex"));

static LINE_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+,\s[A-Z]{2}$").expect("Invalid location regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-. ]?)?(?:\([0-9]{3}\)|\b[0-9]{3})[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
        .expect("Invalid phone regex")
});

static CITY_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*, ?[A-Z]{2}\b").expect("Invalid place regex")
});

static CITY_COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)*, [A-Z][a-z]+(?: [A-Z][a-z]+)*\b")
        .expect("Invalid place regex")
});

/// Capitalized words that make a line a job title or heading rather than a name
const NON_NAME_WORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "cv", "engineer", "developer", "manager", "designer",
    "analyst", "consultant", "scientist", "architect", "director", "senior", "junior", "lead",
    "intern", "software", "summary", "profile", "objective", "experience", "education", "skills",
    "contact", "street", "avenue", "road",
];

/// Signature shared by the personal-info extractors
pub type PersonalInfoExtractor = fn(&str) -> PersonalInfo;

/// How the heuristic parser reads the contact block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonalInfoMode {
    #[default]
    LineBased,
    NlpAssisted,
}

impl PersonalInfoMode {
    pub fn extractor(self) -> PersonalInfoExtractor {
        match self {
            PersonalInfoMode::LineBased => extract_line_based,
            PersonalInfoMode::NlpAssisted => extract_nlp_assisted,
        }
    }
}

/// First `\n\n`-delimited paragraph
pub fn first_paragraph(text: &str) -> &str {
    text.split("\n\n").next().unwrap_or_default()
}

/// Line 1 is the name; the first line with `@`, the first phone-shaped line
/// and the first `City, ST` line fill the rest.
pub fn extract_line_based(text: &str) -> PersonalInfo {
    let lines: Vec<&str> = first_paragraph(text).lines().collect();

    PersonalInfo {
        name: lines.first().map(|l| l.to_string()).unwrap_or_default(),
        email: first_line_matching(&lines, |line| line.contains('@')),
        phone: first_line_matching(&lines, |line| LINE_PHONE.is_match(line)),
        location: first_line_matching(&lines, |line| LINE_LOCATION.is_match(line)),
    }
}

fn first_line_matching(lines: &[&str], predicate: impl Fn(&str) -> bool) -> String {
    lines
        .iter()
        .copied()
        .find(|line| predicate(line))
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn extract_nlp_assisted(text: &str) -> PersonalInfo {
    let paragraph = first_paragraph(text);

    PersonalInfo {
        name: find_person_name(paragraph).unwrap_or_default(),
        email: EMAIL
            .find(paragraph)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: PHONE
            .find(paragraph)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        location: find_place(paragraph).unwrap_or_default(),
    }
}

/// First line that reads as 2 to 4 capitalized words with no digits or `@`
fn find_person_name(paragraph: &str) -> Option<String> {
    paragraph
        .lines()
        .map(str::trim)
        .filter(|line| !line.contains('@') && !line.chars().any(|c| c.is_ascii_digit()))
        .find_map(|line| {
            let words: Vec<&str> = line.unicode_words().collect();
            let looks_like_name =
                (2..=4).contains(&words.len()) && words.iter().all(|word| is_name_word(word));
            looks_like_name.then(|| words.join(" "))
        })
}

fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && chars.all(|c| c.is_alphabetic() || c == '\'' || c == '’' || c == '-')
        && !NON_NAME_WORDS.contains(&word.to_lowercase().as_str())
}

/// `City, ST` wins over `City, Country` so street addresses resolve to the city
fn find_place(paragraph: &str) -> Option<String> {
    paragraph
        .lines()
        .find_map(|line| CITY_STATE.find(line))
        .or_else(|| paragraph.lines().find_map(|line| CITY_COUNTRY.find(line)))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Jane Doe\njane.doe@example.com\n555-123-4567\nSeattle, WA\n\nSecond paragraph";

    #[test]
    fn test_line_based() {
        let info = extract_line_based(HEADER);
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.email, "jane.doe@example.com");
        assert_eq!(info.phone, "555-123-4567");
        assert_eq!(info.location, "Seattle, WA");
    }

    #[test]
    fn test_line_based_returns_whole_lines() {
        let info = extract_line_based("Jane Doe\nEmail: jane@example.com | Phone: 555.123.4567");
        assert_eq!(info.email, "Email: jane@example.com | Phone: 555.123.4567");
        assert_eq!(info.phone, info.email);
        assert_eq!(info.location, "");
    }

    #[test]
    fn test_nlp_assisted_extracts_tokens() {
        let text = "Senior Software Engineer\nJane Doe\nEmail: jane@example.com | Phone: (555) 123-4567\nBased in Portland, OR";
        let info = extract_nlp_assisted(text);
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.email, "jane@example.com");
        assert_eq!(info.phone, "(555) 123-4567");
        assert_eq!(info.location, "Portland, OR");
    }

    #[test]
    fn test_nlp_assisted_country_and_street() {
        let info = extract_nlp_assisted("Marie Curie\n12 Rue Cuvier\nParis, France");
        assert_eq!(info.name, "Marie Curie");
        assert_eq!(info.location, "Paris, France");

        let info = extract_nlp_assisted("John Smith\n123 Main St, Springfield, IL 62701");
        assert_eq!(info.location, "Springfield, IL");
    }

    #[test]
    fn test_nlp_assisted_uppercase_name() {
        let info = extract_nlp_assisted("JANE DOE\nSOFTWARE ENGINEER\njane@example.com");
        assert_eq!(info.name, "JANE DOE");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_line_based("").is_empty());
        assert!(extract_nlp_assisted("").is_empty());
    }

    #[test]
    fn test_mode_selects_extractor() {
        let info = PersonalInfoMode::NlpAssisted.extractor()("Contact: jane@example.com");
        assert_eq!(info.email, "jane@example.com");
        let info = PersonalInfoMode::LineBased.extractor()("Contact: jane@example.com");
        assert_eq!(info.email, "Contact: jane@example.com");
    }
}
