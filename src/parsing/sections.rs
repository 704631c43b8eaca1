//! Heading-based section splitting shared by both parsing strategies

use regex::Regex;
use std::sync::LazyLock;

/// A heading is a whole line of uppercase ASCII letters and spaces.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Z][A-Z ]+)$").expect("valid heading regex"));

/// One heading and the raw text under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading exactly as written, trimmed
    pub heading: String,
    /// Lower-cased heading, used for category lookup
    pub key: String,
    pub body: String,
}

/// Sections of a document in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    /// Split `text` at every heading line.
    ///
    /// Each body is the trimmed text between the end of its heading line and
    /// the start of the next heading, or the end of the text. A repeated
    /// heading replaces the earlier body but keeps its position.
    pub fn split(text: &str) -> Self {
        let mut map = SectionMap::default();
        let mut open: Option<(String, usize)> = None;

        for caps in HEADING.captures_iter(text) {
            let Some(heading) = caps.get(1) else { continue };
            if let Some((previous, body_start)) = open.take() {
                map.insert(&previous, &text[body_start..heading.start()]);
            }
            open = Some((heading.as_str().trim().to_string(), heading.end()));
        }

        if let Some((previous, body_start)) = open {
            map.insert(&previous, &text[body_start..]);
        }

        map
    }

    fn insert(&mut self, heading: &str, body: &str) {
        let key = heading.to_lowercase();
        let body = body.trim().to_string();

        if let Some(existing) = self.sections.iter_mut().find(|s| s.key == key) {
            existing.heading = heading.to_string();
            existing.body = body;
        } else {
            self.sections.push(Section {
                heading: heading.to_string(),
                key,
                body,
            });
        }
    }

    /// Body of the section whose lower-cased heading equals `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.body.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
