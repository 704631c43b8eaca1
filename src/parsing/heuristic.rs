//! Deterministic, regex-driven resume parser
//!
//! Never fails: every extractor falls back to an empty value when its
//! section or pattern is missing.

use crate::error::Result;
use crate::parsing::dates::normalize_date;
use crate::parsing::entries::{tokenize_entries, Entry};
use crate::parsing::model::{ParsedResume, PersonalInfo, ResumeSection};
use crate::parsing::personal_info::{PersonalInfoExtractor, PersonalInfoMode};
use crate::parsing::sections::SectionMap;
use crate::parsing::ResumeParser;
use log::debug;

pub const SUMMARY: &str = "summary";
pub const WORK_EXPERIENCE: &str = "work experience";
pub const EDUCATION: &str = "education";
pub const TECHNICAL_SKILLS: &str = "technical skills";
pub const PROJECTS: &str = "projects";
pub const CERTIFICATIONS: &str = "certifications";
pub const LANGUAGES: &str = "languages";

/// Headings with a dedicated field; anything else lands in `additional_sections`.
pub const KNOWN_SECTIONS: [&str; 7] = [
    SUMMARY,
    WORK_EXPERIENCE,
    EDUCATION,
    TECHNICAL_SKILLS,
    PROJECTS,
    CERTIFICATIONS,
    LANGUAGES,
];

#[derive(Debug, Clone, Copy)]
pub struct HeuristicParser {
    extract_personal_info: PersonalInfoExtractor,
}

impl Default for HeuristicParser {
    fn default() -> Self {
        Self::new(PersonalInfoMode::default())
    }
}

impl HeuristicParser {
    pub fn new(mode: PersonalInfoMode) -> Self {
        Self::with_extractor(mode.extractor())
    }

    /// Use a custom contact-block extractor
    pub fn with_extractor(extract_personal_info: PersonalInfoExtractor) -> Self {
        Self {
            extract_personal_info,
        }
    }

    /// Parse `text` into a [`ParsedResume`]
    pub fn parse_text(&self, text: &str) -> ParsedResume {
        let sections = SectionMap::split(text);
        debug!("Detected {} section headings", sections.len());

        ParsedResume {
            personal_info: self.personal_info(text, &sections),
            summary: sections.get(SUMMARY).unwrap_or_default().to_string(),
            experience: extract_experience(&sections),
            education: extract_education(&sections),
            skills: extract_skills(&sections),
            projects: extract_projects(&sections),
            certifications: non_empty_lines(sections.get(CERTIFICATIONS).unwrap_or_default()),
            languages: non_empty_lines(sections.get(LANGUAGES).unwrap_or_default()),
            additional_sections: extract_additional_sections(&sections),
        }
    }

    /// The contact block is the first paragraph of the raw text, even when
    /// its name line reads as a heading. Text without headings yields no
    /// personal info.
    fn personal_info(&self, text: &str, sections: &SectionMap) -> PersonalInfo {
        if sections.is_empty() {
            return PersonalInfo::default();
        }
        (self.extract_personal_info)(text.trim_start())
    }
}

impl ResumeParser for HeuristicParser {
    async fn parse(&self, text: &str) -> Result<ParsedResume> {
        Ok(self.parse_text(text))
    }
}

fn extract_experience(sections: &SectionMap) -> Vec<ResumeSection> {
    entries(sections, WORK_EXPERIENCE)
        .into_iter()
        .map(|entry| ResumeSection {
            company: non_empty(entry.organization),
            date: non_empty(entry.date),
            title: entry.title,
            content: entry.content,
            ..Default::default()
        })
        .collect()
}

fn extract_education(sections: &SectionMap) -> Vec<ResumeSection> {
    entries(sections, EDUCATION)
        .into_iter()
        .map(|entry| ResumeSection {
            institution: non_empty(entry.organization),
            date: non_empty(entry.date),
            title: entry.title,
            content: entry.content,
            ..Default::default()
        })
        .collect()
}

/// A line ending in `:` names a category that prefixes every following skill
fn extract_skills(sections: &SectionMap) -> Vec<String> {
    let mut skills = Vec::new();
    let mut category: Option<&str> = None;

    for line in sections.get(TECHNICAL_SKILLS).unwrap_or_default().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(label) = line.strip_suffix(':') {
            category = Some(label.trim());
        } else {
            match category {
                Some(label) if !label.is_empty() => skills.push(format!("{}: {}", label, line)),
                _ => skills.push(line.to_string()),
            }
        }
    }

    skills
}

/// Project titles read `name | link | tech, tech | date`
fn extract_projects(sections: &SectionMap) -> Vec<ResumeSection> {
    entries(sections, PROJECTS)
        .into_iter()
        .map(|entry| {
            let mut parts = entry.title.split('|').map(str::trim);
            let title = parts.next().unwrap_or_default().to_string();
            let link = parts.next().unwrap_or_default().to_string();
            let technologies: Vec<String> = parts
                .next()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            let date = match parts.next() {
                Some(date) => normalize_date(date),
                None => entry.date,
            };
            let description = entry.content.join(" ").trim().to_string();

            ResumeSection {
                title,
                content: entry.content,
                date: non_empty(date),
                description: Some(description),
                link: non_empty(link),
                technologies: Some(technologies),
                ..Default::default()
            }
        })
        .collect()
}

fn extract_additional_sections(sections: &SectionMap) -> Vec<ResumeSection> {
    sections
        .iter()
        .filter(|section| !KNOWN_SECTIONS.contains(&section.key.as_str()))
        .map(|section| ResumeSection::new(section.heading.clone(), non_empty_lines(&section.body)))
        .collect()
}

fn entries(sections: &SectionMap, key: &str) -> Vec<Entry> {
    sections.get(key).map(tokenize_entries).unwrap_or_default()
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::dates::is_canonical;

    const RESUME: &str = "Jane Doe
jane@example.com
555-123-4567
Seattle, WA

SUMMARY
Backend engineer who likes parsers.

WORK EXPERIENCE
Senior Engineer | Acme Corp
Jan 2020 - Present
Built things.
Engineer | Initech | 06/2017 - 12/2019
- kept the lights on

EDUCATION
State University | Sep 2013 - May 2017
bsc computer science

TECHNICAL SKILLS
Languages:
Python
Go
Frameworks:
React

PROJECTS
Tokenizer | github.com/jane/tok | Rust, Regex | Mar 2022
a fast tokenizer
for resumes

CERTIFICATIONS
AWS Solutions Architect

LANGUAGES
English
Spanish

VOLUNTEER WORK
Food bank driver
";

    #[test]
    fn test_full_resume() {
        let resume = HeuristicParser::default().parse_text(RESUME);

        assert_eq!(resume.personal_info.name, "Jane Doe");
        assert_eq!(resume.personal_info.email, "jane@example.com");
        assert_eq!(resume.personal_info.phone, "555-123-4567");
        assert_eq!(resume.personal_info.location, "Seattle, WA");
        assert_eq!(resume.summary, "Backend engineer who likes parsers.");

        assert_eq!(resume.experience.len(), 2);
        assert!(resume.experience[0].title.contains("Senior Engineer"));
        assert_eq!(resume.experience[0].date.as_deref(), Some("01/2020 - Present"));
        assert!(resume.experience[0].content.contains(&"Built things.".to_string()));
        assert_eq!(resume.experience[1].date.as_deref(), Some("06/2017 - 12/2019"));

        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].institution.as_deref(), Some("State University"));
        assert_eq!(resume.education[0].date.as_deref(), Some("09/2013 - 05/2017"));
    }

    #[test]
    fn test_skills_carry_category() {
        let resume = HeuristicParser::default().parse_text(RESUME);
        assert_eq!(
            resume.skills,
            vec!["Languages: Python", "Languages: Go", "Frameworks: React"]
        );
    }

    #[test]
    fn test_skills_without_category() {
        let resume = HeuristicParser::default().parse_text("TECHNICAL SKILLS\nRust\n\nSQL, Docker");
        assert_eq!(resume.skills, vec!["Rust", "SQL, Docker"]);
    }

    #[test]
    fn test_projects_split_title() {
        let resume = HeuristicParser::default().parse_text(RESUME);
        assert_eq!(resume.projects.len(), 1);

        let project = &resume.projects[0];
        assert_eq!(project.title, "Tokenizer");
        assert_eq!(project.link.as_deref(), Some("github.com/jane/tok"));
        assert_eq!(
            project.technologies,
            Some(vec!["Rust".to_string(), "Regex".to_string()])
        );
        assert_eq!(project.date.as_deref(), Some("03/2022"));
        assert_eq!(project.description.as_deref(), Some("a fast tokenizer for resumes"));
    }

    #[test]
    fn test_plain_lists_and_additional_sections() {
        let resume = HeuristicParser::default().parse_text(RESUME);
        assert_eq!(resume.certifications, vec!["AWS Solutions Architect"]);
        assert_eq!(resume.languages, vec!["English", "Spanish"]);

        assert_eq!(resume.additional_sections.len(), 1);
        assert_eq!(resume.additional_sections[0].title, "VOLUNTEER WORK");
        assert_eq!(resume.additional_sections[0].content, vec!["Food bank driver"]);
        assert!(resume
            .experience
            .iter()
            .all(|e| !e.title.contains("VOLUNTEER") && !e.content.iter().any(|c| c.contains("Food bank"))));
    }

    #[test]
    fn test_headingless_text_is_all_empty() {
        for text in ["", "   ", "just a lowercase blob of words", "Jane Doe\njane@example.com\n\nSome Words Here", "!!@@##\n\n\t$$"] {
            let resume = HeuristicParser::default().parse_text(text);
            assert!(resume.is_empty(), "expected empty resume for {:?}", text);
            assert_eq!(resume.summary, "");
            assert_eq!(resume.personal_info, PersonalInfo::default());
        }
    }

    #[test]
    fn test_uppercase_name_line_keeps_contact_block() {
        let text = "JANE DOE\njane@example.com\n555-123-4567\nSeattle, WA\n\nSUMMARY\nBuilder.";

        let resume = HeuristicParser::default().parse_text(text);
        assert_eq!(resume.personal_info.name, "JANE DOE");
        assert_eq!(resume.personal_info.email, "jane@example.com");
        assert_eq!(resume.personal_info.phone, "555-123-4567");
        assert_eq!(resume.personal_info.location, "Seattle, WA");
        assert_eq!(resume.summary, "Builder.");

        let resume = HeuristicParser::new(PersonalInfoMode::NlpAssisted).parse_text(text);
        assert_eq!(resume.personal_info.name, "JANE DOE");
        assert_eq!(resume.personal_info.email, "jane@example.com");
        assert_eq!(resume.personal_info.location, "Seattle, WA");
    }

    #[test]
    fn test_every_date_canonical() {
        let resume = HeuristicParser::default().parse_text(RESUME);
        for section in resume.experience.iter().chain(&resume.education).chain(&resume.projects) {
            if let Some(date) = &section.date {
                assert!(is_canonical(date), "non-canonical date {:?}", date);
            }
        }
    }

    #[test]
    fn test_nlp_assisted_mode() {
        let text = "Jane Doe\nreach me at jane@example.com or (555) 123-4567, Austin, TX\n\nSUMMARY\nHi.";
        let resume = HeuristicParser::new(PersonalInfoMode::NlpAssisted).parse_text(text);
        assert_eq!(resume.personal_info.name, "Jane Doe");
        assert_eq!(resume.personal_info.email, "jane@example.com");
        assert_eq!(resume.personal_info.phone, "(555) 123-4567");
        assert_eq!(resume.personal_info.location, "Austin, TX");
        assert_eq!(resume.summary, "Hi.");
    }

    #[tokio::test]
    async fn test_trait_parse_never_fails() {
        let parser = HeuristicParser::default();
        let resume = parser.parse("\u{0}\u{1}garbage").await.unwrap();
        assert!(resume.is_empty());
    }
}
