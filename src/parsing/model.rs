//! Structured resume produced by every parsing strategy

use serde::{Deserialize, Serialize};

/// Output contract shared by the heuristic and LLM strategies.
///
/// Serialized with camelCase keys so a provider reply in the documented
/// JSON shape deserializes directly into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ResumeSection>,
    pub education: Vec<ResumeSection>,
    pub skills: Vec<String>,
    pub projects: Vec<ResumeSection>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub additional_sections: Vec<ResumeSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

/// One entry within a category: a job, a degree, a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.location.is_empty()
    }
}

impl ResumeSection {
    /// Section with a title and body lines only
    pub fn new(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
            ..Default::default()
        }
    }
}

impl ParsedResume {
    /// True when nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_empty()
            && self.summary.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
            && self.languages.is_empty()
            && self.additional_sections.is_empty()
    }

    /// Number of non-empty categories, used for summaries in the CLI
    pub fn populated_categories(&self) -> usize {
        [
            !self.personal_info.is_empty(),
            !self.summary.is_empty(),
            !self.experience.is_empty(),
            !self.education.is_empty(),
            !self.skills.is_empty(),
            !self.projects.is_empty(),
            !self.certifications.is_empty(),
            !self.languages.is_empty(),
            !self.additional_sections.is_empty(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }
}
