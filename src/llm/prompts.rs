//! Structured-output instruction sent with every LLM parse

/// Prompt templates used by the LLM strategy
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub resume_structure: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            resume_structure: RESUME_STRUCTURE_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Instruction asking for the resume as one JSON object
    pub fn resume_instructions(&self) -> &str {
        &self.resume_structure
    }
}

/// Single completion prompt for providers without a separate system role
pub fn dialogue_prompt(instructions: &str, document: &str, reply_label: &str) -> String {
    format!("{}\n\nHuman: {}\n{}:", instructions, document, reply_label)
}

const RESUME_STRUCTURE_TEMPLATE: &str = r#"Parse the following resume text and return a JSON object with the following structure:
{
    "personalInfo": { "name": "", "email": "", "phone": "", "location": "" },
    "summary": "",
    "experience": [{ "title": "", "content": [""], "company": "", "date": "" }],
    "education": [{ "title": "", "content": [""], "institution": "", "date": "" }],
    "skills": [""],
    "projects": [{ "title": "", "content": [""], "description": "", "technologies": [""], "date": "" }],
    "certifications": [""],
    "languages": [""],
    "additionalSections": [{ "title": "", "content": [""] }]
}
Ensure all dates are in the format 'MM/YYYY - MM/YYYY' or 'MM/YYYY - Present'.
For skills, projects, certifications, and languages, extract as much information as possible from the resume text.
Return only the JSON object, with every top-level key present."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_every_field() {
        let templates = PromptTemplates::default();
        let instructions = templates.resume_instructions();
        for key in [
            "personalInfo",
            "summary",
            "experience",
            "education",
            "skills",
            "projects",
            "certifications",
            "languages",
            "additionalSections",
        ] {
            assert!(instructions.contains(key), "missing {}", key);
        }
        assert!(instructions.contains("MM/YYYY - Present"));
    }

    #[test]
    fn test_dialogue_prompt() {
        let prompt = dialogue_prompt("Parse this.", "Jane Doe", "AI");
        assert_eq!(prompt, "Parse this.\n\nHuman: Jane Doe\nAI:");
    }
}
