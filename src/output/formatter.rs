//! Output formatters: console, JSON, Markdown and HTML renderings of a parse report

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::ParseReport;
use crate::parsing::{ParsedResume, ResumeSection};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &ParseReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and section headers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ heading }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .entry {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .entry .meta { color: #6c757d; font-size: 0.9em; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ heading }}</h1>
            {% for line in contact %}<p>{{ line }}</p>{% endfor %}
        </div>
        {% if !summary.is_empty() %}
        <div class="section">
            <h2>Summary</h2>
            <p>{{ summary }}</p>
        </div>
        {% endif %}
        {% for group in entry_groups %}
        <div class="section">
            <h2>{{ group.title }}</h2>
            {% for entry in group.entries %}
            <div class="entry">
                {% if !entry.title.is_empty() %}<h3>{{ entry.title }}</h3>{% endif %}
                {% if !entry.meta.is_empty() %}<p class="meta">{{ entry.meta }}</p>{% endif %}
                {% if !entry.lines.is_empty() %}
                <ul>
                    {% for line in entry.lines %}<li>{{ line }}</li>{% endfor %}
                </ul>
                {% endif %}
            </div>
            {% endfor %}
        </div>
        {% endfor %}
        {% for group in list_groups %}
        <div class="section">
            <h2>{{ group.title }}</h2>
            <ul>
                {% for item in group.items %}<li>{{ item }}</li>{% endfor %}
            </ul>
        </div>
        {% endfor %}
        <div class="metadata">
            <p><strong>Generated by resume-parser v{{ version }}</strong> on {{ generated_at }}</p>
            <p><strong>Source:</strong> {{ source_file }} | <strong>Method:</strong> {{ method }} | <strong>Time:</strong> {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    heading: String,
    contact: Vec<String>,
    summary: String,
    entry_groups: Vec<HtmlEntryGroup>,
    list_groups: Vec<HtmlListGroup>,
    version: String,
    generated_at: String,
    source_file: String,
    method: String,
    processing_time: u64,
}

struct HtmlEntryGroup {
    title: String,
    entries: Vec<HtmlEntry>,
}

struct HtmlEntry {
    title: String,
    meta: String,
    lines: Vec<String>,
}

struct HtmlListGroup {
    title: String,
    items: Vec<String>,
}

/// Category name and entries for every structured category, in display order
fn entry_categories(resume: &ParsedResume) -> Vec<(String, &[ResumeSection])> {
    let mut categories = vec![
        ("Work Experience".to_string(), resume.experience.as_slice()),
        ("Education".to_string(), resume.education.as_slice()),
        ("Projects".to_string(), resume.projects.as_slice()),
    ];
    for section in &resume.additional_sections {
        categories.push((section.title.clone(), std::slice::from_ref(section)));
    }
    categories
}

fn list_categories(resume: &ParsedResume) -> [(&'static str, &[String]); 3] {
    [
        ("Technical Skills", resume.skills.as_slice()),
        ("Certifications", resume.certifications.as_slice()),
        ("Languages", resume.languages.as_slice()),
    ]
}

/// `Acme Corp · 01/2020 - Present · Rust, Go`
fn section_meta(section: &ResumeSection) -> String {
    let technologies = section.technologies.as_ref().map(|t| t.join(", "));
    [
        section.company.as_deref(),
        section.institution.as_deref(),
        section.date.as_deref(),
        section.link.as_deref(),
        technologies.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" · ")
}

/// Additional sections are headed by their own title, so only their lines are shown
fn is_additional(section: &ResumeSection, resume: &ParsedResume) -> bool {
    resume.additional_sections.iter().any(|s| std::ptr::eq(s, section))
}

fn contact_lines(resume: &ParsedResume) -> Vec<String> {
    let info = &resume.personal_info;
    [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter(|value| !value.is_empty())
        .cloned()
        .collect()
}

fn display_name(resume: &ParsedResume) -> String {
    if resume.personal_info.name.is_empty() {
        "Parsed Resume".to_string()
    } else {
        resume.personal_info.name.clone()
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_entry(&self, section: &ResumeSection, show_title: bool) -> String {
        let mut output = String::new();
        if show_title {
            output.push_str(&self.format_header(&section.title, 3));
            let meta = section_meta(section);
            if !meta.is_empty() {
                output.push_str(&format!("  {}\n", self.colorize(&meta, Color::Cyan)));
            }
        }
        if let Some(description) = section.description.as_deref().filter(|d| !d.is_empty()) {
            if !self.detailed {
                output.push_str(&format!("  {}\n", description));
                return output;
            }
        }
        for line in &section.content {
            output.push_str(&format!("  • {}\n", line));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ParseReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📄 {}", display_name(resume)), 1));
        for line in contact_lines(resume) {
            output.push_str(&format!("{}\n", line));
        }

        if !resume.summary.is_empty() {
            output.push_str(&self.format_header("Summary", 2));
            output.push_str(&format!("{}\n", resume.summary));
        }

        for (title, sections) in entry_categories(resume) {
            if sections.is_empty() {
                continue;
            }
            output.push_str(&self.format_header(&title, 2));
            for section in sections {
                output.push_str(&self.format_entry(section, !is_additional(section, resume)));
            }
        }

        for (title, items) in list_categories(resume) {
            if items.is_empty() {
                continue;
            }
            output.push_str(&self.format_header(title, 2));
            for item in items {
                output.push_str(&format!("  • {}\n", item));
            }
        }

        if resume.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("⚠️  Nothing could be extracted from this document", Color::Yellow)
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 4));
            output.push_str(&format!(
                "Source: {} | Method: {} | Input: {} chars | Time: {}ms\nGenerated: {}\n",
                report.metadata.source_file,
                report.method_label(),
                report.metadata.input_characters,
                report.metadata.processing_time_ms,
                report.generated_at_label()
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ParseReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ParseReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", display_name(resume)));
        let contact = contact_lines(resume);
        if !contact.is_empty() {
            output.push_str(&format!("{}\n\n", contact.join(" | ")));
        }

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Method:** {} | **Processing Time:** {}ms\n",
                report.generated_at_label(),
                report.method_label(),
                report.metadata.processing_time_ms
            ));
            let source = Path::new(&report.metadata.source_file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.source_file.clone());
            output.push_str(&format!("**Source:** `{}`\n\n", source));
        }

        if !resume.summary.is_empty() {
            output.push_str("## Summary\n\n");
            output.push_str(&format!("{}\n\n", resume.summary));
        }

        for (title, sections) in entry_categories(resume) {
            if sections.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for section in sections {
                if !is_additional(section, resume) {
                    output.push_str(&format!("### {}\n\n", section.title));
                    let meta = section_meta(section);
                    if !meta.is_empty() {
                        output.push_str(&format!("*{}*\n\n", meta));
                    }
                }
                for line in &section.content {
                    output.push_str(&format!("- {}\n", line));
                }
                output.push('\n');
            }
        }

        for (title, items) in list_categories(resume) {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-parser v{}*\n", report.metadata.version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ParseReport) -> HtmlTemplate {
        let resume = &report.resume;

        let entry_groups = entry_categories(resume)
            .into_iter()
            .filter(|(_, sections)| !sections.is_empty())
            .map(|(title, sections)| HtmlEntryGroup {
                title,
                entries: sections
                    .iter()
                    .map(|section| {
                        let additional = is_additional(section, resume);
                        HtmlEntry {
                            title: if additional { String::new() } else { section.title.clone() },
                            meta: if additional { String::new() } else { section_meta(section) },
                            lines: section.content.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();

        let list_groups = list_categories(resume)
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(title, items)| HtmlListGroup {
                title: title.to_string(),
                items: items.to_vec(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            heading: display_name(resume),
            contact: contact_lines(resume),
            summary: resume.summary.clone(),
            entry_groups,
            list_groups,
            version: report.metadata.version.clone(),
            generated_at: report.generated_at_label(),
            source_file: report.metadata.source_file.clone(),
            method: report.method_label(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ParseReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed),
            json_formatter: JsonFormatter::new(config.pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ParseReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_parsed{}.{}", base_name, timestamp_suffix, extension)
}
