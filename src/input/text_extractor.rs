//! Text extraction from various file formats

use crate::error::{Result, ResumeParserError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static LINE_BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("Invalid break regex"));
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}\u{2000}-\u{200a}\u{202f}]+").expect("Invalid space regex"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid newline regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeParserError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

/// Word documents: one line per paragraph, table cells one per line
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            ResumeParserError::DocxExtraction(format!("Failed to read DOCX '{}': {}", path.display(), e))
        })?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(para) => lines.push(paragraph_text(para)),
                docx_rs::DocumentChild::Table(table) => {
                    for row in &table.rows {
                        let docx_rs::TableChild::TableRow(tr) = row;
                        for cell in &tr.cells {
                            let docx_rs::TableRowChild::TableCell(tc) = cell;
                            for content in &tc.children {
                                if let docx_rs::TableCellContent::Paragraph(para) = content {
                                    lines.push(paragraph_text(para));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut text),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = link_child {
                        push_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(text) => out.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => out.push(' '),
            _ => {}
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown and strip the markup, keeping block boundaries as blank lines
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = LINE_BREAK_TAG.replace_all(&html_output, "\n");
    let text = text
        .replace("</p>", "\n")
        .replace("</ul>", "\n")
        .replace("</ol>", "\n");
    let text = HTML_TAG.replace_all(&text, "");

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Normalize line endings and horizontal whitespace.
///
/// Runs of spaces, tabs and non-breaking spaces become one space, line ends
/// are trimmed, and more than one blank line collapses to one. A single
/// leading space on indented lines survives so continuation lines stay
/// distinguishable from entry titles.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = unified
        .lines()
        .map(|line| HORIZONTAL_SPACE.replace_all(line, " ").trim_end().to_string())
        .collect();

    BLANK_RUN
        .replace_all(&lines.join("\n"), "\n\n")
        .trim_matches('\n')
        .to_string()
}
