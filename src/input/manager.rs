//! Input manager for handling different file types

use crate::error::{Result, ResumeParserError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    normalize_text, DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads resume files into normalized text, caching by path
pub struct InputManager {
    documents: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read `path` and return its normalized text
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(text) = self.cached(path) {
            info!("Using cached text for: {}", path.display());
            return Ok(text.to_string());
        }

        if !path.exists() {
            return Err(ResumeParserError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        let raw = read_document(path, file_type).await?;

        // extractors disagree on line endings and spacing
        let text = normalize_text(&raw);
        debug!("Extracted {} characters ({} raw)", text.len(), raw.len());

        if self.enable_cache {
            self.documents.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    pub fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeParserError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.documents.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.documents.len()
    }

    fn cached(&self, path: &Path) -> Option<&str> {
        if !self.enable_cache {
            return None;
        }
        self.documents.get(path).map(String::as_str)
    }
}

async fn read_document(path: &Path, file_type: FileType) -> Result<String> {
    match file_type {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path).await
        }
        FileType::Docx => {
            info!("Extracting text from DOCX: {}", path.display());
            DocxExtractor.extract(path).await
        }
        FileType::Text => {
            info!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path).await
        }
        FileType::Markdown => {
            info!("Rendering markdown file to text: {}", path.display());
            MarkdownExtractor.extract(path).await
        }
        FileType::Unknown => Err(ResumeParserError::UnsupportedFormat(format!(
            "Unsupported file type for: {} (supported: {})",
            path.display(),
            FileType::SUPPORTED_EXTENSIONS.join(", ")
        ))),
    }
}
