//! Input processing module
//! Turns resume files into normalized plain text for the parsers

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
pub use text_extractor::normalize_text;
