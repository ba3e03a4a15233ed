//! DOCX text extraction

use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::error::{Error, Result};

/// Extracts the body paragraphs of a `.docx` file as plain text
pub struct DocxExtractor;

impl DocxExtractor {
    /// Read a DOCX file from disk and extract its text
    pub fn extract_file(path: &Path, filename: &str) -> Result<String> {
        let data = std::fs::read(path).map_err(|e| {
            Error::extraction(filename, format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::extract(filename, &data)
    }

    /// Extract text from DOCX bytes.
    ///
    /// Top-level body paragraphs are joined with `\n` in document order.
    /// Tables and other non-paragraph blocks are skipped.
    pub fn extract(filename: &str, data: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        tracing::debug!("Extracted {} paragraphs from '{}'", paragraphs.len(), filename);

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

/// Runs contribute their text; hyperlinks are walked for the runs they wrap
fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for child in &run.children {
                    match child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            _ => {}
        }
    }
}
