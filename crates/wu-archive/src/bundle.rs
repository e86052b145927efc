//! Snippet bundle: the fixed set of files handed out as one download.

use crate::error::Result;
use crate::zip::encode_archive;
use wu_core::{ArchiveConfig, FileEntry};

pub const SCRIPT_NAME: &str = "webharu-utils.v1.js";
pub const FOOTER_NAME: &str = "snippet-footer.html";
pub const ATTRIBUTES_NAME: &str = "attributes.html";
pub const LLMS_NAME: &str = "llms.txt";
pub const README_NAME: &str = "README-ja.md";

/// Used when no documentation could be loaded.
pub const README_FALLBACK: &str = "# WebHaru Utils\n詳細は公式READMEをご覧ください。";

/// Escape `&`, `<` and `>` for embedding text in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Standalone HTML page holding the attribute table and the raw attribute dump.
pub fn attributes_document(table_html: &str, attributes_text: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>WU Attributes</title></head><body>{}<pre>{}</pre></body></html>",
        table_html,
        escape_html(attributes_text)
    )
}

/// First `max_lines` lines of the documentation, or the fallback text.
pub fn readme_excerpt(doc: Option<&str>, max_lines: usize) -> String {
    match doc {
        Some(text) => text.split('\n').take(max_lines).collect::<Vec<_>>().join("\n"),
        None => README_FALLBACK.to_string(),
    }
}

/// Join the bundle prefix and a file name with exactly one `/`.
pub fn prefixed_name(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Everything the builder page generates for one download.
#[derive(Debug, Clone, Default)]
pub struct SnippetBundle {
    /// Minified utility script.
    pub script: String,
    pub footer_html: String,
    pub attributes_table_html: String,
    pub attributes_text: String,
    pub llms_text: String,
    /// Full documentation text; `None` selects the fallback.
    pub readme: Option<String>,
}

impl SnippetBundle {
    /// Archive entries in their fixed order.
    pub fn entries(&self, config: &ArchiveConfig) -> Vec<FileEntry> {
        let readme = readme_excerpt(self.readme.as_deref(), config.readme_lines);
        let attributes = attributes_document(&self.attributes_table_html, &self.attributes_text);
        [
            (SCRIPT_NAME, self.script.as_str()),
            (FOOTER_NAME, self.footer_html.as_str()),
            (ATTRIBUTES_NAME, attributes.as_str()),
            (LLMS_NAME, self.llms_text.as_str()),
            (README_NAME, readme.as_str()),
        ]
        .into_iter()
        .map(|(name, content)| FileEntry::text(&prefixed_name(&config.prefix, name), content))
        .collect()
    }

    pub fn to_zip(&self, config: &ArchiveConfig) -> Result<Vec<u8>> {
        encode_archive(&self.entries(config))
    }
}
