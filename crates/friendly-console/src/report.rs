//! Markdown assembly of explanation reports.
//!
//! A traceback explanation arrives as ordered sections (header, message,
//! suggestion, source excerpts, simulated traceback...). This module lays
//! them out as markdown: headers get `#` prefixes, source and traceback
//! sections get code fences, and a documentation variant shifts headers
//! down so reports can be embedded in larger documents.

use serde::{Deserialize, Serialize};

/// The sections a report can carry, in no particular order; ordering comes
/// from the report itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Message,
    Suggest,
    Generic,
    ParsingError,
    ParsingErrorSource,
    Cause,
    LastCallHeader,
    LastCallSource,
    LastCallVariables,
    ExceptionRaisedHeader,
    ExceptionRaisedSource,
    ExceptionRaisedVariables,
    SimulatedTraceback,
    OriginalTraceback,
    ShortenedTraceback,
}

impl Section {
    /// Markdown prefix/suffix pair for this section.
    fn affixes(self) -> (&'static str, &'static str) {
        match self {
            Section::Header => ("# ", ""),
            Section::LastCallHeader | Section::ExceptionRaisedHeader => ("## ", ""),
            Section::ParsingErrorSource
            | Section::LastCallSource
            | Section::LastCallVariables
            | Section::ExceptionRaisedSource
            | Section::ExceptionRaisedVariables => ("```python\n", "\n```"),
            Section::SimulatedTraceback
            | Section::OriginalTraceback
            | Section::ShortenedTraceback => ("```pytb\n", "\n```"),
            Section::Suggest => ("", "\n"),
            Section::Message | Section::Generic | Section::ParsingError | Section::Cause => {
                ("", "")
            }
        }
    }

    fn is_heading(self) -> bool {
        matches!(
            self,
            Section::Header | Section::LastCallHeader | Section::ExceptionRaisedHeader
        )
    }
}

/// Rendering variants for [`Report::to_markdown_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Shift headings down two levels (h1 -> h3) so the report can be
    /// inserted into a document without creating artificial top headers.
    pub documentation: bool,
    /// Backtick the exception name in the message line, so console
    /// renderers style it as inline code.
    pub rich: bool,
}

/// An ordered sequence of report sections with their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    items: Vec<(Section, String)>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section. Empty or whitespace-only content is kept out of
    /// the report entirely.
    pub fn push(&mut self, section: Section, content: impl Into<String>) {
        let content = content.into();
        if !content.trim().is_empty() {
            self.items.push((section, content));
        }
    }

    #[must_use]
    pub fn with(mut self, section: Section, content: impl Into<String>) -> Self {
        self.push(section, content);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Section, String)> {
        self.items.iter()
    }

    /// Plain markdown layout.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.to_markdown_with(MarkdownOptions::default())
    }

    /// Markdown with headings shifted for embedding in documentation.
    #[must_use]
    pub fn to_markdown_docs(&self) -> String {
        self.to_markdown_with(MarkdownOptions {
            documentation: true,
            rich: false,
        })
    }

    /// Markdown tuned for console rendering.
    #[must_use]
    pub fn to_rich_markdown(&self) -> String {
        self.to_markdown_with(MarkdownOptions {
            documentation: false,
            rich: true,
        })
    }

    #[must_use]
    pub fn to_markdown_with(&self, options: MarkdownOptions) -> String {
        let mut parts = Vec::with_capacity(self.items.len());
        for (section, content) in &self.items {
            let mut content = content.clone();
            if section.is_heading() {
                // A heading ending with a colon reads badly once prefixed.
                content = content.trim_end_matches(':').to_string();
            }
            if options.rich && *section == Section::Message {
                content = backtick_exception_name(&content);
            }
            let (prefix, suffix) = section.affixes();
            let prefix = if options.documentation && prefix.starts_with('#') {
                format!("##{prefix}")
            } else {
                prefix.to_string()
            };
            parts.push(format!("{prefix}{content}{suffix}"));
        }
        parts.join("\n\n")
    }
}

/// Wrap the exception name (everything before the first colon) in
/// backticks: `ZeroDivisionError: division by zero` renders the name as
/// inline code.
fn backtick_exception_name(message: &str) -> String {
    match message.split_once(':') {
        Some((name, rest)) => format!("`{name}`:{rest}"),
        None => message.to_string(),
    }
}
