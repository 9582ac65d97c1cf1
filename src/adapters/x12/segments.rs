//! X12 segment tokenizing
//!
//! Delimiters are declared by the fixed-width ISA segment: the element
//! separator is its 4th character, the component separator its 105th and the
//! segment terminator its 106th.

use crate::domain::document::Separators;
use crate::domain::errors::SplitError;

/// Length of a complete ISA segment including its terminator
pub const ISA_LENGTH: usize = 106;

/// One tokenized segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment id (`ISA`, `GS`, `ST`, ...)
    pub id: String,

    /// Elements after the id, raw (padding preserved)
    pub elements: Vec<String>,
}

impl Segment {
    pub fn new(id: impl Into<String>, elements: Vec<String>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }

    /// Element by its 1-based X12 position, trimmed
    pub fn element(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.elements.get(index))
            .map(|value| value.trim())
    }

    /// Non-empty element by position
    pub fn require(&self, position: usize) -> Result<&str, SplitError> {
        match self.element(position) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(SplitError::MissingElement {
                segment: self.id.clone(),
                element: position,
            }),
        }
    }

    /// Renders the segment with its terminator
    pub fn render(&self, separators: &Separators) -> String {
        let mut rendered = self.id.clone();
        for element in &self.elements {
            rendered.push(separators.element);
            rendered.push_str(element);
        }
        rendered.push(separators.segment);
        rendered
    }
}

/// Reads the delimiters from the leading ISA segment
///
/// # Errors
///
/// Returns [`SplitError::MissingInterchangeHeader`] if content does not start
/// with a complete ISA segment.
pub fn read_separators(content: &str) -> Result<Separators, SplitError> {
    let header: Vec<char> = content.trim_start().chars().take(ISA_LENGTH).collect();
    if header.len() < ISA_LENGTH || !header.starts_with(&['I', 'S', 'A']) {
        return Err(SplitError::MissingInterchangeHeader);
    }

    Ok(Separators {
        element: header[3],
        component: header[104],
        segment: header[105],
    })
}

/// Splits content into segments, dropping blank ones and line breaks between them
pub fn tokenize(content: &str, separators: &Separators) -> Vec<Segment> {
    content
        .split(separators.segment)
        .map(|raw| raw.trim_matches(|c: char| c == '\r' || c == '\n'))
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            let mut parts = raw.split(separators.element).map(str::to_string);
            let id = parts.next().unwrap_or_default().trim().to_string();
            Segment::new(id, parts.collect())
        })
        .collect()
}
