//! Recoverable schema drift.
//!
//! Unknown child elements, unknown attributes and stray text do not stop
//! ingestion. The constructor that met them records a [`Diagnostic`] and
//! carries on with the rest of the node.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownElement(String),
    UnknownAttribute(String),
    UnexpectedText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Model type that did not recognize the construct.
    pub owner: &'static str,
    /// Element being parsed when it happened.
    pub element: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownElement(child) => write!(
                f,
                "{}: element <{}> has unrecognized child <{}>",
                self.owner, self.element, child
            ),
            DiagnosticKind::UnknownAttribute(attr) => write!(
                f,
                "{}: element <{}> has unrecognized attribute `{}`",
                self.owner, self.element, attr
            ),
            DiagnosticKind::UnexpectedText(text) => write!(
                f,
                "{}: element <{}> has unexpected text {:?}",
                self.owner, self.element, text
            ),
        }
    }
}

/// Collector threaded through every model constructor.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unknown_element(&mut self, owner: &'static str, element: &str, child: &str) {
        tracing::warn!(owner, element, child, "unrecognized element");
        self.push(owner, element, DiagnosticKind::UnknownElement(child.to_string()));
    }

    pub fn unknown_attribute(&mut self, owner: &'static str, element: &str, attribute: &str) {
        tracing::warn!(owner, element, attribute, "unrecognized attribute");
        self.push(
            owner,
            element,
            DiagnosticKind::UnknownAttribute(attribute.to_string()),
        );
    }

    pub fn unexpected_text(&mut self, owner: &'static str, element: &str, text: &str) {
        tracing::warn!(owner, element, text, "unexpected text");
        self.push(owner, element, DiagnosticKind::UnexpectedText(text.to_string()));
    }

    fn push(&mut self, owner: &'static str, element: &str, kind: DiagnosticKind) {
        self.entries.push(Diagnostic {
            owner,
            element: element.to_string(),
            kind,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
