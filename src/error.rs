use thiserror::Error;

pub(crate) const NO_ROOT_ELEMENT: &str = "no root element found";
pub(crate) const UNCLOSED_ELEMENT: &str = "element is not closed";
pub(crate) const EXTRA_ROOT_ELEMENT: &str = "extra content at the end of the document";
pub(crate) const TEXT_OUTSIDE_ROOT: &str = "text content outside of the root element";
pub(crate) const MISPLACED_DECLARATION: &str =
    "XML declaration allowed only at the start of the document";

/// Result type with the crate error as default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned while reading a BPMN document.
///
/// Only the parse boundary can fail. Statistics and suggestions are computed
/// from an already validated [`Document`](crate::Document) and never error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input is not well-formed XML.
    #[error("Invalid XML: {message} (at byte {position})")]
    MalformedInput { message: String, position: u64 },

    /// Well-formed XML without a `definitions` or `process` element in the BPMN model namespace.
    #[error(
        "Not a valid BPMN 2.0 XML document: missing <definitions> or <process> in BPMN namespace"
    )]
    NotBpmn,

    /// Nothing to analyze. Checked before parsing.
    #[error("Empty BPMN XML provided")]
    EmptyInput,
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>, position: u64) -> Self {
        Self::MalformedInput {
            message: message.into(),
            position,
        }
    }

    /// `true` for malformed XML and for XML that is not a BPMN document.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Self::MalformedInput { .. } | Self::NotBpmn)
    }
}
