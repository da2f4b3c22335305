//! Conversion error taxonomy
//!
//! Only structurally fatal conditions surface here. Missing fields and
//! unparseable numeric tokens are resolved locally with defaults and are
//! logged, never raised.

use crate::convert::namespaces::SUPPORTED_REVISIONS;

/// Fatal conversion failure. No partial report is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Neither a sequencer-dump report element nor an ATML namespace was
    /// found anywhere in the document.
    #[error("TSReport or Report element was not found in the document")]
    ReportElementNotFound,

    /// The ATML root namespace is not one of the supported schema revisions.
    #[error("unsupported ATML namespace `{found}`; supported revisions: {SUPPORTED_REVISIONS}")]
    UnsupportedNamespace { found: String },

    /// The document is not well-formed XML at all.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The input stream could not be read.
    #[error("input could not be read: {0}")]
    Io(#[from] std::io::Error),
}
