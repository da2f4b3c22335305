//! Document conversion facade
//!
//! Reads the whole input once, sanitizes a known producer defect, parses the
//! XML, detects the document family and hands off to the matching builder.

mod atml;
mod dump;
pub(crate) mod namespaces;
mod prop_tree;
mod teststand;
mod value;

pub use atml::AtmlBuilder;
pub use dump::DumpIndex;
pub use namespaces::AtmlNamespaces;
pub use prop_tree::PropView;
pub use teststand::TestStandBuilder;

use std::io::Read;

use regex_lite::Regex;
use roxmltree::Document;
use tracing::debug;
use trf_report::Report;

use crate::config::ConverterDefaults;
use crate::error::ConvertError;

/// Converts source documents into canonical reports. Holds only the
/// immutable default table, so one converter can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    defaults: ConverterDefaults,
}

impl Converter {
    pub fn new(defaults: ConverterDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ConverterDefaults {
        &self.defaults
    }

    /// Convert a document given as raw bytes. Undecodable bytes are
    /// replaced, and the invalid `<?xml:stylesheet ...?>` instruction some
    /// producers emit is stripped before parsing.
    pub fn convert(&self, bytes: &[u8]) -> Result<Report, ConvertError> {
        let text = String::from_utf8_lossy(bytes);
        let text = sanitize(&text);
        let doc = Document::parse(&text)?;

        // Dump-family documents carry an unqualified TSReport/Report element
        // somewhere in the tree; everything else is judged by its root
        // namespace.
        if let Some(report_element) = doc.descendants().find(|n| {
            n.is_element()
                && n.tag_name().namespace().is_none()
                && matches!(n.tag_name().name(), "TSReport" | "Report")
        }) {
            debug!("detected sequencer-dump document");
            return Ok(TestStandBuilder::new(&self.defaults).build(report_element));
        }

        if doc.root_element().tag_name().namespace().is_some() {
            debug!("detected ATML document");
            return AtmlBuilder::new(&self.defaults).build(&doc);
        }

        Err(ConvertError::ReportElementNotFound)
    }

    /// Convert from a readable source; the stream is drained fully before
    /// parsing starts.
    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<Report, ConvertError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.convert(&bytes)
    }
}

/// Strip the invalid stylesheet processing instruction a known producer
/// writes; it is not well-formed XML and breaks parsing.
fn sanitize(text: &str) -> String {
    let re = Regex::new(r"<\?xml:stylesheet.*\?>").unwrap();
    re.replace_all(text, "").into_owned()
}
