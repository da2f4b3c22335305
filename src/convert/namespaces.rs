//! ATML schema-revision namespace resolution
//!
//! Each supported revision fixes the full tuple of companion namespace URIs
//! the builder needs for qualified-name lookups. The root namespace of the
//! document picks the revision; anything else is a hard failure.

use crate::error::ConvertError;

/// Revision names quoted in the unsupported-namespace error.
pub const SUPPORTED_REVISIONS: &str = "2.02, 5.0, 6.01";

/// Companion namespace URIs for one ATML schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtmlNamespaces {
    /// TestResultsCollection container namespace; `None` when the revision
    /// has no collection container and the root element is TestResults
    pub collection: Option<&'static str>,
    pub results: &'static str,
    pub teststand: &'static str,
    pub common: &'static str,
    pub schema_instance: &'static str,
}

const SCHEMA_INSTANCE: &str = "http://www.w3.org/2001/XMLSchema-instance";

const ATML_2007: AtmlNamespaces = AtmlNamespaces {
    collection: None,
    results: "http://www.ieee.org/ATML/2007/TestResults",
    teststand: "www.ni.com/TestStand/ATMLTestResults/1.0",
    common: "http://www.ieee.org/ATML/2006/Common",
    schema_instance: SCHEMA_INSTANCE,
};

const ATML_2011: AtmlNamespaces = AtmlNamespaces {
    collection: Some("urn:IEEE-1636.1:2011:01:TestResultsCollection"),
    results: "urn:IEEE-1636.1:2011:01:TestResults",
    teststand: "www.ni.com/TestStand/ATMLTestResults/2.0",
    common: "urn:IEEE-1671:2010:Common",
    schema_instance: SCHEMA_INSTANCE,
};

const ATML_2013: AtmlNamespaces = AtmlNamespaces {
    collection: Some("urn:IEEE-1636.1:2013:TestResultsCollection"),
    results: "urn:IEEE-1636.1:2013:TestResults",
    teststand: "www.ni.com/TestStand/ATMLTestResults/3.0",
    common: "urn:IEEE-1671:2010:Common",
    schema_instance: SCHEMA_INSTANCE,
};

impl AtmlNamespaces {
    /// Resolve the companion namespaces for a document's root namespace URI.
    pub fn resolve(root_namespace: &str) -> Result<Self, ConvertError> {
        match root_namespace {
            "http://www.ieee.org/ATML/2007/TestResults" => Ok(ATML_2007),
            "urn:IEEE-1636.1:2011:01:TestResultsCollection" => Ok(ATML_2011),
            "urn:IEEE-1636.1:2013:TestResultsCollection" => Ok(ATML_2013),
            other => Err(ConvertError::UnsupportedNamespace {
                found: other.to_string(),
            }),
        }
    }
}
