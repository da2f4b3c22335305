//! TRF Bridge - test-report conversion for the central repository
//!
//! This crate ingests industrial test-report documents (the sequencer
//! "property dump" XML format and the ATML family across three schema
//! revisions) and converts them into the canonical hierarchical report
//! model in `trf-report`, ready for submission to the test-data repository.

pub mod config;
pub mod convert;
pub mod error;
pub mod submit;

pub use config::ConverterDefaults;
pub use convert::Converter;
pub use error::ConvertError;
pub use submit::{JsonWriter, ReportSink, SubmitError};
pub use trf_report::Report;
