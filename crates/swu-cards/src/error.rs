//! Error and failure handling types

use thiserror::Error;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use url::ParseError;

/// A `Result` alias where the `Err` case is `swu-cards::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The Errors that may occur in the swu-cards crate APIs.
///
/// Everything here is fatal for a scrape or download run: the importer does
/// not recover from structural surprises, since a partial catalog would
/// silently under-represent the card pool.
#[derive(Error, Debug)]
pub enum Error {
    /// An upstream label with no mapping to a known enum member. A new
    /// upstream category needs a manual review, not a silent default.
    #[error("unrecognized {enum_name} value {label:?}")]
    UnknownEnumValue {
        enum_name: &'static str,
        label: String,
    },

    /// None of the preferred image format keys are present in an art block.
    #[error("no usable art format, upstream offers {available:?}")]
    UnknownArtFormat { available: Vec<String> },

    #[error("missing required field {0}")]
    MissingRequiredField(&'static str),

    #[error("request for {url} failed: {reason}")]
    TransportFailure { url: String, reason: String },

    /// The file handed to the download stage is not a flat card array.
    #[error("input is not a card list: {0}")]
    MalformedInput(#[source] SerdeJsonError),

    #[error("duplicate card {set}-{number}")]
    DuplicateCard { set: String, number: u32 },

    // Passthroughs from other libraries
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    ReqwestError(#[from] ReqwestError),
    #[error(transparent)]
    SerdeJsonError(#[from] SerdeJsonError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
