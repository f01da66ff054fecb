//!
//! IPP error
//!
use std::io;

use http::uri::InvalidUri;

use crate::{collection::IppCollectionError, model::StatusCode, parser::IppParseError, value::IppValueError};

/// IPP error
#[derive(Debug, thiserror::Error)]
pub enum IppError {
    #[error(transparent)]
    /// Network or file I/O error
    IoError(#[from] io::Error),

    #[error("IPP status error: {0}")]
    /// IPP status error
    StatusError(StatusCode),

    #[error(transparent)]
    /// Parsing error
    ParseError(#[from] IppParseError),

    #[error(transparent)]
    /// Attribute encoding error
    EncodeError(#[from] IppValueError),

    #[error(transparent)]
    /// Collection structure error
    CollectionError(#[from] IppCollectionError),

    #[error("Missing attribute in response")]
    /// Missing attribute in response
    MissingAttribute,

    #[error("Invalid attribute type")]
    /// Invalid attribute type
    InvalidAttributeType,

    #[error(transparent)]
    /// Invalid URI
    InvalidUri(#[from] InvalidUri),
}
