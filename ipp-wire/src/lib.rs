//!
//! IPP wire codec for Rust: the binary tag-length-value encoding used by the
//! Internet Printing Protocol ([RFC 8010](https://tools.ietf.org/html/rfc8010)).
//! The crate translates between byte streams and a typed attribute model,
//! including nested collections, multi-valued attributes, out-of-band markers
//! and mid-message charset switching. It carries no HTTP transport; pair it
//! with any HTTP client or server and feed the bytes through.
//!
//! Implementation notes:
//! * all RFC IPP value kinds are supported for both de- and serialization;
//!   unassigned tag codes decode with the shape of their nearest neighbor.
//! * an attribute constructed from a value equal to its type's "no value"
//!   sentinel is normalized to the out-of-band form automatically.
//! * requests may carry a trailing document payload; it is buffered by
//!   default and streamed when selected with `with_streamed_payload`.
//! * the `async` feature enables the asynchronous reader and parser.
//!
//! Building a request:
//!
//!```rust
//! use ipp_wire::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut req = IppRequestResponse::new(
//!         IppVersion::v1_1(),
//!         Operation::PrintJob,
//!         Some("ipp://localhost:631/printers/test".parse()?),
//!     );
//!     req.attributes_mut().add(
//!         SectionTag::JobAttributes,
//!         IppAttribute::new(ValueTag::Integer, IppAttribute::COPIES, IppValue::Integer(2)),
//!     );
//!     let _bytes = req.to_bytes()?;
//!     Ok(())
//! }
//!```
//!
//! Parsing a response:
//!
//!```rust
//! use std::io::Cursor;
//!
//! use ipp_wire::{parser::IppParser, prelude::*, reader::IppReader};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = vec![0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03];
//!     let resp = IppParser::new(IppReader::new(Cursor::new(data))).parse_response()?;
//!     assert!(resp.header().status_code().is_success());
//!     Ok(())
//! }
//!```

use bytes::{BufMut, Bytes, BytesMut};
use num_traits::FromPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{IppVersion, StatusCode};

pub mod attribute;
pub mod collection;
pub mod error;
pub mod model;
pub mod parser;
pub mod payload;
pub mod reader;
pub mod request;
pub mod sentinel;
pub mod util;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use http::Uri;
    pub use num_traits::FromPrimitive as _;

    pub use crate::{
        attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
        model::*,
        payload::IppPayload,
        request::IppRequestResponse,
        sentinel::OutOfBandValue,
        value::IppValue,
    };

    pub use super::error::IppError;

    pub use super::IppHeader;
}

/// IPP request and response header
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct IppHeader {
    /// IPP protocol version
    pub version: IppVersion,
    /// Operation tag for requests, status for responses
    pub operation_or_status: u16,
    /// ID of the request
    pub request_id: u32,
}

impl IppHeader {
    /// Create IPP header
    pub fn new(version: IppVersion, operation_or_status: u16, request_id: u32) -> IppHeader {
        IppHeader {
            version,
            operation_or_status,
            request_id,
        }
    }

    /// Write header to a byte array
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();
        buffer.put_u16(self.version.0);
        buffer.put_u16(self.operation_or_status);
        buffer.put_u32(self.request_id);

        buffer.freeze()
    }

    /// Decode and get IPP status code from the header
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.operation_or_status).unwrap_or(StatusCode::UnknownStatusCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_to_bytes() {
        let header = IppHeader::new(IppVersion::v2_1(), 0x1234, 0xaa55_aa55);
        let buf = header.to_bytes();
        assert_eq!(buf, vec![0x02, 0x01, 0x12, 0x34, 0xaa, 0x55, 0xaa, 0x55]);
    }

    #[test]
    fn test_header_status_code() {
        let header = IppHeader::new(IppVersion::v1_1(), 0x0400, 1);
        assert_eq!(header.status_code(), StatusCode::ClientErrorBadRequest);

        let header = IppHeader::new(IppVersion::v1_1(), 0x7777, 1);
        assert_eq!(header.status_code(), StatusCode::UnknownStatusCode);
    }
}
