//!
//! IPP request/response message
//!
use std::io::{self, Read};

use bytes::{BufMut, Bytes, BytesMut};
#[cfg(feature = "async")]
use futures_util::io::{AsyncRead, AsyncReadExt};
use http::Uri;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    attribute::{IppAttribute, IppAttributes},
    model::{IppVersion, Operation, SectionTag, StatusCode, ValueTag},
    payload::IppPayload,
    value::{IppValue, IppValueError},
    IppHeader,
};

/// IPP request/response struct
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IppRequestResponse {
    pub(crate) header: IppHeader,
    pub(crate) attributes: IppAttributes,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) payload: IppPayload,
}

impl IppRequestResponse {
    /// Create new IPP request for the operation and uri
    pub fn new(version: IppVersion, operation: Operation, uri: Option<Uri>) -> IppRequestResponse {
        let header = IppHeader::new(version, operation as u16, 1);
        let mut attributes = IppAttributes::new();

        attributes.add(
            SectionTag::OperationAttributes,
            IppAttribute::new(
                ValueTag::Charset,
                IppAttribute::ATTRIBUTES_CHARSET,
                IppValue::String("utf-8".to_string()),
            ),
        );

        attributes.add(
            SectionTag::OperationAttributes,
            IppAttribute::new(
                ValueTag::NaturalLanguage,
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                IppValue::String("en".to_string()),
            ),
        );

        if let Some(uri) = uri {
            attributes.add(
                SectionTag::OperationAttributes,
                IppAttribute::new(
                    ValueTag::Uri,
                    IppAttribute::PRINTER_URI,
                    IppValue::String(crate::util::canonicalize_uri(&uri).to_string()),
                ),
            );
        }

        IppRequestResponse {
            header,
            attributes,
            payload: IppPayload::empty(),
        }
    }

    /// Create response from status and id
    pub fn new_response(version: IppVersion, status: StatusCode, id: u32) -> IppRequestResponse {
        let header = IppHeader::new(version, status as u16, id);
        let mut response = IppRequestResponse {
            header,
            attributes: IppAttributes::new(),
            payload: IppPayload::empty(),
        };

        response.attributes_mut().add(
            SectionTag::OperationAttributes,
            IppAttribute::new(
                ValueTag::Charset,
                IppAttribute::ATTRIBUTES_CHARSET,
                IppValue::String("utf-8".to_string()),
            ),
        );
        response.attributes_mut().add(
            SectionTag::OperationAttributes,
            IppAttribute::new(
                ValueTag::NaturalLanguage,
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                IppValue::String("en".to_string()),
            ),
        );

        response
    }

    /// Get IPP header
    pub fn header(&self) -> &IppHeader {
        &self.header
    }

    /// Get mutable IPP header
    pub fn header_mut(&mut self) -> &mut IppHeader {
        &mut self.header
    }

    /// Get attributes
    pub fn attributes(&self) -> &IppAttributes {
        &self.attributes
    }

    /// Get mutable attributes
    pub fn attributes_mut(&mut self) -> &mut IppAttributes {
        &mut self.attributes
    }

    /// Get payload
    pub fn payload(&self) -> &IppPayload {
        &self.payload
    }

    /// Get mutable payload
    pub fn payload_mut(&mut self) -> &mut IppPayload {
        &mut self.payload
    }

    /// Consume request/response and return the payload
    pub fn into_payload(self) -> IppPayload {
        self.payload
    }

    /// Write the message to a byte array, not including the payload
    pub fn to_bytes(&self) -> Result<Bytes, IppValueError> {
        let mut buffer = BytesMut::new();
        buffer.put(self.header.to_bytes());
        buffer.put(self.attributes.to_bytes()?);
        Ok(buffer.freeze())
    }

    #[cfg(feature = "async")]
    /// Convert request/response into AsyncRead including payload
    pub fn into_async_read(self) -> Result<impl AsyncRead + Send + Sync + 'static, IppValueError> {
        let data = self.to_bytes()?;
        debug!("IPP message size: {}", data.len());

        Ok(futures_util::io::Cursor::new(data).chain(self.payload))
    }

    /// Convert request/response into Read including payload
    pub fn into_read(self) -> Result<impl Read + Send + Sync + 'static, IppValueError> {
        let data = self.to_bytes()?;
        debug!("IPP message size: {}", data.len());

        Ok(io::Cursor::new(data).chain(self.payload))
    }
}
