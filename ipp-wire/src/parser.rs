//!
//! IPP message parser, the read side of the framer
//!
use std::io::{self, Read};

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, trace};

#[cfg(feature = "async")]
use {
    crate::reader::AsyncIppReader,
    futures_util::io::{AsyncRead, AsyncReadExt},
};

use crate::{
    attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
    model::{SectionTag, ValueTag},
    payload::IppPayload,
    reader::IppReader,
    request::IppRequestResponse,
    value::{IppValue, IppValueError},
    FromPrimitive as _, IppHeader,
};

/// Parse error enum
#[derive(Debug, thiserror::Error)]
pub enum IppParseError {
    #[error("Value tag {0:#04x} found before any attribute section")]
    ValueOutsideSection(u8),

    #[error("Zero length attribute name found not in a repeating group")]
    ZeroLengthName,

    #[error("End collection without matching begin collection")]
    UnmatchedEndCollection,

    #[error(transparent)]
    InvalidValue(#[from] IppValueError),

    #[error("Malformed response after {} attribute group(s): {source}", .partial.groups().len())]
    BadResponse {
        partial: Box<IppAttributes>,
        source: Box<IppParseError>,
    },

    #[error(transparent)]
    IoError(#[from] io::Error),
}

struct ParserState {
    attributes: IppAttributes,
    current_group: Option<IppAttributeGroup>,
    last_name: Option<String>,
    collections: Vec<String>,
    fresh_collection: bool,
    charset: &'static Encoding,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            attributes: IppAttributes::new(),
            current_group: None,
            last_name: None,
            collections: Vec::new(),
            fresh_collection: false,
            charset: UTF_8,
        }
    }

    fn section_open(&self) -> bool {
        self.current_group.is_some()
    }

    fn open_section(&mut self, tag: SectionTag) {
        trace!("Section tag: {tag:?}");

        if let Some(group) = self.current_group.take() {
            self.attributes.groups_mut().push(group);
        }
        self.current_group = Some(IppAttributeGroup::new(tag));
        self.last_name = None;
        self.collections.clear();
        self.fresh_collection = false;
    }

    /// Resolve an attribute name per the wire shorthand rules. Member markers
    /// keep their empty name, an end marker takes the name of its matching
    /// begin, names inside a span stay empty for the collection transcoder,
    /// and anything else inherits the previous attribute's name in the run.
    fn resolve_name(&mut self, tag: u8, wire_name: String) -> Result<String, IppParseError> {
        if tag == ValueTag::EndCollection as u8 {
            let popped = self.collections.pop();
            if !wire_name.is_empty() {
                return Ok(wire_name);
            }
            return popped.ok_or(IppParseError::UnmatchedEndCollection);
        }
        if !wire_name.is_empty() {
            return Ok(wire_name);
        }
        if tag == ValueTag::MemberAttrName as u8 {
            return Ok(String::new());
        }
        if !self.collections.is_empty() {
            if self.fresh_collection {
                // the first member of a collection cannot inherit a name
                return Err(IppParseError::ZeroLengthName);
            }
            return Ok(String::new());
        }
        self.last_name.clone().ok_or(IppParseError::ZeroLengthName)
    }

    fn add_attribute(&mut self, tag: u8, wire_name: String, data: Bytes) -> Result<(), IppParseError> {
        let name = self.resolve_name(tag, wire_name)?;
        let value = IppValue::parse(tag, data, self.charset)?;

        trace!("Value tag: {tag:#04x}: {name}: {value}");

        let Some(ref mut group) = self.current_group else {
            return Err(IppParseError::ValueOutsideSection(tag));
        };

        if group.tag() == SectionTag::OperationAttributes && name == IppAttribute::ATTRIBUTES_CHARSET {
            if let IppValue::String(ref label) = value {
                match Encoding::for_label(label.as_bytes()) {
                    Some(encoding) => {
                        debug!("Switching message charset to {}", encoding.name());
                        self.charset = encoding;
                    }
                    None => debug!("Ignoring unknown charset: {label}"),
                }
            }
        }

        if tag == ValueTag::BegCollection as u8 {
            self.collections.push(name.clone());
            self.fresh_collection = true;
        } else {
            self.fresh_collection = false;
        }

        // the continuation shorthand only reaches across root-level attributes
        if self.collections.is_empty() || (tag == ValueTag::BegCollection as u8 && self.collections.len() == 1) {
            self.last_name = Some(name.clone());
        }

        group.attributes_mut().push(IppAttribute::new(tag, name, value));
        Ok(())
    }

    fn finish(mut self) -> IppAttributes {
        if let Some(group) = self.current_group.take() {
            self.attributes.groups_mut().push(group);
        }
        self.attributes
    }
}

#[cfg(feature = "async")]
/// Asynchronous IPP parser
pub struct AsyncIppParser<R> {
    reader: AsyncIppReader<R>,
    state: ParserState,
    stream_payload: bool,
}

#[cfg(feature = "async")]
impl<R> AsyncIppParser<R>
where
    R: 'static + AsyncRead + Send + Sync + Unpin,
{
    /// Create IPP parser from AsyncIppReader
    pub fn new<T>(reader: T) -> AsyncIppParser<R>
    where
        T: Into<AsyncIppReader<R>>,
    {
        AsyncIppParser {
            reader: reader.into(),
            state: ParserState::new(),
            stream_payload: false,
        }
    }

    /// Leave the document payload unread for the caller to stream instead of
    /// buffering it into memory
    pub fn with_streamed_payload(mut self) -> Self {
        self.stream_payload = true;
        self
    }

    async fn parse_value(&mut self, tag: u8) -> Result<(), IppParseError> {
        let name = self.reader.read_name().await?;
        let value = self.reader.read_value().await?;
        self.state.add_attribute(tag, name, value)
    }

    async fn parse_header_attributes(&mut self, request: bool) -> Result<(IppHeader, Option<u8>), IppParseError> {
        let header = self.reader.read_header().await?;
        trace!("IPP header: {header:?}");

        loop {
            let tag = self.reader.read_tag().await?;
            match SectionTag::from_u8(tag) {
                Some(SectionTag::EndOfAttributes) => break,
                Some(section) => self.state.open_section(section),
                None if self.state.section_open() => self.parse_value(tag).await?,
                None if request => {
                    trace!("Document payload starts with {tag:#04x}");
                    return Ok((header, Some(tag)));
                }
                None => return Err(IppParseError::ValueOutsideSection(tag)),
            }
        }

        Ok((header, None))
    }

    /// Parse an IPP request. The trailing document payload is buffered into
    /// memory unless streaming was selected; the byte that ended the attribute
    /// walk is part of the payload.
    pub async fn parse_request(mut self) -> Result<IppRequestResponse, IppParseError> {
        let (header, leading) = self.parse_header_attributes(true).await?;
        let attributes = self.state.finish();

        let payload = if self.stream_payload {
            let inner = self.reader.into_inner();
            match leading {
                Some(byte) => IppPayload::new_async(futures_util::io::Cursor::new(vec![byte]).chain(inner)),
                None => IppPayload::new_async(inner),
            }
        } else {
            let mut data = leading.map(|byte| vec![byte]).unwrap_or_default();
            self.reader.into_inner().read_to_end(&mut data).await?;
            debug!("Buffered {} byte(s) of document payload", data.len());
            if data.is_empty() {
                IppPayload::empty()
            } else {
                IppPayload::buffered(data.into())
            }
        };

        Ok(IppRequestResponse {
            header,
            attributes,
            payload,
        })
    }

    /// Parse an IPP response. Responses carry no document payload; any failure
    /// is reported together with the attribute groups decoded so far.
    pub async fn parse_response(mut self) -> Result<IppRequestResponse, IppParseError> {
        match self.parse_header_attributes(false).await {
            Ok((header, _)) => Ok(IppRequestResponse {
                header,
                attributes: self.state.finish(),
                payload: IppPayload::empty(),
            }),
            Err(source) => Err(IppParseError::BadResponse {
                partial: Box::new(self.state.finish()),
                source: Box::new(source),
            }),
        }
    }
}

/// Synchronous IPP parser
pub struct IppParser<R> {
    reader: IppReader<R>,
    state: ParserState,
    stream_payload: bool,
}

impl<R> IppParser<R>
where
    R: 'static + Read + Send + Sync,
{
    /// Create IPP parser from IppReader
    pub fn new<T>(reader: T) -> IppParser<R>
    where
        T: Into<IppReader<R>>,
    {
        IppParser {
            reader: reader.into(),
            state: ParserState::new(),
            stream_payload: false,
        }
    }

    /// Leave the document payload unread for the caller to stream instead of
    /// buffering it into memory
    pub fn with_streamed_payload(mut self) -> Self {
        self.stream_payload = true;
        self
    }

    fn parse_value(&mut self, tag: u8) -> Result<(), IppParseError> {
        let name = self.reader.read_name()?;
        let value = self.reader.read_value()?;
        self.state.add_attribute(tag, name, value)
    }

    fn parse_header_attributes(&mut self, request: bool) -> Result<(IppHeader, Option<u8>), IppParseError> {
        let header = self.reader.read_header()?;
        trace!("IPP header: {header:?}");

        loop {
            let tag = self.reader.read_tag()?;
            match SectionTag::from_u8(tag) {
                Some(SectionTag::EndOfAttributes) => break,
                Some(section) => self.state.open_section(section),
                None if self.state.section_open() => self.parse_value(tag)?,
                None if request => {
                    trace!("Document payload starts with {tag:#04x}");
                    return Ok((header, Some(tag)));
                }
                None => return Err(IppParseError::ValueOutsideSection(tag)),
            }
        }

        Ok((header, None))
    }

    /// Parse an IPP request. The trailing document payload is buffered into
    /// memory unless streaming was selected; the byte that ended the attribute
    /// walk is part of the payload.
    pub fn parse_request(mut self) -> Result<IppRequestResponse, IppParseError> {
        let (header, leading) = self.parse_header_attributes(true)?;
        let attributes = self.state.finish();

        let payload = if self.stream_payload {
            let inner = self.reader.into_inner();
            match leading {
                Some(byte) => IppPayload::new(io::Cursor::new(vec![byte]).chain(inner)),
                None => IppPayload::new(inner),
            }
        } else {
            let mut data = leading.map(|byte| vec![byte]).unwrap_or_default();
            self.reader.into_inner().read_to_end(&mut data)?;
            debug!("Buffered {} byte(s) of document payload", data.len());
            if data.is_empty() {
                IppPayload::empty()
            } else {
                IppPayload::buffered(data.into())
            }
        };

        Ok(IppRequestResponse {
            header,
            attributes,
            payload,
        })
    }

    /// Parse an IPP response. Responses carry no document payload; any failure
    /// is reported together with the attribute groups decoded so far.
    pub fn parse_response(mut self) -> Result<IppRequestResponse, IppParseError> {
        match self.parse_header_attributes(false) {
            Ok((header, _)) => Ok(IppRequestResponse {
                header,
                attributes: self.state.finish(),
                payload: IppPayload::empty(),
            }),
            Err(source) => Err(IppParseError::BadResponse {
                partial: Box::new(self.state.finish()),
                source: Box::new(source),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{collection, model::IppVersion};

    use super::*;

    #[test]
    fn test_parse_no_attributes() {
        let data = &[1, 1, 0, 0, 0, 0, 0, 0, 3];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();
        assert!(res.attributes().groups().is_empty());
        assert_eq!(res.header().version, IppVersion::v1_1());
    }

    #[test]
    fn test_parse_single_value() {
        let data = &[
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::PrinterAttributes).next().unwrap();
        assert_eq!(group.attributes().len(), 1);
        assert_eq!(group.attributes()[0].name(), "test");
        assert_eq!(group.attributes()[0].value(), &IppValue::Integer(0x1234_5678));
    }

    #[test]
    fn test_parse_name_continuation() {
        let data = &[
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78,
            0x21, 0x00, 0x00, 0x00, 0x04, 0x77, 0x65, 0x43, 0x21, 3,
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::PrinterAttributes).next().unwrap();
        assert_eq!(group.attributes().len(), 2);
        assert!(group.attributes().iter().all(|attr| attr.name() == "test"));

        let values = &group.by_name()["test"];
        assert_eq!(values[0].value(), &IppValue::Integer(0x1234_5678));
        assert_eq!(values[1].value(), &IppValue::Integer(0x7765_4321));
    }

    #[test]
    fn test_parse_collection() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x34, 0, 4, b'c', b'o', b'l', b'l', 0, 0, 0x4a, 0, 0, 0, 4, b'a', b'b', b'c',
            b'd', 0x44, 0, 0, 0, 3, b'k', b'e', b'y', 0x37, 0, 0, 0, 0, 3,
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::PrinterAttributes).next().unwrap();
        let table = group.by_name();

        // the whole span is addressable under the collection name
        let span = &table["coll"];
        assert_eq!(span.len(), 4);
        assert_eq!(span[3].name(), "coll");

        let members = collection::unwrap(span).unwrap();
        assert_eq!(
            members,
            vec![IppAttribute::new(ValueTag::Keyword, "abcd", IppValue::String("key".to_owned()))]
        );
    }

    #[test]
    fn test_parse_multi_valued_collection() {
        // two collection values under one name: the second begin inherits the
        // name from the first end marker
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, // printer attributes
            0x34, 0, 4, b's', b'i', b'z', b'e', 0, 0, // begCollection "size"
            0x4a, 0, 0, 0, 1, b'x', // memberAttrName "x"
            0x21, 0, 0, 0, 4, 0, 0, 0, 1, // integer 1
            0x37, 0, 0, 0, 0, // endCollection
            0x34, 0, 0, 0, 0, // begCollection, continuation name
            0x4a, 0, 0, 0, 1, b'x', // memberAttrName "x"
            0x21, 0, 0, 0, 4, 0, 0, 0, 2, // integer 2
            0x37, 0, 0, 0, 0, // endCollection
            3,
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::PrinterAttributes).next().unwrap();
        let table = group.by_name();
        assert_eq!(table.len(), 1);
        assert_eq!(table["size"].len(), 8);
        assert_eq!(table["size"][4].name(), "size");
    }

    #[test]
    fn test_parse_section_runs() {
        let data = vec![
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04,
            0x12, 0x34, 0x56, 0x78, 0x21, 0x00, 0x05, b't', b'e', b's', b't', b'2', 0x00, 0x04, 0x12, 0x34, 0x56, 0xFF,
            0x04, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x87, 0x65, 0x43, 0x21, 0x03,
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        assert_eq!(res.attributes().groups().len(), 2);
        assert_eq!(res.attributes().groups()[0].attributes().len(), 2);
        assert_eq!(res.attributes().groups()[1].attributes().len(), 1);
    }

    #[test]
    fn test_charset_switch_scope() {
        let mut data = vec![1, 1, 0, 0, 0, 0, 0, 1, 0x01];
        data.extend([0x47, 0, 18]);
        data.extend(b"attributes-charset");
        data.extend([0, 10]);
        data.extend(b"iso-8859-1");
        // textWithoutLanguage follows the switched charset
        data.extend([0x41, 0, 4]);
        data.extend(b"note");
        data.extend([0, 1, 0xe9]);
        // keywords stay on the 7-bit codec
        data.extend([0x44, 0, 4]);
        data.extend(b"side");
        data.extend([0, 3]);
        data.extend(b"two");
        data.push(3);

        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::OperationAttributes).next().unwrap();
        let table = group.by_name();
        assert_eq!(table["note"][0].value(), &IppValue::String("é".to_owned()));
        assert_eq!(table["side"][0].value(), &IppValue::String("two".to_owned()));
    }

    #[test]
    fn test_unknown_charset_ignored() {
        let mut data = vec![1, 1, 0, 0, 0, 0, 0, 1, 0x01];
        data.extend([0x47, 0, 18]);
        data.extend(b"attributes-charset");
        data.extend([0, 8]);
        data.extend(b"x-bogus!");
        data.extend([0x41, 0, 4]);
        data.extend(b"note");
        data.extend([0, 1, 0xe9]);
        data.push(3);

        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_response().unwrap();

        let group = res.attributes().groups_of(SectionTag::OperationAttributes).next().unwrap();
        // the prior charset (utf-8) stays in effect, the stray byte is replaced
        assert_eq!(group.by_name()["note"][0].value(), &IppValue::String("\u{fffd}".to_owned()));
    }

    #[test]
    fn test_request_payload_buffered() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_request().unwrap();

        assert_eq!(res.payload().data().map(|d| d.as_ref()), Some(&b"foo"[..]));
    }

    #[test]
    fn test_request_payload_streamed() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ];
        let mut res = IppParser::new(IppReader::new(io::Cursor::new(data)))
            .with_streamed_payload()
            .parse_request()
            .unwrap();

        assert!(res.payload().data().is_none());

        let mut out = Vec::new();
        io::copy(res.payload_mut(), &mut io::Cursor::new(&mut out)).unwrap();
        assert_eq!(out, b"foo");
    }

    #[test]
    fn test_request_payload_without_end_tag() {
        // an unrecognized byte with no section open starts the payload,
        // stepped back to include that byte
        let data = vec![1, 1, 0, 0, 0, 0, 0, 0, b'f', b'o', b'o'];
        let res = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_request().unwrap();

        assert!(res.attributes().groups().is_empty());
        assert_eq!(res.payload().data().map(|d| d.as_ref()), Some(&b"foo"[..]));
    }

    #[test]
    fn test_response_rejects_leading_garbage() {
        // the same bytes that start a request payload are fatal for a response
        let data = vec![1, 1, 0, 0, 0, 0, 0, 0, b'f', b'o', b'o'];
        let err = IppParser::new(IppReader::new(io::Cursor::new(data)))
            .parse_response()
            .unwrap_err();

        match err {
            IppParseError::BadResponse { partial, source } => {
                assert!(partial.groups().is_empty());
                assert!(matches!(*source, IppParseError::ValueOutsideSection(b'f')));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_response_error_keeps_partial_attributes() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 1, 0x04, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78,
            0x0b, // invalid tag while the printer section is open
        ];
        let err = IppParser::new(IppReader::new(io::Cursor::new(data)))
            .parse_response()
            .unwrap_err();

        match err {
            IppParseError::BadResponse { partial, source } => {
                assert_eq!(partial.groups().len(), 1);
                assert_eq!(partial.groups()[0].attributes()[0].name(), "test");
                assert!(matches!(
                    *source,
                    IppParseError::InvalidValue(IppValueError::UnsupportedTag(0x0b))
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_length_name_without_target() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 1, 0x04, 0x21, 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1, 3,
        ];
        let err = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_request().unwrap_err();
        assert!(matches!(err, IppParseError::ZeroLengthName));
    }

    #[test]
    fn test_zero_length_name_after_beg_collection() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 1, 0x04, // printer attributes
            0x34, 0, 4, b'c', b'o', b'l', b'l', 0, 0, // begCollection
            0x21, 0, 0, 0, 4, 0, 0, 0, 1, // integer with no member marker
            0x37, 0, 0, 0, 0, 3,
        ];
        let err = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_request().unwrap_err();
        assert!(matches!(err, IppParseError::ZeroLengthName));
    }

    #[test]
    fn test_unmatched_end_collection() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 1, 0x04, 0x37, 0, 0, 0, 0, 3,
        ];
        let err = IppParser::new(IppReader::new(io::Cursor::new(data))).parse_request().unwrap_err();
        assert!(matches!(err, IppParseError::UnmatchedEndCollection));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_async_parse_single_value() {
        let data = &[
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ];
        let res = AsyncIppParser::new(AsyncIppReader::new(futures_util::io::Cursor::new(data)))
            .parse_response()
            .await
            .unwrap();

        let group = res.attributes().groups_of(SectionTag::PrinterAttributes).next().unwrap();
        assert_eq!(group.attributes()[0].value(), &IppValue::Integer(0x1234_5678));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_async_request_payload() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ];
        let res = AsyncIppParser::new(AsyncIppReader::new(futures_util::io::Cursor::new(data)))
            .parse_request()
            .await
            .unwrap();
        assert_eq!(res.payload().data().map(|d| d.as_ref()), Some(&b"foo"[..]));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_async_streamed_payload() {
        let data = vec![
            1, 1, 0, 0, 0, 0, 0, 0, 3, b'b', b'a', b'r',
        ];
        let res = AsyncIppParser::new(AsyncIppReader::new(futures_util::io::Cursor::new(data)))
            .with_streamed_payload()
            .parse_request()
            .await
            .unwrap();

        let mut cursor = futures_util::io::Cursor::new(Vec::new());
        futures_executor::block_on(futures_util::io::copy(res.into_payload(), &mut cursor)).unwrap();
        assert_eq!(cursor.into_inner(), b"bar");
    }
}
