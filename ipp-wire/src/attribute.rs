//!
//! Attribute-related structs and the attribute write loop
//!
use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};
use encoding_rs::{Encoding, UTF_8};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    collection,
    model::{SectionTag, ValueTag},
    sentinel,
    value::{IppValue, IppValueError},
};

macro_rules! define_attributes {
    ($($name:ident => $value:literal),* $(,)?) => {
        $(pub const $name: &'static str = $value;)*
    };
}

/// `IppAttribute` represents one (tag, name, value) wire unit. Construction is
/// self-normalizing: a value equal to the sentinel of the requested tag is
/// stored as the out-of-band pair instead.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttribute {
    /// Wire type discriminator
    tag: u8,
    /// Attribute name
    name: String,
    /// Attribute value
    value: IppValue,
}

impl IppAttribute {
    define_attributes! {
        ATTRIBUTES_CHARSET => "attributes-charset",
        ATTRIBUTES_NATURAL_LANGUAGE => "attributes-natural-language",
        CHARSET_CONFIGURED => "charset-configured",
        CHARSET_SUPPORTED => "charset-supported",
        COPIES => "copies",
        COPIES_SUPPORTED => "copies-supported",
        DOCUMENT_FORMAT => "document-format",
        DOCUMENT_FORMAT_SUPPORTED => "document-format-supported",
        JOB_ID => "job-id",
        JOB_NAME => "job-name",
        JOB_STATE => "job-state",
        JOB_STATE_REASONS => "job-state-reasons",
        JOB_URI => "job-uri",
        LAST_DOCUMENT => "last-document",
        MEDIA_COL => "media-col",
        MEDIA_COL_DEFAULT => "media-col-default",
        MEDIA_SIZE => "media-size",
        OPERATIONS_SUPPORTED => "operations-supported",
        PRINTER_NAME => "printer-name",
        PRINTER_RESOLUTION => "printer-resolution",
        PRINTER_STATE => "printer-state",
        PRINTER_STATE_MESSAGE => "printer-state-message",
        PRINTER_STATE_REASONS => "printer-state-reasons",
        PRINTER_URI => "printer-uri",
        REQUESTED_ATTRIBUTES => "requested-attributes",
        REQUESTING_USER_NAME => "requesting-user-name",
        STATUS_MESSAGE => "status-message",
    }

    /// Create new instance of the attribute
    ///
    /// * `tag` - wire value tag<br/>
    /// * `name` - attribute name<br/>
    /// * `value` - attribute value<br/>
    pub fn new<T, S>(tag: T, name: S, value: IppValue) -> IppAttribute
    where
        T: Into<u8>,
        S: AsRef<str>,
    {
        let (tag, value) = sentinel::normalize(tag.into(), value);
        IppAttribute {
            tag,
            name: name.as_ref().to_owned(),
            value,
        }
    }

    /// Return the wire tag
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Return the tag as a defined constant, unless it falls in an unassigned range
    pub fn value_tag(&self) -> Option<ValueTag> {
        use num_traits::FromPrimitive as _;
        ValueTag::from_u8(self.tag)
    }

    /// Return attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return attribute value
    pub fn value(&self) -> &IppValue {
        &self.value
    }

    /// Consume this attribute and return the value
    pub fn into_value(self) -> IppValue {
        self.value
    }

    /// Write a standalone attribute to a byte array: tag byte, length-prefixed
    /// name, then the value block
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();

        buffer.put_u8(self.tag);
        buffer.put_u16(self.name.len() as u16);
        buffer.put_slice(self.name.as_bytes());
        buffer.put(self.value.to_bytes(self.tag, UTF_8));
        buffer.freeze()
    }
}

/// One attribute run: a section tag plus the attributes decoded for a single
/// occurrence of that tag on the wire, in wire order
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttributeGroup {
    tag: SectionTag,
    attributes: Vec<IppAttribute>,
}

impl IppAttributeGroup {
    /// Create new attribute group of a given type
    pub fn new(tag: SectionTag) -> IppAttributeGroup {
        IppAttributeGroup {
            tag,
            attributes: Vec::new(),
        }
    }

    /// Return group type tag
    pub fn tag(&self) -> SectionTag {
        self.tag
    }

    /// Return attributes in wire order
    pub fn attributes(&self) -> &[IppAttribute] {
        &self.attributes
    }

    /// Return mutable attributes
    pub fn attributes_mut(&mut self) -> &mut Vec<IppAttribute> {
        &mut self.attributes
    }

    /// Consume this group and return its attributes
    pub fn into_attributes(self) -> Vec<IppAttribute> {
        self.attributes
    }

    /// Name-keyed view of this run. Every attribute inside a collection span
    /// is filed under the outer collection's name, so a nested collection is
    /// addressable as one array under one key.
    pub fn by_name(&self) -> HashMap<String, Vec<IppAttribute>> {
        collection::group_by_name(&self.attributes)
    }
}

/// Attribute list: every run of every section, in wire order
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IppAttributes {
    groups: Vec<IppAttributeGroup>,
}

impl IppAttributes {
    /// Create attribute list
    pub fn new() -> IppAttributes {
        IppAttributes { ..Default::default() }
    }

    /// Get all groups
    pub fn groups(&self) -> &[IppAttributeGroup] {
        &self.groups
    }

    /// Get all mutable groups
    pub fn groups_mut(&mut self) -> &mut Vec<IppAttributeGroup> {
        &mut self.groups
    }

    /// Consume this attribute list and return all attribute groups
    pub fn into_groups(self) -> Vec<IppAttributeGroup> {
        self.groups
    }

    /// Get a list of attribute groups matching a given section tag
    pub fn groups_of(&self, tag: SectionTag) -> impl Iterator<Item = &IppAttributeGroup> {
        self.groups.iter().filter(move |g| g.tag == tag)
    }

    /// Append an attribute to the last run of the given section, opening a new
    /// run if none exists yet
    pub fn add(&mut self, tag: SectionTag, attribute: IppAttribute) {
        let group = self.groups.iter_mut().rev().find(|g| g.tag() == tag);
        if let Some(group) = group {
            group.attributes_mut().push(attribute);
        } else {
            let mut new_group = IppAttributeGroup::new(tag);
            new_group.attributes_mut().push(attribute);
            self.groups.push(new_group);
        }
    }

    /// The charset used for writing language-sensitive strings: whatever
    /// `attributes-charset` says in the first operation run, utf-8 otherwise
    fn write_charset(&self) -> &'static Encoding {
        self.groups_of(SectionTag::OperationAttributes)
            .flat_map(|group| group.attributes())
            .find(|attr| attr.name() == IppAttribute::ATTRIBUTES_CHARSET)
            .and_then(|attr| attr.value().as_string())
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8)
    }

    /// Write attribute list to a byte array: each non-empty run behind its
    /// section tag, closed by the end-of-attributes tag. Consecutive attributes
    /// with an identical name and every attribute inside a collection span are
    /// written with a zero-length name.
    pub fn to_bytes(&self) -> Result<Bytes, IppValueError> {
        let mut buffer = BytesMut::new();
        let charset = self.write_charset();

        for group in self.groups().iter().filter(|group| !group.attributes().is_empty()) {
            buffer.put_u8(group.tag() as u8);

            let mut prev_name: Option<&str> = None;
            let mut depth = 0usize;

            for attr in group.attributes() {
                if !attr.value().matches_tag(attr.tag()) {
                    return Err(IppValueError::TagMismatch(attr.tag()));
                }

                let suppress = depth > 0 || prev_name == Some(attr.name());

                buffer.put_u8(attr.tag());
                if suppress {
                    buffer.put_u16(0);
                } else {
                    buffer.put_u16(attr.name().len() as u16);
                    buffer.put_slice(attr.name().as_bytes());
                }
                buffer.put(attr.value().to_bytes(attr.tag(), charset));

                if attr.tag() == ValueTag::BegCollection as u8 {
                    depth += 1;
                } else if attr.tag() == ValueTag::EndCollection as u8 {
                    depth = depth.saturating_sub(1);
                }
                if depth == 0 {
                    prev_name = Some(attr.name());
                }
            }
        }
        buffer.put_u8(SectionTag::EndOfAttributes as u8);

        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::IppRange;

    use super::*;

    #[test]
    fn test_attribute_to_bytes() {
        let attr = IppAttribute::new(ValueTag::Integer, IppAttribute::JOB_ID, IppValue::Integer(5));
        assert_eq!(
            attr.to_bytes().as_ref(),
            &[0x21, 0x00, 0x06, b'j', b'o', b'b', b'-', b'i', b'd', 0x00, 0x04, 0, 0, 0, 5]
        );
    }

    #[test]
    fn test_attribute_normalizes_sentinel() {
        let attr = IppAttribute::new(ValueTag::Integer, "copies", IppValue::Integer(i32::MIN));
        assert_eq!(attr.tag(), ValueTag::NoValue as u8);
        assert_eq!(attr.value(), &IppValue::NoValue);

        let attr = IppAttribute::new(
            ValueTag::RangeOfInteger,
            "copies-supported",
            IppValue::RangeOfInteger(IppRange::default()),
        );
        assert_eq!(attr.value_tag(), Some(ValueTag::NoValue));
    }

    #[test]
    fn test_continuation_shorthand() {
        let mut attributes = IppAttributes::new();
        attributes.add(
            SectionTag::PrinterAttributes,
            IppAttribute::new(ValueTag::Integer, "list", IppValue::Integer(0x1111_1111)),
        );
        attributes.add(
            SectionTag::PrinterAttributes,
            IppAttribute::new(ValueTag::Integer, "list", IppValue::Integer(0x2222_2222)),
        );

        let buf = attributes.to_bytes().unwrap();
        assert_eq!(
            buf.as_ref(),
            &[
                0x04, 0x21, 0, 4, b'l', b'i', b's', b't', 0, 4, 0x11, 0x11, 0x11, 0x11, 0x21, 0, 0, 0, 4, 0x22, 0x22,
                0x22, 0x22, 0x03,
            ],
        );
    }

    #[test]
    fn test_collection_names_suppressed_on_wire() {
        let members = vec![
            IppAttribute::new(ValueTag::Integer, "x-dimension", IppValue::Integer(21000)),
            IppAttribute::new(ValueTag::Integer, "y-dimension", IppValue::Integer(29700)),
        ];
        let wrapped = collection::wrap(IppAttribute::MEDIA_SIZE, &members).unwrap();

        let mut attributes = IppAttributes::new();
        for attr in wrapped {
            attributes.add(SectionTag::JobAttributes, attr);
        }

        let buf = attributes.to_bytes().unwrap();
        assert_eq!(
            buf.as_ref(),
            &[
                0x02, // job attributes
                0x34, 0, 10, b'm', b'e', b'd', b'i', b'a', b'-', b's', b'i', b'z', b'e', 0, 0, // begCollection
                0x4a, 0, 0, 0, 11, b'x', b'-', b'd', b'i', b'm', b'e', b'n', b's', b'i', b'o', b'n', // member name
                0x21, 0, 0, 0, 4, 0x00, 0x00, 0x52, 0x08, // 21000
                0x4a, 0, 0, 0, 11, b'y', b'-', b'd', b'i', b'm', b'e', b'n', b's', b'i', b'o', b'n', // member name
                0x21, 0, 0, 0, 4, 0x00, 0x00, 0x74, 0x04, // 29700
                0x37, 0, 0, 0, 0, // endCollection
                0x03, // end of attributes
            ],
        );
    }

    #[test]
    fn test_tag_mismatch_rejected() {
        let mut attributes = IppAttributes::new();
        attributes.add(
            SectionTag::OperationAttributes,
            IppAttribute {
                tag: ValueTag::Integer as u8,
                name: "broken".to_owned(),
                value: IppValue::String("not an integer".to_owned()),
            },
        );
        assert!(matches!(attributes.to_bytes(), Err(IppValueError::TagMismatch(0x21))));
    }

    #[test]
    fn test_groups_are_runs() {
        let mut attributes = IppAttributes::new();
        attributes.add(
            SectionTag::JobAttributes,
            IppAttribute::new(ValueTag::Integer, IppAttribute::JOB_ID, IppValue::Integer(1)),
        );
        attributes.add(
            SectionTag::JobAttributes,
            IppAttribute::new(ValueTag::Integer, IppAttribute::JOB_ID, IppValue::Integer(2)),
        );
        let group = attributes.groups_of(SectionTag::JobAttributes).next().unwrap();
        assert_eq!(group.attributes().len(), 2);
        assert_eq!(group.by_name()[IppAttribute::JOB_ID].len(), 2);
    }
}
