//!
//! Out-of-band sentinel handling
//!
//! Every representable value kind owns a canonical "no value" stand-in. An
//! attribute constructed with a value equal to its tag's sentinel is rewritten
//! to the `noValue` tag, and decoding an out-of-band tag into a typed
//! destination yields the destination's sentinel. Centralizing the rewrite in
//! [`normalize`] keeps every construction path consistent.
//!
use crate::{
    model::{IppDateTime, IppRange, IppResolution, IppStringWithLanguage, ValueTag},
    value::{value_kind, IppValue, ValueKind},
};

/// Stand-in carried by text, name and octet strings when the wire had no value.
/// Keyword-family strings use the empty string instead.
pub const NO_VALUE_STRING: &str = "no-value";

/// True for the out-of-band tag block (no-value, unsupported, unknown and the
/// unassigned codes around them)
pub fn is_out_of_band(tag: u8) -> bool {
    matches!(value_kind(tag), Some(ValueKind::OutOfBand))
}

fn is_structural(tag: u8) -> bool {
    tag == ValueTag::BegCollection as u8 || tag == ValueTag::EndCollection as u8 || tag == ValueTag::MemberAttrName as u8
}

/// The sentinel for the value kind addressed by `tag`, if that kind has one.
/// Booleans and the structural/out-of-band tags have none.
pub fn no_value_sentinel(tag: u8) -> Option<IppValue> {
    if is_structural(tag) {
        return None;
    }
    let value = match value_kind(tag)? {
        ValueKind::OutOfBand | ValueKind::Boolean | ValueKind::Collection => return None,
        ValueKind::Integer => IppValue::Integer(i32::MIN),
        ValueKind::DateTime => IppValue::DateTime(IppDateTime::default()),
        ValueKind::Resolution => IppValue::Resolution(IppResolution::default()),
        ValueKind::RangeOfInteger => IppValue::RangeOfInteger(IppRange::default()),
        ValueKind::StringWithLanguage => IppValue::StringWithLanguage(IppStringWithLanguage::default()),
        ValueKind::KeywordString => IppValue::String(String::new()),
        ValueKind::OctetString | ValueKind::TextString => IppValue::String(NO_VALUE_STRING.to_owned()),
    };
    Some(value)
}

/// The single attribute construction factory: a value equal to the sentinel of
/// its requested tag is downgraded to the out-of-band pair, so callers cannot
/// encode a sentinel under a real tag.
pub(crate) fn normalize(tag: u8, value: IppValue) -> (u8, IppValue) {
    match no_value_sentinel(tag) {
        Some(ref sentinel) if *sentinel == value => (ValueTag::NoValue as u8, IppValue::NoValue),
        _ => (tag, value),
    }
}

/// Conversion from a decoded [`IppValue`] into a typed destination,
/// substituting the destination's sentinel for out-of-band wire values.
///
/// Enumeration destinations read through their storage type: a 32-bit backed
/// enumeration converts via `i32` and checks `from_i32`, a 16-bit backed one
/// via `i16`. The sentinel is the storage minimum, which never maps to a
/// defined member.
pub trait OutOfBandValue: Sized {
    /// The in-memory stand-in for an out-of-band wire value
    fn no_value() -> Self;

    /// Convert a decoded value, substituting the sentinel for `NoValue`.
    /// Returns `None` when the value kind does not fit the destination.
    fn from_ipp(value: &IppValue) -> Option<Self>;
}

impl OutOfBandValue for i32 {
    fn no_value() -> Self {
        i32::MIN
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::Integer(i) => Some(*i),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for i16 {
    fn no_value() -> Self {
        i16::MIN
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::Integer(i) => i16::try_from(*i).ok(),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for String {
    fn no_value() -> Self {
        NO_VALUE_STRING.to_owned()
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::String(s) => Some(s.clone()),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for IppDateTime {
    fn no_value() -> Self {
        IppDateTime::default()
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::DateTime(dt) => Some(*dt),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for IppRange {
    fn no_value() -> Self {
        IppRange::default()
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::RangeOfInteger(range) => Some(*range),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for IppResolution {
    fn no_value() -> Self {
        IppResolution::default()
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::Resolution(res) => Some(*res),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

impl OutOfBandValue for IppStringWithLanguage {
    fn no_value() -> Self {
        IppStringWithLanguage::default()
    }

    fn from_ipp(value: &IppValue) -> Option<Self> {
        match value {
            IppValue::StringWithLanguage(sl) => Some(sl.clone()),
            IppValue::NoValue => Some(Self::no_value()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive as _;

    use crate::model::PrinterState;

    use super::*;

    #[test]
    fn test_sentinel_downgrade() {
        let (tag, value) = normalize(ValueTag::Integer as u8, IppValue::Integer(i32::MIN));
        assert_eq!(tag, ValueTag::NoValue as u8);
        assert_eq!(value, IppValue::NoValue);

        let (tag, value) = normalize(ValueTag::Keyword as u8, IppValue::String(String::new()));
        assert_eq!(tag, ValueTag::NoValue as u8);
        assert_eq!(value, IppValue::NoValue);

        let (tag, value) = normalize(
            ValueTag::TextWithoutLanguage as u8,
            IppValue::String(NO_VALUE_STRING.to_owned()),
        );
        assert_eq!(tag, ValueTag::NoValue as u8);
        assert_eq!(value, IppValue::NoValue);

        let (tag, value) = normalize(
            ValueTag::RangeOfInteger as u8,
            IppValue::RangeOfInteger(IppRange::default()),
        );
        assert_eq!(tag, ValueTag::NoValue as u8);
        assert_eq!(value, IppValue::NoValue);
    }

    #[test]
    fn test_real_values_unchanged() {
        let (tag, value) = normalize(ValueTag::Integer as u8, IppValue::Integer(5));
        assert_eq!(tag, ValueTag::Integer as u8);
        assert_eq!(value, IppValue::Integer(5));

        // empty text is a legal value, only the marker string downgrades
        let (tag, value) = normalize(ValueTag::TextWithoutLanguage as u8, IppValue::String(String::new()));
        assert_eq!(tag, ValueTag::TextWithoutLanguage as u8);
        assert_eq!(value, IppValue::String(String::new()));
    }

    #[test]
    fn test_structural_tags_exempt() {
        // an empty member name marker is a multi-value continuation, never a sentinel
        let (tag, value) = normalize(ValueTag::MemberAttrName as u8, IppValue::String(String::new()));
        assert_eq!(tag, ValueTag::MemberAttrName as u8);
        assert_eq!(value, IppValue::String(String::new()));

        let (tag, _) = normalize(ValueTag::BegCollection as u8, IppValue::String(String::new()));
        assert_eq!(tag, ValueTag::BegCollection as u8);
        let (tag, _) = normalize(ValueTag::EndCollection as u8, IppValue::String(String::new()));
        assert_eq!(tag, ValueTag::EndCollection as u8);
    }

    #[test]
    fn test_out_of_band_decodes_to_sentinel() {
        assert_eq!(i32::from_ipp(&IppValue::NoValue), Some(i32::MIN));
        assert_eq!(i16::from_ipp(&IppValue::NoValue), Some(i16::MIN));
        assert_eq!(String::from_ipp(&IppValue::NoValue), Some(NO_VALUE_STRING.to_owned()));
        assert_eq!(IppRange::from_ipp(&IppValue::NoValue), Some(IppRange::default()));

        // the enumeration sentinel is distinguishable from every defined member
        let state = i32::from_ipp(&IppValue::NoValue).unwrap();
        assert!(PrinterState::from_i32(state).is_none());
        assert!(PrinterState::from_i32(3).is_some());
    }

    #[test]
    fn test_typed_reads_pass_through() {
        assert_eq!(i32::from_ipp(&IppValue::Integer(42)), Some(42));
        assert_eq!(i32::from_ipp(&IppValue::Boolean(true)), None);
        assert_eq!(String::from_ipp(&IppValue::String("idle".to_owned())), Some("idle".to_owned()));
    }
}
