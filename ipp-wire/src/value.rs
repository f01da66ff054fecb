//!
//! IPP value and the wire codec for the eight value kinds
//!
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use encoding_rs::Encoding;
use enum_as_inner::EnumAsInner;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{IppDateTime, IppRange, IppResolution, IppStringWithLanguage};

/// Value codec error
#[derive(Debug, thiserror::Error)]
pub enum IppValueError {
    #[error("Unsupported value tag: {0:#04x}")]
    UnsupportedTag(u8),

    #[error("Invalid value length {len} for tag {tag:#04x}")]
    InvalidLength { tag: u8, len: usize },

    #[error("Value does not match tag {0:#04x}")]
    TagMismatch(u8),
}

/// Wire shape of a value tag. Unassigned codes in the reserved blocks take
/// the shape of their nearest defined neighbor instead of being rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValueKind {
    /// 0x10-0x1f: no-value/unsupported/unknown markers, zero-length
    OutOfBand,
    /// 0x20-0x2f except boolean: big-endian signed 32-bit
    Integer,
    /// 0x22: single 0x00/0x01 byte
    Boolean,
    /// 0x31: 11-byte RFC 2579 block
    DateTime,
    /// 0x32: two integers plus unit byte
    Resolution,
    /// 0x33: two integers, lower then upper
    RangeOfInteger,
    /// 0x34/0x37: collection markers, zero-length value
    Collection,
    /// 0x35/0x36: nested language tag and text
    StringWithLanguage,
    /// 0x30, 0x38-0x3f: raw octets
    OctetString,
    /// 0x41/0x42: decoded with the message charset
    TextString,
    /// 0x40, 0x43-0x5f: 7-bit structural strings
    KeywordString,
}

/// Classify a wire tag into its value shape
pub fn value_kind(tag: u8) -> Option<ValueKind> {
    let kind = match tag {
        0x10..=0x1f => ValueKind::OutOfBand,
        0x22 => ValueKind::Boolean,
        0x20..=0x2f => ValueKind::Integer,
        0x31 => ValueKind::DateTime,
        0x32 => ValueKind::Resolution,
        0x33 => ValueKind::RangeOfInteger,
        0x34 | 0x37 => ValueKind::Collection,
        0x35 | 0x36 => ValueKind::StringWithLanguage,
        0x30 | 0x38..=0x3f => ValueKind::OctetString,
        0x41 | 0x42 => ValueKind::TextString,
        0x40 | 0x43..=0x5f => ValueKind::KeywordString,
        _ => return None,
    };
    Some(kind)
}

/// IPP attribute values as defined in [RFC 8010](https://tools.ietf.org/html/rfc8010),
/// folded into the eight representable kinds. The wire subtype (keyword vs uri,
/// text vs name) travels in the attribute tag, not in the value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum IppValue {
    Integer(i32),
    Boolean(bool),
    String(String),
    DateTime(IppDateTime),
    RangeOfInteger(IppRange),
    Resolution(IppResolution),
    StringWithLanguage(IppStringWithLanguage),
    /// Out-of-band marker. Every instance compares equal to every other.
    NoValue,
}

fn expect_len(tag: u8, data: &Bytes, expected: usize) -> Result<(), IppValueError> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(IppValueError::InvalidLength { tag, len: data.len() })
    }
}

impl IppValue {
    /// Parse value from a byte block which does not include the value length
    /// field. Language-sensitive strings are decoded with `charset`; keyword,
    /// uri and other structural strings always use the 7-bit codec.
    pub fn parse(tag: u8, mut data: Bytes, charset: &'static Encoding) -> Result<IppValue, IppValueError> {
        let kind = value_kind(tag).ok_or(IppValueError::UnsupportedTag(tag))?;

        let value = match kind {
            ValueKind::OutOfBand => {
                expect_len(tag, &data, 0)?;
                IppValue::NoValue
            }
            ValueKind::Boolean => {
                expect_len(tag, &data, 1)?;
                IppValue::Boolean(data.get_u8() != 0)
            }
            ValueKind::Integer => {
                expect_len(tag, &data, 4)?;
                IppValue::Integer(data.get_i32())
            }
            ValueKind::DateTime => {
                expect_len(tag, &data, 11)?;
                IppValue::DateTime(IppDateTime {
                    year: data.get_u16(),
                    month: data.get_u8(),
                    day: data.get_u8(),
                    hour: data.get_u8(),
                    minutes: data.get_u8(),
                    seconds: data.get_u8(),
                    deci_seconds: data.get_u8(),
                    utc_dir: data.get_u8() as char,
                    utc_hours: data.get_u8(),
                    utc_mins: data.get_u8(),
                })
            }
            ValueKind::Resolution => {
                expect_len(tag, &data, 9)?;
                IppValue::Resolution(IppResolution {
                    cross_feed: data.get_i32(),
                    feed: data.get_i32(),
                    units: data.get_i8(),
                })
            }
            ValueKind::RangeOfInteger => {
                expect_len(tag, &data, 8)?;
                IppValue::RangeOfInteger(IppRange {
                    lower: data.get_i32(),
                    upper: data.get_i32(),
                })
            }
            ValueKind::Collection => {
                // begin/end markers carry no data
                expect_len(tag, &data, 0)?;
                IppValue::String(String::new())
            }
            ValueKind::StringWithLanguage => {
                if data.len() < 4 {
                    return Err(IppValueError::InvalidLength { tag, len: data.len() });
                }
                let total = data.len();
                let lang_len = data.get_u16() as usize;
                if data.remaining() < lang_len + 2 {
                    return Err(IppValueError::InvalidLength { tag, len: total });
                }
                let language = String::from_utf8_lossy(&data.split_to(lang_len)).into_owned();
                let text_len = data.get_u16() as usize;
                if data.remaining() != text_len {
                    return Err(IppValueError::InvalidLength { tag, len: total });
                }
                let text = charset.decode(&data).0.into_owned();
                IppValue::StringWithLanguage(IppStringWithLanguage { language, text })
            }
            ValueKind::OctetString | ValueKind::KeywordString => {
                IppValue::String(String::from_utf8_lossy(&data).into_owned())
            }
            ValueKind::TextString => IppValue::String(charset.decode(&data).0.into_owned()),
        };
        Ok(value)
    }

    /// Write value to a byte array, including the leading value length field,
    /// excluding the value tag. The tag selects the string codec only.
    pub fn to_bytes(&self, tag: u8, charset: &'static Encoding) -> Bytes {
        let mut buffer = BytesMut::new();

        match *self {
            IppValue::Integer(i) => {
                buffer.put_u16(4);
                buffer.put_i32(i);
            }
            IppValue::Boolean(b) => {
                buffer.put_u16(1);
                buffer.put_u8(b as u8);
            }
            IppValue::String(ref s) => {
                if value_kind(tag) == Some(ValueKind::TextString) {
                    let encoded = charset.encode(s).0;
                    buffer.put_u16(encoded.len() as u16);
                    buffer.put_slice(&encoded);
                } else {
                    buffer.put_u16(s.len() as u16);
                    buffer.put_slice(s.as_bytes());
                }
            }
            IppValue::DateTime(ref dt) => {
                buffer.put_u16(11);
                buffer.put_u16(dt.year);
                buffer.put_u8(dt.month);
                buffer.put_u8(dt.day);
                buffer.put_u8(dt.hour);
                buffer.put_u8(dt.minutes);
                buffer.put_u8(dt.seconds);
                buffer.put_u8(dt.deci_seconds);
                buffer.put_u8(dt.utc_dir as u8);
                buffer.put_u8(dt.utc_hours);
                buffer.put_u8(dt.utc_mins);
            }
            IppValue::RangeOfInteger(ref range) => {
                buffer.put_u16(8);
                buffer.put_i32(range.lower);
                buffer.put_i32(range.upper);
            }
            IppValue::Resolution(ref res) => {
                buffer.put_u16(9);
                buffer.put_i32(res.cross_feed);
                buffer.put_i32(res.feed);
                buffer.put_u8(res.units as u8);
            }
            IppValue::StringWithLanguage(ref sl) => {
                let text = charset.encode(&sl.text).0;
                buffer.put_u16((4 + sl.language.len() + text.len()) as u16);
                buffer.put_u16(sl.language.len() as u16);
                buffer.put_slice(sl.language.as_bytes());
                buffer.put_u16(text.len() as u16);
                buffer.put_slice(&text);
            }
            IppValue::NoValue => buffer.put_u16(0),
        }
        buffer.freeze()
    }

    /// Check that this value is writable under the given wire tag
    pub fn matches_tag(&self, tag: u8) -> bool {
        let Some(kind) = value_kind(tag) else {
            return false;
        };
        match kind {
            ValueKind::OutOfBand => matches!(self, IppValue::NoValue),
            ValueKind::Integer => matches!(self, IppValue::Integer(_)),
            ValueKind::Boolean => matches!(self, IppValue::Boolean(_)),
            ValueKind::DateTime => matches!(self, IppValue::DateTime(_)),
            ValueKind::Resolution => matches!(self, IppValue::Resolution(_)),
            ValueKind::RangeOfInteger => matches!(self, IppValue::RangeOfInteger(_)),
            ValueKind::StringWithLanguage => matches!(self, IppValue::StringWithLanguage(_)),
            ValueKind::Collection | ValueKind::OctetString | ValueKind::TextString | ValueKind::KeywordString => {
                matches!(self, IppValue::String(_))
            }
        }
    }
}

/// Implement Display trait to print the value
impl fmt::Display for IppValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IppValue::Integer(i) => write!(f, "{i}"),
            IppValue::Boolean(b) => write!(f, "{}", if b { "true" } else { "false" }),
            IppValue::String(ref s) => write!(f, "{s}"),
            IppValue::DateTime(ref dt) => write!(
                f,
                "{}-{}-{},{}:{}:{}.{},{}{}utc",
                dt.year, dt.month, dt.day, dt.hour, dt.minutes, dt.seconds, dt.deci_seconds, dt.utc_dir, dt.utc_hours
            ),
            IppValue::RangeOfInteger(ref range) => write!(f, "{}..{}", range.lower, range.upper),
            IppValue::Resolution(ref res) => write!(
                f,
                "{}x{}{}",
                res.cross_feed,
                res.feed,
                if res.units == IppResolution::DPI { "in" } else { "cm" }
            ),
            IppValue::StringWithLanguage(ref sl) => write!(f, "{} [{}]", sl.text, sl.language),
            IppValue::NoValue => Ok(()),
        }
    }
}
