//!
//! Collection transcoder
//!
//! Converts between the linear wire form of a collection (a
//! `begCollection` .. `endCollection` span with `memberAttrName` markers) and
//! a flat member list whose attributes carry their resolved names. Nesting is
//! tracked with explicit stack frames rather than recursion, so arbitrarily
//! deep collections walk in constant stack space.
//!
use std::collections::HashMap;

use crate::{attribute::IppAttribute, model::ValueTag, value::IppValue};

/// Collection structure error
#[derive(Debug, thiserror::Error)]
pub enum IppCollectionError {
    #[error("Collection does not start with a begin-collection attribute")]
    MissingBegCollection,

    #[error("End-collection found at root level")]
    EndCollectionAtRoot,

    #[error("Attribute without name found")]
    AttributeWithoutName,

    #[error("Dangling member attribute name")]
    DanglingMemberName,

    #[error("Member value continuation without an established name")]
    MissingMemberName,

    #[error("Unclosed nested collection")]
    UnclosedCollection,
}

const BEG: u8 = ValueTag::BegCollection as u8;
const END: u8 = ValueTag::EndCollection as u8;
const MEMBER: u8 = ValueTag::MemberAttrName as u8;

/// Group one attribute run into a name-keyed table. While a collection span is
/// open, every attribute (the begin/end markers included) is filed under the
/// outer collection's name; outside of any span an attribute is filed under
/// its own name. Per-name wire order is preserved.
pub fn group_by_name(attributes: &[IppAttribute]) -> HashMap<String, Vec<IppAttribute>> {
    let mut table: HashMap<String, Vec<IppAttribute>> = HashMap::new();
    let mut depth = 0usize;
    let mut active: Option<String> = None;

    for attr in attributes {
        if depth == 0 && attr.tag() == BEG {
            active = Some(attr.name().to_owned());
        }
        let key = active.clone().unwrap_or_else(|| attr.name().to_owned());
        table.entry(key).or_default().push(attr.clone());

        if attr.tag() == BEG {
            depth += 1;
        } else if attr.tag() == END {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                active = None;
            }
        }
    }
    table
}

#[derive(Default)]
struct WrapFrame {
    member: Option<String>,
}

fn member_marker(name: &str) -> IppAttribute {
    IppAttribute::new(ValueTag::MemberAttrName, "", IppValue::String(name.to_owned()))
}

/// Convert a member list into the wire form of a collection named `name`.
///
/// A `memberAttrName` marker is emitted whenever the member name changes, and
/// an empty-valued marker between consecutive values of a multi-valued member.
/// A member whose tag is `begCollection` opens a nested span (its matching
/// `endCollection` member closes it); nested spans travel with empty wire
/// names. The closing `endCollection` record carries the collection name,
/// which the write loop suppresses on the wire.
pub fn wrap(name: &str, members: &[IppAttribute]) -> Result<Vec<IppAttribute>, IppCollectionError> {
    let mut out = Vec::with_capacity(members.len() * 2 + 2);
    out.push(IppAttribute::new(
        ValueTag::BegCollection,
        name,
        IppValue::String(String::new()),
    ));

    let mut frame = WrapFrame::default();
    let mut saved: Vec<WrapFrame> = Vec::new();

    for attr in members {
        if attr.tag() == END {
            if let Some(prev) = saved.pop() {
                frame = prev;
                out.push(IppAttribute::new(
                    ValueTag::EndCollection,
                    "",
                    IppValue::String(String::new()),
                ));
                continue;
            }
            return Err(IppCollectionError::EndCollectionAtRoot);
        }

        let member_name = if attr.name().is_empty() {
            frame.member.clone().ok_or(IppCollectionError::AttributeWithoutName)?
        } else {
            attr.name().to_owned()
        };

        if frame.member.as_deref() == Some(member_name.as_str()) {
            // second and later values of a multi-valued member
            out.push(member_marker(""));
        } else {
            out.push(member_marker(&member_name));
            frame.member = Some(member_name);
        }

        if attr.tag() == BEG {
            out.push(IppAttribute::new(
                ValueTag::BegCollection,
                "",
                IppValue::String(String::new()),
            ));
            saved.push(std::mem::take(&mut frame));
        } else {
            out.push(IppAttribute::new(attr.tag(), "", attr.value().clone()));
        }
    }

    if !saved.is_empty() {
        return Err(IppCollectionError::UnclosedCollection);
    }

    out.push(IppAttribute::new(
        ValueTag::EndCollection,
        name,
        IppValue::String(String::new()),
    ));
    Ok(out)
}

struct UnwrapFrame {
    /// Resolved collection name, emitted on the matching end marker
    collection: String,
    /// Member name in effect in the enclosing span, restored on pop
    saved_member: Option<String>,
}

fn resolved_name(attr: &IppAttribute, member: &Option<String>) -> Result<String, IppCollectionError> {
    if attr.name().is_empty() {
        member.clone().ok_or(IppCollectionError::AttributeWithoutName)
    } else {
        Ok(attr.name().to_owned())
    }
}

/// Convert the wire form of one collection back into its member list.
///
/// The first attribute must be the `begCollection` marker. Member values are
/// renamed from the markers; a nested `begCollection` is emitted under the
/// resolved member name and its `endCollection` under the same name. The
/// `endCollection` closing the outermost span stops the walk; trailing
/// attributes (further spans of a multi-valued collection) are left alone.
pub fn unwrap(attributes: &[IppAttribute]) -> Result<Vec<IppAttribute>, IppCollectionError> {
    let mut iter = attributes.iter();
    let first = iter.next().ok_or(IppCollectionError::MissingBegCollection)?;
    if first.tag() != BEG {
        return Err(IppCollectionError::MissingBegCollection);
    }

    let mut out = Vec::new();
    let mut stack = vec![UnwrapFrame {
        collection: first.name().to_owned(),
        saved_member: None,
    }];
    let mut member: Option<String> = None;
    let mut last_was_marker = false;

    for attr in iter {
        match attr.tag() {
            MEMBER => {
                if last_was_marker {
                    return Err(IppCollectionError::DanglingMemberName);
                }
                let marker = attr.value().as_string().map(String::as_str).unwrap_or_default();
                if marker.is_empty() {
                    if member.is_none() {
                        return Err(IppCollectionError::MissingMemberName);
                    }
                } else {
                    member = Some(marker.to_owned());
                }
                last_was_marker = true;
            }
            BEG => {
                let name = resolved_name(attr, &member)?;
                out.push(IppAttribute::new(ValueTag::BegCollection, &name, attr.value().clone()));
                stack.push(UnwrapFrame {
                    collection: name,
                    saved_member: member.take(),
                });
                last_was_marker = false;
            }
            END => {
                if last_was_marker {
                    return Err(IppCollectionError::DanglingMemberName);
                }
                match stack.pop() {
                    Some(frame) if !stack.is_empty() => {
                        out.push(IppAttribute::new(
                            ValueTag::EndCollection,
                            &frame.collection,
                            attr.value().clone(),
                        ));
                        member = frame.saved_member;
                        last_was_marker = false;
                    }
                    // the outermost end closes the walk
                    _ => break,
                }
            }
            _ => {
                let name = resolved_name(attr, &member)?;
                out.push(IppAttribute::new(attr.tag(), name, attr.value().clone()));
                last_was_marker = false;
            }
        }
    }
    Ok(out)
}
