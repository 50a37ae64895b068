//! Typed data model, one type per Doxygen XML complex type.
//!
//! Every constructor follows the same shape: walk attributes and children in
//! order, dispatch on the names it knows, report the rest to [`Diagnostics`]
//! and skip them, then assert that the mandatory fields were seen.

pub mod compound;
pub mod description;
pub mod doxyfile;
pub mod index;
pub mod linked_text;
pub mod listing;
pub mod location;
pub mod member;
pub mod refs;
pub mod section;
pub mod template;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::node::{XmlElement, XmlNode};

pub trait FromXml: Sized {
    /// Name reported in diagnostics.
    const TYPE_NAME: &'static str;

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self>;
}

/// Document-level attributes that carry nothing for us.
pub(crate) fn is_ignorable_attribute(name: &str) -> bool {
    matches!(
        name,
        "xml:lang" | "lang" | "xsi:noNamespaceSchemaLocation" | "noNamespaceSchemaLocation"
    )
}

/// Elements Doxygen emits that this model deliberately does not read.
pub(crate) fn is_ignorable_element(name: &str) -> bool {
    matches!(
        name,
        "incdepgraph"
            | "invincdepgraph"
            | "inheritancegraph"
            | "collaborationgraph"
            | "tableofcontents"
            | "exports"
    )
}

/// Element-only nodes may contain indentation whitespace between children;
/// anything else is reported.
pub(crate) fn check_text(owner: &'static str, el: &XmlElement, text: &str, diags: &mut Diagnostics) {
    if !text.trim().is_empty() {
        diags.unexpected_text(owner, &el.name, text.trim());
    }
}

/// Report every attribute not accepted by `known`.
pub(crate) fn check_attributes(
    owner: &'static str,
    el: &XmlElement,
    known: &[&str],
    diags: &mut Diagnostics,
) {
    for (name, _) in &el.attributes {
        if !known.contains(&name.as_str()) && !is_ignorable_attribute(name) {
            diags.unknown_attribute(owner, &el.name, name);
        }
    }
}

/// Pure-attribute nodes must not have children.
pub(crate) fn check_no_children(owner: &'static str, el: &XmlElement, diags: &mut Diagnostics) {
    for child in &el.children {
        match child {
            XmlNode::Element(e) => diags.unknown_element(owner, &el.name, &e.name),
            XmlNode::Text(t) => check_text(owner, el, t, diags),
        }
    }
}

/// Optional `yes`/`no` attribute; absent means `false`.
pub(crate) fn flag(el: &XmlElement, name: &str) -> Result<bool> {
    if el.has_attribute(name) {
        el.attribute_bool(name)
    } else {
        Ok(false)
    }
}

/// Optional numeric attribute.
pub(crate) fn number(el: &XmlElement, name: &str) -> Result<Option<i64>> {
    if el.has_attribute(name) {
        el.attribute_number(name).map(Some)
    } else {
        Ok(None)
    }
}

pub(crate) fn owned(el: &XmlElement, name: &str) -> Option<String> {
    el.attribute(name).map(str::to_string)
}
