//! Generic, order-preserving XML tree.
//!
//! `roxmltree` does the actual parsing; its borrowed document is copied into
//! an owned [`XmlElement`] tree so that the typed model can be built after the
//! source text is gone. Text nodes are kept verbatim (whitespace included) and
//! children stay in document order, since mixed content such as
//! `text <bold>x</bold> <ref>y</ref> text` must render back in that order.

use crate::error::Result;

/// One entry in an element's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Text(String),
    Element(XmlElement),
}

/// An element with its attributes (in source order) and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parse a complete document and return its root element.
    pub fn parse(text: &str) -> Result<XmlElement> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        Ok(convert(doc.root_element()))
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let attributes = node
        .attributes()
        .map(|attr| {
            let name = match attr.namespace().and_then(|ns| node.lookup_prefix(ns)) {
                Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
                _ => attr.name().to_string(),
            };
            (name, attr.value().to_string())
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(XmlNode::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                // Adjacent text runs (e.g. split around a comment) are merged.
                if let Some(XmlNode::Text(prev)) = children.last_mut() {
                    prev.push_str(text);
                } else {
                    children.push(XmlNode::Text(text.to_string()));
                }
            }
        }
        // Comments and processing instructions carry no documentation.
    }

    XmlElement {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
    }
}
