//! Accessors over the generic tree.
//!
//! These are the adapter between [`XmlElement`] and the typed model. The
//! asserting getters return an error instead of a default: a Doxygen export
//! that lacks something the schema guarantees is corrupt, and the run must
//! stop rather than render half a page.

use crate::error::{Error, Result};
use crate::node::{XmlElement, XmlNode};

impl XmlElement {
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Optional attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attribute_str(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| Error::missing_attribute(&self.name, name))
    }

    pub fn attribute_number(&self, name: &str) -> Result<i64> {
        let raw = self.attribute_str(name)?;
        raw.trim()
            .parse()
            .map_err(|_| Error::invalid_attribute(&self.name, name, raw))
    }

    /// Doxygen booleans are spelled `yes` / `no`.
    pub fn attribute_bool(&self, name: &str) -> Result<bool> {
        let raw = self.attribute_str(name)?;
        parse_yes_no(raw).ok_or_else(|| Error::invalid_attribute(&self.name, name, raw))
    }

    /// Child elements, in order, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn has_inner_element(&self, name: &str) -> bool {
        self.elements().any(|e| e.name == name)
    }

    pub fn inner_elements<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.elements().filter(move |e| e.name == name)
    }

    /// The single child element called `name`.
    pub fn inner_element(&self, name: &str) -> Result<&XmlElement> {
        let mut found = self.inner_elements(name);
        let first = found
            .next()
            .ok_or_else(|| Error::missing_element(&self.name, name))?;
        let rest = found.count();
        if rest > 0 {
            return Err(Error::AmbiguousElement {
                element: self.name.clone(),
                child: name.to_string(),
                count: rest + 1,
            });
        }
        Ok(first)
    }

    /// True when the element has at least one text child and no element
    /// children.
    pub fn has_inner_text(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(|c| matches!(c, XmlNode::Text(_)))
    }

    /// Concatenated text content. Fails if the element contains markup.
    /// An empty element yields an empty string.
    pub fn inner_text(&self) -> Result<String> {
        let mut text = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) => text.push_str(t),
                XmlNode::Element(e) => {
                    return Err(Error::NotText {
                        element: self.name.clone(),
                        child: e.name.clone(),
                    })
                }
            }
        }
        Ok(text)
    }

    /// Text of the single child element `name`.
    pub fn inner_element_text(&self, name: &str) -> Result<String> {
        self.inner_element(name)?.inner_text()
    }
}

pub(crate) fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}
