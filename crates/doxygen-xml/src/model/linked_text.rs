//! `linkedTextType`: text with embedded `<ref>` links, used for types,
//! initializers and default values.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::{check_attributes, owned, FromXml};
use crate::node::{XmlElement, XmlNode};

/// What a `<ref>` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Compound,
    Member,
}

impl RefKind {
    pub fn parse(el: &XmlElement) -> Result<Self> {
        let raw = el.attribute_str("kindref")?;
        match raw {
            "compound" => Ok(RefKind::Compound),
            "member" => Ok(RefKind::Member),
            _ => Err(Error::invalid_attribute(&el.name, "kindref", raw)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RefKind::Compound => "compound",
            RefKind::Member => "member",
        }
    }
}

/// `refTextType`: a text-only reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefText {
    pub refid: String,
    pub kindref: RefKind,
    pub external: Option<String>,
    pub tooltip: Option<String>,
    pub text: String,
}

impl FromXml for RefText {
    const TYPE_NAME: &'static str = "RefText";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(
            Self::TYPE_NAME,
            el,
            &["refid", "kindref", "external", "tooltip"],
            diags,
        );
        Ok(RefText {
            refid: el.attribute_str("refid")?.to_string(),
            kindref: RefKind::parse(el)?,
            external: owned(el, "external"),
            tooltip: owned(el, "tooltip"),
            text: el.inner_text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedTextItem {
    Text(String),
    Ref(RefText),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedText {
    /// Name of the element this came from (`type`, `initializer`, ...).
    pub element: String,
    pub children: Vec<LinkedTextItem>,
}

impl LinkedText {
    /// Plain text with links flattened.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for item in &self.children {
            match item {
                LinkedTextItem::Text(t) => out.push_str(t),
                LinkedTextItem::Ref(r) => out.push_str(&r.text),
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    pub fn refs(&self) -> impl Iterator<Item = &RefText> {
        self.children.iter().filter_map(|item| match item {
            LinkedTextItem::Ref(r) => Some(r),
            LinkedTextItem::Text(_) => None,
        })
    }
}

impl FromXml for LinkedText {
    const TYPE_NAME: &'static str = "LinkedText";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &[], diags);
        let mut children = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Text(t) => children.push(LinkedTextItem::Text(t.clone())),
                XmlNode::Element(e) if e.name == "ref" => {
                    children.push(LinkedTextItem::Ref(RefText::from_xml(e, diags)?))
                }
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
            }
        }
        Ok(LinkedText {
            element: el.name.clone(),
            children,
        })
    }
}
