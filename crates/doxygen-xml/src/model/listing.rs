//! `<programlisting>` and its `<codeline>` / `<highlight>` rows.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::linked_text::RefText;
use crate::model::{check_attributes, check_text, number, owned, FromXml};
use crate::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightItem {
    Text(String),
    Ref(RefText),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub class: String,
    pub children: Vec<HighlightItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLine {
    pub line_number: Option<i64>,
    pub refid: Option<String>,
    pub highlights: Vec<Highlight>,
}

impl CodeLine {
    pub fn text(&self) -> String {
        let mut out = String::new();
        for h in &self.highlights {
            for item in &h.children {
                match item {
                    HighlightItem::Text(t) => out.push_str(t),
                    HighlightItem::Ref(r) => out.push_str(&r.text),
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub filename: Option<String>,
    pub lines: Vec<CodeLine>,
}

impl Listing {
    /// File extension hint for fenced code blocks (`.cpp` -> `cpp`).
    pub fn language(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .and_then(|f| f.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl FromXml for Listing {
    const TYPE_NAME: &'static str = "Listing";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["filename"], diags);
        let mut lines = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "codeline" => lines.push(CodeLine::from_xml(e, diags)?),
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(Listing {
            filename: owned(el, "filename"),
            lines,
        })
    }
}

impl FromXml for CodeLine {
    const TYPE_NAME: &'static str = "CodeLine";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(
            Self::TYPE_NAME,
            el,
            &["lineno", "refid", "refkind", "external"],
            diags,
        );
        let mut highlights = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "highlight" => {
                    highlights.push(Highlight::from_xml(e, diags)?)
                }
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(CodeLine {
            line_number: number(el, "lineno")?,
            refid: owned(el, "refid"),
            highlights,
        })
    }
}

impl FromXml for Highlight {
    const TYPE_NAME: &'static str = "Highlight";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["class"], diags);
        let mut children = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Text(t) => children.push(HighlightItem::Text(t.clone())),
                XmlNode::Element(e) => match e.name.as_str() {
                    // <sp/> is a single space
                    "sp" => children.push(HighlightItem::Text(" ".to_string())),
                    "ref" => children.push(HighlightItem::Ref(RefText::from_xml(e, diags)?)),
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
            }
        }
        Ok(Highlight {
            class: el.attribute_str("class")?.to_string(),
            children,
        })
    }
}
