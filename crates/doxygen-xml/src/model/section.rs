use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::description::Description;
use crate::model::member::{MemberDef, MemberKind};
use crate::model::{check_attributes, check_text, FromXml};
use crate::node::{XmlElement, XmlNode};

/// `<member>` inside a section: a pointer to a member defined elsewhere
/// (groups and files list members owned by namespaces this way).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub refid: String,
    pub kind: MemberKind,
    pub name: String,
}

impl FromXml for MemberRef {
    const TYPE_NAME: &'static str = "MemberRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid", "kind"], diags);
        let mut name = None;
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "name" => name = Some(e.inner_text()?),
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(MemberRef {
            refid: el.attribute_str("refid")?.to_string(),
            kind: MemberKind::from_kind(el.attribute_str("kind")?),
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
        })
    }
}

/// `<sectiondef>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDef {
    /// Raw kind, e.g. `public-func`, `user-defined`.
    pub kind: String,
    pub header: Option<String>,
    pub description: Option<Description>,
    pub member_defs: Vec<MemberDef>,
    pub member_refs: Vec<MemberRef>,
}

impl SectionDef {
    pub fn is_empty(&self) -> bool {
        self.member_defs.is_empty() && self.member_refs.is_empty()
    }
}

impl FromXml for SectionDef {
    const TYPE_NAME: &'static str = "SectionDef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["kind"], diags);
        let mut header = None;
        let mut description = None;
        let mut member_defs = Vec::new();
        let mut member_refs = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) => match e.name.as_str() {
                    "header" => header = Some(e.inner_text()?),
                    "description" => description = Some(Description::from_xml(e, diags)?),
                    "memberdef" => member_defs.push(MemberDef::from_xml(e, diags)?),
                    "member" => member_refs.push(MemberRef::from_xml(e, diags)?),
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(SectionDef {
            kind: el.attribute_str("kind")?.to_string(),
            header,
            description,
            member_defs,
            member_refs,
        })
    }
}
