//! Lightweight pointers from one compound to others.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::member::{Protection, Virtualness};
use crate::model::{check_attributes, check_text, flag, number, owned, FromXml};
use crate::node::{XmlElement, XmlNode};

/// `<basecompoundref>` / `<derivedcompoundref>`. The id is absent when the
/// base class is not part of the documented sources (e.g. `std::exception`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRef {
    pub refid: Option<String>,
    pub prot: Protection,
    pub virt: Virtualness,
    pub name: String,
}

impl FromXml for CompoundRef {
    const TYPE_NAME: &'static str = "CompoundRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid", "prot", "virt"], diags);
        Ok(CompoundRef {
            refid: owned(el, "refid"),
            prot: Protection::parse(el)?,
            virt: Virtualness::parse(el)?,
            name: el.inner_text()?,
        })
    }
}

/// `<innerclass>`, `<innernamespace>`, `<innerfile>`, `<innerdir>`,
/// `<innergroup>`, `<innerpage>`, `<innerconcept>`, `<innermodule>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerRef {
    pub refid: String,
    pub prot: Option<Protection>,
    pub inline: bool,
    pub name: String,
}

impl FromXml for InnerRef {
    const TYPE_NAME: &'static str = "InnerRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid", "prot", "inline"], diags);
        let prot = if el.has_attribute("prot") {
            Some(Protection::parse(el)?)
        } else {
            None
        };
        Ok(InnerRef {
            refid: el.attribute_str("refid")?.to_string(),
            prot,
            inline: flag(el, "inline")?,
            name: el.inner_text()?,
        })
    }
}

/// `<includes>` / `<includedby>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRef {
    pub refid: Option<String>,
    pub local: bool,
    pub name: String,
}

impl FromXml for IncludeRef {
    const TYPE_NAME: &'static str = "IncludeRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid", "local"], diags);
        Ok(IncludeRef {
            refid: owned(el, "refid"),
            local: el.attribute_bool("local")?,
            name: el.inner_text()?,
        })
    }
}

/// `<references>` / `<referencedby>`: call-graph style cross links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRef {
    pub refid: String,
    pub compoundref: Option<String>,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    pub name: String,
}

impl FromXml for ReferenceRef {
    const TYPE_NAME: &'static str = "ReferenceRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(
            Self::TYPE_NAME,
            el,
            &["refid", "compoundref", "startline", "endline"],
            diags,
        );
        Ok(ReferenceRef {
            refid: el.attribute_str("refid")?.to_string(),
            compoundref: owned(el, "compoundref"),
            start_line: number(el, "startline")?,
            end_line: number(el, "endline")?,
            name: el.inner_text()?,
        })
    }
}

/// `<reimplements>` / `<reimplementedby>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReimplementRef {
    pub refid: String,
    pub name: String,
}

impl FromXml for ReimplementRef {
    const TYPE_NAME: &'static str = "ReimplementRef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid"], diags);
        Ok(ReimplementRef {
            refid: el.attribute_str("refid")?.to_string(),
            name: el.inner_text()?,
        })
    }
}

/// One `<member>` row of `<listofallmembers>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRefEntry {
    pub refid: String,
    pub prot: Protection,
    pub virt: Virtualness,
    pub ambiguity_scope: Option<String>,
    pub scope: String,
    pub name: String,
}

impl FromXml for MemberRefEntry {
    const TYPE_NAME: &'static str = "MemberRefEntry";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(
            Self::TYPE_NAME,
            el,
            &["refid", "prot", "virt", "ambiguityscope"],
            diags,
        );
        let mut scope = None;
        let mut name = None;
        for child in &el.children {
            match child {
                XmlNode::Element(e) => match e.name.as_str() {
                    "scope" => scope = Some(e.inner_text()?),
                    "name" => name = Some(e.inner_text()?),
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(MemberRefEntry {
            refid: el.attribute_str("refid")?.to_string(),
            prot: Protection::parse(el)?,
            virt: Virtualness::parse(el)?,
            ambiguity_scope: owned(el, "ambiguityscope"),
            scope: scope.ok_or_else(|| Error::missing_element(&el.name, "scope"))?,
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfAllMembers {
    pub members: Vec<MemberRefEntry>,
}

impl FromXml for ListOfAllMembers {
    const TYPE_NAME: &'static str = "ListOfAllMembers";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &[], diags);
        let mut members = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "member" => {
                    members.push(MemberRefEntry::from_xml(e, diags)?)
                }
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(ListOfAllMembers { members })
    }
}
