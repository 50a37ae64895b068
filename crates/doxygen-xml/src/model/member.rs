//! `<memberdef>` and the small enums it shares with other nodes.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::description::Description;
use crate::model::linked_text::LinkedText;
use crate::model::location::Location;
use crate::model::refs::{ReferenceRef, ReimplementRef};
use crate::model::template::{Param, TemplateParamList};
use crate::model::{check_attributes, check_text, flag, FromXml};
use crate::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protection {
    Public,
    Protected,
    Package,
    Private,
}

impl Protection {
    /// Read the `prot` attribute.
    pub fn parse(el: &XmlElement) -> Result<Self> {
        let raw = el.attribute_str("prot")?;
        match raw {
            "public" => Ok(Protection::Public),
            "protected" => Ok(Protection::Protected),
            "package" => Ok(Protection::Package),
            "private" => Ok(Protection::Private),
            _ => Err(Error::invalid_attribute(&el.name, "prot", raw)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protection::Public => "public",
            Protection::Protected => "protected",
            Protection::Package => "package",
            Protection::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Virtualness {
    NonVirtual,
    Virtual,
    PureVirtual,
}

impl Virtualness {
    /// Read the `virt` attribute.
    pub fn parse(el: &XmlElement) -> Result<Self> {
        let raw = el.attribute_str("virt")?;
        match raw {
            "non-virtual" => Ok(Virtualness::NonVirtual),
            "virtual" => Ok(Virtualness::Virtual),
            "pure-virtual" => Ok(Virtualness::PureVirtual),
            _ => Err(Error::invalid_attribute(&el.name, "virt", raw)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Define,
    Property,
    Event,
    Variable,
    Typedef,
    Enum,
    Function,
    Signal,
    Prototype,
    Friend,
    Dcop,
    Slot,
    Interface,
    Service,
    Other(String),
}

impl MemberKind {
    pub fn from_kind(raw: &str) -> Self {
        match raw {
            "define" => MemberKind::Define,
            "property" => MemberKind::Property,
            "event" => MemberKind::Event,
            "variable" => MemberKind::Variable,
            "typedef" => MemberKind::Typedef,
            "enum" => MemberKind::Enum,
            "function" => MemberKind::Function,
            "signal" => MemberKind::Signal,
            "prototype" => MemberKind::Prototype,
            "friend" => MemberKind::Friend,
            "dcop" => MemberKind::Dcop,
            "slot" => MemberKind::Slot,
            "interface" => MemberKind::Interface,
            "service" => MemberKind::Service,
            other => MemberKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberKind::Define => "define",
            MemberKind::Property => "property",
            MemberKind::Event => "event",
            MemberKind::Variable => "variable",
            MemberKind::Typedef => "typedef",
            MemberKind::Enum => "enum",
            MemberKind::Function => "function",
            MemberKind::Signal => "signal",
            MemberKind::Prototype => "prototype",
            MemberKind::Friend => "friend",
            MemberKind::Dcop => "dcop",
            MemberKind::Slot => "slot",
            MemberKind::Interface => "interface",
            MemberKind::Service => "service",
            MemberKind::Other(s) => s,
        }
    }

    /// Anything with a parameter list.
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            MemberKind::Function
                | MemberKind::Signal
                | MemberKind::Slot
                | MemberKind::Prototype
                | MemberKind::Dcop
        )
    }
}

/// `<enumvalue>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub id: String,
    pub prot: Protection,
    pub name: String,
    pub initializer: Option<LinkedText>,
    pub brief: Description,
    pub detailed: Description,
}

impl FromXml for EnumValue {
    const TYPE_NAME: &'static str = "EnumValue";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["id", "prot"], diags);
        let mut name = None;
        let mut initializer = None;
        let mut brief = Description::default();
        let mut detailed = Description::default();
        for child in &el.children {
            match child {
                XmlNode::Element(e) => match e.name.as_str() {
                    "name" => name = Some(e.inner_text()?),
                    "initializer" => initializer = Some(LinkedText::from_xml(e, diags)?),
                    "briefdescription" => brief = Description::from_xml(e, diags)?,
                    "detaileddescription" => detailed = Description::from_xml(e, diags)?,
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(EnumValue {
            id: el.attribute_str("id")?.to_string(),
            prot: Protection::parse(el)?,
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
            initializer,
            brief,
            detailed,
        })
    }
}

/// Boolean member attributes we read. The rest of Doxygen's long tail of
/// language-specific flags is accepted without a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFlags {
    pub is_static: bool,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_explicit: bool,
    pub is_inline: bool,
    pub is_mutable: bool,
    pub is_noexcept: bool,
    pub is_strong: bool,
    pub is_volatile: bool,
    pub is_final: bool,
    pub is_nodiscard: bool,
}

const MEMBER_ATTRIBUTES: &[&str] = &[
    "kind", "id", "prot", "static", "extern", "strong", "const", "explicit", "inline",
    "refqual", "virt", "volatile", "mutable", "noexcept", "noexceptexpression", "nodiscard",
    "constexpr", "consteval", "constinit", "readable", "writable", "initonly", "settable",
    "privatesettable", "protectedsettable", "gettable", "privategettable",
    "protectedgettable", "final", "sealed", "new", "add", "remove", "raise", "optional",
    "required", "accessor", "attribute", "property", "readonly", "bound", "removable",
    "constrained", "transient", "maybevoid", "maybedefault", "maybeambiguous",
];

/// `<memberdef>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    pub id: String,
    pub kind: MemberKind,
    pub prot: Protection,
    pub virt: Option<Virtualness>,
    pub flags: MemberFlags,
    pub template_params: Option<TemplateParamList>,
    pub member_type: Option<LinkedText>,
    pub definition: Option<String>,
    pub argsstring: Option<String>,
    pub name: String,
    pub qualified_name: Option<String>,
    pub read: Option<String>,
    pub write: Option<String>,
    pub bitfield: Option<String>,
    pub qualifiers: Vec<String>,
    pub params: Vec<Param>,
    pub enum_values: Vec<EnumValue>,
    pub requires_clause: Option<LinkedText>,
    pub initializer: Option<LinkedText>,
    pub exceptions: Option<LinkedText>,
    pub brief: Description,
    pub detailed: Description,
    pub inbody: Description,
    pub location: Location,
    pub reimplements: Vec<ReimplementRef>,
    pub reimplemented_by: Vec<ReimplementRef>,
    pub references: Vec<ReferenceRef>,
    pub referenced_by: Vec<ReferenceRef>,
}

impl MemberDef {
    /// `= delete` / `= default`, judged from the argument string.
    pub fn is_deleted_or_defaulted(&self) -> bool {
        let Some(args) = &self.argsstring else {
            return false;
        };
        let compact: String = args.chars().filter(|c| !c.is_whitespace()).collect();
        compact.ends_with("=delete") || compact.ends_with("=default")
    }
}

impl FromXml for MemberDef {
    const TYPE_NAME: &'static str = "MemberDef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, MEMBER_ATTRIBUTES, diags);

        let mut template_params = None;
        let mut member_type = None;
        let mut definition = None;
        let mut argsstring = None;
        let mut name = None;
        let mut qualified_name = None;
        let mut read = None;
        let mut write = None;
        let mut bitfield = None;
        let mut qualifiers = Vec::new();
        let mut params = Vec::new();
        let mut enum_values = Vec::new();
        let mut requires_clause = None;
        let mut initializer = None;
        let mut exceptions = None;
        let mut brief = Description::default();
        let mut detailed = Description::default();
        let mut inbody = Description::default();
        let mut location = None;
        let mut reimplements = Vec::new();
        let mut reimplemented_by = Vec::new();
        let mut references = Vec::new();
        let mut referenced_by = Vec::new();

        for child in &el.children {
            let e = match child {
                XmlNode::Element(e) => e,
                XmlNode::Text(t) => {
                    check_text(Self::TYPE_NAME, el, t, diags);
                    continue;
                }
            };
            match e.name.as_str() {
                "templateparamlist" => {
                    template_params = Some(TemplateParamList::from_xml(e, diags)?)
                }
                "type" => member_type = Some(LinkedText::from_xml(e, diags)?),
                "definition" => definition = Some(e.inner_text()?),
                "argsstring" => argsstring = Some(e.inner_text()?),
                "name" => name = Some(e.inner_text()?),
                "qualifiedname" => qualified_name = Some(e.inner_text()?),
                "read" => read = Some(e.inner_text()?),
                "write" => write = Some(e.inner_text()?),
                "bitfield" => bitfield = Some(e.inner_text()?),
                "qualifier" => qualifiers.push(e.inner_text()?),
                "param" => params.push(Param::from_xml(e, diags)?),
                "enumvalue" => enum_values.push(EnumValue::from_xml(e, diags)?),
                "requiresclause" => requires_clause = Some(LinkedText::from_xml(e, diags)?),
                "initializer" => initializer = Some(LinkedText::from_xml(e, diags)?),
                "exceptions" => exceptions = Some(LinkedText::from_xml(e, diags)?),
                "briefdescription" => brief = Description::from_xml(e, diags)?,
                "detaileddescription" => detailed = Description::from_xml(e, diags)?,
                "inbodydescription" => inbody = Description::from_xml(e, diags)?,
                "location" => location = Some(Location::from_xml(e, diags)?),
                "reimplements" => reimplements.push(ReimplementRef::from_xml(e, diags)?),
                "reimplementedby" => reimplemented_by.push(ReimplementRef::from_xml(e, diags)?),
                "references" => references.push(ReferenceRef::from_xml(e, diags)?),
                "referencedby" => referenced_by.push(ReferenceRef::from_xml(e, diags)?),
                _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
            }
        }

        let virt = if el.has_attribute("virt") {
            Some(Virtualness::parse(el)?)
        } else {
            None
        };

        Ok(MemberDef {
            id: el.attribute_str("id")?.to_string(),
            kind: MemberKind::from_kind(el.attribute_str("kind")?),
            prot: Protection::parse(el)?,
            virt,
            flags: MemberFlags {
                is_static: flag(el, "static")?,
                is_const: flag(el, "const")?,
                is_constexpr: flag(el, "constexpr")?,
                is_explicit: flag(el, "explicit")?,
                is_inline: flag(el, "inline")?,
                is_mutable: flag(el, "mutable")?,
                is_noexcept: flag(el, "noexcept")?,
                is_strong: flag(el, "strong")?,
                is_volatile: flag(el, "volatile")?,
                is_final: flag(el, "final")?,
                is_nodiscard: flag(el, "nodiscard")?,
            },
            template_params,
            member_type,
            definition,
            argsstring,
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
            qualified_name,
            read,
            write,
            bitfield,
            qualifiers,
            params,
            enum_values,
            requires_clause,
            initializer,
            exceptions,
            brief,
            detailed,
            inbody,
            location: location.ok_or_else(|| Error::missing_element(&el.name, "location"))?,
            reimplements,
            reimplemented_by,
            references,
            referenced_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(xml: &str) -> MemberDef {
        let el = XmlElement::parse(xml).unwrap();
        MemberDef::from_xml(&el, &mut Diagnostics::new()).unwrap()
    }

    #[test]
    fn function_member() {
        let m = member(
            "<memberdef kind=\"function\" id=\"classgeo_1_1_shape_1a1\" prot=\"public\" \
             static=\"no\" const=\"yes\" explicit=\"no\" inline=\"no\" virt=\"pure-virtual\">\n\
             <type>double</type>\n<definition>virtual double geo::Shape::area</definition>\n\
             <argsstring>() const =0</argsstring>\n<name>area</name>\n\
             <qualifiedname>geo::Shape::area</qualifiedname>\n\
             <briefdescription><para>Area.</para></briefdescription>\n\
             <detaileddescription/>\n<inbodydescription/>\n\
             <location file=\"shape.h\" line=\"10\"/>\n</memberdef>",
        );
        assert_eq!(m.kind, MemberKind::Function);
        assert_eq!(m.prot, Protection::Public);
        assert_eq!(m.virt, Some(Virtualness::PureVirtual));
        assert!(m.flags.is_const);
        assert!(!m.flags.is_static);
        assert_eq!(m.name, "area");
        assert_eq!(m.member_type.unwrap().plain_text(), "double");
        assert!(!m.brief.is_empty());
        assert!(m.detailed.is_empty());
    }

    #[test]
    fn enum_member_with_values() {
        let m = member(
            "<memberdef kind=\"enum\" id=\"ns_1a2\" prot=\"public\" static=\"no\" strong=\"yes\">\
             <name>Color</name>\
             <enumvalue id=\"ns_1a2a3\" prot=\"public\"><name>Red</name><initializer>= 1</initializer></enumvalue>\
             <enumvalue id=\"ns_1a2a4\" prot=\"public\"><name>Green</name></enumvalue>\
             <location file=\"c.h\"/></memberdef>",
        );
        assert!(m.flags.is_strong);
        assert_eq!(m.enum_values.len(), 2);
        assert_eq!(m.enum_values[0].initializer.as_ref().unwrap().plain_text(), "= 1");
    }

    #[test]
    fn deleted_and_defaulted() {
        let mut m = member(
            "<memberdef kind=\"function\" id=\"c_1a5\" prot=\"public\" static=\"no\">\
             <argsstring>(const Widget &amp;)=delete</argsstring><name>Widget</name>\
             <location file=\"w.h\"/></memberdef>",
        );
        assert!(m.is_deleted_or_defaulted());
        m.argsstring = Some("() = default".to_string());
        assert!(m.is_deleted_or_defaulted());
        m.argsstring = Some("(int x)".to_string());
        assert!(!m.is_deleted_or_defaulted());
    }

    #[test]
    fn bad_protection_is_fatal() {
        let el = XmlElement::parse(
            "<memberdef kind=\"function\" id=\"x\" prot=\"secret\"><name>f</name><location file=\"a\"/></memberdef>",
        )
        .unwrap();
        assert!(matches!(
            MemberDef::from_xml(&el, &mut Diagnostics::new()),
            Err(Error::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn unknown_kind_is_kept() {
        assert_eq!(
            MemberKind::from_kind("dictionary"),
            MemberKind::Other("dictionary".to_string())
        );
    }
}
