//! `<compounddef>`: the root unit of documentation.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::description::Description;
use crate::model::linked_text::LinkedText;
use crate::model::listing::Listing;
use crate::model::location::Location;
use crate::model::member::{MemberDef, Protection};
use crate::model::refs::{CompoundRef, IncludeRef, InnerRef, ListOfAllMembers};
use crate::model::section::SectionDef;
use crate::model::template::TemplateParamList;
use crate::model::{check_attributes, check_text, flag, is_ignorable_element, owned, FromXml};
use crate::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Class,
    Struct,
    Union,
    Interface,
    Protocol,
    Category,
    Exception,
    Service,
    Singleton,
    Module,
    Type,
    File,
    Namespace,
    Group,
    Page,
    Example,
    Dir,
    Concept,
    Other(String),
}

impl CompoundKind {
    pub fn from_kind(raw: &str) -> Self {
        match raw {
            "class" => CompoundKind::Class,
            "struct" => CompoundKind::Struct,
            "union" => CompoundKind::Union,
            "interface" => CompoundKind::Interface,
            "protocol" => CompoundKind::Protocol,
            "category" => CompoundKind::Category,
            "exception" => CompoundKind::Exception,
            "service" => CompoundKind::Service,
            "singleton" => CompoundKind::Singleton,
            "module" => CompoundKind::Module,
            "type" => CompoundKind::Type,
            "file" => CompoundKind::File,
            "namespace" => CompoundKind::Namespace,
            "group" => CompoundKind::Group,
            "page" => CompoundKind::Page,
            "example" => CompoundKind::Example,
            "dir" => CompoundKind::Dir,
            "concept" => CompoundKind::Concept,
            other => CompoundKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompoundKind::Class => "class",
            CompoundKind::Struct => "struct",
            CompoundKind::Union => "union",
            CompoundKind::Interface => "interface",
            CompoundKind::Protocol => "protocol",
            CompoundKind::Category => "category",
            CompoundKind::Exception => "exception",
            CompoundKind::Service => "service",
            CompoundKind::Singleton => "singleton",
            CompoundKind::Module => "module",
            CompoundKind::Type => "type",
            CompoundKind::File => "file",
            CompoundKind::Namespace => "namespace",
            CompoundKind::Group => "group",
            CompoundKind::Page => "page",
            CompoundKind::Example => "example",
            CompoundKind::Dir => "dir",
            CompoundKind::Concept => "concept",
            CompoundKind::Other(s) => s,
        }
    }

    /// Kinds rendered as class-like pages.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            CompoundKind::Class
                | CompoundKind::Struct
                | CompoundKind::Union
                | CompoundKind::Interface
                | CompoundKind::Protocol
                | CompoundKind::Category
                | CompoundKind::Exception
                | CompoundKind::Service
                | CompoundKind::Singleton
                | CompoundKind::Concept
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundDef {
    pub id: String,
    pub kind: CompoundKind,
    pub language: Option<String>,
    pub prot: Option<Protection>,
    pub is_final: bool,
    pub is_abstract: bool,
    /// May be empty for anonymous namespaces.
    pub compound_name: String,
    pub title: Option<String>,
    pub base_compound_refs: Vec<CompoundRef>,
    pub derived_compound_refs: Vec<CompoundRef>,
    pub includes: Vec<IncludeRef>,
    pub included_by: Vec<IncludeRef>,
    pub inner_dirs: Vec<InnerRef>,
    pub inner_files: Vec<InnerRef>,
    pub inner_classes: Vec<InnerRef>,
    pub inner_namespaces: Vec<InnerRef>,
    pub inner_pages: Vec<InnerRef>,
    pub inner_groups: Vec<InnerRef>,
    pub inner_modules: Vec<InnerRef>,
    pub qualifiers: Vec<String>,
    pub template_params: Option<TemplateParamList>,
    pub section_defs: Vec<SectionDef>,
    pub requires_clause: Option<LinkedText>,
    pub initializer: Option<LinkedText>,
    pub brief: Description,
    pub detailed: Description,
    pub program_listing: Option<Listing>,
    pub location: Option<Location>,
    pub list_of_all_members: Option<ListOfAllMembers>,
}

impl CompoundDef {
    /// Every member defined (not merely referenced) in this compound.
    pub fn member_defs(&self) -> impl Iterator<Item = &MemberDef> {
        self.section_defs.iter().flat_map(|s| s.member_defs.iter())
    }

    /// Last `::` segment of the compound name.
    pub fn unqualified_name(&self) -> &str {
        self.compound_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.compound_name)
    }
}

impl FromXml for CompoundDef {
    const TYPE_NAME: &'static str = "CompoundDef";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(
            Self::TYPE_NAME,
            el,
            &["id", "kind", "language", "prot", "final", "inline", "sealed", "abstract"],
            diags,
        );

        let prot = if el.has_attribute("prot") {
            Some(Protection::parse(el)?)
        } else {
            None
        };

        let mut def = CompoundDef {
            id: el.attribute_str("id")?.to_string(),
            kind: CompoundKind::from_kind(el.attribute_str("kind")?),
            language: owned(el, "language"),
            prot,
            is_final: flag(el, "final")?,
            is_abstract: flag(el, "abstract")?,
            compound_name: String::new(),
            title: None,
            base_compound_refs: Vec::new(),
            derived_compound_refs: Vec::new(),
            includes: Vec::new(),
            included_by: Vec::new(),
            inner_dirs: Vec::new(),
            inner_files: Vec::new(),
            inner_classes: Vec::new(),
            inner_namespaces: Vec::new(),
            inner_pages: Vec::new(),
            inner_groups: Vec::new(),
            inner_modules: Vec::new(),
            qualifiers: Vec::new(),
            template_params: None,
            section_defs: Vec::new(),
            requires_clause: None,
            initializer: None,
            brief: Description::default(),
            detailed: Description::default(),
            program_listing: None,
            location: None,
            list_of_all_members: None,
        };
        let mut seen_name = false;

        for child in &el.children {
            let e = match child {
                XmlNode::Element(e) => e,
                XmlNode::Text(t) => {
                    check_text(Self::TYPE_NAME, el, t, diags);
                    continue;
                }
            };
            match e.name.as_str() {
                "compoundname" => {
                    def.compound_name = e.inner_text()?;
                    seen_name = true;
                }
                "title" => def.title = Some(e.inner_text()?),
                "basecompoundref" => def.base_compound_refs.push(CompoundRef::from_xml(e, diags)?),
                "derivedcompoundref" => {
                    def.derived_compound_refs.push(CompoundRef::from_xml(e, diags)?)
                }
                "includes" => def.includes.push(IncludeRef::from_xml(e, diags)?),
                "includedby" => def.included_by.push(IncludeRef::from_xml(e, diags)?),
                "innerdir" => def.inner_dirs.push(InnerRef::from_xml(e, diags)?),
                "innerfile" => def.inner_files.push(InnerRef::from_xml(e, diags)?),
                // concepts are listed with classes
                "innerclass" | "innerconcept" => def.inner_classes.push(InnerRef::from_xml(e, diags)?),
                "innernamespace" => def.inner_namespaces.push(InnerRef::from_xml(e, diags)?),
                "innerpage" => def.inner_pages.push(InnerRef::from_xml(e, diags)?),
                "innergroup" => def.inner_groups.push(InnerRef::from_xml(e, diags)?),
                "innermodule" => def.inner_modules.push(InnerRef::from_xml(e, diags)?),
                "qualifier" => def.qualifiers.push(e.inner_text()?),
                "templateparamlist" => {
                    def.template_params = Some(TemplateParamList::from_xml(e, diags)?)
                }
                "sectiondef" => def.section_defs.push(SectionDef::from_xml(e, diags)?),
                "requiresclause" => def.requires_clause = Some(LinkedText::from_xml(e, diags)?),
                "initializer" => def.initializer = Some(LinkedText::from_xml(e, diags)?),
                "briefdescription" => def.brief = Description::from_xml(e, diags)?,
                "detaileddescription" => def.detailed = Description::from_xml(e, diags)?,
                "programlisting" => def.program_listing = Some(Listing::from_xml(e, diags)?),
                "location" => def.location = Some(Location::from_xml(e, diags)?),
                "listofallmembers" => {
                    def.list_of_all_members = Some(ListOfAllMembers::from_xml(e, diags)?)
                }
                name if is_ignorable_element(name) => {}
                _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
            }
        }

        if !seen_name {
            return Err(Error::missing_element(&el.name, "compoundname"));
        }
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> (CompoundDef, Diagnostics) {
        let el = XmlElement::parse(xml).unwrap();
        let mut diags = Diagnostics::new();
        let def = CompoundDef::from_xml(&el, &mut diags).unwrap();
        (def, diags)
    }

    #[test]
    fn class_with_bases_and_sections() {
        let (def, diags) = parse(
            "<compounddef id=\"classgeo_1_1_widget\" kind=\"class\" language=\"C++\" prot=\"public\">\n\
             <compoundname>geo::Widget</compoundname>\n\
             <basecompoundref refid=\"classgeo_1_1_shape\" prot=\"public\" virt=\"non-virtual\">geo::Shape</basecompoundref>\n\
             <includes refid=\"widget_8h\" local=\"no\">geo/widget.h</includes>\n\
             <sectiondef kind=\"public-func\">\n\
             <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a1\" prot=\"public\" static=\"no\">\
             <name>Widget</name><location file=\"widget.h\"/></memberdef>\n\
             </sectiondef>\n\
             <inheritancegraph><node id=\"1\"/></inheritancegraph>\n\
             <location file=\"widget.h\" line=\"8\"/>\n\
             </compounddef>",
        );
        assert!(diags.is_empty());
        assert_eq!(def.kind, CompoundKind::Class);
        assert!(def.kind.is_class_like());
        assert_eq!(def.unqualified_name(), "Widget");
        assert_eq!(def.base_compound_refs.len(), 1);
        assert_eq!(def.includes[0].name, "geo/widget.h");
        assert_eq!(def.member_defs().count(), 1);
        assert_eq!(def.location.as_ref().unwrap().line, Some(8));
    }

    #[test]
    fn anonymous_namespace_may_have_empty_name() {
        let (def, _) = parse(
            "<compounddef id=\"namespace_0d0\" kind=\"namespace\"><compoundname></compoundname></compounddef>",
        );
        assert_eq!(def.compound_name, "");
        assert_eq!(def.kind, CompoundKind::Namespace);
    }

    #[test]
    fn missing_compoundname_is_fatal() {
        let el = XmlElement::parse("<compounddef id=\"x\" kind=\"file\"></compounddef>").unwrap();
        assert!(matches!(
            CompoundDef::from_xml(&el, &mut Diagnostics::new()),
            Err(Error::MissingElement { .. })
        ));
    }

    #[test]
    fn unknown_child_is_skipped() {
        let (def, diags) = parse(
            "<compounddef id=\"x\" kind=\"file\"><compoundname>a.h</compoundname>\
             <sparkle/><title>t</title></compounddef>",
        );
        assert_eq!(def.title.as_deref(), Some("t"));
        assert_eq!(diags.len(), 1);
    }
}
