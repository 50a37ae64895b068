//! `index.xml`: the table of contents of an export.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::{check_attributes, check_text, FromXml};
use crate::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMember {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

impl FromXml for IndexMember {
    const TYPE_NAME: &'static str = "IndexMember";

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
        Ok(IndexMember {
            refid: el.attribute_str("refid")?.to_string(),
            kind: el.attribute_str("kind")?.to_string(),
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCompound {
    pub refid: String,
    pub kind: String,
    pub name: String,
    pub members: Vec<IndexMember>,
}

impl FromXml for IndexCompound {
    const TYPE_NAME: &'static str = "IndexCompound";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["refid", "kind"], diags);
        let mut name = None;
        let mut members = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) => match e.name.as_str() {
                    "name" => name = Some(e.inner_text()?),
                    "member" => members.push(IndexMember::from_xml(e, diags)?),
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(IndexCompound {
            refid: el.attribute_str("refid")?.to_string(),
            kind: el.attribute_str("kind")?.to_string(),
            name: name.ok_or_else(|| Error::missing_element(&el.name, "name"))?,
            members,
        })
    }
}

/// Root `<doxygenindex>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoxygenIndex {
    pub version: Option<String>,
    pub compounds: Vec<IndexCompound>,
}

impl DoxygenIndex {
    pub fn contains(&self, refid: &str) -> bool {
        self.compounds.iter().any(|c| c.refid == refid)
    }
}

impl FromXml for DoxygenIndex {
    const TYPE_NAME: &'static str = "DoxygenIndex";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        if el.name != "doxygenindex" {
            return Err(Error::UnexpectedRoot {
                expected: "doxygenindex".to_string(),
                found: el.name.clone(),
            });
        }
        check_attributes(Self::TYPE_NAME, el, &["version"], diags);
        let mut compounds = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "compound" => {
                    compounds.push(IndexCompound::from_xml(e, diags)?)
                }
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(DoxygenIndex {
            version: el.attribute("version").map(str::to_string),
            compounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compounds_and_members() {
        let el = XmlElement::parse(
            "<doxygenindex version=\"1.9.8\" xml:lang=\"en-US\">\n\
             <compound refid=\"classgeo_1_1_shape\" kind=\"class\"><name>geo::Shape</name>\n\
             <member refid=\"classgeo_1_1_shape_1a1\" kind=\"function\"><name>area</name></member>\n\
             </compound>\n\
             <compound refid=\"namespacegeo\" kind=\"namespace\"><name>geo</name></compound>\n\
             </doxygenindex>",
        )
        .unwrap();
        let mut diags = Diagnostics::new();
        let index = DoxygenIndex::from_xml(&el, &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(index.version.as_deref(), Some("1.9.8"));
        assert_eq!(index.compounds.len(), 2);
        assert_eq!(index.compounds[0].members[0].name, "area");
        assert!(index.contains("namespacegeo"));
        assert!(!index.contains("namespacefoo"));
    }

    #[test]
    fn wrong_root_is_fatal() {
        let el = XmlElement::parse("<doxygen/>").unwrap();
        assert!(matches!(
            DoxygenIndex::from_xml(&el, &mut Diagnostics::new()),
            Err(Error::UnexpectedRoot { .. })
        ));
    }
}
