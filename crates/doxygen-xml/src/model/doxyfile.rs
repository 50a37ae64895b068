//! `Doxyfile.xml`: the configuration dump of the Doxygen run.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::{check_attributes, check_text, FromXml};
use crate::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxyfileOption {
    pub id: String,
    pub default: bool,
    pub kind: String,
    pub values: Vec<String>,
}

impl FromXml for DoxyfileOption {
    const TYPE_NAME: &'static str = "DoxyfileOption";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &["id", "default", "type"], diags);
        let mut values = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "value" => values.push(e.inner_text()?),
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(DoxyfileOption {
            id: el.attribute_str("id")?.to_string(),
            default: el.attribute_bool("default")?,
            kind: el.attribute_str("type")?.to_string(),
            values,
        })
    }
}

/// Root `<doxyfile>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doxyfile {
    pub options: Vec<DoxyfileOption>,
}

impl Doxyfile {
    /// First value of option `id`, if set and not blank.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.values.first())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.value("PROJECT_NAME")
    }

    pub fn project_number(&self) -> Option<&str> {
        self.value("PROJECT_NUMBER")
    }

    pub fn project_brief(&self) -> Option<&str> {
        self.value("PROJECT_BRIEF")
    }
}

impl FromXml for Doxyfile {
    const TYPE_NAME: &'static str = "Doxyfile";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        if el.name != "doxyfile" {
            return Err(Error::UnexpectedRoot {
                expected: "doxyfile".to_string(),
                found: el.name.clone(),
            });
        }
        check_attributes(Self::TYPE_NAME, el, &["version"], diags);
        let mut options = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "option" => {
                    options.push(DoxyfileOption::from_xml(e, diags)?)
                }
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(Doxyfile { options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_values() {
        let el = XmlElement::parse(
            "<doxyfile version=\"1.9.8\">\n\
             <option id=\"PROJECT_NAME\" default=\"no\" type=\"string\"><value><![CDATA[Geo]]></value></option>\n\
             <option id=\"PROJECT_NUMBER\" default=\"yes\" type=\"string\"><value></value></option>\n\
             <option id=\"INPUT\" default=\"no\" type=\"stringlist\"><value>src</value><value>include</value></option>\n\
             </doxyfile>",
        )
        .unwrap();
        let mut diags = Diagnostics::new();
        let doxyfile = Doxyfile::from_xml(&el, &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(doxyfile.project_name(), Some("Geo"));
        assert_eq!(doxyfile.project_number(), None);
        assert_eq!(doxyfile.value("INPUT"), Some("src"));
        assert_eq!(doxyfile.options[2].values.len(), 2);
    }
}
