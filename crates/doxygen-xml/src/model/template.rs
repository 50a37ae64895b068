use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::description::Description;
use crate::model::linked_text::LinkedText;
use crate::model::{check_attributes, check_text, FromXml};
use crate::node::{XmlElement, XmlNode};

/// `<param>` of a function or of a template parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub attributes: Option<String>,
    pub param_type: Option<LinkedText>,
    pub declname: Option<String>,
    pub defname: Option<String>,
    pub array: Option<String>,
    pub defval: Option<LinkedText>,
    pub type_constraint: Option<LinkedText>,
    pub brief: Option<Description>,
}

impl Param {
    /// `type name[array] = default`, as written in a signature.
    pub fn signature(&self) -> String {
        let mut out = self
            .param_type
            .as_ref()
            .map(LinkedText::plain_text)
            .unwrap_or_default();
        if let Some(name) = self.declname.as_deref().or(self.defname.as_deref()) {
            if !out.is_empty() && !out.ends_with(&['&', '*'][..]) {
                out.push(' ');
            }
            out.push_str(name);
        }
        if let Some(array) = &self.array {
            out.push_str(array);
        }
        if let Some(defval) = &self.defval {
            out.push_str(" = ");
            out.push_str(&defval.plain_text());
        }
        out
    }
}

impl FromXml for Param {
    const TYPE_NAME: &'static str = "Param";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &[], diags);
        let mut param = Param::default();
        for child in &el.children {
            match child {
                XmlNode::Element(e) => match e.name.as_str() {
                    "attributes" => param.attributes = Some(e.inner_text()?),
                    "type" => param.param_type = Some(LinkedText::from_xml(e, diags)?),
                    "declname" => param.declname = Some(e.inner_text()?),
                    "defname" => param.defname = Some(e.inner_text()?),
                    "array" => param.array = Some(e.inner_text()?),
                    "defval" => param.defval = Some(LinkedText::from_xml(e, diags)?),
                    "typeconstraint" => param.type_constraint = Some(LinkedText::from_xml(e, diags)?),
                    "briefdescription" => param.brief = Some(Description::from_xml(e, diags)?),
                    _ => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                },
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(param)
    }
}

/// `<templateparamlist>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParamList {
    pub params: Vec<Param>,
}

impl TemplateParamList {
    /// `template <typename T, int N = 3>`.
    pub fn declaration(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::signature).collect();
        format!("template <{}>", params.join(", "))
    }
}

impl FromXml for TemplateParamList {
    const TYPE_NAME: &'static str = "TemplateParamList";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &[], diags);
        let mut params = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "param" => params.push(Param::from_xml(e, diags)?),
                XmlNode::Element(e) => diags.unknown_element(Self::TYPE_NAME, &el.name, &e.name),
                XmlNode::Text(t) => check_text(Self::TYPE_NAME, el, t, diags),
            }
        }
        Ok(TemplateParamList { params })
    }
}
