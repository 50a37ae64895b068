use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::{check_attributes, check_no_children, number, owned, FromXml};
use crate::node::XmlElement;

/// `<location>`: where a compound or member is declared and defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: Option<i64>,
    pub column: Option<i64>,
    pub decl_file: Option<String>,
    pub decl_line: Option<i64>,
    pub decl_column: Option<i64>,
    pub body_file: Option<String>,
    pub body_start: Option<i64>,
    pub body_end: Option<i64>,
}

impl FromXml for Location {
    const TYPE_NAME: &'static str = "Location";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_no_children(Self::TYPE_NAME, el, diags);
        check_attributes(
            Self::TYPE_NAME,
            el,
            &[
                "file",
                "line",
                "column",
                "declfile",
                "declline",
                "declcolumn",
                "bodyfile",
                "bodystart",
                "bodyend",
            ],
            diags,
        );

        Ok(Location {
            file: el.attribute_str("file")?.to_string(),
            line: number(el, "line")?,
            column: number(el, "column")?,
            decl_file: owned(el, "declfile"),
            decl_line: number(el, "declline")?,
            decl_column: number(el, "declcolumn")?,
            body_file: owned(el, "bodyfile"),
            body_start: number(el, "bodystart")?,
            body_end: number(el, "bodyend")?,
        })
    }
}
