//! Description markup (`descriptionType` and the `doc*` family).
//!
//! Mixed content becomes an ordered `Vec<DocNode>`; plain text is the
//! [`DocNode::Text`] variant so that text and markup keep their relative
//! order. Element names that have no variant are reported and skipped.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::linked_text::RefKind;
use crate::model::listing::Listing;
use crate::model::{check_attributes, flag, number, owned, FromXml};
use crate::node::{XmlElement, XmlNode};

const OWNER: &str = "DocNode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Bold,
    Emphasis,
    ComputerOutput,
    Underline,
    Strike,
    Del,
    Ins,
    Subscript,
    Superscript,
    Small,
    Center,
    Cite,
    Kbd,
}

impl TextStyle {
    fn from_element(name: &str) -> Option<Self> {
        Some(match name {
            "bold" => TextStyle::Bold,
            "emphasis" => TextStyle::Emphasis,
            "computeroutput" => TextStyle::ComputerOutput,
            "underline" => TextStyle::Underline,
            "strike" | "s" => TextStyle::Strike,
            "del" => TextStyle::Del,
            "ins" => TextStyle::Ins,
            "subscript" => TextStyle::Subscript,
            "superscript" => TextStyle::Superscript,
            "small" => TextStyle::Small,
            "center" => TextStyle::Center,
            "cite" => TextStyle::Cite,
            "kbd" => TextStyle::Kbd,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterName {
    pub direction: Option<String>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterItem {
    pub names: Vec<ParameterName>,
    pub types: Vec<Vec<DocNode>>,
    pub description: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableListEntry {
    pub term: Vec<DocNode>,
    pub body: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub header: bool,
    pub colspan: Option<i64>,
    pub rowspan: Option<i64>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub caption: Option<Vec<DocNode>>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    Text(String),
    Para(Vec<DocNode>),
    Styled {
        style: TextStyle,
        children: Vec<DocNode>,
    },
    Ref {
        refid: String,
        kindref: RefKind,
        external: Option<String>,
        children: Vec<DocNode>,
    },
    Ulink {
        url: String,
        children: Vec<DocNode>,
    },
    Anchor {
        id: String,
    },
    LineBreak,
    HorizontalRule,
    Heading {
        level: u8,
        children: Vec<DocNode>,
    },
    /// `sect1` .. `sect4`.
    Section {
        level: u8,
        id: Option<String>,
        title: Vec<DocNode>,
        children: Vec<DocNode>,
    },
    Internal(Vec<DocNode>),
    /// `simplesect`: note, warning, return, see, ...; `par` carries a title.
    SimpleSect {
        kind: String,
        title: Option<Vec<DocNode>>,
        children: Vec<DocNode>,
    },
    ParameterList {
        kind: String,
        items: Vec<ParameterItem>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<DocNode>>,
    },
    VariableList(Vec<VariableListEntry>),
    ProgramListing(Listing),
    Verbatim(String),
    Preformatted(Vec<DocNode>),
    Image {
        kind: String,
        name: String,
        width: Option<String>,
        height: Option<String>,
        caption: Vec<DocNode>,
    },
    Formula {
        id: String,
        text: String,
    },
    Table(Table),
    /// `xrefsect`: todo, bug, deprecated and custom `\xrefitem` lists.
    XRefSect {
        id: String,
        title: String,
        children: Vec<DocNode>,
    },
    BlockQuote(Vec<DocNode>),
    ParBlock(Vec<DocNode>),
    Emoji {
        name: String,
        unicode: String,
    },
}

/// `<briefdescription>`, `<detaileddescription>`, `<inbodydescription>`,
/// and `<description>` of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub element: String,
    pub title: Option<String>,
    pub children: Vec<DocNode>,
}

impl Description {
    /// True when there is nothing but whitespace to show.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(DocNode::is_blank)
    }
}

impl FromXml for Description {
    const TYPE_NAME: &'static str = "Description";

    fn from_xml(el: &XmlElement, diags: &mut Diagnostics) -> Result<Self> {
        check_attributes(Self::TYPE_NAME, el, &[], diags);
        let mut title = None;
        let mut children = Vec::new();
        for child in &el.children {
            match child {
                XmlNode::Element(e) if e.name == "title" => title = Some(plain_text(&parse_content(e, diags)?)),
                XmlNode::Element(e) => {
                    if let Some(node) = parse_node(e, diags)? {
                        children.push(node);
                    }
                }
                XmlNode::Text(t) => children.push(DocNode::Text(t.clone())),
            }
        }
        Ok(Description {
            element: el.name.clone(),
            title,
            children,
        })
    }
}

impl DocNode {
    fn is_blank(&self) -> bool {
        match self {
            DocNode::Text(t) => t.trim().is_empty(),
            DocNode::Para(children) | DocNode::ParBlock(children) => {
                children.iter().all(DocNode::is_blank)
            }
            _ => false,
        }
    }
}

/// Flatten a node list to text, dropping markup.
pub fn plain_text(nodes: &[DocNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[DocNode], out: &mut String) {
    for node in nodes {
        match node {
            DocNode::Text(t) => out.push_str(t),
            DocNode::Para(c)
            | DocNode::Styled { children: c, .. }
            | DocNode::Ref { children: c, .. }
            | DocNode::Ulink { children: c, .. }
            | DocNode::Heading { children: c, .. }
            | DocNode::Section { children: c, .. }
            | DocNode::Internal(c)
            | DocNode::SimpleSect { children: c, .. }
            | DocNode::Preformatted(c)
            | DocNode::XRefSect { children: c, .. }
            | DocNode::BlockQuote(c)
            | DocNode::ParBlock(c) => collect_text(c, out),
            DocNode::Verbatim(t) | DocNode::Formula { text: t, .. } => out.push_str(t),
            DocNode::Emoji { unicode, .. } => out.push_str(unicode),
            DocNode::LineBreak => out.push('\n'),
            _ => {}
        }
    }
}

/// Parse the mixed content of `el`.
pub fn parse_content(el: &XmlElement, diags: &mut Diagnostics) -> Result<Vec<DocNode>> {
    let mut nodes = Vec::new();
    for child in &el.children {
        match child {
            XmlNode::Text(t) => nodes.push(DocNode::Text(t.clone())),
            XmlNode::Element(e) => {
                if let Some(node) = parse_node(e, diags)? {
                    nodes.push(node);
                }
            }
        }
    }
    Ok(nodes)
}

/// Doxygen's empty elements for typographic characters.
fn special_character(name: &str) -> Option<&'static str> {
    Some(match name {
        "nonbreakablespace" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "copy" => "\u{a9}",
        "registered" => "\u{ae}",
        "trademark" | "tm" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "middot" => "\u{b7}",
        "sect" => "\u{a7}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "harr" => "\u{2194}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        _ => return None,
    })
}

/// Index-only markup that has no place in rendered prose.
fn is_silent(name: &str) -> bool {
    matches!(name, "indexentry" | "toclist")
}

fn parse_node(e: &XmlElement, diags: &mut Diagnostics) -> Result<Option<DocNode>> {
    if let Some(style) = TextStyle::from_element(&e.name) {
        check_attributes(OWNER, e, &[], diags);
        return Ok(Some(DocNode::Styled {
            style,
            children: parse_content(e, diags)?,
        }));
    }
    if let Some(ch) = special_character(&e.name) {
        return Ok(Some(DocNode::Text(ch.to_string())));
    }
    if is_silent(&e.name) {
        return Ok(None);
    }

    let node = match e.name.as_str() {
        "para" => {
            check_attributes(OWNER, e, &[], diags);
            DocNode::Para(parse_content(e, diags)?)
        }
        "ref" => {
            check_attributes(OWNER, e, &["refid", "kindref", "external"], diags);
            DocNode::Ref {
                refid: e.attribute_str("refid")?.to_string(),
                kindref: RefKind::parse(e)?,
                external: owned(e, "external"),
                children: parse_content(e, diags)?,
            }
        }
        "ulink" => {
            check_attributes(OWNER, e, &["url"], diags);
            DocNode::Ulink {
                url: e.attribute_str("url")?.to_string(),
                children: parse_content(e, diags)?,
            }
        }
        "anchor" => {
            check_attributes(OWNER, e, &["id"], diags);
            DocNode::Anchor {
                id: e.attribute_str("id")?.to_string(),
            }
        }
        "linebreak" => DocNode::LineBreak,
        "hruler" => DocNode::HorizontalRule,
        "heading" => {
            check_attributes(OWNER, e, &["level"], diags);
            DocNode::Heading {
                level: heading_level(e)?,
                children: parse_content(e, diags)?,
            }
        }
        "sect1" | "sect2" | "sect3" | "sect4" | "sect5" | "sect6" => parse_section(e, diags)?,
        "internal" => DocNode::Internal(parse_content(e, diags)?),
        "simplesect" => parse_simplesect(e, diags)?,
        "parameterlist" => parse_parameterlist(e, diags)?,
        "itemizedlist" | "orderedlist" => {
            check_attributes(OWNER, e, &["type", "start"], diags);
            let mut items = Vec::new();
            for item in e.elements() {
                if item.name == "listitem" {
                    check_attributes(OWNER, item, &["override", "value"], diags);
                    items.push(parse_content(item, diags)?);
                } else {
                    diags.unknown_element(OWNER, &e.name, &item.name);
                }
            }
            DocNode::List {
                ordered: e.name == "orderedlist",
                items,
            }
        }
        "variablelist" => parse_variablelist(e, diags)?,
        "programlisting" => DocNode::ProgramListing(Listing::from_xml(e, diags)?),
        "verbatim" => DocNode::Verbatim(e.inner_text()?),
        "preformatted" => DocNode::Preformatted(parse_content(e, diags)?),
        "image" => {
            check_attributes(
                OWNER,
                e,
                &["type", "name", "width", "height", "alt", "inline", "caption"],
                diags,
            );
            DocNode::Image {
                kind: e.attribute_str("type")?.to_string(),
                name: e.attribute_str("name")?.to_string(),
                width: owned(e, "width"),
                height: owned(e, "height"),
                caption: parse_content(e, diags)?,
            }
        }
        "formula" => {
            check_attributes(OWNER, e, &["id"], diags);
            DocNode::Formula {
                id: e.attribute_str("id")?.to_string(),
                text: e.inner_text()?,
            }
        }
        "table" => parse_table(e, diags)?,
        "xrefsect" => parse_xrefsect(e, diags)?,
        "blockquote" => DocNode::BlockQuote(parse_content(e, diags)?),
        "parblock" => DocNode::ParBlock(parse_content(e, diags)?),
        "emoji" => {
            check_attributes(OWNER, e, &["name", "unicode"], diags);
            DocNode::Emoji {
                name: e.attribute_str("name")?.to_string(),
                unicode: e.attribute_str("unicode")?.to_string(),
            }
        }
        _ => {
            diags.unknown_element(OWNER, "description", &e.name);
            return Ok(None);
        }
    };
    Ok(Some(node))
}

fn heading_level(e: &XmlElement) -> Result<u8> {
    let level = e.attribute_number("level")?;
    u8::try_from(level)
        .ok()
        .filter(|l| (1..=6).contains(l))
        .ok_or_else(|| Error::invalid_attribute(&e.name, "level", &level.to_string()))
}

fn parse_section(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    check_attributes(OWNER, e, &["id"], diags);
    // "sectN" -> N
    let level = e.name[4..].parse().unwrap_or(1);
    let mut title = Vec::new();
    let mut children = Vec::new();
    for child in &e.children {
        match child {
            XmlNode::Element(t) if t.name == "title" => title = parse_content(t, diags)?,
            XmlNode::Element(c) => {
                if let Some(node) = parse_node(c, diags)? {
                    children.push(node);
                }
            }
            XmlNode::Text(t) => children.push(DocNode::Text(t.clone())),
        }
    }
    Ok(DocNode::Section {
        level,
        id: owned(e, "id"),
        title,
        children,
    })
}

fn parse_simplesect(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    check_attributes(OWNER, e, &["kind"], diags);
    let mut title = None;
    let mut children = Vec::new();
    for child in &e.children {
        match child {
            XmlNode::Element(t) if t.name == "title" => title = Some(parse_content(t, diags)?),
            XmlNode::Element(c) => {
                if let Some(node) = parse_node(c, diags)? {
                    children.push(node);
                }
            }
            XmlNode::Text(t) => children.push(DocNode::Text(t.clone())),
        }
    }
    Ok(DocNode::SimpleSect {
        kind: e.attribute_str("kind")?.to_string(),
        title,
        children,
    })
}

fn parse_parameterlist(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    check_attributes(OWNER, e, &["kind"], diags);
    let mut items = Vec::new();
    for item in e.elements() {
        if item.name != "parameteritem" {
            diags.unknown_element(OWNER, &e.name, &item.name);
            continue;
        }
        let mut names = Vec::new();
        let mut types = Vec::new();
        let mut description = Vec::new();
        for part in item.elements() {
            match part.name.as_str() {
                "parameternamelist" => {
                    for entry in part.elements() {
                        match entry.name.as_str() {
                            "parametername" => {
                                check_attributes(OWNER, entry, &["direction"], diags);
                                names.push(ParameterName {
                                    direction: owned(entry, "direction"),
                                    children: parse_content(entry, diags)?,
                                });
                            }
                            "parametertype" => types.push(parse_content(entry, diags)?),
                            _ => diags.unknown_element(OWNER, &part.name, &entry.name),
                        }
                    }
                }
                "parameterdescription" => description = parse_content(part, diags)?,
                _ => diags.unknown_element(OWNER, &item.name, &part.name),
            }
        }
        items.push(ParameterItem {
            names,
            types,
            description,
        });
    }
    Ok(DocNode::ParameterList {
        kind: e.attribute_str("kind")?.to_string(),
        items,
    })
}

fn parse_variablelist(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    let mut entries = Vec::new();
    let mut pending_term: Option<Vec<DocNode>> = None;
    for child in e.elements() {
        match child.name.as_str() {
            "varlistentry" => {
                let term = match child.inner_elements("term").next() {
                    Some(term) => parse_content(term, diags)?,
                    None => parse_content(child, diags)?,
                };
                pending_term = Some(term);
            }
            "listitem" => entries.push(VariableListEntry {
                term: pending_term.take().unwrap_or_default(),
                body: parse_content(child, diags)?,
            }),
            _ => diags.unknown_element(OWNER, &e.name, &child.name),
        }
    }
    Ok(DocNode::VariableList(entries))
}

fn parse_table(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    check_attributes(OWNER, e, &["rows", "cols", "width"], diags);
    let mut table = Table::default();
    for child in e.elements() {
        match child.name.as_str() {
            "caption" => table.caption = Some(parse_content(child, diags)?),
            "row" => {
                let mut cells = Vec::new();
                for entry in child.elements() {
                    if entry.name != "entry" {
                        diags.unknown_element(OWNER, &child.name, &entry.name);
                        continue;
                    }
                    check_attributes(
                        OWNER,
                        entry,
                        &["thead", "colspan", "rowspan", "align", "valign", "width", "class"],
                        diags,
                    );
                    cells.push(TableCell {
                        header: flag(entry, "thead")?,
                        colspan: number(entry, "colspan")?,
                        rowspan: number(entry, "rowspan")?,
                        children: parse_content(entry, diags)?,
                    });
                }
                table.rows.push(cells);
            }
            _ => diags.unknown_element(OWNER, &e.name, &child.name),
        }
    }
    Ok(DocNode::Table(table))
}

fn parse_xrefsect(e: &XmlElement, diags: &mut Diagnostics) -> Result<DocNode> {
    check_attributes(OWNER, e, &["id"], diags);
    let mut title = String::new();
    let mut children = Vec::new();
    for child in e.elements() {
        match child.name.as_str() {
            "xreftitle" => title = child.inner_text()?,
            "xrefdescription" => children = parse_content(child, diags)?,
            _ => diags.unknown_element(OWNER, &e.name, &child.name),
        }
    }
    Ok(DocNode::XRefSect {
        id: e.attribute_str("id")?.to_string(),
        title,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> (Description, Diagnostics) {
        let el = XmlElement::parse(xml).unwrap();
        let mut diags = Diagnostics::new();
        let desc = Description::from_xml(&el, &mut diags).unwrap();
        (desc, diags)
    }

    #[test]
    fn paragraph_children_keep_order() {
        let (desc, diags) = parse(
            "<detaileddescription><para>Draws a <bold>filled</bold> \
             <ref refid=\"classgeo_1_1_shape\" kindref=\"compound\">Shape</ref> now.</para>\
             </detaileddescription>",
        );
        assert!(diags.is_empty());
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para, got {:?}", desc.children[0]);
        };
        assert_eq!(children.len(), 5);
        assert_eq!(children[0], DocNode::Text("Draws a ".to_string()));
        assert!(matches!(children[1], DocNode::Styled { style: TextStyle::Bold, .. }));
        assert_eq!(children[2], DocNode::Text(" ".to_string()));
        assert!(matches!(children[3], DocNode::Ref { kindref: RefKind::Compound, .. }));
        assert_eq!(children[4], DocNode::Text(" now.".to_string()));
    }

    #[test]
    fn para_is_a_paragraph_not_a_character() {
        let (desc, diags) = parse("<briefdescription><para>text <bold>b</bold></para></briefdescription>");
        assert!(diags.is_empty());
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para, got {:?}", desc.children[0]);
        };
        assert_eq!(children[0], DocNode::Text("text ".to_string()));
        assert!(matches!(&children[1], DocNode::Styled { style: TextStyle::Bold, children } if plain_text(children) == "b"));
        assert_eq!(plain_text(&desc.children), "text b");
    }

    #[test]
    fn empty_brief_is_empty() {
        let (desc, _) = parse("<briefdescription>\n</briefdescription>");
        assert!(desc.is_empty());
        let (desc, _) = parse("<briefdescription><para>  </para></briefdescription>");
        assert!(desc.is_empty());
        let (desc, _) = parse("<briefdescription><para>x</para></briefdescription>");
        assert!(!desc.is_empty());
    }

    #[test]
    fn simplesect_and_parameterlist() {
        let (desc, diags) = parse(
            "<detaileddescription><para>\
             <parameterlist kind=\"param\"><parameteritem><parameternamelist>\
             <parametername direction=\"in\">w</parametername></parameternamelist>\
             <parameterdescription><para>Width.</para></parameterdescription>\
             </parameteritem></parameterlist>\
             <simplesect kind=\"return\"><para>Area.</para></simplesect>\
             </para></detaileddescription>",
        );
        assert!(diags.is_empty());
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        match &children[0] {
            DocNode::ParameterList { kind, items } => {
                assert_eq!(kind, "param");
                assert_eq!(items[0].names[0].direction.as_deref(), Some("in"));
                assert_eq!(plain_text(&items[0].names[0].children), "w");
                assert_eq!(plain_text(&items[0].description), "Width.");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(&children[1], DocNode::SimpleSect { kind, .. } if kind == "return"));
    }

    #[test]
    fn special_characters_become_text() {
        let (desc, _) = parse("<briefdescription><para>a<ndash/>b</para></briefdescription>");
        assert_eq!(plain_text(&desc.children), "a\u{2013}b");
    }

    #[test]
    fn unknown_markup_is_reported_and_skipped() {
        let (desc, diags) = parse(
            "<detaileddescription><para>before<blink>x</blink>after</para></detaileddescription>",
        );
        assert_eq!(plain_text(&desc.children), "beforeafter");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn sections_and_tables() {
        let (desc, diags) = parse(
            "<detaileddescription><sect1 id=\"s1\"><title>Usage</title><para>\
             <table rows=\"2\" cols=\"1\"><row><entry thead=\"yes\"><para>H</para></entry></row>\
             <row><entry thead=\"no\"><para>v</para></entry></row></table>\
             </para></sect1></detaileddescription>",
        );
        assert!(diags.is_empty());
        match &desc.children[0] {
            DocNode::Section { level, id, title, children } => {
                assert_eq!(*level, 1);
                assert_eq!(id.as_deref(), Some("s1"));
                assert_eq!(plain_text(title), "Usage");
                let DocNode::Para(p) = &children[0] else { panic!("expected para") };
                let DocNode::Table(t) = &p[0] else { panic!("expected table") };
                assert_eq!(t.rows.len(), 2);
                assert!(t.rows[0][0].header);
                assert!(!t.rows[1][0].header);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn xrefsect() {
        let (desc, _) = parse(
            "<detaileddescription><para><xrefsect id=\"todo_1_todo000001\">\
             <xreftitle>Todo</xreftitle><xrefdescription><para>Speed up.</para></xrefdescription>\
             </xrefsect></para></detaileddescription>",
        );
        let DocNode::Para(p) = &desc.children[0] else { panic!("expected para") };
        assert!(matches!(&p[0], DocNode::XRefSect { title, .. } if title == "Todo"));
    }
}
