//! Description trees to MDX.
//!
//! Doxygen nests block constructs (lists, notes, code) inside `<para>`, so a
//! paragraph is rendered as alternating runs of inline text and blocks.

use doxygen_xml::model::description::{plain_text, ParameterItem, Table, VariableListEntry};
use doxygen_xml::model::listing::{HighlightItem, Listing};
use doxygen_xml::{DocNode, LinkedText, LinkedTextItem, RefKind, RefText, TextStyle};

use crate::render::markdown::{admonition, escape_attribute, escape_text, indent_continuation, join_blocks, link};
use crate::view::resolver::member_anchor;
use crate::view::{Result, ViewModel};

/// Renders text that belongs to the page of compound `current`.
pub struct DocRenderer<'r, 'a> {
    view: &'r ViewModel<'a>,
    current: &'r str,
}

fn style_tag(style: TextStyle) -> &'static str {
    match style {
        TextStyle::Bold => "b",
        TextStyle::Emphasis => "em",
        TextStyle::ComputerOutput => "code",
        TextStyle::Underline => "u",
        TextStyle::Strike => "s",
        TextStyle::Del => "del",
        TextStyle::Ins => "ins",
        TextStyle::Subscript => "sub",
        TextStyle::Superscript => "sup",
        TextStyle::Small => "small",
        TextStyle::Center => "center",
        TextStyle::Cite => "cite",
        TextStyle::Kbd => "kbd",
    }
}

fn is_block(node: &DocNode) -> bool {
    !matches!(
        node,
        DocNode::Text(_)
            | DocNode::Styled { .. }
            | DocNode::Ref { .. }
            | DocNode::Ulink { .. }
            | DocNode::Anchor { .. }
            | DocNode::LineBreak
            | DocNode::Formula { .. }
            | DocNode::Emoji { .. }
    )
}

/// Admonition type and title of a `simplesect` kind.
fn simple_sect(kind: &str) -> Option<(&'static str, &'static str)> {
    Some(match kind {
        "see" => ("info", "See Also"),
        "return" => ("info", "Returns"),
        "author" => ("info", "Author"),
        "authors" => ("info", "Authors"),
        "version" => ("info", "Version"),
        "since" => ("info", "Since"),
        "date" => ("info", "Date"),
        "note" => ("note", "Note"),
        "warning" => ("warning", "Warning"),
        "pre" => ("info", "Precondition"),
        "post" => ("info", "Postcondition"),
        "copyright" => ("info", "Copyright"),
        "invariant" => ("info", "Invariant"),
        "remark" => ("info", "Remarks"),
        "attention" => ("danger", "Attention"),
        "important" => ("tip", "Important"),
        "par" => ("info", ""),
        "rcs" => ("info", "RCS"),
        _ => return None,
    })
}

fn parameter_title(kind: &str) -> Option<&'static str> {
    Some(match kind {
        "param" => "Parameters",
        "retval" => "Return Values",
        "exception" => "Exceptions",
        "templateparam" => "Template Parameters",
        _ => return None,
    })
}

/// Leading spaces survive MDX paragraph folding only as entities.
fn keep_indentation(line: &str) -> String {
    let trimmed = line.trim_start_matches(' ');
    let indent = line.len() - trimmed.len();
    format!("{}{}", "&nbsp;".repeat(indent), trimmed)
}

impl<'r, 'a> DocRenderer<'r, 'a> {
    pub fn new(view: &'r ViewModel<'a>, current: &'r str) -> Self {
        DocRenderer { view, current }
    }

    /// Block-level markdown for a node list.
    pub fn blocks(&self, nodes: &[DocNode]) -> Result<String> {
        let mut out: Vec<String> = Vec::new();
        let mut run = String::new();
        for node in nodes {
            if is_block(node) {
                flush(&mut out, &mut run);
                out.push(self.block(node)?);
            } else {
                run.push_str(&self.inline_node(node)?);
            }
        }
        flush(&mut out, &mut run);
        Ok(join_blocks(&out))
    }

    /// Single-line rendering for table cells: paragraphs are joined with
    /// `<br/>`, nested blocks become HTML elements.
    pub fn inline(&self, nodes: &[DocNode]) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();
        let mut run = String::new();
        for node in nodes {
            match node {
                DocNode::Para(children) | DocNode::ParBlock(children) => {
                    flush(&mut parts, &mut run);
                    parts.push(self.inline(children)?);
                }
                n if is_block(n) => run.push_str(&self.inline_block(n)?),
                n => run.push_str(&self.inline_node(n)?),
            }
        }
        flush(&mut parts, &mut run);
        Ok(parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("<br/>"))
    }

    fn inline_node(&self, node: &DocNode) -> Result<String> {
        Ok(match node {
            DocNode::Text(t) => escape_text(&t.replace('\n', " ")),
            DocNode::Styled { style, children } => {
                let tag = style_tag(*style);
                format!("<{}>{}</{}>", tag, self.inline_run(children)?, tag)
            }
            DocNode::Ref {
                refid,
                kindref,
                external,
                children,
            } => {
                let text = self.inline_run(children)?;
                self.reference(refid, *kindref, external.as_deref(), text)?
            }
            DocNode::Ulink { url, children } => link(url, &self.inline_run(children)?),
            DocNode::Anchor { id } => format!("<a id=\"{}\"></a>", escape_attribute(member_anchor(id))),
            DocNode::LineBreak => "<br/>".to_string(),
            DocNode::Formula { text, .. } => format!("<code>{}</code>", escape_text(text)),
            DocNode::Emoji { name, unicode } => {
                if unicode.is_empty() {
                    escape_text(&format!(":{}:", name))
                } else {
                    unicode.clone()
                }
            }
            block => self.inline_block(block)?,
        })
    }

    /// A block construct on one line, for places where markdown blocks
    /// cannot appear.
    fn inline_block(&self, node: &DocNode) -> Result<String> {
        Ok(match node {
            DocNode::Para(children) | DocNode::ParBlock(children) | DocNode::Internal(children) => {
                self.inline(children)?
            }
            DocNode::Heading { children, .. } => format!("<b>{}</b><br/>", self.inline_run(children)?),
            DocNode::Section { title, children, .. } => {
                format!("<b>{}</b><br/>{}", self.inline_run(title)?, self.inline(children)?)
            }
            DocNode::SimpleSect { kind, title, children } => {
                let title = match title {
                    Some(t) => self.inline_run(t)?,
                    None => match simple_sect(kind) {
                        Some((_, t)) if !t.is_empty() => t.to_string(),
                        _ => escape_text(kind),
                    },
                };
                format!("<b>{}:</b> {}", title, self.inline(children)?)
            }
            DocNode::XRefSect { title, children, .. } => {
                format!("<b>{}:</b> {}", escape_text(title), self.inline(children)?)
            }
            DocNode::ParameterList { kind, items } => {
                let title = parameter_title(kind).unwrap_or("Parameters");
                let mut out = format!("<b>{}:</b><ul>", title);
                for item in items {
                    let names = self.parameter_names(item)?;
                    let description = self.inline(&item.description)?;
                    if description.is_empty() {
                        out.push_str(&format!("<li>{}</li>", names));
                    } else {
                        out.push_str(&format!("<li>{}: {}</li>", names, description));
                    }
                }
                out.push_str("</ul>");
                out
            }
            DocNode::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let mut out = format!("<{}>", tag);
                for item in items {
                    out.push_str(&format!("<li>{}</li>", self.inline(item)?));
                }
                out.push_str(&format!("</{}>", tag));
                out
            }
            DocNode::VariableList(entries) => {
                let mut out = "<dl>".to_string();
                for entry in entries {
                    out.push_str(&format!(
                        "<dt>{}</dt><dd>{}</dd>",
                        self.inline_run(&entry.term)?.trim(),
                        self.inline(&entry.body)?
                    ));
                }
                out.push_str("</dl>");
                out
            }
            DocNode::ProgramListing(listing) => {
                format!("<pre><code>{}</code></pre>", self.listing_rows(listing)?.join("<br/>"))
            }
            DocNode::Verbatim(text) => preformatted_inline(text),
            DocNode::Preformatted(children) => preformatted_inline(&plain_text(children)),
            DocNode::Table(table) => self.table_lines(table)?.concat(),
            DocNode::BlockQuote(children) => format!("<blockquote>{}</blockquote>", self.inline(children)?),
            DocNode::Image { .. } | DocNode::HorizontalRule => self.block(node)?,
            DocNode::Text(_)
            | DocNode::Styled { .. }
            | DocNode::Ref { .. }
            | DocNode::Ulink { .. }
            | DocNode::Anchor { .. }
            | DocNode::LineBreak
            | DocNode::Formula { .. }
            | DocNode::Emoji { .. } => self.inline_node(node)?,
        })
    }

    fn inline_run(&self, nodes: &[DocNode]) -> Result<String> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.inline_node(node)?);
        }
        Ok(out)
    }

    fn block(&self, node: &DocNode) -> Result<String> {
        Ok(match node {
            DocNode::Para(children) | DocNode::ParBlock(children) | DocNode::Internal(children) => {
                self.blocks(children)?
            }
            DocNode::Heading { level, children } => {
                let level = (*level).clamp(2, 6) as usize;
                format!("{} {}", "#".repeat(level), self.inline_run(children)?)
            }
            DocNode::Section {
                level,
                id,
                title,
                children,
            } => {
                let depth = (*level as usize + 1).min(6);
                let mut heading = format!("{} {}", "#".repeat(depth), self.inline_run(title)?);
                if let Some(id) = id {
                    heading.push_str(&format!(" {{#{}}}", member_anchor(id)));
                }
                join_blocks(&[heading, self.blocks(children)?])
            }
            DocNode::SimpleSect { kind, title, children } => {
                let (admonition_kind, default_title) = simple_sect(kind).unwrap_or_else(|| {
                    tracing::error!(kind = %kind, "simplesect kind not supported");
                    ("info", "")
                });
                let title = match title {
                    Some(t) => self.inline_run(t)?,
                    None if default_title.is_empty() => escape_text(kind),
                    None => default_title.to_string(),
                };
                admonition(admonition_kind, &title, &self.blocks(children)?)
            }
            DocNode::XRefSect { id, title, children } => {
                let kind = if id.starts_with("deprecated") {
                    "warning"
                } else if id.starts_with("bug") {
                    "danger"
                } else {
                    "info"
                };
                admonition(kind, &escape_text(title), &self.blocks(children)?)
            }
            DocNode::ParameterList { kind, items } => self.parameter_list(kind, items)?,
            DocNode::List { ordered, items } => {
                let mut lines = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let marker = if *ordered { format!("{}. ", i + 1) } else { "- ".to_string() };
                    let body = self.blocks(item)?;
                    let indent = " ".repeat(marker.len());
                    lines.push(format!("{}{}", marker, indent_continuation(&body, &indent)));
                }
                lines.join("\n")
            }
            DocNode::VariableList(entries) => self.variable_list(entries)?,
            DocNode::ProgramListing(listing) => self.listing(listing)?,
            DocNode::Verbatim(text) => format!("```\n{}\n```", text.trim_end_matches('\n')),
            DocNode::Preformatted(children) => {
                format!("```\n{}\n```", plain_text(children).trim_end_matches('\n'))
            }
            DocNode::Image {
                kind,
                name,
                width,
                height,
                caption,
            } => match kind.as_str() {
                "html" => {
                    let mut img = format!("<img src=\"{}\"", escape_attribute(name));
                    let alt = plain_text(caption);
                    if !alt.trim().is_empty() {
                        img.push_str(&format!(" alt=\"{}\"", escape_attribute(alt.trim())));
                    }
                    if let Some(w) = width {
                        img.push_str(&format!(" width=\"{}\"", escape_attribute(w)));
                    }
                    if let Some(h) = height {
                        img.push_str(&format!(" height=\"{}\"", escape_attribute(h)));
                    }
                    img.push_str(" />");
                    img
                }
                "latex" | "docbook" | "rtf" | "xml" => String::new(),
                other => {
                    tracing::error!(kind = other, image = %name, "image kind not supported");
                    String::new()
                }
            },
            DocNode::Table(table) => self.table(table)?,
            DocNode::BlockQuote(children) => self
                .blocks(children)?
                .lines()
                .map(|l| if l.is_empty() { ">".to_string() } else { format!("> {}", l) })
                .collect::<Vec<_>>()
                .join("\n"),
            DocNode::HorizontalRule => "<hr/>".to_string(),
            inline => self.inline_node(inline)?,
        })
    }

    fn parameter_list(&self, kind: &str, items: &[ParameterItem]) -> Result<String> {
        let title = parameter_title(kind).unwrap_or_else(|| {
            tracing::error!(kind, "parameter list kind not supported");
            "Parameters"
        });
        let mut lines = vec![format!("**{}**", title), String::new()];
        for item in items {
            let names = self.parameter_names(item)?;
            let description = self.blocks(&item.description)?;
            let entry = if description.is_empty() {
                names
            } else {
                format!("{}: {}", names, description)
            };
            lines.push(format!("- {}", indent_continuation(&entry, "  ")));
        }
        Ok(lines.join("\n"))
    }

    /// `<code>type name</code> \[dir\]`, comma separated. Types pair with
    /// names by position; a lone name with several types gets them all.
    fn parameter_names(&self, item: &ParameterItem) -> Result<String> {
        let mut types = Vec::with_capacity(item.types.len());
        for t in &item.types {
            types.push(self.inline_run(t)?.trim().to_string());
        }
        let mut names = Vec::with_capacity(item.names.len());
        for (i, name) in item.names.iter().enumerate() {
            let ty = if types.len() == item.names.len() {
                types[i].clone()
            } else {
                types.join(" | ")
            };
            let name_html = self.inline_run(&name.children)?;
            let mut n = if ty.is_empty() {
                format!("<code>{}</code>", name_html)
            } else {
                format!("<code>{} {}</code>", ty, name_html)
            };
            if let Some(direction) = &name.direction {
                n.push_str(&format!(" \\[{}\\]", escape_text(direction)));
            }
            names.push(n);
        }
        Ok(names.join(", "))
    }

    fn variable_list(&self, entries: &[VariableListEntry]) -> Result<String> {
        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            let term = self.inline_run(&entry.term)?;
            let body = self.blocks(&entry.body)?;
            lines.push(format!("- <b>{}</b>: {}", term.trim(), indent_continuation(&body, "  ")));
        }
        Ok(lines.join("\n"))
    }

    fn table(&self, table: &Table) -> Result<String> {
        Ok(self.table_lines(table)?.join("\n"))
    }

    fn table_lines(&self, table: &Table) -> Result<Vec<String>> {
        let mut lines = vec!["<table>".to_string()];
        if let Some(caption) = &table.caption {
            lines.push(format!("<caption>{}</caption>", self.inline_run(caption)?));
        }
        for row in &table.rows {
            lines.push("<tr>".to_string());
            for cell in row {
                let tag = if cell.header { "th" } else { "td" };
                let mut open = format!("<{}", tag);
                if let Some(span) = cell.colspan {
                    open.push_str(&format!(" colSpan=\"{}\"", span));
                }
                if let Some(span) = cell.rowspan {
                    open.push_str(&format!(" rowSpan=\"{}\"", span));
                }
                lines.push(format!("{}>{}</{}>", open, self.inline(&cell.children)?, tag));
            }
            lines.push("</tr>".to_string());
        }
        lines.push("</table>".to_string());
        Ok(lines)
    }

    /// Code as a `<pre>` block, references linked.
    pub fn listing(&self, listing: &Listing) -> Result<String> {
        Ok(format!("<pre><code>{}</code></pre>", self.listing_rows(listing)?.join("\n")))
    }

    fn listing_rows(&self, listing: &Listing) -> Result<Vec<String>> {
        let mut rows = Vec::with_capacity(listing.lines.len());
        for line in &listing.lines {
            let mut row = String::new();
            for highlight in &line.highlights {
                for item in &highlight.children {
                    match item {
                        HighlightItem::Text(t) => row.push_str(&escape_text(t)),
                        HighlightItem::Ref(r) => row.push_str(&self.ref_text(r)?),
                    }
                }
            }
            let row = keep_indentation(&row);
            rows.push(if row.is_empty() { "&nbsp;".to_string() } else { row });
        }
        Ok(rows)
    }

    /// Type expressions and initializers.
    pub fn linked_text(&self, text: &LinkedText) -> Result<String> {
        let mut out = String::new();
        for item in &text.children {
            match item {
                LinkedTextItem::Text(t) => out.push_str(&escape_text(t)),
                LinkedTextItem::Ref(r) => out.push_str(&self.ref_text(r)?),
            }
        }
        Ok(out)
    }

    fn ref_text(&self, r: &RefText) -> Result<String> {
        self.reference(&r.refid, r.kindref, r.external.as_deref(), escape_text(&r.text))
    }

    /// A link, or `html` alone when the target has no page.
    pub fn reference(&self, refid: &str, kind: RefKind, external: Option<&str>, html: String) -> Result<String> {
        if external.is_some() {
            return Ok(html);
        }
        Ok(match self.view.resolve(refid, kind, Some(self.current))? {
            Some(url) => link(&url, &html),
            None => html,
        })
    }
}

fn preformatted_inline(text: &str) -> String {
    let rows: Vec<String> = text
        .trim_end_matches('\n')
        .lines()
        .map(|l| keep_indentation(&escape_text(l)))
        .collect();
    format!("<pre><code>{}</code></pre>", rows.join("<br/>"))
}

fn flush(out: &mut Vec<String>, run: &mut String) {
    let text = run.trim();
    if !text.is_empty() {
        out.push(text.to_string());
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{class, corpus};
    use doxygen_xml::{Description, Diagnostics, FromXml, XmlElement};

    fn description(xml: &str) -> Description {
        Description::from_xml(&XmlElement::parse(xml).unwrap(), &mut Diagnostics::new()).unwrap()
    }

    fn fixture() -> doxygen_xml::Corpus {
        corpus(
            &[
                &class("classgeo_1_1_shape", "geo::Shape", &[], ""),
                &class("classgeo_1_1_widget", "geo::Widget", &[], ""),
            ],
            &[],
        )
    }

    #[test]
    fn paragraph_order_and_links() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para>A <bold>bold</bold> move, see \
             <ref refid=\"classgeo_1_1_shape\" kindref=\"compound\">Shape</ref> and \
             <ref refid=\"classgeo_1_1_widget_1a01\" kindref=\"member\">draw()</ref> &lt;here&gt;.</para>\
             </detaileddescription>",
        );
        assert_eq!(
            docs.blocks(&d.children).unwrap(),
            "A <b>bold</b> move, see <a href=\"/api/classes/geo/Shape\">Shape</a> and \
             <a href=\"#a01\">draw()</a> &lt;here&gt;."
        );
    }

    #[test]
    fn nested_blocks_split_paragraphs() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para>Before.<itemizedlist><listitem><para>one</para></listitem>\
             <listitem><para>two</para></listitem></itemizedlist>After.\
             <simplesect kind=\"note\"><para>Mind the gap.</para></simplesect></para></detaileddescription>",
        );
        assert_eq!(
            docs.blocks(&d.children).unwrap(),
            "Before.\n\n- one\n- two\n\nAfter.\n\n:::note Note\n\nMind the gap.\n\n:::"
        );
    }

    #[test]
    fn parameters_and_return() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para><parameterlist kind=\"param\"><parameteritem>\
             <parameternamelist><parametername direction=\"in\">width</parametername></parameternamelist>\
             <parameterdescription><para>The width.</para></parameterdescription>\
             </parameteritem></parameterlist></para></detaileddescription>",
        );
        assert_eq!(
            docs.blocks(&d.children).unwrap(),
            "**Parameters**\n\n- <code>width</code> \\[in\\]: The width."
        );
    }

    #[test]
    fn parameter_types_precede_names() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para><parameterlist kind=\"param\"><parameteritem>\
             <parameternamelist><parametertype><ref refid=\"classgeo_1_1_shape\" kindref=\"compound\">Shape</ref> &amp;</parametertype>\
             <parametername>target</parametername></parameternamelist>\
             <parameterdescription><para>Drawn on.</para></parameterdescription>\
             </parameteritem></parameterlist></para></detaileddescription>",
        );
        assert_eq!(
            docs.blocks(&d.children).unwrap(),
            "**Parameters**\n\n- <code><a href=\"/api/classes/geo/Shape\">Shape</a> &amp; target</code>: Drawn on."
        );
    }

    #[test]
    fn inline_keeps_lists_and_code() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para>Modes:<itemizedlist>\
             <listitem><para>FAST</para></listitem><listitem><para>SLOW</para></listitem></itemizedlist>\
             <programlisting><codeline><highlight class=\"normal\">run(FAST);</highlight></codeline>\
             <codeline><highlight class=\"normal\"><sp/><sp/>wait();</highlight></codeline></programlisting>\
             </para></detaileddescription>",
        );
        assert_eq!(
            docs.inline(&d.children).unwrap(),
            "Modes:<ul><li>FAST</li><li>SLOW</li></ul><pre><code>run(FAST);<br/>&nbsp;&nbsp;wait();</code></pre>"
        );
    }

    #[test]
    fn inline_notes_keep_their_title() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<briefdescription><para>Fast.<simplesect kind=\"warning\"><para>Not thread safe.</para></simplesect>\
             </para></briefdescription>",
        );
        assert_eq!(
            docs.inline(&d.children).unwrap(),
            "Fast.<b>Warning:</b> Not thread safe."
        );
    }

    #[test]
    fn emoji_without_unicode_is_escaped() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<briefdescription><para><emoji name=\"heavy_check_mark\" unicode=\"\"/></para></briefdescription>",
        );
        assert_eq!(docs.inline(&d.children).unwrap(), ":heavy\\_check\\_mark:");
    }

    #[test]
    fn external_and_unknown_targets() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let external = docs
            .reference("std_1a1", RefKind::Member, Some("cppreference.tag"), "std::move".to_string())
            .unwrap();
        assert_eq!(external, "std::move");
        assert!(docs
            .reference("classmissing", RefKind::Compound, None, "x".to_string())
            .is_err());
    }

    #[test]
    fn code_listing_keeps_indentation() {
        let corpus = fixture();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let d = description(
            "<detaileddescription><para><programlisting filename=\".cpp\">\
             <codeline><highlight class=\"normal\"><ref refid=\"classgeo_1_1_shape\" kindref=\"compound\">Shape</ref><sp/>s;</highlight></codeline>\
             <codeline><highlight class=\"normal\"></highlight></codeline>\
             <codeline><highlight class=\"normal\"><sp/><sp/>s.draw();</highlight></codeline>\
             </programlisting></para></detaileddescription>",
        );
        assert_eq!(
            docs.blocks(&d.children).unwrap(),
            "<pre><code><a href=\"/api/classes/geo/Shape\">Shape</a> s;\n&nbsp;\n&nbsp;&nbsp;s.draw();</code></pre>"
        );
    }
}
