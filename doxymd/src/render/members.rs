//! Member sections of a compound page.

use doxygen_xml::model::refs::ReimplementRef;
use doxygen_xml::{MemberDef, MemberKind, RefKind, Virtualness};

use crate::render::description::DocRenderer;
use crate::render::markdown::{escape_text, join_blocks, link, table};
use crate::view::resolver::member_anchor;
use crate::view::sections::Section;
use crate::view::{Result, ViewModel};

pub struct MemberWriter<'r, 'a> {
    view: &'r ViewModel<'a>,
    docs: &'r DocRenderer<'r, 'a>,
    suggest_todo: bool,
}

/// Labels shown under a member declaration.
pub fn labels(m: &MemberDef) -> Vec<&'static str> {
    let mut labels = Vec::new();
    let flags = &m.flags;
    let args: String = m
        .argsstring
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if flags.is_static {
        labels.push("static");
    }
    if flags.is_inline {
        labels.push("inline");
    }
    if flags.is_explicit {
        labels.push("explicit");
    }
    if flags.is_constexpr {
        labels.push("constexpr");
    }
    if flags.is_const {
        labels.push("const");
    }
    if flags.is_mutable {
        labels.push("mutable");
    }
    match m.virt {
        Some(Virtualness::Virtual) => labels.push("virtual"),
        Some(Virtualness::PureVirtual) => labels.push("pure virtual"),
        _ => {}
    }
    if flags.is_noexcept {
        labels.push("noexcept");
    }
    if args.contains(")override") || args.ends_with("override") {
        labels.push("override");
    }
    if flags.is_final || args.contains(")final") {
        labels.push("final");
    }
    if m.is_deleted_or_defaulted() {
        labels.push(if args.ends_with("=delete") { "delete" } else { "default" });
    }
    labels
}

impl<'r, 'a> MemberWriter<'r, 'a> {
    pub fn new(view: &'r ViewModel<'a>, docs: &'r DocRenderer<'r, 'a>, suggest_todo: bool) -> Self {
        MemberWriter {
            view,
            docs,
            suggest_todo,
        }
    }

    pub fn sections(&self, sections: &[Section<'_>]) -> Result<Vec<String>> {
        let mut blocks = Vec::new();
        for section in sections {
            blocks.push(format!("## {} {{#{}}}", escape_text(&section.title), section.anchor()));
            if let Some(description) = section.description {
                blocks.push(self.docs.blocks(&description.children)?);
            }
            for member in &section.members {
                blocks.push(self.member(member)?);
            }
        }
        Ok(blocks)
    }

    pub fn member(&self, m: &MemberDef) -> Result<String> {
        let mut blocks = vec![format!(
            "### {} {{#{}}}",
            escape_text(&m.name),
            member_anchor(&m.id)
        )];

        blocks.push(format!("<code>{}</code>", self.declaration(m)?));

        let labels = labels(m);
        if !labels.is_empty() {
            let badges: Vec<String> = labels.iter().map(|l| format!("`{}`", l)).collect();
            blocks.push(badges.join(" "));
        }

        let brief = self.docs.blocks(&m.brief.children)?;
        let detailed = self.docs.blocks(&m.detailed.children)?;
        let inbody = self.docs.blocks(&m.inbody.children)?;
        if brief.is_empty() && detailed.is_empty() && self.suggest_todo {
            blocks.push("TODO: add description".to_string());
        }
        blocks.push(brief);
        blocks.push(detailed);
        blocks.push(inbody);

        if !m.enum_values.is_empty() {
            blocks.push(self.enum_values(m)?);
        }
        blocks.push(self.location(m));
        blocks.push(self.reimplements("Reimplements", &m.reimplements)?);
        blocks.push(self.reimplements("Reimplemented in", &m.reimplemented_by)?);
        Ok(join_blocks(&blocks))
    }

    /// One-line declaration with linked types.
    pub fn declaration(&self, m: &MemberDef) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(tpl) = &m.template_params {
            parts.push(escape_text(&tpl.declaration()));
        }
        let ty = match &m.member_type {
            Some(t) if !t.is_empty() => Some(self.docs.linked_text(t)?),
            _ => None,
        };
        let name = escape_text(&m.name);
        let args = escape_text(m.argsstring.as_deref().unwrap_or(""));
        match m.kind {
            MemberKind::Define => {
                let mut decl = format!("#define {}", name);
                if !m.params.is_empty() {
                    let names: Vec<String> = m
                        .params
                        .iter()
                        .map(|p| escape_text(p.defname.as_deref().or(p.declname.as_deref()).unwrap_or("")))
                        .collect();
                    decl.push_str(&format!("({})", names.join(", ")));
                }
                parts.push(decl);
                if let Some(init) = &m.initializer {
                    parts.push(self.docs.linked_text(init)?);
                }
            }
            MemberKind::Typedef => {
                let using = m.definition.as_deref().is_some_and(|d| d.trim_start().starts_with("using"));
                if using {
                    parts.push(format!("using {} =", name));
                    parts.extend(ty);
                } else {
                    parts.push("typedef".to_string());
                    parts.extend(ty);
                    parts.push(format!("{}{}", name, args));
                }
            }
            MemberKind::Enum => {
                parts.push(if m.flags.is_strong { "enum class" } else { "enum" }.to_string());
                parts.push(name);
                if let Some(t) = ty {
                    parts.push(format!(": {}", t));
                }
            }
            MemberKind::Friend => {
                parts.push("friend".to_string());
                parts.extend(ty);
                parts.push(format!("{}{}", name, args));
            }
            _ => {
                if matches!(m.virt, Some(Virtualness::Virtual | Virtualness::PureVirtual)) {
                    parts.push("virtual".to_string());
                }
                if m.flags.is_static {
                    parts.push("static".to_string());
                }
                parts.extend(ty);
                parts.push(format!("{}{}", name, args));
                if let Some(init) = &m.initializer {
                    if !init.is_empty() {
                        parts.push(self.docs.linked_text(init)?);
                    }
                }
            }
        }
        Ok(parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.trim().to_string())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn enum_values(&self, m: &MemberDef) -> Result<String> {
        let mut rows = Vec::with_capacity(m.enum_values.len());
        for value in &m.enum_values {
            let name = format!(
                "<a id=\"{}\"></a><code>{}</code>",
                member_anchor(&value.id),
                escape_text(&value.name)
            );
            let init = match &value.initializer {
                Some(i) => self.docs.linked_text(i)?,
                None => String::new(),
            };
            let mut description = self.docs.inline(&value.brief.children)?;
            let detailed = self.docs.inline(&value.detailed.children)?;
            if !detailed.is_empty() {
                if !description.is_empty() {
                    description.push_str("<br/>");
                }
                description.push_str(&detailed);
            }
            rows.push(vec![name, init, description]);
        }
        Ok(table(&["Enumerator", "Value", "Description"], &rows))
    }

    fn location(&self, m: &MemberDef) -> String {
        let loc = &m.location;
        let file = loc.decl_file.as_deref().unwrap_or(&loc.file);
        let line = if loc.decl_file.is_some() { loc.decl_line } else { loc.line };
        let name = file.rsplit('/').next().unwrap_or(file);
        let file_html = match self.view.file_by_path(file) {
            Some(idx) => link(&self.view.url(idx), &escape_text(name)),
            None => escape_text(name),
        };
        match line {
            Some(line) => format!("Definition at line {} of file {}.", line, file_html),
            None => format!("Definition in file {}.", file_html),
        }
    }

    fn reimplements(&self, label: &str, refs: &[ReimplementRef]) -> Result<String> {
        if refs.is_empty() {
            return Ok(String::new());
        }
        let mut links = Vec::with_capacity(refs.len());
        for r in refs {
            let text = escape_text(&self.qualified(r));
            links.push(self.docs.reference(&r.refid, RefKind::Member, None, text)?);
        }
        Ok(format!("{} {}.", label, links.join(", ")))
    }

    /// `Base::name` for a reimplemented member, when the owner is known.
    fn qualified(&self, r: &ReimplementRef) -> String {
        match self.view.member(&r.refid) {
            Some(entry) => format!("{}::{}", self.view.compounds[entry.compound].index_name, entry.def.name),
            None => r.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{class, corpus};
    use doxygen_xml::{Diagnostics, FromXml, XmlElement};

    fn member(xml: &str) -> MemberDef {
        MemberDef::from_xml(&XmlElement::parse(xml).unwrap(), &mut Diagnostics::new()).unwrap()
    }

    #[test]
    fn label_set() {
        let m = member(
            "<memberdef kind=\"function\" id=\"c_1a1\" prot=\"public\" static=\"no\" const=\"yes\" \
             inline=\"yes\" virt=\"virtual\"><argsstring>() const override</argsstring><name>area</name>\
             <location file=\"w.h\"/></memberdef>",
        );
        assert_eq!(labels(&m), vec!["inline", "const", "virtual", "override"]);

        let deleted = member(
            "<memberdef kind=\"function\" id=\"c_1a2\" prot=\"public\" static=\"no\">\
             <argsstring>(const Widget &amp;) = delete</argsstring><name>Widget</name>\
             <location file=\"w.h\"/></memberdef>",
        );
        assert_eq!(labels(&deleted), vec!["delete"]);
    }

    #[test]
    fn declaration_links_types_and_location_links_file() {
        let shape = class("classgeo_1_1_shape", "geo::Shape", &[], "");
        let file = "<compounddef id=\"shapes_8h\" kind=\"file\"><compoundname>shapes.h</compoundname>\
                    <location file=\"include/geo/shapes.h\"/></compounddef>";
        let corpus = corpus(&[&shape, file], &[]);
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "classgeo_1_1_widget");
        let writer = MemberWriter::new(&view, &docs, true);
        let m = member(
            "<memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a7\" prot=\"public\" static=\"yes\">\
             <type>const <ref refid=\"classgeo_1_1_shape\" kindref=\"compound\">Shape</ref> &amp;</type>\
             <argsstring>(int n)</argsstring><name>pick</name>\
             <location file=\"include/geo/shapes.h\" line=\"42\"/></memberdef>",
        );
        assert_eq!(
            writer.declaration(&m).unwrap(),
            "static const <a href=\"/api/classes/geo/Shape\">Shape</a> &amp; pick(int n)"
        );
        let rendered = writer.member(&m).unwrap();
        assert!(rendered.starts_with("### pick {#a7}\n\n<code>"));
        assert!(rendered.contains("`static`"));
        assert!(rendered.contains("TODO: add description"));
        assert!(rendered.contains(
            "Definition at line 42 of file <a href=\"/api/files/include/geo/shapes-h\">shapes.h</a>."
        ));
    }

    #[test]
    fn enum_values_get_anchors() {
        let corpus = corpus(&[], &[]);
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "namespacegeo");
        let writer = MemberWriter::new(&view, &docs, false);
        let m = member(
            "<memberdef kind=\"enum\" id=\"namespacegeo_1a2\" prot=\"public\" static=\"no\" strong=\"yes\">\
             <name>Color</name>\
             <enumvalue id=\"namespacegeo_1a2a3\" prot=\"public\"><name>Red</name><initializer>= 1</initializer>\
             <briefdescription><para>Warm.</para></briefdescription></enumvalue>\
             <location file=\"c.h\"/></memberdef>",
        );
        assert_eq!(writer.declaration(&m).unwrap(), "enum class Color");
        let rendered = writer.member(&m).unwrap();
        assert!(rendered.contains("| <a id=\"a2a3\"></a><code>Red</code> | = 1 | Warm. |"));
        assert!(rendered.ends_with("Definition in file c.h."));
    }

    #[test]
    fn enum_value_descriptions_keep_nested_blocks() {
        let corpus = corpus(&[], &[]);
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let docs = DocRenderer::new(&view, "namespacegeo");
        let writer = MemberWriter::new(&view, &docs, false);
        let m = member(
            "<memberdef kind=\"enum\" id=\"namespacegeo_1a4\" prot=\"public\" static=\"no\" strong=\"no\">\
             <name>Mode</name>\
             <enumvalue id=\"namespacegeo_1a4a5\" prot=\"public\"><name>Auto</name>\
             <detaileddescription><para>Picks one of:<itemizedlist>\
             <listitem><para>FAST</para></listitem><listitem><para>SLOW</para></listitem></itemizedlist>\
             <programlisting><codeline><highlight class=\"normal\">run(Auto);</highlight></codeline></programlisting>\
             </para></detaileddescription></enumvalue>\
             <location file=\"c.h\"/></memberdef>",
        );
        let rendered = writer.member(&m).unwrap();
        assert!(rendered.contains(
            "| <a id=\"a4a5\"></a><code>Auto</code> |  | Picks one of:<ul><li>FAST</li><li>SLOW</li></ul>\
             <pre><code>run(Auto);</code></pre> |"
        ));
    }
}
