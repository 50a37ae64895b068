//! Compound pages.
//!
//! Every kind shares the same building blocks ([`PageWriter`]); the
//! renderers only choose which blocks appear and in what order.

use doxygen_xml::model::refs::{CompoundRef, InnerRef};

use crate::config::Config;
use crate::render::description::DocRenderer;
use crate::render::markdown::{escape_text, join_blocks, link, table, FrontMatter};
use crate::render::members::MemberWriter;
use crate::render::{Context, Renderer};
use crate::view::permalink::split_scope;
use crate::view::{CompoundView, Result, ViewModel};

pub struct ClassRenderer;
pub struct NamespaceRenderer;
pub struct FileRenderer;
pub struct FolderRenderer;
pub struct GroupRenderer;
pub struct PageRenderer;

struct PageWriter<'r, 'a> {
    view: &'r ViewModel<'a>,
    config: &'r Config,
    slug: String,
    compound: &'r CompoundView<'a>,
    docs: DocRenderer<'r, 'a>,
    blocks: Vec<String>,
}

impl<'r, 'a> PageWriter<'r, 'a> {
    fn new(ctx: &Context<'r, 'a>, idx: usize) -> Self {
        let compound = &ctx.view.compounds[idx];
        PageWriter {
            view: ctx.view,
            config: ctx.config,
            slug: ctx.slug(&compound.permalink),
            compound,
            docs: DocRenderer::new(ctx.view, &compound.def.id),
            blocks: Vec::new(),
        }
    }

    fn brief(&mut self) -> Result<()> {
        let brief = self.docs.blocks(&self.compound.def.brief.children)?;
        if brief.is_empty() && self.config.suggest_to_do_descriptions {
            self.blocks.push("TODO: add brief description".to_string());
        } else {
            self.blocks.push(brief);
        }
        Ok(())
    }

    fn detailed(&mut self) -> Result<()> {
        let detailed = self.docs.blocks(&self.compound.def.detailed.children)?;
        if !detailed.is_empty() {
            self.blocks.push("## Description {#details}".to_string());
            self.blocks.push(detailed);
        } else if self.config.suggest_to_do_descriptions {
            self.blocks.push("## Description {#details}".to_string());
            self.blocks.push("TODO: add detailed description".to_string());
        }
        Ok(())
    }

    /// Include line, template header and class head.
    fn declaration(&mut self) {
        let def = self.compound.def;
        let mut lines = Vec::new();
        for include in &def.includes {
            if include.local {
                lines.push(format!("#include \"{}\"", include.name));
            } else {
                lines.push(format!("#include <{}>", include.name));
            }
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        if let Some(tpl) = &def.template_params {
            lines.push(tpl.declaration());
        }
        lines.push(format!("{} {};", def.kind.as_str(), def.compound_name));
        self.blocks.push(format!("## Declaration\n\n```cpp\n{}\n```", lines.join("\n")));
    }

    fn compound_refs(&mut self, title: &str, refs: &[CompoundRef]) -> Result<()> {
        if refs.is_empty() {
            return Ok(());
        }
        let mut rows = Vec::with_capacity(refs.len());
        for r in refs {
            let target = r.refid.as_deref().and_then(|id| self.view.index_of(id));
            let (name, brief) = match target {
                Some(idx) => {
                    let compound = &self.view.compounds[idx];
                    (
                        link(&self.view.url(idx), &escape_text(&compound.index_name)),
                        self.docs.inline(&compound.def.brief.children)?,
                    )
                }
                None => (escape_text(&r.name), String::new()),
            };
            rows.push(vec![name, r.prot.as_str().to_string(), brief]);
        }
        self.blocks.push(format!("## {}", title));
        self.blocks.push(table(&["Name", "Access", "Description"], &rows));
        Ok(())
    }

    fn inner_table(&mut self, title: &str, refs: &[InnerRef]) -> Result<()> {
        let mut rows = Vec::with_capacity(refs.len());
        for r in refs {
            let row = match self.view.index_of(&r.refid) {
                Some(idx) => self.row(idx)?,
                None => {
                    let short = split_scope(&r.name).last().copied().unwrap_or(r.name.as_str()).to_string();
                    vec![escape_text(&short), String::new()]
                }
            };
            rows.push(row);
        }
        self.push_table(title, rows);
        Ok(())
    }

    fn child_table(&mut self, title: &str, children: &[usize]) -> Result<()> {
        let mut rows = Vec::with_capacity(children.len());
        for &idx in children {
            rows.push(self.row(idx)?);
        }
        self.push_table(title, rows);
        Ok(())
    }

    fn row(&self, idx: usize) -> Result<Vec<String>> {
        let target = &self.view.compounds[idx];
        Ok(vec![
            link(&self.view.url(idx), &escape_text(&target.sidebar_label)),
            self.docs.inline(&target.def.brief.children)?,
        ])
    }

    fn push_table(&mut self, title: &str, rows: Vec<Vec<String>>) {
        if rows.is_empty() {
            return;
        }
        self.blocks.push(format!("## {}", title));
        self.blocks.push(table(&["Name", "Description"], &rows));
    }

    fn sections(&mut self) -> Result<()> {
        let writer = MemberWriter::new(self.view, &self.docs, self.config.suggest_to_do_descriptions);
        let blocks = writer.sections(&self.compound.sections)?;
        self.blocks.extend(blocks);
        Ok(())
    }

    fn included_headers(&mut self) {
        let includes = &self.compound.def.includes;
        if includes.is_empty() {
            return;
        }
        let mut lines = Vec::with_capacity(includes.len());
        for include in includes {
            let text = if include.local {
                format!("#include \"{}\"", include.name)
            } else {
                format!("#include <{}>", include.name)
            };
            let code = format!("<code>{}</code>", escape_text(&text));
            let line = match include.refid.as_deref().and_then(|id| self.view.index_of(id)) {
                Some(idx) => link(&self.view.url(idx), &code),
                None => code,
            };
            lines.push(format!("- {}", line));
        }
        self.blocks.push("## Included Headers".to_string());
        self.blocks.push(lines.join("\n"));
    }

    fn program_listing(&mut self) -> Result<()> {
        if !self.config.render_program_listing {
            return Ok(());
        }
        if let Some(listing) = &self.compound.def.program_listing {
            self.blocks.push("## File Listing {#listing}".to_string());
            self.blocks.push(self.docs.listing(listing)?);
        }
        Ok(())
    }

    fn finish(self, kind: &str) -> String {
        let c = self.compound;
        let front = FrontMatter {
            title: &c.title,
            slug: &self.slug,
            sidebar_label: Some(&c.sidebar_label),
            keywords: vec![
                "doxygen".to_string(),
                kind.to_string(),
                "reference".to_string(),
                c.index_name.clone(),
            ],
        };
        let mut blocks = vec![front.render()];
        blocks.extend(self.blocks);
        let mut out = join_blocks(&blocks);
        out.push('\n');
        out
    }
}

impl Renderer for ClassRenderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let def = page.compound.def;
        page.brief()?;
        page.declaration();
        page.compound_refs("Base Classes", &def.base_compound_refs)?;
        page.compound_refs("Derived Classes", &def.derived_compound_refs)?;
        page.inner_table("Member Classes", &def.inner_classes)?;
        page.sections()?;
        page.detailed()?;
        Ok(page.finish(def.kind.as_str()))
    }
}

impl Renderer for NamespaceRenderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let def = page.compound.def;
        page.brief()?;
        page.inner_table("Namespaces", &def.inner_namespaces)?;
        page.inner_table("Classes", &def.inner_classes)?;
        page.sections()?;
        page.detailed()?;
        Ok(page.finish("namespace"))
    }
}

impl Renderer for FileRenderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let def = page.compound.def;
        page.brief()?;
        page.included_headers();
        page.inner_table("Namespaces", &def.inner_namespaces)?;
        page.inner_table("Classes", &def.inner_classes)?;
        page.sections()?;
        page.detailed()?;
        page.program_listing()?;
        Ok(page.finish("file"))
    }
}

impl Renderer for FolderRenderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let compound = page.compound;
        page.brief()?;
        page.child_table("Folders", &compound.children)?;
        page.child_table("Files", &compound.files)?;
        page.detailed()?;
        Ok(page.finish("folder"))
    }
}

impl Renderer for GroupRenderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let compound = page.compound;
        let def = compound.def;
        page.brief()?;
        page.child_table("Topics", &compound.children)?;
        page.inner_table("Namespaces", &def.inner_namespaces)?;
        page.inner_table("Classes", &def.inner_classes)?;
        page.inner_table("Files", &def.inner_files)?;
        page.sections()?;
        page.detailed()?;
        Ok(page.finish("group"))
    }
}

impl Renderer for PageRenderer {
    /// Pages are prose: the detailed description is the body.
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String> {
        let mut page = PageWriter::new(ctx, idx);
        let compound = page.compound;
        let body = page.docs.blocks(&compound.def.brief.children)?;
        page.blocks.push(body);
        let body = page.docs.blocks(&compound.def.detailed.children)?;
        page.blocks.push(body);
        page.child_table("Pages", &compound.children)?;
        Ok(page.finish("page"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{class, corpus};

    const WIDGET: &str = "<briefdescription><para>A drawable widget.</para></briefdescription>\
        <includes local=\"no\">geo/widget.h</includes>\
        <sectiondef kind=\"public-func\">\
        <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a01\" prot=\"public\" static=\"no\">\
        <type>void</type><argsstring>()</argsstring><name>draw</name>\
        <briefdescription><para>Draw it, see <ref refid=\"classgeo_1_1_widget_1a02\" kindref=\"member\">Widget()</ref>.</para></briefdescription>\
        <location file=\"include/geo/shapes.h\" line=\"20\"/></memberdef>\
        <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a02\" prot=\"public\" static=\"no\">\
        <argsstring>()</argsstring><name>Widget</name>\
        <location file=\"include/geo/shapes.h\" line=\"18\"/></memberdef>\
        </sectiondef>";

    fn render_widget(suggest: bool) -> String {
        let corpus = corpus(
            &[
                &class("classgeo_1_1_shape", "geo::Shape", &[], ""),
                &class("classgeo_1_1_widget", "geo::Widget", &["classgeo_1_1_shape"], WIDGET),
            ],
            &[],
        );
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let config = Config {
            suggest_to_do_descriptions: suggest,
            ..Config::default()
        };
        let ctx = Context {
            view: &view,
            config: &config,
        };
        let idx = view.index_of("classgeo_1_1_widget").unwrap();
        ClassRenderer.render(&ctx, idx).unwrap()
    }

    #[test]
    fn class_page_layout() {
        let page = render_widget(false);
        assert!(page.starts_with("---\ntitle: \"geo::Widget Class Reference\"\nslug: \"/api/classes/geo/Widget\"\n"));
        assert!(page.contains("A drawable widget."));
        assert!(page.contains("```cpp\n#include <geo/widget.h>\n\nclass geo::Widget;\n```"));
        assert!(page.contains("| <a href=\"/api/classes/geo/Shape\">geo::Shape</a> | public |  |"));

        let ctor = page.find("## Constructors {#section-public-constructor}").unwrap();
        let funcs = page.find("## Public Member Functions {#section-public-func}").unwrap();
        assert!(ctor < funcs);
        assert!(page.contains("### draw {#a01}"));
        // same-page reference
        assert!(page.contains("<a href=\"#a02\">Widget()</a>"));
        assert!(!page.contains("TODO"));
    }

    #[test]
    fn todo_placeholders_when_enabled() {
        let page = render_widget(true);
        assert!(page.contains("TODO: add detailed description"));
        assert!(page.contains("TODO: add description"));
    }
}
