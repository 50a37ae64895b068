//! Landing pages: the API root (`index.md`) and one tree page per
//! collection (`classes.md` beside the `classes/` folder).

use std::path::PathBuf;

use crate::render::description::DocRenderer;
use crate::render::markdown::{escape_text, join_blocks, link, FrontMatter};
use crate::render::{Context, Page};
use crate::view::{Collection, CollectionKind, Result};

pub fn render(ctx: &Context<'_, '_>) -> Result<Vec<Page>> {
    let mut pages = vec![root(ctx)];
    for collection in ctx.view.collections() {
        if !collection.is_empty() {
            pages.push(collection_page(ctx, collection)?);
        }
    }
    Ok(pages)
}

fn root(ctx: &Context<'_, '_>) -> Page {
    let doxyfile = &ctx.view.corpus.doxyfile;
    let project = doxyfile.project_name().unwrap_or("");
    let title = if project.is_empty() {
        ctx.config.sidebar_category_label.clone()
    } else {
        format!("{} {}", project, ctx.config.sidebar_category_label)
    };
    let slug = match ctx.config.route_prefix() {
        p if p.is_empty() => "/".to_string(),
        p => p,
    };

    let mut blocks = vec![FrontMatter {
        title: &title,
        slug: &slug,
        sidebar_label: None,
        keywords: vec!["doxygen".to_string(), "reference".to_string()],
    }
    .render()];
    if let Some(brief) = doxyfile.project_brief().filter(|b| !b.is_empty()) {
        blocks.push(escape_text(brief));
    }
    if let Some(number) = doxyfile.project_number().filter(|n| !n.is_empty()) {
        blocks.push(format!("Version: {}", escape_text(number)));
    }

    let lines: Vec<String> = ctx
        .view
        .collections()
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            let url = format!("{}/{}", ctx.view.url_prefix(), c.kind.dir());
            format!("- {}", link(&url, c.kind.label()))
        })
        .collect();
    blocks.push(lines.join("\n"));

    let mut content = join_blocks(&blocks);
    content.push('\n');
    Page {
        path: PathBuf::from("index.md"),
        content,
    }
}

fn collection_page(ctx: &Context<'_, '_>, collection: &Collection) -> Result<Page> {
    let label = collection.kind.label();
    let slug = ctx.slug(collection.kind.dir());
    let title = format!("{} {}", ctx.config.sidebar_category_label, label);
    let front = FrontMatter {
        title: &title,
        slug: &slug,
        sidebar_label: Some(label),
        keywords: vec!["doxygen".to_string(), "reference".to_string(), label.to_lowercase()],
    };

    let intro = match collection.kind {
        CollectionKind::Groups => "The topics, with brief descriptions:",
        CollectionKind::Namespaces => "The namespaces, with brief descriptions:",
        CollectionKind::Classes => "The classes, structs and unions, with brief descriptions:",
        CollectionKind::Files | CollectionKind::Folders => "The folders and files, with brief descriptions:",
        CollectionKind::Pages => "The documentation pages:",
    };

    let mut tree = Tree {
        ctx,
        lines: Vec::new(),
        path: Vec::new(),
    };
    for idx in collection.top_level(ctx.view) {
        tree.item(idx, 0)?;
    }

    let mut content = join_blocks(&[front.render(), intro.to_string(), tree.lines.join("\n")]);
    content.push('\n');
    Ok(Page {
        path: PathBuf::from(format!("{}.md", collection.kind.dir())),
        content,
    })
}

/// Nested list of a hierarchy. `path` guards against cycles.
struct Tree<'c, 'r, 'a> {
    ctx: &'c Context<'r, 'a>,
    lines: Vec<String>,
    path: Vec<usize>,
}

impl Tree<'_, '_, '_> {
    fn item(&mut self, idx: usize, depth: usize) -> Result<()> {
        if self.path.contains(&idx) {
            return Ok(());
        }
        let view = self.ctx.view;
        let compound = &view.compounds[idx];
        let docs = DocRenderer::new(view, &compound.def.id);
        let brief = docs.inline(&compound.def.brief.children)?;
        let mut line = format!(
            "{}- {}",
            "  ".repeat(depth),
            link(&view.url(idx), &escape_text(&compound.sidebar_label))
        );
        if !brief.is_empty() {
            line.push_str(": ");
            line.push_str(&brief);
        }
        self.lines.push(line);

        self.path.push(idx);
        for &child in compound.children.iter().chain(compound.files.iter()) {
            self.item(child, depth + 1)?;
        }
        self.path.pop();
        Ok(())
    }
}
