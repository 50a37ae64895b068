//! Page rendering: one renderer per collection kind, chosen by
//! [`create_renderer`].

pub mod compounds;
pub mod description;
pub mod indices;
pub mod markdown;
pub mod members;
pub mod overview;

use std::path::PathBuf;

use crate::config::Config;
use crate::view::{CollectionKind, Result, ViewModel};

/// A rendered file, relative to the output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub content: String,
}

pub struct Context<'r, 'a> {
    pub view: &'r ViewModel<'a>,
    pub config: &'r Config,
}

impl Context<'_, '_> {
    /// Site route of a relative permalink, used for front matter slugs.
    pub fn slug(&self, permalink: &str) -> String {
        format!("{}/{}", self.config.route_prefix(), permalink)
    }
}

/// Renders the page of one compound.
pub trait Renderer {
    fn render(&self, ctx: &Context<'_, '_>, idx: usize) -> Result<String>;
}

pub fn create_renderer(kind: CollectionKind) -> Box<dyn Renderer> {
    match kind {
        CollectionKind::Classes => Box::new(compounds::ClassRenderer),
        CollectionKind::Namespaces => Box::new(compounds::NamespaceRenderer),
        CollectionKind::Files => Box::new(compounds::FileRenderer),
        CollectionKind::Folders => Box::new(compounds::FolderRenderer),
        CollectionKind::Groups => Box::new(compounds::GroupRenderer),
        CollectionKind::Pages => Box::new(compounds::PageRenderer),
    }
}

/// Every page of the site: compounds, overviews and, if enabled, indices.
pub fn render_site(ctx: &Context<'_, '_>) -> Result<Vec<Page>> {
    let mut pages = Vec::with_capacity(ctx.view.compounds.len() + 8);
    for (idx, compound) in ctx.view.compounds.iter().enumerate() {
        let renderer = create_renderer(compound.kind);
        pages.push(Page {
            path: PathBuf::from(format!("{}.md", compound.page_id)),
            content: renderer.render(ctx, idx)?,
        });
    }
    pages.extend(overview::render(ctx)?);
    if ctx.config.render_index_pages {
        pages.extend(indices::render(ctx));
    }
    tracing::info!(pages = pages.len(), "rendered");
    Ok(pages)
}
