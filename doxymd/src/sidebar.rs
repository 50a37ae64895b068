//! Docusaurus navigation: the sidebar category and the navbar dropdown.

use serde::Serialize;

use crate::config::Config;
use crate::view::{Collection, ViewModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Category {
        label: String,
        link: DocLink,
        collapsed: bool,
        items: Vec<SidebarItem>,
    },
    Doc {
        id: String,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocLink {
    #[serde(rename = "type")]
    kind: &'static str,
    id: String,
}

impl DocLink {
    fn doc(id: String) -> Self {
        DocLink { kind: "doc", id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Menu {
    #[serde(rename = "type")]
    kind: &'static str,
    label: String,
    position: &'static str,
    items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    label: String,
    to: String,
}

/// The API category: one sub-category per non-empty collection, in the
/// fixed collection order.
pub fn sidebar(view: &ViewModel<'_>, config: &Config) -> SidebarItem {
    let items = view
        .collections()
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| collection(view, config, c))
        .collect();
    SidebarItem::Category {
        label: config.sidebar_category_label.clone(),
        link: DocLink::doc(config.doc_id("index")),
        collapsed: true,
        items,
    }
}

fn collection(view: &ViewModel<'_>, config: &Config, c: &Collection) -> SidebarItem {
    let mut path = Vec::new();
    let items = c
        .top_level(view)
        .into_iter()
        .filter_map(|idx| item(view, config, idx, &mut path))
        .collect();
    SidebarItem::Category {
        label: c.kind.label().to_string(),
        link: DocLink::doc(config.doc_id(c.kind.dir())),
        collapsed: true,
        items,
    }
}

fn item(view: &ViewModel<'_>, config: &Config, idx: usize, path: &mut Vec<usize>) -> Option<SidebarItem> {
    if path.contains(&idx) {
        return None;
    }
    let compound = &view.compounds[idx];
    let id = config.doc_id(&compound.page_id);
    let label = compound.sidebar_label.clone();

    path.push(idx);
    let items: Vec<SidebarItem> = compound
        .children
        .iter()
        .chain(compound.files.iter())
        .copied()
        .filter(|&child| primary_parent(view, child) == Some(idx))
        .filter_map(|child| item(view, config, child, path))
        .collect();
    path.pop();

    Some(if items.is_empty() {
        SidebarItem::Doc { id, label }
    } else {
        SidebarItem::Category {
            label,
            link: DocLink::doc(id),
            collapsed: true,
            items,
        }
    })
}

/// The one parent a compound is listed under: the smallest id wins, so a
/// class with several bases appears once.
fn primary_parent(view: &ViewModel<'_>, idx: usize) -> Option<usize> {
    view.compounds[idx]
        .parents
        .iter()
        .copied()
        .min_by(|&a, &b| view.compounds[a].def.id.cmp(&view.compounds[b].def.id))
}

/// Navbar dropdown with one entry per non-empty collection.
pub fn menu(view: &ViewModel<'_>, config: &Config) -> Menu {
    let route = config.route_prefix();
    let items = view
        .collections()
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| MenuItem {
            label: c.kind.label().to_string(),
            to: format!("{}/{}", route, c.kind.dir()),
        })
        .collect();
    Menu {
        kind: "dropdown",
        label: config.menu_dropdown_label.clone(),
        position: "left",
        items,
    }
}
