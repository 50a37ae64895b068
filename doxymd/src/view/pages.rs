//! Free-standing pages and examples.

use doxygen_xml::CompoundDef;

use super::permalink::sanitize_segment;
use super::{CollectionKind, Naming, ViewModel};

pub(super) fn naming(def: &CompoundDef) -> Naming {
    let title = match def.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ if def.id == "indexpage" => "Main Page".to_string(),
        _ => def.compound_name.clone(),
    };
    Naming {
        index_name: title.clone(),
        sidebar_label: title.clone(),
        title,
        base_permalink: format!(
            "{}/{}",
            CollectionKind::Pages.dir(),
            sanitize_segment(&def.compound_name)
        ),
        fingerprint: String::new(),
    }
}

pub(super) fn link(view: &mut ViewModel<'_>) {
    let entries = view.pages.entries.clone();
    for parent in entries {
        let def = view.compounds[parent].def;
        for inner in &def.inner_pages {
            if let Some(child) = view.lookup(&inner.refid, CollectionKind::Pages) {
                view.link(parent, child);
            }
        }
    }
}
