//! Groups, shown as "Topics".

use doxygen_xml::CompoundDef;

use super::permalink::sanitize_segment;
use super::{CollectionKind, Naming, ViewModel};

pub(super) fn naming(def: &CompoundDef) -> Naming {
    let title = def
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| def.compound_name.clone());
    Naming {
        index_name: title.clone(),
        sidebar_label: title.clone(),
        title,
        base_permalink: format!(
            "{}/{}",
            CollectionKind::Groups.dir(),
            sanitize_segment(&def.compound_name)
        ),
        fingerprint: String::new(),
    }
}

pub(super) fn link(view: &mut ViewModel<'_>) {
    let entries = view.groups.entries.clone();
    for parent in entries {
        let def = view.compounds[parent].def;
        for inner in &def.inner_groups {
            if let Some(child) = view.lookup(&inner.refid, CollectionKind::Groups) {
                view.link(parent, child);
            }
        }
    }
}
