//! Namespaces, including the synthesized names of anonymous ones.

use doxygen_xml::CompoundDef;

use super::permalink::{anonymous_file, split_scope, ScopedPath};
use super::{CollectionKind, Naming, ViewModel};

fn is_anonymous(def: &CompoundDef) -> bool {
    split_scope(&def.compound_name)
        .last()
        .is_some_and(|segment| anonymous_file(segment, None).is_some())
}

/// Anonymous namespaces are listed only when they contain something.
pub(super) fn is_listed(def: &CompoundDef) -> bool {
    !is_anonymous(def)
        || !def.inner_classes.is_empty()
        || !def.inner_namespaces.is_empty()
        || def.section_defs.iter().any(|s| !s.is_empty())
}

pub(super) fn naming(def: &CompoundDef) -> Naming {
    let location = def.location.as_ref().map(|l| l.file.as_str());
    let scoped = ScopedPath::new(&def.compound_name, location);
    let index_name = scoped.display_name();
    Naming {
        sidebar_label: scoped.last_display().to_string(),
        title: format!("{} Namespace Reference", index_name),
        base_permalink: format!("{}/{}", CollectionKind::Namespaces.dir(), scoped.path()),
        fingerprint: scoped.fingerprint,
        index_name,
    }
}

pub(super) fn link(view: &mut ViewModel<'_>) {
    let entries = view.namespaces.entries.clone();
    for parent in entries {
        let def = view.compounds[parent].def;
        for inner in &def.inner_namespaces {
            if let Some(child) = view.lookup(&inner.refid, CollectionKind::Namespaces) {
                view.link(parent, child);
            }
        }
    }
}
