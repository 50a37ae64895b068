//! Classes, structs, unions and the other class-like kinds.

use doxygen_xml::{CompoundDef, CompoundKind};

use super::permalink::{split_scope, strip_template, ScopedPath};
use super::{CollectionKind, Naming, ViewModel};

fn kind_title(kind: &CompoundKind) -> &'static str {
    match kind {
        CompoundKind::Struct => "Struct",
        CompoundKind::Union => "Union",
        CompoundKind::Interface => "Interface",
        CompoundKind::Protocol => "Protocol",
        CompoundKind::Category => "Category",
        CompoundKind::Exception => "Exception",
        CompoundKind::Service => "Service",
        CompoundKind::Singleton => "Singleton",
        CompoundKind::Concept => "Concept",
        _ => "Class",
    }
}

pub(super) fn naming(def: &CompoundDef) -> Naming {
    let location = def.location.as_ref().map(|l| l.file.as_str());
    let scoped = ScopedPath::new(&def.compound_name, location);
    let index_name = scoped.display_name();
    Naming {
        sidebar_label: scoped.last_display().to_string(),
        title: format!("{} {} Reference", index_name, kind_title(&def.kind)),
        base_permalink: format!("{}/{}", CollectionKind::Classes.dir(), scoped.path()),
        fingerprint: scoped.fingerprint,
        index_name,
    }
}

/// Class name without scope or template arguments, as constructors are
/// spelled.
pub(super) fn bare_name(def: &CompoundDef) -> String {
    let segments = split_scope(&def.compound_name);
    let last = segments.last().copied().unwrap_or("");
    strip_template(last).0
}

/// Derived classes become children of every documented base.
pub(super) fn link(view: &mut ViewModel<'_>) {
    let entries = view.classes.entries.clone();
    for child in entries {
        let def = view.compounds[child].def;
        for base in &def.base_compound_refs {
            let Some(refid) = base.refid.as_deref() else {
                continue;
            };
            view.compounds[child].base_ids.insert(refid);
            match view.lookup(refid, CollectionKind::Classes) {
                Some(parent) => view.link(parent, child),
                None => tracing::debug!(class = %def.id, base = refid, "base class without page"),
            }
        }
    }
}
