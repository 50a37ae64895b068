//! Source files and the folders that contain them.

use doxygen_xml::CompoundDef;

use super::permalink::{file_path, folder_path, normalize_path};
use super::{CollectionKind, Naming, ViewModel};

/// Path of a file compound as Doxygen recorded it.
pub(super) fn source_path(def: &CompoundDef) -> &str {
    def.location
        .as_ref()
        .map(|l| l.file.as_str())
        .filter(|f| !f.is_empty())
        .unwrap_or(&def.compound_name)
}

pub(super) fn file_naming(def: &CompoundDef) -> Naming {
    let name = def.compound_name.clone();
    Naming {
        sidebar_label: name.clone(),
        title: format!("{} File Reference", name),
        base_permalink: format!("{}/{}", CollectionKind::Files.dir(), file_path(source_path(def))),
        fingerprint: String::new(),
        index_name: name,
    }
}

pub(super) fn folder_naming(def: &CompoundDef) -> Naming {
    let path = normalize_path(&def.compound_name);
    let label = path.rsplit('/').next().unwrap_or(&path).to_string();
    Naming {
        title: format!("{} Folder Reference", path),
        base_permalink: format!("{}/{}", CollectionKind::Folders.dir(), folder_path(&path)),
        fingerprint: String::new(),
        sidebar_label: label,
        index_name: path,
    }
}

/// Folders own sub-folders as children and files in a separate list.
pub(super) fn link(view: &mut ViewModel<'_>) {
    let entries = view.files.entries.clone();
    for parent in entries {
        if view.compounds[parent].kind != CollectionKind::Folders {
            continue;
        }
        let def = view.compounds[parent].def;
        for inner in &def.inner_dirs {
            if let Some(child) = view.lookup(&inner.refid, CollectionKind::Folders) {
                view.link(parent, child);
            }
        }
        for inner in &def.inner_files {
            if let Some(file) = view.lookup(&inner.refid, CollectionKind::Files) {
                view.link_file(parent, file);
            }
        }
    }
}
