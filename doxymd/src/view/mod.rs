//! Resolved view model.
//!
//! Built in explicit passes over a fully loaded [`Corpus`]:
//!
//! 1. every compound is added to the collection of its kind
//! 2. hierarchies are linked (bases, nesting, folder contents, sub-topics)
//! 3. permalinks and page identifiers are assigned and checked for clashes
//! 4. the corpus-wide member and file lookup tables are filled
//! 5. member sections are reclassified
//!
//! After [`ViewModel::build`] returns the model is read-only; rendering only
//! borrows it.

mod classes;
pub mod error;
mod files;
mod groups;
pub mod index;
mod namespaces;
mod pages;
pub mod permalink;
pub mod resolver;
pub mod sections;

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use doxygen_xml::{CompoundDef, CompoundKind, Corpus, MemberDef};

pub use error::{Error, Result};
use permalink::short_hash;
use sections::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    Groups,
    Namespaces,
    Classes,
    Files,
    Folders,
    Pages,
}

impl CollectionKind {
    pub fn of(kind: &CompoundKind) -> Option<Self> {
        if kind.is_class_like() {
            return Some(CollectionKind::Classes);
        }
        match kind {
            CompoundKind::Namespace => Some(CollectionKind::Namespaces),
            CompoundKind::File => Some(CollectionKind::Files),
            CompoundKind::Dir => Some(CollectionKind::Folders),
            CompoundKind::Group => Some(CollectionKind::Groups),
            CompoundKind::Page | CompoundKind::Example => Some(CollectionKind::Pages),
            _ => None,
        }
    }

    /// First permalink segment.
    pub fn dir(self) -> &'static str {
        match self {
            CollectionKind::Groups => "groups",
            CollectionKind::Namespaces => "namespaces",
            CollectionKind::Classes => "classes",
            CollectionKind::Files => "files",
            CollectionKind::Folders => "folders",
            CollectionKind::Pages => "pages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::Groups => "Topics",
            CollectionKind::Namespaces => "Namespaces",
            CollectionKind::Classes => "Classes",
            CollectionKind::Files => "Files",
            CollectionKind::Folders => "Folders",
            CollectionKind::Pages => "Pages",
        }
    }
}

/// Presentation names computed when a compound joins its collection.
pub(crate) struct Naming {
    pub index_name: String,
    pub sidebar_label: String,
    pub title: String,
    pub base_permalink: String,
    pub fingerprint: String,
}

/// One compound with everything rendering needs.
#[derive(Debug)]
pub struct CompoundView<'a> {
    pub def: &'a CompoundDef,
    pub kind: CollectionKind,
    pub index_name: String,
    pub sidebar_label: String,
    pub title: String,
    /// Relative, hierarchical: `classes/geo/Widget`.
    pub permalink: String,
    /// Flattened: `classes/geo-Widget`. Also the output file stem.
    pub page_id: String,
    pub template_fingerprint: String,
    /// Base class ids (classes only), documented or not.
    pub base_ids: BTreeSet<&'a str>,
    pub parents: Vec<usize>,
    /// Derived classes, nested namespaces, sub-folders, sub-topics or
    /// sub-pages depending on the kind.
    pub children: Vec<usize>,
    /// Files directly inside a folder.
    pub files: Vec<usize>,
    pub sections: Vec<Section<'a>>,
    base_permalink: String,
}

impl<'a> CompoundView<'a> {
    fn new(def: &'a CompoundDef, kind: CollectionKind, naming: Naming) -> Self {
        CompoundView {
            def,
            kind,
            index_name: naming.index_name,
            sidebar_label: naming.sidebar_label,
            title: naming.title,
            permalink: naming.base_permalink.clone(),
            page_id: String::new(),
            template_fingerprint: naming.fingerprint,
            base_ids: BTreeSet::new(),
            parents: Vec::new(),
            children: Vec::new(),
            files: Vec::new(),
            sections: Vec::new(),
            base_permalink: naming.base_permalink,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parents.is_empty()
    }
}

/// The compounds of one sidebar category.
#[derive(Debug)]
pub struct Collection {
    pub kind: CollectionKind,
    pub entries: Vec<usize>,
}

impl Collection {
    fn new(kind: CollectionKind) -> Self {
        Collection {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_level(&self, view: &ViewModel<'_>) -> Vec<usize> {
        self.entries
            .iter()
            .copied()
            .filter(|&i| view.compounds[i].is_top_level())
            .collect()
    }
}

/// Where a member is documented.
#[derive(Debug, Clone, Copy)]
pub struct MemberEntry<'a> {
    pub compound: usize,
    pub def: &'a MemberDef,
}

pub struct ViewModel<'a> {
    pub corpus: &'a Corpus,
    pub compounds: Vec<CompoundView<'a>>,
    pub groups: Collection,
    pub namespaces: Collection,
    pub classes: Collection,
    /// Files and folders together.
    pub files: Collection,
    pub pages: Collection,
    by_id: HashMap<&'a str, usize>,
    in_corpus: HashSet<&'a str>,
    members: HashMap<&'a str, MemberEntry<'a>>,
    files_by_path: HashMap<String, usize>,
    url_prefix: String,
}

impl<'a> ViewModel<'a> {
    pub fn build(corpus: &'a Corpus, url_prefix: impl Into<String>) -> Result<Self> {
        let mut view = ViewModel {
            corpus,
            compounds: Vec::with_capacity(corpus.compounds.len()),
            groups: Collection::new(CollectionKind::Groups),
            namespaces: Collection::new(CollectionKind::Namespaces),
            classes: Collection::new(CollectionKind::Classes),
            files: Collection::new(CollectionKind::Files),
            pages: Collection::new(CollectionKind::Pages),
            by_id: HashMap::new(),
            in_corpus: corpus.index.compounds.iter().map(|c| c.refid.as_str()).collect(),
            members: HashMap::new(),
            files_by_path: HashMap::new(),
            url_prefix: url_prefix.into(),
        };

        for def in &corpus.compounds {
            view.add_child(def);
        }
        view.create_hierarchies();
        view.assign_permalinks()?;
        view.index_members();
        view.index_files();
        view.reclassify_sections();

        tracing::info!(
            compounds = view.compounds.len(),
            members = view.members.len(),
            "view model ready"
        );
        Ok(view)
    }

    /// Collections in sidebar order.
    pub fn collections(&self) -> [&Collection; 5] {
        [
            &self.groups,
            &self.namespaces,
            &self.classes,
            &self.files,
            &self.pages,
        ]
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        match kind {
            CollectionKind::Groups => &mut self.groups,
            CollectionKind::Namespaces => &mut self.namespaces,
            CollectionKind::Classes => &mut self.classes,
            CollectionKind::Files | CollectionKind::Folders => &mut self.files,
            CollectionKind::Pages => &mut self.pages,
        }
    }

    fn add_child(&mut self, def: &'a CompoundDef) {
        let Some(kind) = CollectionKind::of(&def.kind) else {
            tracing::info!(id = %def.id, kind = def.kind.as_str(), "no page for this compound kind");
            return;
        };
        let naming = match kind {
            CollectionKind::Classes => classes::naming(def),
            CollectionKind::Namespaces => {
                if !namespaces::is_listed(def) {
                    tracing::debug!(id = %def.id, "skipping empty anonymous namespace");
                    return;
                }
                namespaces::naming(def)
            }
            CollectionKind::Files => files::file_naming(def),
            CollectionKind::Folders => files::folder_naming(def),
            CollectionKind::Groups => groups::naming(def),
            CollectionKind::Pages => pages::naming(def),
        };
        let idx = self.compounds.len();
        self.compounds.push(CompoundView::new(def, kind, naming));
        self.by_id.insert(def.id.as_str(), idx);
        self.collection_mut(kind).entries.push(idx);
    }

    fn create_hierarchies(&mut self) {
        classes::link(self);
        namespaces::link(self);
        files::link(self);
        groups::link(self);
        pages::link(self);

        // Stable presentation order everywhere.
        let keys: Vec<(String, &'a str)> = self
            .compounds
            .iter()
            .map(|c| (c.index_name.to_lowercase(), c.def.id.as_str()))
            .collect();
        let by_name = |list: &mut Vec<usize>| list.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        for c in &mut self.compounds {
            by_name(&mut c.children);
            by_name(&mut c.files);
            by_name(&mut c.parents);
        }
        for kind in [
            CollectionKind::Groups,
            CollectionKind::Namespaces,
            CollectionKind::Classes,
            CollectionKind::Files,
            CollectionKind::Pages,
        ] {
            by_name(&mut self.collection_mut(kind).entries);
        }
    }

    /// Index of compound `id` if it has a page of the given kind.
    fn lookup(&self, id: &str, kind: CollectionKind) -> Option<usize> {
        self.by_id
            .get(id)
            .copied()
            .filter(|&i| self.compounds[i].kind == kind)
    }

    /// Record a parent/child edge in both directions.
    fn link(&mut self, parent: usize, child: usize) {
        if parent == child {
            return;
        }
        if !self.compounds[parent].children.contains(&child) {
            self.compounds[parent].children.push(child);
        }
        if !self.compounds[child].parents.contains(&parent) {
            self.compounds[child].parents.push(parent);
        }
    }

    fn link_file(&mut self, folder: usize, file: usize) {
        if !self.compounds[folder].files.contains(&file) {
            self.compounds[folder].files.push(file);
        }
        if !self.compounds[file].parents.contains(&folder) {
            self.compounds[file].parents.push(folder);
        }
    }

    /// Derive every permalink from its base path. Safe to call again: the
    /// result depends only on the base paths and fingerprints.
    pub(crate) fn assign_permalinks(&mut self) -> Result<()> {
        let mut by_base: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for &idx in &self.classes.entries {
            by_base
                .entry(self.compounds[idx].base_permalink.as_str())
                .or_default()
                .push(idx);
        }
        let mut suffixed = HashSet::new();
        for group in by_base.values().filter(|g| g.len() > 1) {
            for &idx in group {
                if !self.compounds[idx].template_fingerprint.is_empty() {
                    suffixed.insert(idx);
                }
            }
        }

        for (idx, c) in self.compounds.iter_mut().enumerate() {
            c.permalink = if suffixed.contains(&idx) {
                format!("{}-{}", c.base_permalink, short_hash(&c.template_fingerprint))
            } else {
                c.base_permalink.clone()
            };
            c.page_id = permalink::page_id(&c.permalink);
        }

        let mut permalinks: HashMap<&str, usize> = HashMap::new();
        let mut page_ids: HashMap<&str, usize> = HashMap::new();
        for (idx, c) in self.compounds.iter().enumerate() {
            if let Some(&other) = permalinks.get(c.permalink.as_str()) {
                return Err(Error::PermalinkCollision {
                    permalink: c.permalink.clone(),
                    first: self.compounds[other].def.id.clone(),
                    second: c.def.id.clone(),
                });
            }
            permalinks.insert(c.permalink.as_str(), idx);
            if let Some(&other) = page_ids.get(c.page_id.as_str()) {
                return Err(Error::PageIdCollision {
                    page_id: c.page_id.clone(),
                    first: self.compounds[other].def.id.clone(),
                    second: c.def.id.clone(),
                });
            }
            page_ids.insert(c.page_id.as_str(), idx);
        }
        Ok(())
    }

    /// Map every member id to the compound that documents it. Doxygen
    /// repeats namespace members in file and group documents; the compound
    /// named by the member id wins.
    fn index_members(&mut self) {
        for (idx, c) in self.compounds.iter().enumerate() {
            for m in c.def.member_defs() {
                let owned = resolver::split_member_id(&m.id).is_some_and(|(cid, _)| cid == c.def.id);
                let entry = MemberEntry { compound: idx, def: m };
                match self.members.entry(m.id.as_str()) {
                    Entry::Vacant(slot) => {
                        slot.insert(entry);
                    }
                    Entry::Occupied(mut slot) if owned => {
                        slot.insert(entry);
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }
    }

    fn index_files(&mut self) {
        for &idx in &self.files.entries {
            let c = &self.compounds[idx];
            if c.kind != CollectionKind::Files {
                continue;
            }
            let path = files::source_path(c.def);
            self.files_by_path.insert(permalink::normalize_path(path), idx);
        }
    }

    fn reclassify_sections(&mut self) {
        for idx in 0..self.compounds.len() {
            let def = self.compounds[idx].def;
            let class_name = match self.compounds[idx].kind {
                CollectionKind::Classes => classes::bare_name(def),
                _ => String::new(),
            };
            let members = &self.members;
            let sections = sections::reclassify(def, &class_name, |id| members.get(id).map(|e| e.def));
            self.compounds[idx].sections = sections;
        }
    }

    #[cfg(test)]
    pub fn compound(&self, id: &str) -> Option<&CompoundView<'a>> {
        self.by_id.get(id).map(|&i| &self.compounds[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn member(&self, id: &str) -> Option<MemberEntry<'a>> {
        self.members.get(id).copied()
    }

    /// All documented members, ordered by id.
    pub fn members(&self) -> Vec<MemberEntry<'a>> {
        let mut all: Vec<MemberEntry<'a>> = self.members.values().copied().collect();
        all.sort_by(|a, b| a.def.id.cmp(&b.def.id));
        all
    }

    /// File page for a source path as it appears in `<location>`.
    pub fn file_by_path(&self, path: &str) -> Option<usize> {
        self.files_by_path.get(&permalink::normalize_path(path)).copied()
    }

    /// Absolute URL of a compound page.
    pub fn url(&self, idx: usize) -> String {
        format!("{}/{}", self.url_prefix, self.compounds[idx].permalink)
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// True if `id` is listed in index.xml.
    pub fn in_corpus(&self, id: &str) -> bool {
        self.in_corpus.contains(id)
    }
}
