//! Alphabetical index entries.

use std::collections::BTreeMap;

use doxygen_xml::MemberKind;

use super::resolver::member_anchor;
use super::{CollectionKind, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Classes,
    Namespaces,
    Files,
    Functions,
    Variables,
    Typedefs,
    Enums,
    Defines,
}

impl IndexKind {
    pub const ALL: [IndexKind; 8] = [
        IndexKind::Classes,
        IndexKind::Namespaces,
        IndexKind::Files,
        IndexKind::Functions,
        IndexKind::Variables,
        IndexKind::Typedefs,
        IndexKind::Enums,
        IndexKind::Defines,
    ];

    /// Folder under `indices/`.
    pub fn name(self) -> &'static str {
        match self {
            IndexKind::Classes => "classes",
            IndexKind::Namespaces => "namespaces",
            IndexKind::Files => "files",
            IndexKind::Functions => "functions",
            IndexKind::Variables => "variables",
            IndexKind::Typedefs => "typedefs",
            IndexKind::Enums => "enums",
            IndexKind::Defines => "defines",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            IndexKind::Classes => "Classes Index",
            IndexKind::Namespaces => "Namespaces Index",
            IndexKind::Files => "Files Index",
            IndexKind::Functions => "Functions Index",
            IndexKind::Variables => "Variables Index",
            IndexKind::Typedefs => "Typedefs Index",
            IndexKind::Enums => "Enums Index",
            IndexKind::Defines => "Macros Index",
        }
    }

    fn accepts(self, kind: &MemberKind) -> bool {
        match self {
            IndexKind::Functions => kind.is_function_like(),
            IndexKind::Variables => matches!(kind, MemberKind::Variable | MemberKind::Property),
            IndexKind::Typedefs => matches!(kind, MemberKind::Typedef),
            IndexKind::Enums => matches!(kind, MemberKind::Enum),
            IndexKind::Defines => matches!(kind, MemberKind::Define),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub long_name: String,
    pub kind: String,
    /// Absolute URL, with anchor for members.
    pub permalink: String,
    /// Text of the link to the documenting page.
    pub link_text: String,
}

pub fn entries(view: &ViewModel<'_>, kind: IndexKind) -> Vec<IndexEntry> {
    let mut out = match kind {
        IndexKind::Classes => compound_entries(view, &view.classes.entries, CollectionKind::Classes),
        IndexKind::Namespaces => {
            compound_entries(view, &view.namespaces.entries, CollectionKind::Namespaces)
        }
        IndexKind::Files => compound_entries(view, &view.files.entries, CollectionKind::Files),
        _ => view
            .members()
            .into_iter()
            .filter(|entry| kind.accepts(&entry.def.kind))
            .map(|entry| {
                let page = &view.compounds[entry.compound];
                let long_name = entry
                    .def
                    .qualified_name
                    .clone()
                    .unwrap_or_else(|| entry.def.name.clone());
                IndexEntry {
                    name: entry.def.name.clone(),
                    long_name,
                    kind: entry.def.kind.as_str().to_string(),
                    permalink: format!("{}#{}", view.url(entry.compound), member_anchor(&entry.def.id)),
                    link_text: page.index_name.clone(),
                }
            })
            .collect(),
    };
    out.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.long_name.cmp(&b.long_name))
    });
    out
}

fn compound_entries(view: &ViewModel<'_>, list: &[usize], only: CollectionKind) -> Vec<IndexEntry> {
    list.iter()
        .copied()
        .filter(|&idx| view.compounds[idx].kind == only)
        .map(|idx| {
            let c = &view.compounds[idx];
            IndexEntry {
                name: c.sidebar_label.clone(),
                long_name: c.index_name.clone(),
                kind: c.def.kind.as_str().to_string(),
                permalink: view.url(idx),
                link_text: c.index_name.clone(),
            }
        })
        .collect()
}

/// Upper-cased first character, `_` for anything not alphanumeric.
pub fn initial(name: &str) -> char {
    match name.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
        _ => '_',
    }
}

/// File stem of a per-initial page.
pub fn initial_stem(initial: char) -> String {
    if initial == '_' {
        "other".to_string()
    } else {
        initial.to_ascii_lowercase().to_string()
    }
}

/// Entries grouped by initial, in initial order.
pub fn by_initial(entries: &[IndexEntry]) -> BTreeMap<char, Vec<&IndexEntry>> {
    let mut groups: BTreeMap<char, Vec<&IndexEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(initial(&entry.name)).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{class, corpus};

    #[test]
    fn initials() {
        assert_eq!(initial("widget"), 'W');
        assert_eq!(initial("3d"), '3');
        assert_eq!(initial("~Widget"), '_');
        assert_eq!(initial_stem('W'), "w");
        assert_eq!(initial_stem('_'), "other");
    }

    #[test]
    fn class_and_function_entries() {
        let body = "<sectiondef kind=\"public-func\">\
                    <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a01\" prot=\"public\" static=\"no\">\
                    <name>draw</name><qualifiedname>geo::Widget::draw</qualifiedname>\
                    <location file=\"include/geo/shapes.h\"/></memberdef>\
                    <memberdef kind=\"variable\" id=\"classgeo_1_1_widget_1a02\" prot=\"public\" static=\"no\">\
                    <name>Area</name><location file=\"include/geo/shapes.h\"/></memberdef>\
                    </sectiondef>";
        let corpus = corpus(
            &[
                &class("classgeo_1_1_widget", "geo::Widget", &[], body),
                &class("classgeo_1_1_arc", "geo::arc", &[], ""),
            ],
            &[],
        );
        let view = ViewModel::build(&corpus, "/api").unwrap();

        let classes = entries(&view, IndexKind::Classes);
        let names: Vec<&str> = classes.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["arc", "Widget"]);
        assert_eq!(classes[1].long_name, "geo::Widget");
        assert_eq!(classes[1].permalink, "/api/classes/geo/Widget");

        let functions = entries(&view, IndexKind::Functions);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].long_name, "geo::Widget::draw");
        assert_eq!(functions[0].permalink, "/api/classes/geo/Widget#a01");
        assert_eq!(functions[0].link_text, "geo::Widget");

        let variables = entries(&view, IndexKind::Variables);
        let grouped = by_initial(&variables);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec!['A']);
    }
}
