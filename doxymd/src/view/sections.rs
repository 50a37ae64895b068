//! Member sections regrouped for presentation.
//!
//! Doxygen groups members by raw section kind (`public-func`,
//! `protected-attrib`, ...). Pages split those further: constructors,
//! the destructor and operators get their own sections, nested types are
//! split into typedefs, enumerations and other types, and everything is
//! ordered by a fixed priority table.

use std::collections::HashMap;
use std::sync::LazyLock;

use doxygen_xml::{CompoundDef, Description, MemberDef, MemberKind};
use regex::Regex;

static RE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^operator[^A-Za-z0-9_]").unwrap());

const VISIBILITIES: [&str; 4] = ["public", "protected", "package", "private"];

const CATEGORY_UNKNOWN: u32 = 12;
const CATEGORY_USER_DEFINED: u32 = 13;

#[derive(Debug, Clone)]
pub struct Section<'a> {
    /// `public-constructor`, `func`, `user-defined-0`, ...
    pub key: String,
    pub title: String,
    pub priority: u32,
    pub description: Option<&'a Description>,
    pub members: Vec<&'a MemberDef>,
}

impl Section<'_> {
    /// Section heading anchor.
    pub fn anchor(&self) -> String {
        format!("section-{}", self.key)
    }
}

struct Bucket {
    key: String,
    title: String,
    priority: u32,
}

pub fn is_operator(name: &str) -> bool {
    RE_OPERATOR.is_match(name)
}

/// `public-static-func` -> (0, "static-func").
fn split_visibility(kind: &str) -> Option<(u32, &str)> {
    VISIBILITIES.iter().enumerate().find_map(|(rank, v)| {
        kind.strip_prefix(v)
            .and_then(|rest| rest.strip_prefix('-'))
            .map(|rest| (rank as u32, rest))
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Constructor, destructor or operator, by name.
fn special_function(member: &MemberDef, class_name: &str) -> Option<(&'static str, u32)> {
    if !member.kind.is_function_like() {
        return None;
    }
    if !class_name.is_empty() {
        if member.name == class_name {
            return Some(("constructor", 3));
        }
        if member.name.strip_prefix('~') == Some(class_name) {
            return Some(("destructor", 4));
        }
    }
    if is_operator(&member.name) {
        return Some(("operator", 5));
    }
    None
}

fn visibility_bucket(rank: u32, rest: &str, member: &MemberDef, class_name: &str) -> Option<Bucket> {
    let (suffix, category) = match rest {
        "type" => match member.kind {
            MemberKind::Typedef => ("typedef", 0),
            MemberKind::Enum => ("enum", 1),
            _ => ("type", 2),
        },
        "func" | "slot" => special_function(member, class_name).unwrap_or(if rest == "func" {
            ("func", 6)
        } else {
            ("slot", 6)
        }),
        "attrib" => ("attrib", 7),
        "static-func" => ("static-func", 8),
        "static-attrib" => ("static-attrib", 9),
        _ => return None,
    };
    let visibility = VISIBILITIES[rank as usize];
    let v = capitalize(visibility);
    let title = match suffix {
        "constructor" | "destructor" | "operator" => {
            let noun = match suffix {
                "constructor" => "Constructors",
                "destructor" => "Destructor",
                _ => "Operators",
            };
            if rank == 0 {
                noun.to_string()
            } else {
                format!("{} {}", v, noun)
            }
        }
        "typedef" => format!("{} Typedefs", v),
        "enum" => format!("{} Enumerations", v),
        "type" => format!("{} Types", v),
        "func" => format!("{} Member Functions", v),
        "slot" => format!("{} Slots", v),
        "attrib" => format!("{} Attributes", v),
        "static-func" => format!("{} Static Functions", v),
        _ => format!("{} Static Attributes", v),
    };
    Some(Bucket {
        key: format!("{}-{}", visibility, suffix),
        title,
        priority: category * 10 + rank,
    })
}

fn plain_bucket(kind: &str, member: &MemberDef) -> Option<Bucket> {
    let (key, title, category) = match kind {
        "typedef" => ("typedef", "Typedefs", 0),
        "enum" => ("enum", "Enumerations", 1),
        "func" if member.kind.is_function_like() && is_operator(&member.name) => {
            ("operator", "Operators", 5)
        }
        "func" => ("func", "Functions", 6),
        "signal" => ("signal", "Signals", 6),
        "dcop-func" => ("dcop-func", "DCOP Functions", 6),
        "prototype" => ("prototype", "Prototypes", 6),
        "var" => ("var", "Variables", 7),
        "property" => ("property", "Properties", 7),
        "event" => ("event", "Events", 7),
        "friend" => ("friend", "Friends", 10),
        "related" => ("related", "Related", 10),
        "define" => ("define", "Macro Definitions", 11),
        _ => return None,
    };
    Some(Bucket {
        key: key.to_string(),
        title: title.to_string(),
        priority: category * 10,
    })
}

fn bucket(kind: &str, member: &MemberDef, class_name: &str) -> Bucket {
    let known = match split_visibility(kind) {
        Some((rank, rest)) => visibility_bucket(rank, rest, member, class_name),
        None => plain_bucket(kind, member),
    };
    known.unwrap_or_else(|| Bucket {
        key: kind.to_string(),
        title: capitalize(&kind.replace('-', " ")),
        priority: CATEGORY_UNKNOWN * 10,
    })
}

/// Regroup the sections of `def`. `class_name` is the bare class name used
/// to spot constructors (empty for non-classes); `lookup` resolves
/// `<member>` references to their definitions.
pub fn reclassify<'a, F>(def: &'a CompoundDef, class_name: &str, lookup: F) -> Vec<Section<'a>>
where
    F: Fn(&str) -> Option<&'a MemberDef>,
{
    let mut sections: Vec<Section<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut user_defined = 0;

    for raw in &def.section_defs {
        let mut members: Vec<&'a MemberDef> = raw.member_defs.iter().collect();
        for r in &raw.member_refs {
            match lookup(&r.refid) {
                Some(m) => members.push(m),
                None => tracing::warn!(compound = %def.id, refid = %r.refid, "unresolved section member"),
            }
        }
        if members.is_empty() {
            continue;
        }

        if raw.kind == "user-defined" {
            sections.push(Section {
                key: format!("user-defined-{}", user_defined),
                title: raw
                    .header
                    .clone()
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| "User Defined".to_string()),
                priority: CATEGORY_USER_DEFINED * 10,
                description: raw.description.as_ref(),
                members,
            });
            user_defined += 1;
            continue;
        }

        let mut reported = false;
        for member in members {
            let b = bucket(&raw.kind, member, class_name);
            if b.priority == CATEGORY_UNKNOWN * 10 && !reported {
                tracing::warn!(compound = %def.id, kind = %raw.kind, "unknown section kind");
                reported = true;
            }
            let pos = *positions.entry(b.key.clone()).or_insert_with(|| {
                sections.push(Section {
                    key: b.key,
                    title: b.title,
                    priority: b.priority,
                    description: None,
                    members: Vec::new(),
                });
                sections.len() - 1
            });
            let section = &mut sections[pos];
            if section.description.is_none() {
                section.description = raw.description.as_ref();
            }
            section.members.push(member);
        }
    }

    sections.sort_by_key(|s| s.priority);
    sections
}
