//! Turning Doxygen reference ids into links.

use std::sync::LazyLock;

use doxygen_xml::RefKind;
use regex::Regex;

use super::error::{Error, Result};
use super::ViewModel;

// Doxygen member ids are `<compound id>_1<anchor>`, where the anchor is a
// hex digest prefixed by `a` (or `ga` inside groups). Observed behavior,
// not a documented format; the tests below pin the shapes we rely on.
static RE_MEMBER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_1([0-9a-fg]+)$").unwrap());

/// Split a member id into its owning compound id and its anchor.
pub fn split_member_id(refid: &str) -> Option<(&str, &str)> {
    let caps = RE_MEMBER_SUFFIX.captures(refid)?;
    let whole = caps.get(0)?;
    let anchor = caps.get(1)?;
    if whole.start() == 0 {
        return None;
    }
    Some((&refid[..whole.start()], anchor.as_str()))
}

/// Heading anchor of a member (or enum value) id.
pub fn member_anchor(refid: &str) -> &str {
    split_member_id(refid).map(|(_, anchor)| anchor).unwrap_or(refid)
}

impl ViewModel<'_> {
    /// Resolve a reference to an absolute URL, or `#anchor` for members of
    /// the page being rendered (`current` is its compound id).
    ///
    /// `Ok(None)` means the target exists but has no page; callers render
    /// plain text. A compound id missing from the index is an error.
    pub fn resolve(&self, refid: &str, kind: RefKind, current: Option<&str>) -> Result<Option<String>> {
        match kind {
            RefKind::Compound => {
                if !self.in_corpus(refid) {
                    return Err(Error::DanglingReference {
                        refid: refid.to_string(),
                    });
                }
                Ok(self.index_of(refid).map(|idx| self.url(idx)))
            }
            RefKind::Member => {
                let Some((owner, anchor)) = split_member_id(refid) else {
                    tracing::warn!(refid, "member reference without anchor");
                    return Ok(None);
                };
                let page = self
                    .member(refid)
                    .map(|entry| entry.compound)
                    .or_else(|| self.index_of(owner));
                let Some(page) = page else {
                    if !self.in_corpus(owner) {
                        tracing::warn!(refid, "member of an unknown compound");
                    }
                    return Ok(None);
                };
                let page_id = self.compounds[page].def.id.as_str();
                if current.is_some_and(|c| c == owner || c == page_id) {
                    return Ok(Some(format!("#{}", anchor)));
                }
                Ok(Some(format!("{}#{}", self.url(page), anchor)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{class, corpus};

    #[test]
    fn member_ids_from_doxygen_1_9() {
        assert_eq!(
            split_member_id("classgeo_1_1_widget_1a3c5d1e0f9b2a7c4d6e8f0a1b2c3d4e5f"),
            Some(("classgeo_1_1_widget", "a3c5d1e0f9b2a7c4d6e8f0a1b2c3d4e5f"))
        );
        assert_eq!(
            split_member_id("namespacegeo_1a0f2b"),
            Some(("namespacegeo", "a0f2b"))
        );
        assert_eq!(
            split_member_id("group__shapes_1ga9e1c"),
            Some(("group__shapes", "ga9e1c"))
        );
        // enum values append a second digest to the enum's anchor
        assert_eq!(
            split_member_id("namespacegeo_1a12ab34a56cd"),
            Some(("namespacegeo", "a12ab34a56cd"))
        );
    }

    #[test]
    fn compound_ids_are_not_member_ids() {
        assert_eq!(split_member_id("classgeo_1_1_widget"), None);
        assert_eq!(split_member_id("namespacegeo"), None);
        assert_eq!(split_member_id("_1a00"), None);
        assert_eq!(member_anchor("classgeo_1_1_widget"), "classgeo_1_1_widget");
    }

    fn widget_corpus() -> doxygen_xml::Corpus {
        corpus(
            &[
                &class("classgeo_1_1_shape", "geo::Shape", &[], ""),
                &class(
                    "classgeo_1_1_widget",
                    "geo::Widget",
                    &["classgeo_1_1_shape"],
                    "<sectiondef kind=\"public-func\">\
                     <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a01\" prot=\"public\" static=\"no\">\
                     <name>draw</name><location file=\"include/geo/shapes.h\" line=\"20\"/></memberdef>\
                     </sectiondef>",
                ),
            ],
            &["namespace_0d9"],
        )
    }

    #[test]
    fn same_page_member_is_bare_anchor() {
        let corpus = widget_corpus();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let link = view
            .resolve("classgeo_1_1_widget_1a01", RefKind::Member, Some("classgeo_1_1_widget"))
            .unwrap();
        assert_eq!(link.as_deref(), Some("#a01"));
    }

    #[test]
    fn other_page_member_is_full_url() {
        let corpus = widget_corpus();
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let link = view
            .resolve("classgeo_1_1_widget_1a01", RefKind::Member, Some("classgeo_1_1_shape"))
            .unwrap();
        assert_eq!(link.as_deref(), Some("/api/classes/geo/Widget#a01"));
    }

    #[test]
    fn compound_links() {
        let corpus = widget_corpus();
        let view = ViewModel::build(&corpus, "https://example.org/api").unwrap();
        assert_eq!(
            view.resolve("classgeo_1_1_shape", RefKind::Compound, None).unwrap().as_deref(),
            Some("https://example.org/api/classes/geo/Shape")
        );
        // listed in the index, no page
        assert_eq!(view.resolve("namespace_0d9", RefKind::Compound, None).unwrap(), None);
        assert!(matches!(
            view.resolve("classnowhere", RefKind::Compound, None),
            Err(Error::DanglingReference { .. })
        ));
    }
}
