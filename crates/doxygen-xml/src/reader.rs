//! Loading a whole export folder.
//!
//! Three document kinds are read: `index.xml`, one `{refid}.xml` per
//! compound listed in the index, and `Doxyfile.xml`. All of them are
//! required; a missing or malformed file stops the load.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::compound::CompoundDef;
use crate::model::doxyfile::Doxyfile;
use crate::model::index::DoxygenIndex;
use crate::model::{check_attributes, check_text, FromXml};
use crate::node::{XmlElement, XmlNode};

/// Everything parsed from one export, before any cross-referencing.
#[derive(Debug, Default)]
pub struct Corpus {
    pub index: DoxygenIndex,
    pub compounds: Vec<CompoundDef>,
    pub doxyfile: Doxyfile,
    pub diagnostics: Diagnostics,
}

impl Corpus {
    pub fn compound(&self, id: &str) -> Option<&CompoundDef> {
        self.compounds.iter().find(|c| c.id == id)
    }
}

/// Read and parse one XML file into its root element.
pub fn read_document(path: &Path) -> Result<XmlElement> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    XmlElement::parse(&text).map_err(|e| e.in_file(path))
}

/// Parse a per-compound document. Its root is `<doxygen>` wrapping one or
/// more `<compounddef>` elements.
pub fn parse_compound_document(root: &XmlElement, diags: &mut Diagnostics) -> Result<Vec<CompoundDef>> {
    if root.name != "doxygen" {
        return Err(Error::UnexpectedRoot {
            expected: "doxygen".to_string(),
            found: root.name.clone(),
        });
    }
    check_attributes("Doxygen", root, &["version"], diags);
    let mut defs = Vec::new();
    for child in &root.children {
        match child {
            XmlNode::Element(e) if e.name == "compounddef" => defs.push(CompoundDef::from_xml(e, diags)?),
            XmlNode::Element(e) => diags.unknown_element("Doxygen", &root.name, &e.name),
            XmlNode::Text(t) => check_text("Doxygen", root, t, diags),
        }
    }
    Ok(defs)
}

/// Load a complete export from `folder`.
pub fn load(folder: &Path) -> Result<Corpus> {
    let mut diagnostics = Diagnostics::new();

    let index_path = folder.join("index.xml");
    let index_root = read_document(&index_path)?;
    let index = DoxygenIndex::from_xml(&index_root, &mut diagnostics).map_err(|e| e.in_file(&index_path))?;
    tracing::debug!(compounds = index.compounds.len(), "read index.xml");

    let mut compounds = Vec::with_capacity(index.compounds.len());
    let mut seen = HashSet::new();
    for entry in &index.compounds {
        let path = folder.join(format!("{}.xml", entry.refid));
        let root = read_document(&path)?;
        let defs = parse_compound_document(&root, &mut diagnostics).map_err(|e| e.in_file(&path))?;
        for def in defs {
            if !seen.insert(def.id.clone()) {
                return Err(Error::DuplicateCompound(def.id).in_file(&path));
            }
            tracing::trace!(id = %def.id, kind = def.kind.as_str(), "parsed compound");
            compounds.push(def);
        }
    }

    let doxyfile_path = folder.join("Doxyfile.xml");
    let doxyfile_root = read_document(&doxyfile_path)?;
    let doxyfile = Doxyfile::from_xml(&doxyfile_root, &mut diagnostics).map_err(|e| e.in_file(&doxyfile_path))?;

    Ok(Corpus {
        index,
        compounds,
        doxyfile,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const INDEX: &str = "<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n\
        <doxygenindex version=\"1.9.8\">\n\
        <compound refid=\"namespacegeo\" kind=\"namespace\"><name>geo</name></compound>\n\
        </doxygenindex>\n";

    const NAMESPACE: &str = "<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n\
        <doxygen version=\"1.9.8\">\n\
        <compounddef id=\"namespacegeo\" kind=\"namespace\" language=\"C++\">\n\
        <compoundname>geo</compoundname>\n\
        <briefdescription><para>Geometry.</para></briefdescription>\n\
        <detaileddescription/>\n\
        <location file=\"include/geo/shape.h\" line=\"3\"/>\n\
        </compounddef>\n\
        </doxygen>\n";

    const DOXYFILE: &str = "<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n\
        <doxyfile version=\"1.9.8\">\n\
        <option id=\"PROJECT_NAME\" default=\"no\" type=\"string\"><value>Geo</value></option>\n\
        </doxyfile>\n";

    fn export(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        dir
    }

    #[test]
    fn loads_a_minimal_export() {
        let dir = export(&[
            ("index.xml", INDEX),
            ("namespacegeo.xml", NAMESPACE),
            ("Doxyfile.xml", DOXYFILE),
        ]);
        let corpus = load(dir.path()).unwrap();
        assert_eq!(corpus.compounds.len(), 1);
        assert_eq!(corpus.compound("namespacegeo").unwrap().compound_name, "geo");
        assert_eq!(corpus.doxyfile.project_name(), Some("Geo"));
        assert!(corpus.diagnostics.is_empty());
    }

    #[test]
    fn missing_compound_file_is_fatal() {
        let dir = export(&[("index.xml", INDEX), ("Doxyfile.xml", DOXYFILE)]);
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("namespacegeo.xml"));
    }

    #[test]
    fn malformed_file_names_the_file() {
        let dir = export(&[
            ("index.xml", INDEX),
            ("namespacegeo.xml", "<doxygen><compounddef"),
            ("Doxyfile.xml", DOXYFILE),
        ]);
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
        assert!(err.to_string().contains("namespacegeo.xml"));
    }

    #[test]
    fn missing_doxyfile_is_fatal() {
        let dir = export(&[("index.xml", INDEX), ("namespacegeo.xml", NAMESPACE)]);
        assert!(load(dir.path()).is_err());
    }
}
