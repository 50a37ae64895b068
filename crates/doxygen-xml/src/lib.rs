//! Doxygen XML ingestion.
//!
//! [`reader::load`] turns an export folder into a [`Corpus`]: the parsed
//! index, every compound definition and the Doxyfile dump. Layers, leaf
//! first:
//!
//! - [`node`]: generic order-preserving element tree on top of `roxmltree`
//! - `access`: asserting getters over that tree
//! - [`model`]: one typed struct per schema type, built with [`FromXml`]
//!
//! Schema drift (unknown children, attributes, stray text) is collected in
//! [`Diagnostics`]; corrupt input is an [`Error`].

mod access;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod node;
pub mod reader;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{Error, Result};
pub use model::compound::{CompoundDef, CompoundKind};
pub use model::description::{Description, DocNode, TextStyle};
pub use model::linked_text::{LinkedText, LinkedTextItem, RefKind, RefText};
pub use model::member::{MemberDef, MemberKind, Protection, Virtualness};
pub use model::section::{MemberRef, SectionDef};
pub use model::FromXml;
pub use node::{XmlElement, XmlNode};
pub use reader::{load, Corpus};
