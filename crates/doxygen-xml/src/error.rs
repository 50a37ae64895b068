//! Fatal ingestion errors.
//!
//! Everything in here means the export is corrupt or not a Doxygen XML
//! export at all. Recoverable schema drift goes through
//! [`Diagnostics`](crate::Diagnostics) instead.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML")]
    Syntax(#[from] roxmltree::Error),

    #[error("in {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> is missing required element <{child}>")]
    MissingElement { element: String, child: String },

    #[error("<{element}> has {count} <{child}> elements, expected exactly one")]
    AmbiguousElement {
        element: String,
        child: String,
        count: usize,
    },

    #[error("<{element}> attribute `{attribute}` has invalid value `{value}`")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("<{element}> must contain only text, found <{child}>")]
    NotText { element: String, child: String },

    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("compound id `{0}` is defined more than once")]
    DuplicateCompound(String),
}

impl Error {
    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub(crate) fn missing_element(element: &str, child: &str) -> Self {
        Error::MissingElement {
            element: element.to_string(),
            child: child.to_string(),
        }
    }

    pub(crate) fn invalid_attribute(element: &str, attribute: &str, value: &str) -> Self {
        Error::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    /// Attach the file an error came from.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
