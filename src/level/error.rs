//! Conversion error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while tokenizing or interpreting one path `d` string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("invalid coordinate '{0}'")]
    InvalidNumber(String),

    /// Curves and relative commands are not implemented
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),

    #[error("expected an x,y pair but found '{0}'")]
    ExpectedPair(String),

    #[error("operand '{0}' appears before any path command")]
    OperandBeforeCommand(String),

    #[error("Z used before any figure was started with M")]
    CloseWithoutFigure,
}

/// Errors that can occur when converting an SVG document to a level
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML parsing error: {0}")]
    Xml(String),

    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: String,
    },

    #[error("attribute '{attribute}' has non-numeric value '{value}'")]
    InvalidNumber { attribute: String, value: String },

    /// `index` counts `<path>` elements from zero in document order
    #[error("path #{index}: {source}")]
    Path {
        index: usize,
        #[source]
        source: PathError,
    },

    #[error("found {0} circles labelled 'start', expected at most one")]
    DuplicateStart(usize),
}
