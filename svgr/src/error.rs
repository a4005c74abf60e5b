use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The document could not be opened, decoded or tokenized.
    #[error("source unreadable: {0}")]
    SourceUnreadable(#[from] io::Error),

    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// Path data stopped making sense at byte `offset`.
    #[error("malformed path data at offset {offset}")]
    MalformedPathData { offset: usize },
}

impl Error {
    pub(crate) fn unreadable(msg: impl Into<String>) -> Self {
	Error::SourceUnreadable(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }
}

/// A non-fatal report of something the walker skipped. Only collected in
/// strict mode.
#[derive(Debug)]
pub enum Diagnostic {
    UnrecognizedTag(String),
    UnrecognizedAttribute { tag: String, name: String },
    /// A close tag that did not match the element on top of the stack.
    /// `expected` is the tag that would have closed it, if any is open.
    UnbalancedClose { name: String, expected: Option<String> },
    Attribute { tag: String, name: String, error: Error },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
	match self {
	    Diagnostic::UnrecognizedTag(name) => write!(f, "unrecognized tag <{}>", name),
	    Diagnostic::UnrecognizedAttribute { tag, name } =>
		write!(f, "unrecognized attribute {:?} on <{}>", name, tag),
	    Diagnostic::UnbalancedClose { name, expected: Some(expected) } =>
		write!(f, "</{}> does not close open <{}>", name, expected),
	    Diagnostic::UnbalancedClose { name, expected: None } =>
		write!(f, "</{}> with no open element", name),
	    Diagnostic::Attribute { tag, name, error } =>
		write!(f, "attribute {:?} on <{}>: {}", name, tag, error),
	}
    }
}
