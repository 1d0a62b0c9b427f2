use std::convert::Into;
use std::error::Error as StdError;
use std::fmt;

/// The kind of an error (non-exhaustive)
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// Generic error
    Msg(String),
    /// A `END` directive names a block that is not currently open
    MissingBegin(String),
    /// A block is still open when the template ends
    MissingEnd(String),
    /// A block name is not part of the block tree
    BlockNotFound(String),
    /// Tried to assign a value to a variable with an empty name
    InvalidVariableName,
    /// A null value was assigned while null values are not allowed
    NullValue(String),
    /// A template could not be found by the loader
    TemplateNotFound(String),
    /// An error happened while serializing a value to assign
    Json(serde_json::Error),
    /// An IO error occurred while loading a template
    Io(std::io::ErrorKind),
}

/// The Error type
#[derive(Debug)]
pub struct Error {
    /// Kind of error
    pub kind: ErrorKind,
    source: Option<Box<dyn StdError + Sync + Send>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Msg(ref message) => write!(f, "{}", message),
            ErrorKind::MissingBegin(ref name) => {
                write!(f, "Block `{}` does not have a matching begin directive", name)
            }
            ErrorKind::MissingEnd(ref name) => {
                write!(f, "Block `{}` does not have a matching end directive", name)
            }
            ErrorKind::BlockNotFound(ref name) => write!(f, "Block `{}` does not exist", name),
            ErrorKind::InvalidVariableName => {
                write!(f, "Cannot assign a value to a variable with an empty name")
            }
            ErrorKind::NullValue(ref name) => {
                write!(f, "Cannot assign a null value to variable `{}`", name)
            }
            ErrorKind::TemplateNotFound(ref name) => write!(f, "Template '{}' not found", name),
            ErrorKind::Json(ref e) => write!(f, "{}", e),
            ErrorKind::Io(ref io_error) => {
                write!(f, "Io error while loading a template: {:?}", io_error)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|c| &**c as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Creates generic error
    pub fn msg(value: impl ToString) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: None }
    }

    /// Creates generic error with a source
    pub fn chain(value: impl ToString, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: Some(source.into()) }
    }

    /// Creates an error for a `END` directive without an open block of that name
    pub fn missing_begin(name: impl ToString) -> Self {
        Self { kind: ErrorKind::MissingBegin(name.to_string()), source: None }
    }

    /// Creates an error for a block left open at the end of the template
    pub fn missing_end(name: impl ToString) -> Self {
        Self { kind: ErrorKind::MissingEnd(name.to_string()), source: None }
    }

    /// Creates an error for an unknown block name
    pub fn block_not_found(name: impl ToString) -> Self {
        Self { kind: ErrorKind::BlockNotFound(name.to_string()), source: None }
    }

    /// Creates an error for an empty variable name
    pub fn invalid_variable_name() -> Self {
        Self { kind: ErrorKind::InvalidVariableName, source: None }
    }

    /// Creates an error for a disallowed null value
    pub fn null_value(name: impl ToString) -> Self {
        Self { kind: ErrorKind::NullValue(name.to_string()), source: None }
    }

    /// Creates a template not found error
    pub fn template_not_found(tpl: impl ToString) -> Self {
        Self { kind: ErrorKind::TemplateNotFound(tpl.to_string()), source: None }
    }

    /// Creates a JSON error
    pub fn json(value: serde_json::Error) -> Self {
        Self { kind: ErrorKind::Json(value), source: None }
    }

    /// Creates an IO error
    pub fn io_error(error: std::io::Error) -> Self {
        Self { kind: ErrorKind::Io(error.kind()), source: Some(Box::new(error)) }
    }

    /// Whether the error comes from an unbalanced block structure
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingBegin(_) | ErrorKind::MissingEnd(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::io_error(error)
    }
}
impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Self::msg(e)
    }
}
impl From<String> for Error {
    fn from(e: String) -> Self {
        Self::msg(e)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::json(e)
    }
}
/// Convenient wrapper around std::Result.
pub type Result<T> = ::std::result::Result<T, Error>;
