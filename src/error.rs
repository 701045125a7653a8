//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
///
/// I/O failures during the atomic write step are *not* raised through this
/// type; mutating operations catch them, log them, and return `Ok(false)`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Database file name doesn't look like a JSON file.
    InvalidName(String),
    /// Key is empty.
    InvalidKey,
    /// Amount (or the arithmetic result) is not a finite number.
    InvalidAmount,
    /// `add`/`subtract` hit a key whose stored value is not a number.
    TypeMismatch(String),
    /// File system problem (read, create).
    Io(String),
    /// Failed to serialize a value or the document.
    Serialize(String),
    /// File contents are not a valid JSON object.
    Corrupt(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidName(name) => {
                write!(f, "invalid database name {name:?}: expected a *.json file name")
            }
            Error::InvalidKey => write!(f, "invalid key: must be a non-empty string"),
            Error::InvalidAmount => write!(f, "invalid amount: must be a finite number"),
            Error::TypeMismatch(key) => {
                write!(f, "value at key {key:?} is not a number")
            }
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Corrupt(msg) => write!(f, "corrupt database file: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_data() || err.is_eof() {
            Error::Corrupt(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
