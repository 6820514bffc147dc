use std::{fmt, io};

/// A numeric payload that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// A field is empty or not a number.
    InvalidNumber {
        /// 0-based position of the field.
        index: usize,
        field: String,
    },

    /// A field parsed, but to NaN or an infinity.
    NonFinite { index: usize },

    /// The payload holds the wrong number of values.
    ArityMismatch { got: usize, expected: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { index, field } => {
                write!(f, "field {index} is not a number: '{field}'")
            }
            Self::NonFinite { index } => write!(f, "field {index} is not finite"),
            Self::ArityMismatch { got, expected } => {
                write!(f, "expected {expected} values, got {got}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors produced by a model when handed vectors it cannot use.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    ShapeMismatch {
        /// Which vector was wrong (e.g. "input", "target").
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The sample overflowed the arithmetic; nothing was changed.
    NonFinite {
        /// Which quantity overflowed (e.g. "output", "loss", "gradient").
        what: &'static str,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            Self::NonFinite { what } => write!(f, "{what} is not finite"),
        }
    }
}

impl std::error::Error for ModelError {}

/// A request that was understood but could not be served.
///
/// Its `Display` text is what the client receives after `error: `.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    Format(FormatError),
    Model(ModelError),
    /// A binary frame that is not valid UTF-8.
    NotText,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "malformed payload: {e}"),
            Self::Model(e) => write!(f, "model rejected request: {e}"),
            Self::NotText => write!(f, "binary message is not valid UTF-8"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::NotText => None,
        }
    }
}

impl From<FormatError> for RequestError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ModelError> for RequestError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

/// Errors that stop the server before or while it accepts connections.
#[derive(Debug)]
pub enum ServerError {
    /// The listener could not be bound.
    Bind { addr: String, reason: String },
    /// Invalid configuration, caught before binding.
    Config(String),
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, reason } => write!(f, "could not bind {addr}: {reason}"),
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
