//! Error types for digest, draw, and catalog processing.

use thiserror::Error;

/// Stable error codes for the selection core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// R001: Identifier or key is not valid UTF-8
    EncodingError,
    /// R002: Draw requested after every digest chunk was consumed
    ExhaustedEntropy,
    /// R003: Draw requested with a zero modulus
    InvalidModulus,
    /// R004: Catalog violates a shape or capacity invariant
    ConfigurationError,
    /// R005: Requested part set does not exist
    UnknownSet,
    /// R006: Catalog or config document could not be parsed
    ParseError,
    /// R007: I/O failure while reading a catalog or config
    Io,
    /// R008: Path token is not `color/category/part`
    InvalidToken,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "R001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::EncodingError => "R001",
            ErrorCode::ExhaustedEntropy => "R002",
            ErrorCode::InvalidModulus => "R003",
            ErrorCode::ConfigurationError => "R004",
            ErrorCode::UnknownSet => "R005",
            ErrorCode::ParseError => "R006",
            ErrorCode::Io => "R007",
            ErrorCode::InvalidToken => "R008",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which input of the seeded digest failed UTF-8 decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestInput {
    Identifier,
    Key,
}

impl std::fmt::Display for DigestInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestInput::Identifier => write!(f, "identifier"),
            DigestInput::Key => write!(f, "key"),
        }
    }
}

/// A catalog invariant violation, detected when the catalog is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("catalog has no colors")]
    NoColors,

    #[error("catalog has no categories")]
    NoCategories,

    #[error("color name '{0}' must be non-empty and contain no '/'")]
    InvalidColorName(String),

    #[error("color '{color}' has categories {found:?}, expected {expected:?} (from color '{reference}')")]
    CategoryMismatch {
        color: String,
        reference: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("category '{category}' of color '{color}' has no parts")]
    EmptyPartList { color: String, category: String },

    #[error(
        "catalog needs {required} draws (1 color + {categories} categories) but the digest supports only {max_draws}"
    )]
    TooManyCategories {
        categories: usize,
        required: usize,
        max_draws: usize,
    },

    #[error("color '{color}' offers {bits:.1} bits of choice, minimum is {minimum:.1}")]
    InsufficientParts { color: String, bits: f64, minimum: f64 },

    #[error("invalid entropy budget: {0}")]
    InvalidBudget(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Top-level error type for the selection core.
#[derive(Debug, Error)]
pub enum RobohashError {
    /// Identifier or key bytes are not UTF-8.
    #[error("{input} is not valid UTF-8: {source}")]
    Encoding {
        input: DigestInput,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Every chunk of the digest has been consumed.
    #[error("entropy exhausted: all {consumed} digest chunks already consumed")]
    ExhaustedEntropy { consumed: usize },

    /// Draw requested over an empty range.
    #[error("invalid modulus {0}: draws need a modulus greater than zero")]
    InvalidModulus(u64),

    /// Catalog rejected at configuration time.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Part set name not known to the provider.
    #[error("unknown part set '{0}'")]
    UnknownSet(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed part token.
    #[error("invalid part token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },
}

impl RobohashError {
    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RobohashError::Encoding { .. } => ErrorCode::EncodingError,
            RobohashError::ExhaustedEntropy { .. } => ErrorCode::ExhaustedEntropy,
            RobohashError::InvalidModulus(_) => ErrorCode::InvalidModulus,
            RobohashError::Configuration(_) => ErrorCode::ConfigurationError,
            RobohashError::UnknownSet(_) => ErrorCode::UnknownSet,
            RobohashError::JsonParse(_) => ErrorCode::ParseError,
            RobohashError::Io(_) => ErrorCode::Io,
            RobohashError::InvalidToken { .. } => ErrorCode::InvalidToken,
        }
    }
}

/// Common trait for reportable errors.
///
/// The core, renderers, and asset sources implement this so callers can
/// report failures with a stable code without depending on every error type.
pub trait BackendError: std::error::Error {
    /// Stable error code, e.g. "IMAGE_001".
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping, e.g. "image".
    fn category(&self) -> &'static str;
}

impl BackendError for RobohashError {
    fn code(&self) -> &'static str {
        RobohashError::code(self).code()
    }

    fn category(&self) -> &'static str {
        "core"
    }
}

/// Code, message and category of a failure, independent of its source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    /// The error code (e.g., "IMAGE_002", "R004").
    pub code: &'static str,
    /// The human-readable error message.
    pub message: String,
    /// The error category (e.g., "image", "core").
    pub category: &'static str,
}

impl GenerationError {
    /// Describes any `BackendError` implementor.
    pub fn describe<E: BackendError + ?Sized>(err: &E) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
            category: err.category(),
        }
    }

    /// Create a `GenerationError` with explicit values.
    pub fn new(code: &'static str, message: impl Into<String>, category: &'static str) -> Self {
        Self {
            code,
            message: message.into(),
            category,
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::EncodingError.code(), "R001");
        assert_eq!(ErrorCode::ExhaustedEntropy.code(), "R002");
        assert_eq!(ErrorCode::InvalidModulus.code(), "R003");
        assert_eq!(ErrorCode::ConfigurationError.code(), "R004");
        assert_eq!(ErrorCode::UnknownSet.to_string(), "R005");
    }

    #[test]
    fn test_error_maps_to_code() {
        let err = RobohashError::ExhaustedEntropy { consumed: 8 };
        assert_eq!(err.code(), ErrorCode::ExhaustedEntropy);
        assert_eq!(
            err.to_string(),
            "entropy exhausted: all 8 digest chunks already consumed"
        );

        let err: RobohashError = ConfigurationError::NoColors.into();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
    }

    #[test]
    fn test_too_many_categories_message() {
        let err = ConfigurationError::TooManyCategories {
            categories: 8,
            required: 9,
            max_draws: 8,
        };
        assert_eq!(
            err.to_string(),
            "catalog needs 9 draws (1 color + 8 categories) but the digest supports only 8"
        );
    }

    #[test]
    fn test_generation_error_describes_core_error() {
        let err = GenerationError::describe(&RobohashError::InvalidModulus(0));
        assert_eq!(err.code, "R003");
        assert_eq!(err.category, "core");
        assert_eq!(
            err.to_string(),
            "[R003] invalid modulus 0: draws need a modulus greater than zero"
        );

        let unknown = RobohashError::UnknownSet("set9".into());
        assert_eq!(BackendError::code(&unknown), "R005");
        assert_eq!(unknown.message(), "unknown part set 'set9'");
    }
}
