//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one [`CommandOutput`]
//! document on stdout, whether it succeeded or not.

use robohash_backend_image::RenderError;
use robohash_core::{ConfigurationError, ErrorCode, GenerationError, RobohashError, SelectedPart};
use serde::{Deserialize, Serialize};

use crate::settings::InvalidArgument;

/// Error codes for CLI-level failures.
///
/// Core and backend failures keep their own codes (`R00x`, `IMAGE_00x`).
pub mod error_codes {
    /// File could not be read or written
    pub const FILE_IO: &str = "CLI_001";
    /// Invalid command-line value
    pub const INVALID_ARGUMENT: &str = "CLI_002";
    /// Anything without a more specific code
    pub const INTERNAL: &str = "CLI_999";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "R005", "IMAGE_002", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category ("core", "image", "cli")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Part set the error relates to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            category: None,
            set: None,
        }
    }

    /// Sets the part set for this error.
    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self
    }

    /// Builds an error from a [`GenerationError`].
    pub fn from_generation(err: &GenerationError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            category: Some(err.category.to_string()),
            set: None,
        }
    }

    /// Builds an error from a command failure, keeping the most specific code
    /// found in the error chain and the full context chain as the message.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let mut json = Self::from_generation(&classify(err));
        json.message = format!("{:#}", err);
        json
    }
}

/// Finds the most specific reportable error in a command failure.
///
/// Argument errors win over anything they wrap; otherwise the first cause
/// with a known code, outermost first.
pub fn classify(err: &anyhow::Error) -> GenerationError {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<InvalidArgument>() {
            return GenerationError::new(error_codes::INVALID_ARGUMENT, e.to_string(), "cli");
        }
    }
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<RobohashError>() {
            return GenerationError::describe(e);
        }
        if let Some(e) = cause.downcast_ref::<RenderError>() {
            return GenerationError::describe(e);
        }
        if let Some(e) = cause.downcast_ref::<ConfigurationError>() {
            return GenerationError::new(ErrorCode::ConfigurationError.code(), e.to_string(), "core");
        }
        if let Some(e) = cause.downcast_ref::<std::io::Error>() {
            return GenerationError::new(error_codes::FILE_IO, e.to_string(), "cli");
        }
    }
    GenerationError::new(error_codes::INTERNAL, err.to_string(), "cli")
}

/// Stable code for a command failure.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    classify(err).code
}

/// Envelope printed by every `--json` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors (empty on success)
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Prints the document to stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Result of `digest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestResult {
    pub identifier: String,
    /// True when the public (empty) key was used
    pub public_key: bool,
    /// Lowercase hex HMAC-SHA512
    pub digest: String,
    /// The eight big-endian 64-bit chunks
    pub chunks: Vec<u64>,
}

/// Result of `select`.
#[derive(Debug, Clone, Serialize)]
pub struct SelectResult {
    pub identifier: String,
    pub set: String,
    pub color: String,
    pub tag: String,
    pub tokens: Vec<String>,
    pub parts: Vec<SelectedPart>,
}

/// Result of `render`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSummary {
    pub identifier: String,
    pub set: String,
    pub tag: String,
    pub tokens: Vec<String>,
    pub width: u32,
    pub height: u32,
    /// Path of the written PNG
    pub output: String,
    /// BLAKE3 hash of the written PNG
    pub blake3: String,
}

/// One set's entry in `validate` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetReport {
    pub set: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<usize>,
    /// Draws one selection consumes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_draws: Option<usize>,
    /// Draws the digest supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_draws: Option<usize>,
    /// Bits of choice offered by the poorest color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_bits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Result of `sets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetsResult {
    pub sets_dir: String,
    pub sets: Vec<String>,
}
