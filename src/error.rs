// Error types for tool validation, transport, and configuration failures
//
// Design Decision: One error enum for the whole server
//
// Rationale: Tool dispatch needs to distinguish caller mistakes (unknown tool,
// missing or invalid parameters) from infrastructure failures (transport,
// serialization), because the JSON-RPC layer reports them with different
// error codes. Specific variants make that a pattern match instead of string
// sniffing.
//
// Trade-offs:
// - Validation variants render the exact user-facing message with no prefix,
//   since those strings are part of the tool contract
// - Infrastructure variants wrap their source via #[from] and keep a prefix
//   for log readability
//
// Alternatives Considered:
// 1. anyhow::Error everywhere: Rejected - the dispatcher must match variants
// 2. Separate validation/transport enums: Rejected - one seam, one error type

use thiserror::Error;

/// Main error type for the DevRev MCP server
///
/// Validation variants (`UnknownTool`, `MissingArguments`, `MissingParameter`,
/// `InvalidParameter`) display the verbatim message returned to the tool
/// caller. Everything else is an internal failure.
///
/// Error Handling Strategy:
/// - Validation errors: Reported to the caller as invalid-params, no retry
/// - Configuration errors: Fatal at startup, user must fix the environment
/// - HTTP transport errors: Propagated unmodified (never folded into tool
///   result text; a non-2xx status is NOT an error, it is a result)
/// - IO/JSON errors: Transport-loop failures, logged and surfaced as internal
#[derive(Debug, Error)]
pub enum DevRevMcpError {
    /// Tool name not present in the registry
    ///
    /// Checked before any argument validation.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool call carried no arguments object at all
    ///
    /// Raised only for tools that have at least one required field.
    #[error("Missing arguments")]
    MissingArguments,

    /// A required field is absent, null, or empty
    ///
    /// The string is the field name as declared in the tool's input schema.
    #[error("Missing {0} parameter")]
    MissingParameter(String),

    /// A field is present but outside its closed set of accepted values
    #[error("Invalid {field} parameter: {value}")]
    InvalidParameter { field: String, value: String },

    /// Environment configuration missing or invalid
    ///
    /// Example: DEVREV_API_KEY unset. Raised before any network attempt.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON-RPC envelope violation
    ///
    /// Examples: wrong jsonrpc version, request is not an object
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// HTTP request failed at the transport level
    ///
    /// Wraps reqwest::Error (connect, timeout, TLS). Status-code failures
    /// never take this path.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    ///
    /// Wraps serde_json::Error with automatic conversion
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO operation failed
    ///
    /// Wraps std::io::Error with automatic conversion via #[from]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DevRevMcpError {
    /// True for errors caused by the tool call itself rather than by the
    /// server or the network. The transport loop maps these to the JSON-RPC
    /// invalid-params code and everything else to internal-error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DevRevMcpError::UnknownTool(_)
                | DevRevMcpError::MissingArguments
                | DevRevMcpError::MissingParameter(_)
                | DevRevMcpError::InvalidParameter { .. }
        )
    }
}

/// Type alias for Result with DevRevMcpError
///
/// Use this instead of std::result::Result<T, DevRevMcpError> for convenience.
pub type Result<T> = std::result::Result<T, DevRevMcpError>;
