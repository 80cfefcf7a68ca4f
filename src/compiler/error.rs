//! Compile failure taxonomy.
//!
//! Every variant is recoverable and user-facing: the live preview shows it
//! as an error panel, exports surface it as a blocking error. Nothing here
//! ever tears down the coordinator.

use thiserror::Error;

/// Failure of a single external compile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The compiler executable could not be found at any search location.
    #[error(
        "inklecate compiler not found. Install it (e.g. `brew install inklecate`) \
         or set `[compiler] path` in inkpot.toml."
    )]
    ToolMissing,

    /// The compiler ran and reported failure. The payload is its combined
    /// stdout/stderr, verbatim - that diagnostic text IS the user-facing
    /// error and must not be summarized.
    #[error("{0}")]
    Process(String),

    /// The compiler reported success but its output could not be used.
    #[error("compiler finished but output was unreadable: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_display_is_verbatim() {
        let err = CompileError::Process("Line 3: unexpected token".to_string());
        assert_eq!(err.to_string(), "Line 3: unexpected token");
    }

    #[test]
    fn test_tool_missing_mentions_config() {
        let msg = CompileError::ToolMissing.to_string();
        assert!(msg.contains("inklecate"));
        assert!(msg.contains("inkpot.toml"));
    }
}
