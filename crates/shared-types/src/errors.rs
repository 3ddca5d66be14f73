//! # Error Types
//!
//! Errors raised while constructing shared value types.

use thiserror::Error;

/// Errors raised when a value fails validation at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Symbol code is not a well-formed 15-character SIDC.
    #[error("Invalid symbol code {code:?}: {reason}")]
    InvalidSymbolCode { code: String, reason: String },

    /// Dictionary type name is not recognised.
    #[error("Unknown dictionary type: {0}")]
    UnknownDictionaryType(String),

    /// Attribute name is outside the supported attribute set.
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Attribute value has a type the attribute cannot hold.
    #[error("Invalid value for attribute {key}: {reason}")]
    InvalidAttributeValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypeError::InvalidSymbolCode {
            code: "SFG".to_string(),
            reason: "expected 15 characters, got 3".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SFG"));
        assert!(msg.contains("15 characters"));
    }
}
