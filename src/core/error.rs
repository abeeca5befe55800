//! Core error types for tree parsing and layout
//!
//! This module defines the common error types used throughout the layout pipeline.

use thiserror::Error;

/// Core error types for tree parsing and layout
#[derive(Error, Debug)]
pub enum PhyloError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Layout error: {message}")]
    LayoutError { message: String },
}

impl PhyloError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: impl Into<String>) -> Self {
        Self::LayoutError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = PhyloError::parse_error("unbalanced parentheses");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("unbalanced parentheses"));
    }

    #[test]
    fn test_layout_error() {
        let error = PhyloError::layout_error("missing parent row");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Layout error"));
        assert!(error_msg.contains("missing parent row"));
    }
}
