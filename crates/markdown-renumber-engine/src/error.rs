use thiserror::Error;

/// Reasons a host can refuse a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Line {line} is out of range (document has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("Replacement for line {line} contains a line break")]
    MultilineReplacement { line: usize },

    #[error("Transaction rejected: {reason}")]
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Indent size {0} is outside the supported range 2..=8")]
    IndentSizeOutOfRange(u8),
}
