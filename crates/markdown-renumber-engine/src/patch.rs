/// Result of applying a transaction to a [`crate::Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Lines whose text actually changed, ascending
    pub changed_lines: Vec<usize>,
    /// Byte ranges in the new buffer covered by the replaced lines
    pub changed: Vec<std::ops::Range<usize>>,
    pub version: u64,
}
