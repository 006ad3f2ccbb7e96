use serde::{Deserialize, Serialize};

/// How a numbered list picks its first ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingStrategy {
    /// Every list starts at 1
    StartFromOne,
    /// Continue from the previous sibling, otherwise keep the number the user wrote
    #[default]
    Dynamic,
}

impl NumberingStrategy {
    /// Ordinal expected on the first line being renumbered.
    ///
    /// A preceding sibling always wins: the line continues its list at `k + 1`.
    /// Without one the line starts a list, and the strategies differ.
    pub fn base_ordinal(self, preceding_sibling: Option<u64>, written: u64) -> u64 {
        match (preceding_sibling, self) {
            (Some(k), _) => k.saturating_add(1),
            (None, NumberingStrategy::StartFromOne) => 1,
            (None, NumberingStrategy::Dynamic) => written,
        }
    }
}
