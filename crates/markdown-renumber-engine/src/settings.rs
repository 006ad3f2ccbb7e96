use serde::{Deserialize, Serialize};

use crate::checkbox::{CheckboxSorter, Placement};
use crate::error::SettingsError;
use crate::locate::ScopeRule;
use crate::strategy::NumberingStrategy;

pub const MIN_INDENT_SIZE: u8 = 2;
pub const MAX_INDENT_SIZE: u8 = 8;

/// User-facing options recognised by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Master switch for reacting to edits
    pub live_update: bool,
    pub numbering_strategy: NumberingStrategy,
    pub sort_checkboxes_bottom: bool,
    /// Whether plain lines at a checkbox's level end its scope
    pub checkbox_scope: ScopeRule,
    pub live_checkbox_update: bool,
    pub live_numbering_update: bool,
    /// Tab width of the host editor. Indentation is never compared by width,
    /// so the engine only validates it.
    pub indent_size: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_update: true,
            numbering_strategy: NumberingStrategy::Dynamic,
            sort_checkboxes_bottom: true,
            checkbox_scope: ScopeRule::CheckboxesOnly,
            live_checkbox_update: true,
            live_numbering_update: true,
            indent_size: 4,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_INDENT_SIZE..=MAX_INDENT_SIZE).contains(&self.indent_size) {
            return Err(SettingsError::IndentSizeOutOfRange(self.indent_size));
        }
        Ok(())
    }

    pub fn placement(&self) -> Placement {
        Placement::from_sort_bottom(self.sort_checkboxes_bottom)
    }

    pub fn checkbox_sorter(&self) -> CheckboxSorter {
        CheckboxSorter::new(self.placement()).with_scope_rule(self.checkbox_scope)
    }
}
