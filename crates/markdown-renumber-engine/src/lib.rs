//! Keeps markdown ordered lists numbered and checklists sorted while a
//! document is being edited.
//!
//! The engine never owns the text. Everything it reads and writes goes through
//! a [`Host`], and every reaction ends in at most one transaction of full-line
//! replacements. [`Document`] is an in-process host for tools and tests.

pub mod changes;
pub mod checkbox;
pub mod classify;
pub mod document;
pub mod engine;
pub mod error;
pub mod gate;
pub mod host;
pub mod lines;
pub mod locate;
pub mod patch;
pub mod renumber;
pub mod settings;
pub mod strategy;

// Re-export key types for easier usage
pub use changes::{Change, ChangeSet, PendingChanges};
pub use checkbox::{CheckboxSorter, Placement, Relocation};
pub use classify::{
    CheckboxItem, CheckboxMarker, NumberedItem, is_blank, leading_whitespace, match_checkbox,
    match_numbered,
};
pub use document::Document;
pub use engine::{Engine, Modifiers, Outcome};
pub use error::{HostError, SettingsError};
pub use gate::{Debouncer, Deferred, ReactionGate};
pub use host::{Host, Position, Selection};
pub use lines::{Lines, Overlay};
pub use locate::{
    IndentRelation, Scope, ScopeRule, find_block_start, find_scope_bounds, preceding_sibling,
};
pub use patch::Patch;
pub use renumber::Renumberer;
pub use settings::Settings;
pub use strategy::NumberingStrategy;
