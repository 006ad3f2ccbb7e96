use std::borrow::Cow;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::changes::Change;
use crate::classify::{leading_whitespace, match_checkbox, match_numbered};
use crate::lines::Lines;
use crate::locate::{IndentRelation, ScopeRule, find_scope_bounds, indent_relation};

/// Which end of a scope completed items collect at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    Bottom,
    Top,
}

impl Placement {
    pub fn from_sort_bottom(sort_bottom: bool) -> Self {
        if sort_bottom {
            Placement::Bottom
        } else {
            Placement::Top
        }
    }
}

/// A single line moved within its scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub from: usize,
    pub to: usize,
    /// Every line whose text changed, `min(from, to)..=max(from, to)`
    pub range: Range<usize>,
    /// The move expressed as full-line replacements over `range`
    pub changes: Vec<Change>,
}

/// Moves a toggled checkbox so completed items stay clustered at one end.
///
/// Reacts to one toggle at a time: a checked item travels past the adjacent run of
/// unchecked siblings towards the completed end, an unchecked item travels back past
/// the adjacent run of checked siblings. Everything else keeps its relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckboxSorter {
    placement: Placement,
    scope_rule: ScopeRule,
}

impl CheckboxSorter {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            scope_rule: ScopeRule::default(),
        }
    }

    /// Decide which same-level lines share a scope with the toggled item.
    ///
    /// Under [`ScopeRule::AnyContent`] plain lines stay in the scope and are
    /// stepped over; only checkboxes stop or receive the moving item.
    pub fn with_scope_rule(self, scope_rule: ScopeRule) -> Self {
        Self { scope_rule, ..self }
    }

    /// Index of the sibling item the checkbox at `trigger` should land on.
    ///
    /// `Some(trigger)` when it is already on the right side of the boundary,
    /// `None` when `trigger` is not a checkbox.
    pub fn end_index<L: Lines + ?Sized>(&self, lines: &L, trigger: usize) -> Option<usize> {
        let text = lines.line(trigger)?;
        let checked = match_checkbox(&text)?.checked;
        let scope = find_scope_bounds(lines, trigger, self.scope_rule)?;
        let pos = scope.items.iter().position(|&i| i == trigger)?;

        let checkbox_state = |i: usize| {
            lines
                .line(i)
                .as_deref()
                .and_then(match_checkbox)
                .map(|c| c.checked)
        };
        let moves_down = checked == (self.placement == Placement::Bottom);
        let passed: Vec<usize> = if moves_down {
            scope.items[pos + 1..].to_vec()
        } else {
            scope.items[..pos].iter().rev().copied().collect()
        };

        let mut dest = trigger;
        for i in passed {
            match checkbox_state(i) {
                Some(state) if state == checked => break,
                Some(_) => dest = i,
                None => {}
            }
        }
        Some(dest)
    }

    /// Move the checkbox at `trigger` to its place in the scope.
    ///
    /// Returns `None` when no move is needed. Only the trigger line moves; when
    /// it moves down it is placed after the nested lines of the item it passes.
    pub fn reorder<L: Lines + ?Sized>(&self, lines: &L, trigger: usize) -> Option<Relocation> {
        let dest = self.end_index(lines, trigger)?;
        if dest == trigger {
            return None;
        }

        let to = if dest > trigger {
            let text = lines.line(trigger)?;
            let indent = leading_whitespace(&text);
            let mut last = dest;
            while let Some(next) = lines.line(last + 1) {
                if indent_relation(&next, indent) != IndentRelation::Deeper {
                    break;
                }
                last += 1;
            }
            last
        } else {
            dest
        };

        let changes = move_line(lines, trigger, to)?;
        Some(Relocation {
            from: trigger,
            to,
            range: trigger.min(to)..trigger.max(to) + 1,
            changes,
        })
    }
}

/// Replacements that remove line `from` and reinsert it at `to`.
///
/// Ordinals stay in list order: the numbered items at the moved line's indentation
/// take the numbers those items carried before the move, first to last.
fn move_line<L: Lines + ?Sized>(lines: &L, from: usize, to: usize) -> Option<Vec<Change>> {
    let (lo, hi) = (from.min(to), from.max(to));
    let old: Vec<String> = (lo..=hi)
        .map(|i| lines.line(i).map(Cow::into_owned))
        .collect::<Option<_>>()?;
    let indent = leading_whitespace(&old[from - lo]).to_string();
    let ordinal_at_level = |line: &str| {
        match_numbered(line)
            .filter(|item| item.indent == indent)
            .map(|item| item.ordinal)
    };
    let mut ordinals = old.iter().filter_map(|line| ordinal_at_level(line.as_str()));

    let mut reordered = old.clone();
    let moved = reordered.remove(from - lo);
    reordered.insert(to - lo, moved);

    let changes = reordered
        .into_iter()
        .enumerate()
        .map(|(offset, text)| {
            let renumbered = match_numbered(&text)
                .filter(|item| item.indent == indent)
                .and_then(|item| ordinals.next().map(|o| item.with_ordinal(&text, o)));
            Change::new(lo + offset, renumbered.unwrap_or(text))
        })
        .collect();
    Some(changes)
}
