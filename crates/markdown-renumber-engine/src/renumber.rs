use std::collections::HashSet;

use crate::changes::{Change, PendingChanges};
use crate::classify::match_numbered;
use crate::lines::Lines;
use crate::locate::{IndentRelation, find_block_start, indent_relation, preceding_sibling};
use crate::strategy::NumberingStrategy;

/// Recomputes ordinals for numbered lists after an edit.
///
/// Nothing is cached between calls: every operation reads the current lines and
/// returns full-line replacements for the lines whose number is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renumberer {
    strategy: NumberingStrategy,
}

impl Renumberer {
    pub fn new(strategy: NumberingStrategy) -> Self {
        Self { strategy }
    }

    /// Renumber the list containing `start`, beginning at `start`.
    ///
    /// The expected ordinal for `start` comes from its preceding sibling, or from
    /// the strategy when `start` opens a list. With `local_only` the scan stops at
    /// the first line after `start` whose number is already right. That is only
    /// sound when the lines before `start` are consistent and an edit can only
    /// have put the lines from `start` onwards out of step, which holds for a
    /// single-line edit at `start`. Bulk edits must use the full scan.
    ///
    /// A line that is not numbered yields no changes and `end_index == start`.
    pub fn renumber_from_line<L: Lines + ?Sized>(
        &self,
        lines: &L,
        start: usize,
        local_only: bool,
    ) -> PendingChanges {
        let Some(text) = lines.line(start) else {
            return PendingChanges::empty(start);
        };
        let Some(item) = match_numbered(&text) else {
            return PendingChanges::empty(start);
        };

        let sibling = preceding_sibling(lines, start)
            .and_then(|i| lines.line(i).as_deref().and_then(match_numbered).map(|n| n.ordinal));
        let expected = self.strategy.base_ordinal(sibling, item.ordinal);

        self.scan(lines, start, item.indent, expected, local_only).0
    }

    /// Renumber every list block that has a line inside `start..end`.
    ///
    /// Used after paste, drop and checkbox moves, where several blocks may have
    /// shifted at once. Each block is renumbered in full from its first line;
    /// blocks nested inside a block that was already handled are still visited.
    pub fn renumber_range<L: Lines + ?Sized>(
        &self,
        lines: &L,
        start: usize,
        end: usize,
    ) -> PendingChanges {
        let mut changes = Vec::new();
        let mut consumed = HashSet::new();
        let mut end_index = start;

        for i in start..end.min(lines.line_count()) {
            if consumed.contains(&i) {
                continue;
            }
            let Some(block_start) = find_block_start(lines, i) else {
                continue;
            };
            let Some(first) = lines.line(block_start) else {
                continue;
            };
            let Some(item) = match_numbered(&first) else {
                continue;
            };

            let base = self.strategy.base_ordinal(None, item.ordinal);
            let (pending, visited) = self.scan(lines, block_start, item.indent, base, false);

            end_index = end_index.max(pending.end_index);
            changes.extend(pending.changes);
            consumed.extend(visited);
        }

        PendingChanges { changes, end_index }
    }

    /// Walk the block at `indent` from `start`, comparing each item against
    /// `expected`. Returns the changes and the items visited.
    fn scan<L: Lines + ?Sized>(
        &self,
        lines: &L,
        start: usize,
        indent: &str,
        mut expected: u64,
        local_only: bool,
    ) -> (PendingChanges, Vec<usize>) {
        let mut changes = Vec::new();
        let mut visited = Vec::new();
        let mut end_index = start;
        let mut i = start;

        while let Some(text) = lines.line(i) {
            match indent_relation(&text, indent) {
                IndentRelation::Deeper => {
                    i += 1;
                    continue;
                }
                IndentRelation::Outside => break,
                IndentRelation::Same => {}
            }
            let Some(item) = match_numbered(&text) else {
                break;
            };

            if item.ordinal != expected {
                changes.push(Change::new(i, item.with_ordinal(&text, expected)));
            } else if local_only && !visited.is_empty() {
                break;
            }

            visited.push(i);
            end_index = i;
            expected = expected.saturating_add(1);
            i += 1;
        }

        (
            PendingChanges {
                changes,
                end_index,
            },
            visited,
        )
    }
}
