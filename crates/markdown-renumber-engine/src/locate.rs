//! Walking up and down from a line to find the list block or indentation
//! scope it belongs to.
//!
//! Indentation is compared on the raw leading whitespace. Two lines are at the
//! same level only when their leading whitespace is character-identical; a line
//! with more leading whitespace is nested content of the item above it and is
//! stepped over by every walk here.

use serde::{Deserialize, Serialize};

use crate::classify::{is_blank, leading_whitespace, match_checkbox, match_numbered};
use crate::lines::Lines;

/// How a line's indentation relates to a reference indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentRelation {
    Same,
    /// Nested under the previous item at the reference level
    Deeper,
    /// Blank, shallower, or differently indented
    Outside,
}

pub fn indent_relation(line: &str, reference: &str) -> IndentRelation {
    if is_blank(line) {
        return IndentRelation::Outside;
    }

    let indent = leading_whitespace(line);
    if indent == reference {
        IndentRelation::Same
    } else if indent.chars().count() > reference.chars().count() {
        IndentRelation::Deeper
    } else {
        IndentRelation::Outside
    }
}

/// Nearest line above `index` at exactly `indent`, stepping over nested lines.
///
/// Returns `None` when the walk meets the top of the document or an `Outside`
/// line first.
pub fn item_above<L: Lines + ?Sized>(lines: &L, index: usize, indent: &str) -> Option<usize> {
    let mut i = index;
    while i > 0 {
        i -= 1;
        let text = lines.line(i)?;
        match indent_relation(&text, indent) {
            IndentRelation::Same => return Some(i),
            IndentRelation::Deeper => continue,
            IndentRelation::Outside => return None,
        }
    }
    None
}

/// The numbered item directly preceding `index` in the same list, if any.
///
/// `index` must itself be a numbered line; otherwise there is no sibling.
pub fn preceding_sibling<L: Lines + ?Sized>(lines: &L, index: usize) -> Option<usize> {
    let text = lines.line(index)?;
    let item = match_numbered(&text)?;
    let above = item_above(lines, index, item.indent)?;
    let above_text = lines.line(above)?;
    match_numbered(&above_text).map(|_| above)
}

/// First line of the numbered block containing `from`.
///
/// `None` when `from` is not a numbered line.
pub fn find_block_start<L: Lines + ?Sized>(lines: &L, from: usize) -> Option<usize> {
    lines.line(from).as_deref().and_then(match_numbered)?;

    let mut start = from;
    while let Some(above) = preceding_sibling(lines, start) {
        start = above;
    }
    Some(start)
}

/// Which same-level lines belong to a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeRule {
    /// Only checkboxes with the trigger's marker kind; anything else ends the scope
    #[default]
    CheckboxesOnly,
    /// Any non-blank line at the same indentation
    AnyContent,
}

/// A run of lines at one indentation level considered together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub start: usize,
    /// One past the last item of the scope
    pub end: usize,
    /// Indices of the scope's own items; nested lines are not listed
    pub items: Vec<usize>,
}

/// Bounds of the indentation scope around `from`.
///
/// Returns `None` when `from` is out of range, blank, or (for
/// [`ScopeRule::CheckboxesOnly`]) not a checkbox.
pub fn find_scope_bounds<L: Lines + ?Sized>(
    lines: &L,
    from: usize,
    rule: ScopeRule,
) -> Option<Scope> {
    let text = lines.line(from)?;
    if is_blank(&text) {
        return None;
    }
    let indent = leading_whitespace(&text).to_string();
    let marker = match rule {
        ScopeRule::CheckboxesOnly => Some(match_checkbox(&text)?.marker),
        ScopeRule::AnyContent => None,
    };
    let admits = |index: usize| -> bool {
        match (rule, marker) {
            (ScopeRule::CheckboxesOnly, Some(marker)) => lines
                .line(index)
                .as_deref()
                .and_then(match_checkbox)
                .is_some_and(|c| c.marker == marker),
            _ => true,
        }
    };

    let mut start = from;
    while let Some(above) = item_above(lines, start, &indent) {
        if !admits(above) {
            break;
        }
        start = above;
    }

    let mut last = from;
    let mut i = from + 1;
    while let Some(line) = lines.line(i) {
        match indent_relation(&line, &indent) {
            IndentRelation::Deeper => {}
            IndentRelation::Same if admits(i) => last = i,
            _ => break,
        }
        i += 1;
    }

    let items = (start..=last)
        .filter(|&i| {
            lines
                .line(i)
                .is_some_and(|l| indent_relation(&l, &indent) == IndentRelation::Same)
        })
        .collect();

    Some(Scope {
        start,
        end: last + 1,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("- a", "", IndentRelation::Same)]
    #[case("\t- a", "", IndentRelation::Deeper)]
    #[case("  - a", "  ", IndentRelation::Same)]
    #[case("- a", "  ", IndentRelation::Outside)]
    #[case("\t- a", "  ", IndentRelation::Outside)]
    #[case("", "", IndentRelation::Outside)]
    #[case("    ", "", IndentRelation::Outside)]
    fn test_indent_relation(
        #[case] line: &str,
        #[case] reference: &str,
        #[case] expected: IndentRelation,
    ) {
        assert_eq!(indent_relation(line, reference), expected);
    }

    #[rstest]
    #[case(vec!["1. a", "2. b", "3. c"], 2, Some(0))]
    #[case(vec!["1. a", "2. b", "3. c"], 0, Some(0))]
    #[case(vec!["text", "1. a", "2. b"], 2, Some(1))]
    #[case(vec!["1. a", "", "1. b"], 2, Some(2))]
    #[case(vec!["1. a", "   - nested", "2. b"], 2, Some(0))]
    #[case(vec!["1. a", "\t1. x", "\t2. y"], 2, Some(1))]
    #[case(vec!["- a", "  1. x", "  2. y"], 2, Some(1))]
    #[case(vec!["1. a", "text"], 1, None)]
    #[case(vec!["1. a"], 5, None)]
    fn test_find_block_start(
        #[case] lines: Vec<&str>,
        #[case] from: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(find_block_start(&lines, from), expected);
    }

    #[test]
    fn test_preceding_sibling_steps_over_nested_lines() {
        let lines = vec!["1. a", "\t- child", "\t\t- grandchild", "2. b"];
        assert_eq!(preceding_sibling(&lines, 3), Some(0));
        assert_eq!(preceding_sibling(&lines, 0), None);
    }

    #[test]
    fn test_preceding_sibling_requires_numbered_line() {
        let lines = vec!["- a", "1. b"];
        assert_eq!(preceding_sibling(&lines, 1), None);
    }

    #[test]
    fn test_scope_stops_before_text() {
        let lines = vec!["- [ ] a", "- [ ] b", "c", "- [ ] d"];
        let scope = find_scope_bounds(&lines, 0, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start, 0);
        assert_eq!(scope.end, 2);
        assert_eq!(scope.items, vec![0, 1]);
    }

    #[test]
    fn test_scope_steps_over_nested_content() {
        let lines = vec!["- [ ] a", "- [x] b", "\t- [x] c", "- [ ] d"];
        let scope = find_scope_bounds(&lines, 0, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start, 0);
        assert_eq!(scope.end, 4);
        assert_eq!(scope.items, vec![0, 1, 3]);
    }

    #[test]
    fn test_scope_walks_up_from_middle() {
        let lines = vec!["text", "- [ ] a", "\t- [ ] nested", "- [x] b", "- [ ] c"];
        let scope = find_scope_bounds(&lines, 3, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start, 1);
        assert_eq!(scope.end, 5);
    }

    #[test]
    fn test_nested_scope_ends_at_shallower_line() {
        let lines = vec!["- [ ] a", "\t- [x] b", "\t- [ ] c", "- [ ] d"];
        let scope = find_scope_bounds(&lines, 1, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start, 1);
        assert_eq!(scope.end, 3);
    }

    #[test]
    fn test_nested_scope_stops_at_text_on_same_level() {
        let lines = vec!["- [ ] a", "\t- [x] b", "\ttext", "\t- [ ] c", "- [ ] d"];
        let scope = find_scope_bounds(&lines, 1, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start..scope.end, 1..2);
    }

    #[test]
    fn test_scope_requires_same_marker_kind() {
        let lines = vec!["1. [x] a", "2. [ ] b", "- [ ] c", "3. [ ] c"];
        let scope = find_scope_bounds(&lines, 0, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start..scope.end, 0..2);
    }

    #[test]
    fn test_scope_stops_on_numbered_text() {
        let lines = vec!["1. [x] a", "2. [ ] b", "3. c", "4. [ ] d"];
        let scope = find_scope_bounds(&lines, 0, ScopeRule::CheckboxesOnly).unwrap();

        assert_eq!(scope.start..scope.end, 0..2);
    }

    #[test]
    fn test_any_content_scope_includes_text() {
        let lines = vec!["- [ ] a", "c", "- [ ] d", "", "- [ ] e"];
        let scope = find_scope_bounds(&lines, 0, ScopeRule::AnyContent).unwrap();

        assert_eq!(scope.start..scope.end, 0..3);
    }

    #[test]
    fn test_scope_requires_checkbox_trigger() {
        let lines = vec!["text", "- [ ] a"];
        assert_eq!(find_scope_bounds(&lines, 0, ScopeRule::CheckboxesOnly), None);
        assert_eq!(find_scope_bounds(&lines, 9, ScopeRule::AnyContent), None);
    }
}
