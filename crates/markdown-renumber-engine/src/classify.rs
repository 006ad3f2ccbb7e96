use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// List marker in front of a checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxMarker {
    Bullet,   // "- [ ] "
    Numbered, // "1. [ ] "
}

/// A line that starts with a decimal ordinal such as `12. `
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedItem<'a> {
    /// Leading whitespace, exactly as written
    pub indent: &'a str,
    /// The value of the `N` in `N. `
    pub ordinal: u64,
    /// Byte range of the digit run within the line
    pub digits: Range<usize>,
}

impl NumberedItem<'_> {
    /// Rewrite `line` with a different ordinal, leaving everything else untouched.
    ///
    /// `line` must be the text this item was matched from.
    pub fn with_ordinal(&self, line: &str, ordinal: u64) -> String {
        let mut text = String::with_capacity(line.len() + 2);
        text.push_str(&line[..self.digits.start]);
        text.push_str(&ordinal.to_string());
        text.push_str(&line[self.digits.end..]);
        text
    }
}

/// A two-state task item, `[ ]` or `[x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem<'a> {
    pub indent: &'a str,
    pub checked: bool,
    pub marker: CheckboxMarker,
}

fn numbered_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^(\s*)(\d+)\.\s").expect("Invalid numbered list regex"))
}

fn checkbox_regex() -> &'static Regex {
    static CHECKBOX: OnceLock<Regex> = OnceLock::new();
    CHECKBOX.get_or_init(|| {
        Regex::new(r"^(\s*)(\d+\.\s|-\s)\[( |x)\]\s").expect("Invalid checkbox regex")
    })
}

/// Match a numbered list item (`^\s*(\d+)\.\s`).
///
/// Classification is purely syntactic: any line with the prefix counts, whatever
/// surrounds it. An ordinal too large for `u64` is treated as no match.
pub fn match_numbered(line: &str) -> Option<NumberedItem<'_>> {
    let caps = numbered_regex().captures(line)?;
    let indent = caps.get(1)?;
    let digits = caps.get(2)?;
    let ordinal = digits.as_str().parse().ok()?;

    Some(NumberedItem {
        indent: indent.as_str(),
        ordinal,
        digits: digits.range(),
    })
}

/// Match a checkbox item written after either a `- ` bullet or an `N. ` ordinal.
pub fn match_checkbox(line: &str) -> Option<CheckboxItem<'_>> {
    let caps = checkbox_regex().captures(line)?;
    let indent = caps.get(1)?;
    let marker = if caps.get(2)?.as_str().starts_with('-') {
        CheckboxMarker::Bullet
    } else {
        CheckboxMarker::Numbered
    };

    Some(CheckboxItem {
        indent: indent.as_str(),
        checked: caps.get(3)?.as_str() == "x",
        marker,
    })
}

/// Leading whitespace of any line.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}

/// True for lines that hold nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
