use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::changes::Change;
use crate::error::HostError;
use crate::host::{Host, Position, Selection};
use crate::lines::Lines;
use crate::patch::Patch;

/// In-process host backed by an xi-rope buffer.
///
/// The buffer keeps the exact bytes it was created from, line terminators
/// included. A transaction is validated in full and then applied as one
/// `Delta`, so it either lands completely or leaves the buffer untouched.
///
/// ```rust
/// use markdown_renumber_engine::{Change, Document, Host, Lines};
///
/// let mut doc = Document::from_text("1. a\n1. b\n");
/// doc.apply_transaction(&[Change::new(1, "2. b")]).unwrap();
///
/// assert_eq!(doc.text(), "1. a\n2. b\n");
/// assert_eq!(doc.line(1).as_deref(), Some("2. b"));
/// ```
#[derive(Clone)]
pub struct Document {
    buffer: Rope,
    selection: Selection,
    /// Incremented on every transaction that changed text
    version: u64,
    /// What the most recent host transaction changed
    last_patch: Option<Patch>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selection: Selection::default(),
            version: 0,
            last_patch: None,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The patch produced by the last accepted [`Host::apply_transaction`]
    pub fn last_patch(&self) -> Option<&Patch> {
        self.last_patch.as_ref()
    }

    /// Move the cursor, clamped to the document
    pub fn set_cursor(&mut self, line: usize, ch: usize) {
        self.set_selection(Selection::cursor(Position::new(line, ch)));
    }

    /// Apply full-line replacements as a single delta.
    ///
    /// Several changes for one line collapse to the last of them. Nothing is
    /// applied if any change names a missing line or carries a line break.
    pub fn apply_changes(&mut self, changes: &[Change]) -> Result<Patch, HostError> {
        let line_count = self.line_count();
        let mut by_line = BTreeMap::new();
        for change in changes {
            if change.line >= line_count {
                return Err(HostError::LineOutOfRange {
                    line: change.line,
                    line_count,
                });
            }
            if change.text.contains(['\n', '\r']) {
                return Err(HostError::MultilineReplacement { line: change.line });
            }
            by_line.insert(change.line, change.text.as_str());
        }

        let mut builder = Builder::new(self.buffer.len());
        let mut changed_lines = Vec::new();
        let mut old_ranges = Vec::new();
        for (&line, &text) in &by_line {
            let range = self.content_range(line);
            if self.buffer.slice_to_cow(range.clone()) == text {
                continue;
            }
            builder.replace(range.clone(), Rope::from(text));
            changed_lines.push(line);
            old_ranges.push((range, text.len()));
        }

        if changed_lines.is_empty() {
            return Ok(Patch {
                changed_lines,
                changed: Vec::new(),
                version: self.version,
            });
        }

        self.buffer = builder.build().apply(&self.buffer);
        self.version += 1;
        self.set_selection(self.selection);

        let mut shift: isize = 0;
        let changed = old_ranges
            .into_iter()
            .map(|(old, new_len)| {
                let start = old.start.saturating_add_signed(shift);
                shift += new_len as isize - old.len() as isize;
                start..start + new_len
            })
            .collect();

        Ok(Patch {
            changed_lines,
            changed,
            version: self.version,
        })
    }

    /// Byte range of a line's text, excluding its terminator
    fn content_range(&self, line: usize) -> Range<usize> {
        let start = self.buffer.offset_of_line(line);
        let next = if line + 1 < self.line_count() {
            self.buffer.offset_of_line(line + 1)
        } else {
            self.buffer.len()
        };
        let raw = self.buffer.slice_to_cow(start..next);
        let terminator = if raw.ends_with("\r\n") {
            2
        } else if raw.ends_with('\n') {
            1
        } else {
            0
        };
        start..next - terminator
    }

    fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.last_line().unwrap_or(0));
        let width = self.line(line).map(|l| l.chars().count()).unwrap_or(0);
        Position::new(line, position.ch.min(width))
    }
}

impl Lines for Document {
    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        if index >= self.line_count() {
            return None;
        }
        Some(self.buffer.slice_to_cow(self.content_range(index)))
    }

    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }
}

impl Host for Document {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection {
            anchor: self.clamp(selection.anchor),
            head: self.clamp(selection.head),
        };
    }

    fn apply_transaction(&mut self, changes: &[Change]) -> Result<(), HostError> {
        let patch = self.apply_changes(changes)?;
        self.last_patch = Some(patch);
        Ok(())
    }
}
