use crate::changes::Change;
use crate::error::HostError;
use crate::lines::Lines;

/// A caret location as (line, character) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Current selection; a collapsed selection is a plain cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn cursor(at: Position) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    /// The topmost line touched by the selection
    pub fn top_line(&self) -> usize {
        self.anchor.line.min(self.head.line)
    }

    pub fn bottom_line(&self) -> usize {
        self.anchor.line.max(self.head.line)
    }
}

/// The editor or document that owns the lines.
///
/// The engine reads snapshots through [`Lines`] and never mutates text itself:
/// every edit goes through [`Host::apply_transaction`], which must apply all
/// changes or none of them.
pub trait Host: Lines {
    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// Apply full-line replacements as one atomic edit.
    fn apply_transaction(&mut self, changes: &[Change]) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_line_ignores_direction() {
        let forward = Selection {
            anchor: Position::new(2, 0),
            head: Position::new(5, 3),
        };
        let backward = Selection {
            anchor: Position::new(5, 3),
            head: Position::new(2, 0),
        };

        assert_eq!(forward.top_line(), 2);
        assert_eq!(backward.top_line(), 2);
        assert_eq!(backward.bottom_line(), 5);
    }
}
