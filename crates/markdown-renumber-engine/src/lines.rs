use std::borrow::Cow;

use crate::changes::ChangeSet;

/// Read access to a sequence of lines addressed by zero-based index.
///
/// Indices are the only handle on a line; they are not stable across edits made
/// outside the engine, so nothing derived from them should be kept between
/// reactions.
pub trait Lines {
    /// Text of the line at `index`, without its line terminator.
    fn line(&self, index: usize) -> Option<Cow<'_, str>>;

    fn line_count(&self) -> usize;

    /// Index of the last line, or `None` for an empty sequence.
    fn last_line(&self) -> Option<usize> {
        self.line_count().checked_sub(1)
    }
}

impl<S: AsRef<str>> Lines for [S] {
    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get(index).map(|s| Cow::Borrowed(s.as_ref()))
    }

    fn line_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>> Lines for Vec<S> {
    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }

    fn line_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>, const N: usize> Lines for [S; N] {
    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }

    fn line_count(&self) -> usize {
        N
    }
}

/// The lines of `base` as they will read once `pending` has been applied.
///
/// Pending changes are full-line replacements, so the line count never differs
/// from the base.
pub struct Overlay<'a, L: Lines + ?Sized> {
    base: &'a L,
    pending: &'a ChangeSet,
}

impl<'a, L: Lines + ?Sized> Overlay<'a, L> {
    pub fn new(base: &'a L, pending: &'a ChangeSet) -> Self {
        Self { base, pending }
    }
}

impl<L: Lines + ?Sized> Lines for Overlay<'_, L> {
    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        if index >= self.base.line_count() {
            return None;
        }
        match self.pending.get(index) {
            Some(text) => Some(Cow::Borrowed(text)),
            None => self.base.line(index),
        }
    }

    fn line_count(&self) -> usize {
        self.base.line_count()
    }
}

/// Collect every line into owned strings.
pub fn to_vec<L: Lines + ?Sized>(lines: &L) -> Vec<String> {
    (0..lines.line_count())
        .filter_map(|i| lines.line(i).map(Cow::into_owned))
        .collect()
}
