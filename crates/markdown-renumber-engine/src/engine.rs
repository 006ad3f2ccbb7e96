use std::ops::Range;

use crate::changes::ChangeSet;
use crate::checkbox::CheckboxSorter;
use crate::error::HostError;
use crate::host::{Host, Selection};
use crate::lines::Overlay;
use crate::renumber::Renumberer;
use crate::settings::Settings;

/// Modifier keys held during a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Shortcuts (ctrl, meta, alt) rather than typing
    pub fn is_special(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// What one reaction did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The reaction did not run (live update off, or changes blocked)
    pub skipped: bool,
    /// A transaction was submitted to the host
    pub applied: bool,
    /// Lines rewritten by a checkbox move
    pub relocated: Option<Range<usize>>,
}

impl Outcome {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// One edit-reaction cycle at a time: checkbox pass, renumber pass, one atomic
/// transaction.
///
/// The engine owns the pending change set and the block-changes flag; all
/// document access goes through the [`Host`] passed to each call. Hosts that
/// deliver notifications from several places should share the engine through a
/// [`crate::ReactionGate`].
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    renumberer: Renumberer,
    sorter: CheckboxSorter,
    pending: ChangeSet,
    /// Skip the next editor-change reaction
    block_changes: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            renumberer: Renumberer::new(settings.numbering_strategy),
            sorter: settings.checkbox_sorter(),
            settings,
            pending: ChangeSet::new(),
            block_changes: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new settings, rebuilding the renumberer and sorter from them.
    pub fn reconfigure(&mut self, settings: Settings) {
        log::debug!("Reconfiguring engine: {settings:?}");
        *self = Self {
            block_changes: self.block_changes,
            ..Self::new(settings)
        };
    }

    pub fn changes_blocked(&self) -> bool {
        self.block_changes
    }

    /// Record the keystroke that precedes the next editor change.
    ///
    /// Shortcuts block the reaction to the change they cause; plain typing
    /// re-enables it.
    pub fn on_keystroke(&mut self, modifiers: Modifiers) {
        self.block_changes = modifiers.is_special();
    }

    /// React to a change at the cursor.
    ///
    /// The block-changes flag covers exactly one notification: the echo of the
    /// engine's own transaction, of a bulk insert, or of a shortcut. That
    /// notification is skipped and the flag is cleared.
    pub fn on_editor_change<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Outcome, HostError> {
        if !self.settings.live_update {
            log::debug!("Skipping editor change, live update is off");
            return Ok(Outcome::skipped());
        }
        if std::mem::take(&mut self.block_changes) {
            log::debug!("Skipping blocked editor change");
            return Ok(Outcome::skipped());
        }

        let selection = host.selection();
        let line = selection.top_line();
        log::debug!("Reacting to editor change at line {line}");

        let relocation = if self.settings.live_checkbox_update {
            self.sorter.reorder(&*host, line)
        } else {
            None
        };
        if let Some(relocation) = &relocation {
            log::debug!(
                "Moving checkbox from line {} to line {}",
                relocation.from,
                relocation.to
            );
            self.pending.extend(relocation.changes.iter().cloned());
        }

        if self.settings.live_numbering_update {
            let view = Overlay::new(&*host, &self.pending);
            let renumbered = match &relocation {
                Some(relocation) => self.renumberer.renumber_range(
                    &view,
                    relocation.range.start,
                    relocation.range.end,
                ),
                None => self.renumberer.renumber_from_line(&view, line, true),
            };
            self.pending.extend(renumbered.changes);
        }

        let restore = relocation.as_ref().map(|_| selection);
        let applied = self.flush(host, restore)?;
        Ok(Outcome {
            skipped: false,
            applied,
            relocated: relocation.map(|r| r.range),
        })
    }

    /// React to lines `start..end` inserted by a paste or drop.
    pub fn on_bulk_insert<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        start: usize,
        end: usize,
    ) -> Result<Outcome, HostError> {
        if !self.settings.live_update {
            return Ok(Outcome::skipped());
        }
        // The host's own notification for the insert must not trigger a local pass.
        self.block_changes = true;
        if !self.settings.live_numbering_update {
            return Ok(Outcome::default());
        }

        log::debug!("Renumbering inserted lines {start}..{end}");
        let renumbered = self.renumberer.renumber_range(&*host, start, end);
        self.pending.extend(renumbered.changes);
        let applied = self.flush(host, None)?;
        Ok(Outcome {
            applied,
            ..Outcome::default()
        })
    }

    /// Renumber the whole list under the cursor, regardless of live update.
    pub fn renumber_list_at_cursor<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<bool, HostError> {
        let line = host.selection().top_line();
        let renumbered = self.renumberer.renumber_range(&*host, line, line + 1);
        self.pending.extend(renumbered.changes);
        self.flush(host, None)
    }

    /// Renumber every list that has a line inside the selection.
    pub fn renumber_selection<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<bool, HostError> {
        let selection = host.selection();
        let renumbered = self.renumberer.renumber_range(
            &*host,
            selection.top_line(),
            selection.bottom_line() + 1,
        );
        self.pending.extend(renumbered.changes);
        self.flush(host, None)
    }

    /// Renumber every list in the document.
    pub fn renumber_document<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<bool, HostError> {
        let renumbered = self.renumberer.renumber_range(&*host, 0, host.line_count());
        self.pending.extend(renumbered.changes);
        self.flush(host, None)
    }

    fn flush<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        restore: Option<Selection>,
    ) -> Result<bool, HostError> {
        let count = self.pending.len();
        match self.pending.apply(host) {
            Ok(true) => {
                log::debug!("Applied {count} line changes");
                self.block_changes = true;
                if let Some(selection) = restore {
                    host.set_selection(selection);
                }
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                log::warn!("Host rejected {count} line changes: {e}");
                Err(e)
            }
        }
    }
}
