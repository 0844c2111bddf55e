//! # Change Log
//!
//! Tracks applied edits so they can be reverted one at a time.
//!
//! ## Design
//!
//! - Each edit records what it takes to reverse it, captured before the
//!   page is touched
//! - Undo pops the newest record and replays its inverse (LIFO)
//! - There is no redo; a reverted record is gone
//! - Records hold node handles, never the nodes themselves
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut log = ChangeLog::new();
//!
//! // The edit engine hands back a record after mutating the page
//! let record = EditEngine::new(&config).remove(&mut host, &target)?;
//! log.push(record);
//!
//! // Undo restores the element at its original position
//! log.undo(&mut host)?;
//! ```

use crate::{Dom, EditorError};
use tracing::{debug, warn};

/// A reversible description of one page mutation
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeRecord<N> {
    /// Element detached from `parent`; `next_sibling` is `None` when it was the last child
    Remove {
        element: N,
        parent: N,
        next_sibling: Option<N>,
    },

    /// Image source replaced
    ImageEdit { element: N, original_src: String },

    /// Text content replaced through inline editing
    TextEdit { element: N, original_content: String },
}

/// Which kind of edit a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Remove,
    ImageEdit,
    TextEdit,
}

impl ChangeKind {
    /// Status message shown after the edit is applied
    pub fn applied_message(&self) -> &'static str {
        match self {
            ChangeKind::Remove => "Element removed",
            ChangeKind::ImageEdit => "Image updated",
            ChangeKind::TextEdit => "Content updated",
        }
    }

    /// Status message shown after the edit is undone
    pub fn undone_message(&self) -> &'static str {
        match self {
            ChangeKind::Remove => "Removal undone",
            ChangeKind::ImageEdit => "Image edit undone",
            ChangeKind::TextEdit => "Text edit undone",
        }
    }
}

impl<N> ChangeRecord<N> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeRecord::Remove { .. } => ChangeKind::Remove,
            ChangeRecord::ImageEdit { .. } => ChangeKind::ImageEdit,
            ChangeRecord::TextEdit { .. } => ChangeKind::TextEdit,
        }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> ChangeRecord<N> {
    /// Replay the inverse of this record against the page
    pub fn revert<D>(&self, dom: &mut D) -> Result<(), EditorError>
    where
        D: Dom<Node = N> + ?Sized,
    {
        match self {
            ChangeRecord::Remove {
                element,
                parent,
                next_sibling,
            } => {
                // The page may have moved the sibling since; fall back to appending
                let reference = next_sibling
                    .as_ref()
                    .filter(|sibling| dom.parent(sibling).as_ref() == Some(parent));

                if next_sibling.is_some() && reference.is_none() {
                    warn!(?element, "Next sibling left its parent; appending instead");
                }

                dom.insert_before(parent, element, reference)?;
            }

            ChangeRecord::ImageEdit {
                element,
                original_src,
            } => {
                dom.set_image_src(element, original_src)?;
            }

            ChangeRecord::TextEdit {
                element,
                original_content,
            } => {
                dom.set_text_content(element, original_content)?;
            }
        }

        Ok(())
    }
}

/// Last-in-first-out log of applied edits
#[derive(Debug)]
pub struct ChangeLog<N> {
    /// Applied records (most recent last)
    records: Vec<ChangeRecord<N>>,

    /// Maximum number of records kept (0 = unlimited)
    max_levels: usize,
}

impl<N: Clone + PartialEq + std::fmt::Debug> ChangeLog<N> {
    /// Create an unbounded log
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create a log that drops its oldest records beyond `max_levels`
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            records: Vec::new(),
            max_levels,
        }
    }

    /// Record an applied edit
    pub fn push(&mut self, record: ChangeRecord<N>) {
        debug!(kind = ?record.kind(), depth = self.records.len() + 1, "Recording change");
        self.records.push(record);

        if self.max_levels > 0 && self.records.len() > self.max_levels {
            self.records.remove(0);
        }
    }

    /// Revert the most recent edit
    ///
    /// Returns `Ok(None)` when there is nothing to undo. The record is
    /// consumed even if reverting it fails.
    pub fn undo<D>(&mut self, dom: &mut D) -> Result<Option<ChangeKind>, EditorError>
    where
        D: Dom<Node = N> + ?Sized,
    {
        let Some(record) = self.records.pop() else {
            return Ok(None);
        };

        debug!(kind = ?record.kind(), remaining = self.records.len(), "Undoing change");
        record.revert(dom)?;

        Ok(Some(record.kind()))
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record
    pub fn last(&self) -> Option<&ChangeRecord<N>> {
        self.records.last()
    }

    pub fn records(&self) -> &[ChangeRecord<N>] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> Default for ChangeLog<N> {
    fn default() -> Self {
        Self::new()
    }
}
