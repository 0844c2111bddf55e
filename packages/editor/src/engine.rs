//! # Edit Engine
//!
//! Applies a click-triggered operation to a target element and returns
//! the record needed to reverse it.
//!
//! ## Operation Semantics
//!
//! ### Remove
//! - Detaches the target, capturing parent and next sibling first
//! - Fails if the target has no parent
//!
//! ### Image edit
//! - Prompts for a new URL, pre-filled with the current source
//! - Cancel, empty input or an unchanged value is a silent no-op
//!
//! ### Text edit
//! - Two-phase: [`EditEngine::begin_text_edit`] makes the element
//!   editable, [`InlineEdit::finish`] ends it
//! - `finish` consumes the session, so listeners are torn down once
//! - A record is produced only if the text actually changed

use crate::{ChangeRecord, DomError, EditorConfig, EditorError, Host};
use tracing::debug;

/// Stateless operations over a host, parameterised by configuration
#[derive(Debug, Clone, Copy)]
pub struct EditEngine<'a> {
    config: &'a EditorConfig,
}

impl<'a> EditEngine<'a> {
    pub fn new(config: &'a EditorConfig) -> Self {
        Self { config }
    }

    /// Detach `target` from its parent
    pub fn remove<H: Host + ?Sized>(
        &self,
        host: &mut H,
        target: &H::Node,
    ) -> Result<ChangeRecord<H::Node>, EditorError> {
        let parent = host.parent(target).ok_or(DomError::Detached)?;
        let next_sibling = host.next_sibling(target);

        host.remove_child(&parent, target)?;
        debug!(element = ?target, last_child = next_sibling.is_none(), "Removed element");

        Ok(ChangeRecord::Remove {
            element: target.clone(),
            parent,
            next_sibling,
        })
    }

    /// Prompt for a replacement image URL
    pub fn edit_image<H: Host + ?Sized>(
        &self,
        host: &mut H,
        target: &H::Node,
    ) -> Result<Option<ChangeRecord<H::Node>>, EditorError> {
        let original_src = host.image_src(target)?;

        let new_src = match host.prompt(&self.config.image_prompt, &original_src) {
            Some(src) if !src.is_empty() && src != original_src => src,
            _ => {
                debug!(element = ?target, "Image edit cancelled");
                return Ok(None);
            }
        };

        host.set_image_src(target, &new_src)?;
        debug!(element = ?target, from = %original_src, to = %new_src, "Image source replaced");

        Ok(Some(ChangeRecord::ImageEdit {
            element: target.clone(),
            original_src,
        }))
    }

    /// Make `target` editable in place and focus it
    pub fn begin_text_edit<H: Host + ?Sized>(&self, host: &mut H, target: &H::Node) -> InlineEdit<H::Node> {
        let original_content = host.text_content(target);

        host.set_editable(target, true);
        host.install_edit_listeners(target);
        host.focus(target);
        debug!(element = ?target, "Inline edit started");

        InlineEdit {
            element: target.clone(),
            original_content,
        }
    }
}

/// An in-progress inline text edit
///
/// Holds the text captured when editing started. Dropping it without
/// calling [`finish`](InlineEdit::finish) leaks the host listeners.
#[derive(Debug, PartialEq)]
#[must_use = "an inline edit must be finished to remove its listeners"]
pub struct InlineEdit<N> {
    element: N,
    original_content: String,
}

impl<N: Clone + PartialEq + std::fmt::Debug> InlineEdit<N> {
    pub fn element(&self) -> &N {
        &self.element
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// End the edit: tear down listeners, turn editing off, diff the text
    pub fn finish<H: Host<Node = N> + ?Sized>(self, host: &mut H) -> Option<ChangeRecord<N>> {
        host.remove_edit_listeners(&self.element);
        host.set_editable(&self.element, false);

        let current = host.text_content(&self.element);
        if current == self.original_content {
            debug!(element = ?self.element, "Inline edit finished unchanged");
            return None;
        }

        debug!(element = ?self.element, "Inline edit committed");
        Some(ChangeRecord::TextEdit {
            element: self.element,
            original_content: self.original_content,
        })
    }
}
