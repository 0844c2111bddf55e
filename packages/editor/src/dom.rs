//! # Host Boundary
//!
//! The editor never owns page nodes. It talks to the page through two
//! traits:
//!
//! - [`Dom`]: tree structure and the handful of element properties the
//!   edit operations read and write
//! - [`Host`]: UI services around the tree (cursor, listeners, prompt,
//!   status messages, toolbar)
//!
//! `Node` handles are non-owning references into the host's tree. A
//! detached node stays valid as long as the host keeps it alive, which
//! is what lets a removal be undone.

use crate::{DomError, Notification, Toolbar, ToolbarIcon};
use std::fmt;

/// Tree access for a live document
pub trait Dom {
    /// Non-owning node handle
    type Node: Clone + PartialEq + fmt::Debug;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Detach `child` from `parent`
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Insert `child` into `parent` before `reference`, or append when `reference` is `None`
    fn insert_before(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: Option<&Self::Node>,
    ) -> Result<(), DomError>;

    /// True if `node` is `ancestor` or lives inside its subtree
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn is_image(&self, node: &Self::Node) -> bool;

    fn image_src(&self, node: &Self::Node) -> Result<String, DomError>;

    fn set_image_src(&mut self, node: &Self::Node, src: &str) -> Result<(), DomError>;

    /// Rendered text of the element (innerText)
    fn text_content(&self, node: &Self::Node) -> String;

    fn set_text_content(&mut self, node: &Self::Node, text: &str) -> Result<(), DomError>;

    fn set_editable(&mut self, node: &Self::Node, editable: bool);

    fn focus(&mut self, node: &Self::Node);
}

/// UI services the editor needs besides the tree itself
///
/// Listener methods come in install/remove pairs. Callers must never
/// install twice without removing in between.
pub trait Host: Dom {
    fn set_cursor(&mut self, cursor: Cursor);

    /// Start routing document clicks to the session
    fn install_click_interceptor(&mut self);

    fn remove_click_interceptor(&mut self);

    /// Start routing blur and keydown on `node` to the session
    fn install_edit_listeners(&mut self, node: &Self::Node);

    fn remove_edit_listeners(&mut self, node: &Self::Node);

    /// Blocking text prompt. `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Show a short-lived status message
    fn notify(&mut self, notification: Notification);

    /// Build the toolbar and return its root node
    fn mount_toolbar(&mut self, toolbar: &Toolbar) -> Result<Self::Node, DomError>;

    fn unmount_toolbar(&mut self, root: &Self::Node);

    /// Set an icon's background, `None` for transparent
    fn highlight_icon(&mut self, icon: ToolbarIcon, color: Option<&str>);
}

/// Page cursor style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

impl Cursor {
    pub fn css_value(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
        }
    }
}

/// A keydown as seen by the inline editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    /// Enter without Shift ends an inline edit
    pub fn commits_edit(&self) -> bool {
        self.key == "Enter" && !self.shift
    }
}

/// What the host should do with a click after the session saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Let the page handle it normally
    PassThrough,
    /// Call preventDefault and stopPropagation
    Consumed,
}

/// What the host should do with a keydown after the session saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Default,
    /// Call preventDefault (suppresses the newline)
    PreventDefault,
}
