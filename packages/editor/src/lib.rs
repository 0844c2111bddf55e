//! # Element Editor
//!
//! Core of an in-page element editing overlay: toggle a floating toolbar,
//! click page elements to remove them or edit their text/image inline,
//! and undo the last change.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: browser DOM / headless document       │
//! │  - forwards toggle, clicks, blur, keydown   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: activation + event dispatch        │
//! │  - ModeController arms remove/edit          │
//! │  - EditEngine mutates the page              │
//! │  - ChangeLog records inverses for undo      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: tree mutations, cursor, toasts        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The page owns the nodes**: records hold handles, never nodes
//! 2. **Paired listeners**: every install has exactly one matching removal
//! 3. **Best effort**: failures degrade to doing nothing, never to a panic
//!
//! ## Usage
//!
//! ```rust,ignore
//! use element_editor::{Document, EditSession, HeadlessHost, Mode, PageNode};
//!
//! let page = Document::from_page(&[PageNode::element("p")
//!     .with_attr("id", "intro")
//!     .with_child(PageNode::text("Hello"))]);
//! let mut session = EditSession::new(HeadlessHost::new(page));
//!
//! session.toggle_activation();
//! session.select_mode(Mode::Remove);
//!
//! let intro = session.host().document().get_element_by_id("intro").unwrap();
//! session.handle_click(&intro);
//! session.undo();
//! ```

mod change_log;
mod config;
mod document;
mod dom;
mod engine;
mod errors;
mod headless;
mod mode;
mod notification;
mod session;
mod toolbar;

pub use change_log::{ChangeKind, ChangeLog, ChangeRecord};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use document::{Document, NodeId, PageNode};
pub use dom::{ClickDisposition, Cursor, Dom, Host, KeyDisposition, KeyInput};
pub use engine::{EditEngine, InlineEdit};
pub use errors::{DomError, EditorError};
pub use headless::{simulate_click, HeadlessHost, PromptRecord};
pub use mode::{Mode, ModeController};
pub use notification::{Notification, NotificationCenter};
pub use session::EditSession;
pub use toolbar::{Toolbar, ToolbarIcon};
