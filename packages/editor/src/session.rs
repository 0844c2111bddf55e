//! # Edit Session
//!
//! Owns everything that lives between toggle-on and toggle-off: the host,
//! the armed mode, the change log, the toolbar handle and any inline edit
//! in progress.
//!
//! Hosts forward user input here:
//!
//! | Host event                | Session call                |
//! |---------------------------|-----------------------------|
//! | toggle request            | [`EditSession::toggle_activation`] |
//! | toolbar icon click        | [`EditSession::activate_icon`] |
//! | document click            | [`EditSession::handle_click`] |
//! | blur on edited element    | [`EditSession::handle_blur`] |
//! | keydown on edited element | [`EditSession::handle_keydown`] |
//!
//! None of these surface errors. Failures are logged and the call
//! degrades to doing nothing.

use crate::{
    ChangeKind, ChangeLog, ChangeRecord, ClickDisposition, EditEngine, EditorConfig, Host,
    InlineEdit, KeyDisposition, KeyInput, Mode, ModeController, Notification, Toolbar, ToolbarIcon,
};
use tracing::{debug, info, warn};

/// One editing overlay bound to one page
pub struct EditSession<H: Host> {
    host: H,
    config: EditorConfig,
    toolbar: Toolbar,
    active: bool,
    modes: ModeController,
    log: ChangeLog<H::Node>,
    toolbar_root: Option<H::Node>,
    inline_edit: Option<InlineEdit<H::Node>>,
}

impl<H: Host> EditSession<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        let log = ChangeLog::with_max_levels(config.max_undo_levels);
        Self {
            host,
            config,
            toolbar: Toolbar::new(),
            active: false,
            modes: ModeController::new(),
            log,
            toolbar_root: None,
            inline_edit: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn log(&self) -> &ChangeLog<H::Node> {
        &self.log
    }

    /// Element currently being edited inline
    pub fn editing(&self) -> Option<&H::Node> {
        self.inline_edit.as_ref().map(InlineEdit::element)
    }

    pub fn toolbar_root(&self) -> Option<&H::Node> {
        self.toolbar_root.as_ref()
    }

    /// Flip the overlay on or off
    pub fn toggle_activation(&mut self) -> bool {
        if self.active {
            self.deactivate();
        } else {
            self.activate();
        }
        self.active
    }

    /// Close button: same as toggling off, no-op when already inactive
    pub fn close(&mut self) {
        if self.active {
            self.deactivate();
        }
    }

    fn activate(&mut self) {
        self.active = true;

        match self.host.mount_toolbar(&self.toolbar) {
            Ok(root) => self.toolbar_root = Some(root),
            Err(e) => warn!(error = %e, "Failed to mount toolbar"),
        }

        self.modes.reset(&mut self.host, &self.config);
        info!("Element editor activated");
    }

    fn deactivate(&mut self) {
        self.finish_inline_edit();

        if let Some(root) = self.toolbar_root.take() {
            self.host.unmount_toolbar(&root);
        }
        self.modes.reset(&mut self.host, &self.config);
        self.active = false;

        if !self.config.retain_history_on_close {
            self.log.clear();
        }
        info!(retained = self.log.len(), "Element editor deactivated");
    }

    /// Arm `requested`, or disarm if it is already armed
    pub fn select_mode(&mut self, requested: Mode) -> Mode {
        if !self.active {
            debug!(?requested, "Mode selected while inactive; ignoring");
            return self.modes.mode();
        }

        self.finish_inline_edit();
        self.modes.select(&mut self.host, &self.config, requested)
    }

    /// Run the handler behind a toolbar icon
    pub fn activate_icon(&mut self, icon: ToolbarIcon) {
        match icon {
            ToolbarIcon::Remove => {
                self.select_mode(Mode::Remove);
            }
            ToolbarIcon::Edit => {
                self.select_mode(Mode::Edit);
            }
            ToolbarIcon::Undo => {
                self.undo();
            }
            ToolbarIcon::Close => self.close(),
        }
    }

    /// Document click while the overlay is up
    pub fn handle_click(&mut self, target: &H::Node) -> ClickDisposition {
        if !self.active || !self.modes.interceptor_installed() {
            return ClickDisposition::PassThrough;
        }

        if let Some(root) = &self.toolbar_root {
            if self.host.contains(root, target) {
                return ClickDisposition::PassThrough;
            }
        }

        if let Some(editing) = self.editing() {
            // Clicks inside the element being edited place the caret
            if self.host.contains(editing, target) {
                return ClickDisposition::Consumed;
            }
        }

        self.finish_inline_edit();

        let engine = EditEngine::new(&self.config);
        let result = match self.modes.mode() {
            Mode::Remove => engine.remove(&mut self.host, target).map(Some),
            Mode::Edit if self.host.is_image(target) => engine.edit_image(&mut self.host, target),
            Mode::Edit => {
                self.inline_edit = Some(engine.begin_text_edit(&mut self.host, target));
                Ok(None)
            }
            Mode::None => Ok(None),
        };

        match result {
            Ok(Some(record)) => self.record(record),
            Ok(None) => {}
            Err(e) => warn!(error = %e, element = ?target, "Edit failed"),
        }

        ClickDisposition::Consumed
    }

    /// Focus left the element being edited
    pub fn handle_blur(&mut self, target: &H::Node) {
        if self.editing() == Some(target) {
            self.finish_inline_edit();
        }
    }

    /// Key pressed inside the element being edited
    pub fn handle_keydown(&mut self, target: &H::Node, key: &KeyInput) -> KeyDisposition {
        if self.editing() != Some(target) || !key.commits_edit() {
            return KeyDisposition::Default;
        }

        self.finish_inline_edit();
        KeyDisposition::PreventDefault
    }

    /// Revert the most recent change, if any
    pub fn undo(&mut self) -> Option<ChangeKind> {
        self.finish_inline_edit();

        match self.log.undo(&mut self.host) {
            Ok(Some(kind)) => {
                self.notify(kind.undone_message());
                Some(kind)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Undo failed");
                None
            }
        }
    }

    /// End any inline edit, recording it if the text changed
    pub fn finish_inline_edit(&mut self) {
        if let Some(edit) = self.inline_edit.take() {
            if let Some(record) = edit.finish(&mut self.host) {
                self.record(record);
            }
        }
    }

    fn record(&mut self, record: ChangeRecord<H::Node>) {
        let message = record.kind().applied_message();
        self.log.push(record);
        self.notify(message);
    }

    fn notify(&mut self, message: &str) {
        let notification = Notification::new(message, self.config.notification_duration());
        self.host.notify(notification);
    }

    /// Tear the session down and hand back the host
    pub fn into_host(mut self) -> H {
        self.close();
        self.host
    }
}

impl<H: Host> std::fmt::Debug for EditSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("active", &self.active)
            .field("mode", &self.modes.mode())
            .field("changes", &self.log.len())
            .field("editing", &self.editing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, HeadlessHost, PageNode};

    fn session() -> EditSession<HeadlessHost> {
        EditSession::new(HeadlessHost::new(Document::from_page(&[
            PageNode::element("a").with_attr("id", "link").with_attr("href", "/next").with_child(PageNode::text("next")),
        ])))
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert!(!session.is_active());
        assert_eq!(session.mode(), Mode::None);
        assert!(session.log().is_empty());
        assert!(session.toolbar_root().is_none());
    }

    #[test]
    fn test_toggle_mounts_and_unmounts_toolbar() {
        let mut session = session();

        assert!(session.toggle_activation());
        assert!(session.host().document().get_element_by_id("element-editor-bar").is_some());
        assert_eq!(session.mode(), Mode::None);

        assert!(!session.toggle_activation());
        assert!(session.host().document().get_element_by_id("element-editor-bar").is_none());
    }

    #[test]
    fn test_inactive_session_ignores_input() {
        let mut session = session();
        let link = session.host().document().get_element_by_id("link").unwrap();

        assert_eq!(session.select_mode(Mode::Remove), Mode::None);
        assert_eq!(session.handle_click(&link), ClickDisposition::PassThrough);
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn test_unarmed_click_passes_through() {
        let mut session = session();
        session.toggle_activation();
        let link = session.host().document().get_element_by_id("link").unwrap();

        assert_eq!(session.handle_click(&link), ClickDisposition::PassThrough);
        assert!(session.host().document().is_connected(link));
    }

    #[test]
    fn test_close_when_inactive_is_noop() {
        let mut session = session();
        session.close();
        assert!(!session.is_active());
        assert_eq!(session.host().click_interceptors(), 0);
    }
}
