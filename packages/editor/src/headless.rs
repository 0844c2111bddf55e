//! # Headless Host
//!
//! Implements [`Host`] over an in-memory [`Document`]. Used by the CLI
//! replay driver and the tests.
//!
//! Prompt answers are scripted up front; listener installs are counted so
//! callers can check that installs and removals stay paired.

use crate::{
    ClickDisposition, Cursor, Document, Dom, DomError, EditSession, Host, NodeId, Notification,
    NotificationCenter, Toolbar, ToolbarIcon,
};
use std::collections::{HashMap, VecDeque};

/// A prompt that was shown to the (simulated) user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub message: String,
    pub default: String,
    pub answer: Option<String>,
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    document: Document,
    cursor: Cursor,
    focused: Option<NodeId>,
    click_interceptors: usize,
    edit_listeners: HashMap<NodeId, usize>,
    prompt_answers: VecDeque<Option<String>>,
    prompts: Vec<PromptRecord>,
    notifications: NotificationCenter,
}

impl HeadlessHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Queue the answer for the next prompt (`None` = cancel)
    pub fn answer_next_prompt(&mut self, answer: Option<&str>) {
        self.prompt_answers.push_back(answer.map(str::to_string));
    }

    pub fn prompts(&self) -> &[PromptRecord] {
        &self.prompts
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Number of document click interceptors currently installed
    pub fn click_interceptors(&self) -> usize {
        self.click_interceptors
    }

    /// Number of blur/keydown listener pairs installed on `node`
    pub fn edit_listeners_on(&self, node: NodeId) -> usize {
        self.edit_listeners.get(&node).copied().unwrap_or(0)
    }

    pub fn total_edit_listeners(&self) -> usize {
        self.edit_listeners.values().sum()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Discard answers no prompt consumed
    pub fn clear_prompt_answers(&mut self) {
        self.prompt_answers.clear();
    }

    /// Toolbar icon rendered at `node`, if any
    pub fn icon_at(&self, node: NodeId) -> Option<ToolbarIcon> {
        self.document
            .attribute(node, "id")
            .and_then(ToolbarIcon::from_element_id)
    }

    /// Background colour currently applied to `icon`
    pub fn icon_highlight(&self, icon: ToolbarIcon) -> Option<&str> {
        let node = self.document.get_element_by_id(icon.element_id())?;
        self.document.style(node, "background-color")
    }

    /// Simulate the user typing over the element's text
    pub fn type_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        if !self.document.is_editable(node) {
            return Err(DomError::Backend("Element is not editable".to_string()));
        }
        self.document.set_text_content(node, text)
    }
}

impl Dom for HeadlessHost {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.document.parent(*node)
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.document.next_sibling(*node)
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.document.remove_child(*parent, *child)
    }

    fn insert_before(
        &mut self,
        parent: &NodeId,
        child: &NodeId,
        reference: Option<&NodeId>,
    ) -> Result<(), DomError> {
        self.document.insert_before(*parent, *child, reference.copied())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.document.contains(*ancestor, *node)
    }

    fn is_image(&self, node: &NodeId) -> bool {
        self.document.tag(*node) == Some("img")
    }

    fn image_src(&self, node: &NodeId) -> Result<String, DomError> {
        if !self.is_image(node) {
            return Err(DomError::NotAnImage);
        }
        Ok(self.document.attribute(*node, "src").unwrap_or_default().to_string())
    }

    fn set_image_src(&mut self, node: &NodeId, src: &str) -> Result<(), DomError> {
        if !self.is_image(node) {
            return Err(DomError::NotAnImage);
        }
        self.document.set_attribute(*node, "src", src)
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.document.text_content(*node)
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        self.document.set_text_content(*node, text)
    }

    fn set_editable(&mut self, node: &NodeId, editable: bool) {
        self.document.set_editable(*node, editable);
        if !editable && self.focused == Some(*node) {
            self.focused = None;
        }
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }
}

impl Host for HeadlessHost {
    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        let body = self.document.body();
        let _ = self.document.set_style(body, "cursor", Some(cursor.css_value()));
    }

    fn install_click_interceptor(&mut self) {
        self.click_interceptors += 1;
    }

    fn remove_click_interceptor(&mut self) {
        self.click_interceptors = self.click_interceptors.saturating_sub(1);
    }

    fn install_edit_listeners(&mut self, node: &NodeId) {
        *self.edit_listeners.entry(*node).or_default() += 1;
    }

    fn remove_edit_listeners(&mut self, node: &NodeId) {
        if let Some(count) = self.edit_listeners.get_mut(node) {
            *count -= 1;
            if *count == 0 {
                self.edit_listeners.remove(node);
            }
        }
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.prompt_answers.pop_front().flatten();
        self.prompts.push(PromptRecord {
            message: message.to_string(),
            default: default.to_string(),
            answer: answer.clone(),
        });
        answer
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn mount_toolbar(&mut self, toolbar: &Toolbar) -> Result<NodeId, DomError> {
        let doc = &mut self.document;

        let bar = doc.create_element("div");
        doc.set_attribute(bar, "id", toolbar.id)?;

        let group = doc.create_element("div");
        doc.set_attribute(group, "id", toolbar.icons_id)?;
        doc.append_child(bar, group)?;

        for icon in toolbar.grouped_icons() {
            let span = icon_element(doc, icon)?;
            doc.append_child(group, span)?;
        }
        for icon in toolbar.trailing_icons() {
            let span = icon_element(doc, icon)?;
            doc.append_child(bar, span)?;
        }

        let body = doc.body();
        doc.append_child(body, bar)?;
        Ok(bar)
    }

    fn unmount_toolbar(&mut self, root: &NodeId) {
        if let Some(parent) = self.document.parent(*root) {
            let _ = self.document.remove_child(parent, *root);
        }
    }

    fn highlight_icon(&mut self, icon: ToolbarIcon, color: Option<&str>) {
        // Missing toolbar is fine
        if let Some(node) = self.document.get_element_by_id(icon.element_id()) {
            let _ = self
                .document
                .set_style(node, "background-color", Some(color.unwrap_or("transparent")));
        }
    }
}

fn icon_element(doc: &mut Document, icon: ToolbarIcon) -> Result<NodeId, DomError> {
    let span = doc.create_element("span");
    doc.set_attribute(span, "id", icon.element_id())?;
    doc.set_attribute(span, "title", icon.title())?;
    let glyph = doc.create_text(icon.glyph());
    doc.append_child(span, glyph)?;
    Ok(span)
}

/// Deliver a click the way a browser would
///
/// The session's interceptor sees it first. If it passes through and the
/// target is a toolbar icon, the icon's own handler runs.
pub fn simulate_click(session: &mut EditSession<HeadlessHost>, target: NodeId) -> ClickDisposition {
    let disposition = session.handle_click(&target);

    if disposition == ClickDisposition::PassThrough && session.is_active() {
        if let Some(icon) = session.host().icon_at(target) {
            session.activate_icon(icon);
        }
    }

    disposition
}
