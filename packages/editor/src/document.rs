//! # In-Memory Document
//!
//! A small element/text tree used by the headless host and the tests.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a
//! node only unlinks it from its parent; the arena keeps it alive, so a
//! `NodeId` held by the change log stays valid across a removal and its
//! undo.
//!
//! ## Loading
//!
//! ```text
//! PageNode (serde tree) → Document::from_page → arena
//!                       ← Document::to_page   ←
//! ```

use crate::DomError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);


/// Serializable page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageNode {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<PageNode>,
    },

    Text { content: String },
}

impl PageNode {
    pub fn element(tag: impl Into<String>) -> Self {
        PageNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        PageNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let PageNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: PageNode) -> Self {
        if let PageNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        editable: bool,
    },
    Text {
        content: String,
    },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree rooted at `body`
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    body: NodeId,
}

impl Document {
    /// Empty document with a bare `body`
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.create_element("body");
        doc
    }

    /// Build a document whose `body` holds `children`
    pub fn from_page(children: &[PageNode]) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        for child in children {
            let id = doc.build(child);
            doc.link(body, id, None);
        }
        doc
    }

    fn build(&mut self, page: &PageNode) -> NodeId {
        match page {
            PageNode::Element {
                tag,
                attributes,
                children,
            } => {
                let id = self.create_element(tag);
                if let NodeKind::Element { attributes: attrs, .. } = &mut self.nodes[id.0].kind {
                    *attrs = attributes.clone();
                }
                for child in children {
                    let child_id = self.build(child);
                    self.link(id, child_id, None);
                }
                id
            }
            PageNode::Text { content } => self.create_text(content),
        }
    }

    /// Export the body's children as a page tree
    pub fn to_page(&self) -> Vec<PageNode> {
        self.children(self.body)
            .iter()
            .map(|child| self.export(*child))
            .collect()
    }

    fn export(&self, id: NodeId) -> PageNode {
        let data = &self.nodes[id.0];
        match &data.kind {
            NodeKind::Element { tag, attributes, .. } => PageNode::Element {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: data.children.iter().map(|c| self.export(*c)).collect(),
            },
            NodeKind::Text { content } => PageNode::text(content.clone()),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            editable: false,
        })
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(NodeKind::Text {
            content: content.to_string(),
        })
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| DomError::NodeNotFound(format!("{:?}", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| DomError::NodeNotFound(format!("{:?}", id)))
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let siblings = &mut self.nodes[parent.0].children;
        let index = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (append when `None`), detaching it first
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.node(child)?;
        if !self.is_element(parent) {
            return Err(DomError::Backend("Parent cannot have children".to_string()));
        }
        if self.contains(child, parent) {
            return Err(DomError::Backend("Insertion would create a cycle".to_string()));
        }

        if let Some(reference) = reference {
            if reference == child || self.child_index(parent, reference).is_none() {
                return Err(DomError::NotAChild);
            }
        }

        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }

        let index = reference.and_then(|reference| self.child_index(parent, reference));
        self.link(parent, child, index);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let index = self.child_index(parent, child).ok_or(DomError::NotAChild)?;
        self.node_mut(parent)?.children.remove(index);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(parent, id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// True if `node` is `ancestor` or a descendant of it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True if `node` can be reached from `body`
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.0).map(|n| &n.kind),
            Some(NodeKind::Element { .. })
        )
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            NodeKind::Text { .. } => Err(DomError::Backend("Text nodes have no attributes".to_string())),
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            NodeKind::Element { styles, .. } => styles.get(property).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    /// Set an inline style; `None` removes the property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: Option<&str>) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element { styles, .. } => {
                match value {
                    Some(value) => styles.insert(property.to_string(), value.to_string()),
                    None => styles.remove(property),
                };
                Ok(())
            }
            NodeKind::Text { .. } => Err(DomError::Backend("Text nodes have no style".to_string())),
        }
    }

    pub fn is_editable(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.0).map(|n| &n.kind),
            Some(NodeKind::Element { editable: true, .. })
        )
    }

    pub fn set_editable(&mut self, id: NodeId, value: bool) {
        if let Some(NodeData {
            kind: NodeKind::Element { editable, .. },
            ..
        }) = self.nodes.get_mut(id.0)
        {
            *editable = value;
        }
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(id.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text { content } => out.push_str(content),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Replace the children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        if let NodeKind::Text { content } = &mut self.node_mut(id)?.kind {
            *content = text.to_string();
            return Ok(());
        }

        for child in std::mem::take(&mut self.node_mut(id)?.children) {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let text_id = self.create_text(text);
            self.link(id, text_id, None);
        }
        Ok(())
    }

    /// First connected element carrying `id="..."`
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.find_in(self.body, |doc, node| doc.attribute(node, "id") == Some(element_id))
    }

    fn find_in(&self, root: NodeId, pred: impl Fn(&Self, NodeId) -> bool + Copy) -> Option<NodeId> {
        if pred(self, root) {
            return Some(root);
        }
        self.children(root)
            .iter()
            .find_map(|child| self.find_in(*child, pred))
    }

    /// Serialize the body's children as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.body) {
            self.write_html(*child, &mut out);
        }
        out
    }

    /// Serialize a single node as HTML
    pub fn node_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(id.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text { content } => out.push_str(&escape(content)),
            NodeKind::Element {
                tag,
                attributes,
                styles,
                ..
            } => {
                let _ = write!(out, "<{}", tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                if !styles.is_empty() {
                    let style = styles
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(out, " style=\"{}\"", escape(&style));
                }
                out.push('>');
                if is_void(tag) {
                    return;
                }
                for child in &data.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input" | "meta" | "link")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
