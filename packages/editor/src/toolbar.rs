//! Floating toolbar model. Hosts turn this into markup.

/// Toolbar icons, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarIcon {
    Remove,
    Edit,
    Undo,
    Close,
}

impl ToolbarIcon {
    pub const ALL: [ToolbarIcon; 4] = [
        ToolbarIcon::Remove,
        ToolbarIcon::Edit,
        ToolbarIcon::Undo,
        ToolbarIcon::Close,
    ];

    /// Icons that reflect the armed mode
    pub const MODE_ICONS: [ToolbarIcon; 2] = [ToolbarIcon::Remove, ToolbarIcon::Edit];

    pub fn element_id(&self) -> &'static str {
        match self {
            ToolbarIcon::Remove => "element-remover-icon",
            ToolbarIcon::Edit => "element-editor-icon",
            ToolbarIcon::Undo => "element-undo-icon",
            ToolbarIcon::Close => "element-close-icon",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ToolbarIcon::Remove => "Remove Element",
            ToolbarIcon::Edit => "Edit Element",
            ToolbarIcon::Undo => "Undo",
            ToolbarIcon::Close => "Close",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ToolbarIcon::Remove => "🗑️",
            ToolbarIcon::Edit => "✏️",
            ToolbarIcon::Undo => "↩️",
            ToolbarIcon::Close => "❌",
        }
    }

    /// Reverse lookup from a DOM id
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.element_id() == id)
    }

    /// Close sits outside the icon group
    pub fn is_grouped(&self) -> bool {
        !matches!(self, ToolbarIcon::Close)
    }
}

/// Toolbar layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub id: &'static str,
    pub icons_id: &'static str,
    pub icons: Vec<ToolbarIcon>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            id: "element-editor-bar",
            icons_id: "element-editor-icons",
            icons: ToolbarIcon::ALL.to_vec(),
        }
    }

    pub fn grouped_icons(&self) -> impl Iterator<Item = ToolbarIcon> + '_ {
        self.icons.iter().copied().filter(ToolbarIcon::is_grouped)
    }

    pub fn trailing_icons(&self) -> impl Iterator<Item = ToolbarIcon> + '_ {
        self.icons.iter().copied().filter(|icon| !icon.is_grouped())
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}
