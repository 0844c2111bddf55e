//! # Mode Controller
//!
//! Decides which operation a page click performs.
//!
//! ```text
//!            select(Remove)            select(Edit)
//!   None ─────────────────→ Remove ─────────────────→ Edit
//!    ↑  ←───────────────────  │  ←─────────────────── │
//!    │     select(Remove)     │     select(Remove)    │
//!    └────────────────────────┴───────────────────────┘
//!                  select(same) / reset
//! ```
//!
//! The click interceptor is installed on the way out of `None` and
//! removed on the way back, so at most one is ever active.

use crate::{Cursor, EditorConfig, Host, ToolbarIcon};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which click-triggered operation is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    None,
    Remove,
    Edit,
}

#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
    interceptor_installed: bool,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn interceptor_installed(&self) -> bool {
        self.interceptor_installed
    }

    /// Arm `requested`, or disarm if it is already armed
    ///
    /// Selecting `Mode::None` always disarms.
    pub fn select<H: Host + ?Sized>(&mut self, host: &mut H, config: &EditorConfig, requested: Mode) -> Mode {
        let next = if requested == self.mode {
            Mode::None
        } else {
            requested
        };
        debug!(from = ?self.mode, to = ?next, "Switching mode");

        self.transition(host, next);
        self.update_icons(host, config);
        self.mode
    }

    /// Force `Mode::None`, removing the interceptor if present
    pub fn reset<H: Host + ?Sized>(&mut self, host: &mut H, config: &EditorConfig) {
        self.transition(host, Mode::None);
        self.update_icons(host, config);
    }

    fn transition<H: Host + ?Sized>(&mut self, host: &mut H, next: Mode) {
        self.mode = next;

        if next == Mode::None {
            if self.interceptor_installed {
                host.remove_click_interceptor();
                self.interceptor_installed = false;
            }
            host.set_cursor(Cursor::Default);
        } else {
            if !self.interceptor_installed {
                host.install_click_interceptor();
                self.interceptor_installed = true;
            }
            host.set_cursor(Cursor::Crosshair);
        }
    }

    fn update_icons<H: Host + ?Sized>(&self, host: &mut H, config: &EditorConfig) {
        for icon in ToolbarIcon::MODE_ICONS {
            host.highlight_icon(icon, config.highlight_for(icon, self.mode));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, HeadlessHost, Toolbar};

    fn setup() -> (HeadlessHost, EditorConfig, ModeController) {
        let mut host = HeadlessHost::new(Document::new());
        host.mount_toolbar(&Toolbar::new()).unwrap();
        (host, EditorConfig::default(), ModeController::new())
    }

    #[test]
    fn test_initial_state() {
        let controller = ModeController::new();
        assert_eq!(controller.mode(), Mode::None);
        assert!(!controller.interceptor_installed());
    }

    #[test]
    fn test_select_same_mode_twice_disarms() {
        let (mut host, config, mut controller) = setup();

        assert_eq!(controller.select(&mut host, &config, Mode::Remove), Mode::Remove);
        assert_eq!(host.cursor(), Cursor::Crosshair);
        assert_eq!(host.click_interceptors(), 1);

        assert_eq!(controller.select(&mut host, &config, Mode::Remove), Mode::None);
        assert_eq!(host.cursor(), Cursor::Default);
        assert_eq!(host.click_interceptors(), 0);
    }

    #[test]
    fn test_switching_modes_keeps_one_interceptor() {
        let (mut host, config, mut controller) = setup();

        controller.select(&mut host, &config, Mode::Remove);
        controller.select(&mut host, &config, Mode::Edit);
        assert_eq!(host.click_interceptors(), 1);

        controller.select(&mut host, &config, Mode::Remove);
        assert_eq!(host.click_interceptors(), 1);
        assert_eq!(controller.mode(), Mode::Remove);
    }

    #[test]
    fn test_icons_track_mode() {
        let (mut host, config, mut controller) = setup();

        controller.select(&mut host, &config, Mode::Edit);
        assert_eq!(host.icon_highlight(ToolbarIcon::Edit), Some("#00ff00"));
        assert_eq!(host.icon_highlight(ToolbarIcon::Remove), Some("transparent"));

        controller.select(&mut host, &config, Mode::Remove);
        assert_eq!(host.icon_highlight(ToolbarIcon::Edit), Some("transparent"));
        assert_eq!(host.icon_highlight(ToolbarIcon::Remove), Some("#ff0000"));

        controller.reset(&mut host, &config);
        assert_eq!(host.icon_highlight(ToolbarIcon::Remove), Some("transparent"));
    }

    #[test]
    fn test_select_none_disarms() {
        let (mut host, config, mut controller) = setup();

        controller.select(&mut host, &config, Mode::Edit);
        assert_eq!(controller.select(&mut host, &config, Mode::None), Mode::None);
        assert_eq!(host.click_interceptors(), 0);

        // Disarming twice stays disarmed
        assert_eq!(controller.select(&mut host, &config, Mode::None), Mode::None);
        assert_eq!(host.click_interceptors(), 0);
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&Mode::Remove).unwrap(), "\"remove\"");
        let mode: Mode = serde_json::from_str("\"edit\"").unwrap();
        assert_eq!(mode, Mode::Edit);
    }
}
