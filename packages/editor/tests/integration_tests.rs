//! Integration tests for the editing session

use element_editor::{
    simulate_click, ChangeKind, ChangeRecord, ClickDisposition, Cursor, Document, EditSession,
    EditorConfig, HeadlessHost, KeyDisposition, KeyInput, Mode, NodeId, PageNode, ToolbarIcon,
};

fn page() -> Document {
    Document::from_page(&[
        PageNode::element("nav")
            .with_attr("id", "nav")
            .with_child(PageNode::element("a").with_attr("id", "home").with_attr("href", "/").with_child(PageNode::text("Home")))
            .with_child(PageNode::element("a").with_attr("id", "about").with_attr("href", "/about").with_child(PageNode::text("About")))
            .with_child(PageNode::element("a").with_attr("id", "blog").with_attr("href", "/blog").with_child(PageNode::text("Blog"))),
        PageNode::element("main")
            .with_attr("id", "main")
            .with_child(PageNode::element("h1").with_attr("id", "title").with_child(PageNode::text("Welcome")))
            .with_child(PageNode::element("img").with_attr("id", "hero").with_attr("src", "a.png")),
    ])
}

fn active_session() -> EditSession<HeadlessHost> {
    let mut session = EditSession::new(HeadlessHost::new(page()));
    session.toggle_activation();
    session
}

fn node(session: &EditSession<HeadlessHost>, element_id: &str) -> NodeId {
    session
        .host()
        .document()
        .get_element_by_id(element_id)
        .unwrap_or_else(|| panic!("missing #{}", element_id))
}

#[test]
fn test_remove_then_undo_restores_index() {
    let mut session = active_session();
    session.select_mode(Mode::Remove);

    let nav = node(&session, "nav");
    let about = node(&session, "about");
    let before = session.host().document().to_html();

    assert_eq!(session.handle_click(&about), ClickDisposition::Consumed);
    assert!(!session.host().document().is_connected(about));
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.log().last().map(ChangeRecord::kind), Some(ChangeKind::Remove));
    assert_eq!(session.host().notifications().last_message(), Some("Element removed"));

    assert_eq!(session.undo(), Some(ChangeKind::Remove));
    assert_eq!(session.host().document().child_index(nav, about), Some(1));
    assert_eq!(session.host().document().to_html(), before);
    assert_eq!(session.host().notifications().last_message(), Some("Removal undone"));
}

#[test]
fn test_remove_last_child_then_undo_appends() {
    let mut session = active_session();
    session.select_mode(Mode::Remove);

    let nav = node(&session, "nav");
    let blog = node(&session, "blog");

    session.handle_click(&blog);
    session.undo();

    assert_eq!(session.host().document().children(nav).last(), Some(&blog));
}

#[test]
fn test_image_edit_then_undo() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let hero = node(&session, "hero");

    session.host_mut().answer_next_prompt(Some("b.png"));
    assert_eq!(session.handle_click(&hero), ClickDisposition::Consumed);

    assert_eq!(session.host().document().attribute(hero, "src"), Some("b.png"));
    assert_eq!(
        session.log().last(),
        Some(&ChangeRecord::ImageEdit {
            element: hero,
            original_src: "a.png".to_string(),
        })
    );
    assert_eq!(session.host().notifications().last_message(), Some("Image updated"));

    assert_eq!(session.undo(), Some(ChangeKind::ImageEdit));
    assert_eq!(session.host().document().attribute(hero, "src"), Some("a.png"));
}

#[test]
fn test_cancelled_image_prompt_changes_nothing() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let hero = node(&session, "hero");
    let before = session.host().document().to_html();

    session.host_mut().answer_next_prompt(None);
    session.handle_click(&hero);

    assert_eq!(session.host().document().to_html(), before);
    assert!(session.log().is_empty());
    assert!(session.host().notifications().history().is_empty());
}

#[test]
fn test_text_edit_commits_on_enter() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    assert_eq!(session.editing(), Some(&title));
    assert!(session.host().document().is_editable(title));
    assert_eq!(session.host().focused(), Some(title));

    session.host_mut().type_text(title, "Hello there").unwrap();

    // Shift+Enter is left to the page (line break)
    let shift_enter = KeyInput::new("Enter", true);
    assert_eq!(session.handle_keydown(&title, &shift_enter), KeyDisposition::Default);
    assert_eq!(session.editing(), Some(&title));

    let enter = KeyInput::new("Enter", false);
    assert_eq!(session.handle_keydown(&title, &enter), KeyDisposition::PreventDefault);

    assert_eq!(session.editing(), None);
    assert!(!session.host().document().is_editable(title));
    assert_eq!(session.host().document().text_content(title), "Hello there");
    assert_eq!(session.host().total_edit_listeners(), 0);
    assert_eq!(
        session.log().last(),
        Some(&ChangeRecord::TextEdit {
            element: title,
            original_content: "Welcome".to_string(),
        })
    );
    assert_eq!(session.host().notifications().last_message(), Some("Content updated"));

    assert_eq!(session.undo(), Some(ChangeKind::TextEdit));
    assert_eq!(session.host().document().text_content(title), "Welcome");
}

#[test]
fn test_enter_then_blur_records_once() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    session.host_mut().type_text(title, "Changed").unwrap();

    session.handle_keydown(&title, &KeyInput::new("Enter", false));
    session.handle_blur(&title);

    assert_eq!(session.log().len(), 1);
    assert_eq!(session.host().notifications().history().len(), 1);
}

#[test]
fn test_blur_without_change_records_nothing() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    session.handle_blur(&title);

    assert!(session.log().is_empty());
    assert!(!session.host().document().is_editable(title));
    assert_eq!(session.host().total_edit_listeners(), 0);
}

#[test]
fn test_clicking_another_element_ends_current_edit() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");
    let home = node(&session, "home");

    session.handle_click(&title);
    session.host_mut().type_text(title, "New title").unwrap();
    session.handle_click(&home);

    assert_eq!(session.editing(), Some(&home));
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.host().edit_listeners_on(title), 0);
    assert_eq!(session.host().edit_listeners_on(home), 1);
}

#[test]
fn test_clicking_edited_element_keeps_session() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    assert_eq!(session.handle_click(&title), ClickDisposition::Consumed);
    assert_eq!(session.host().edit_listeners_on(title), 1);
}

#[test]
fn test_toolbar_clicks_pass_through() {
    let mut session = active_session();
    session.select_mode(Mode::Remove);

    let bar = node(&session, "element-editor-bar");
    let undo_icon = node(&session, "element-undo-icon");

    assert_eq!(session.handle_click(&bar), ClickDisposition::PassThrough);
    assert_eq!(session.handle_click(&undo_icon), ClickDisposition::PassThrough);
    assert!(session.host().document().is_connected(bar));
    assert!(session.log().is_empty());
}

#[test]
fn test_toolbar_icons_drive_session() {
    let mut session = active_session();
    let remove_icon = node(&session, "element-remover-icon");
    let edit_icon = node(&session, "element-editor-icon");
    let undo_icon = node(&session, "element-undo-icon");
    let close_icon = node(&session, "element-close-icon");
    let home = node(&session, "home");

    simulate_click(&mut session, remove_icon);
    assert_eq!(session.mode(), Mode::Remove);
    assert_eq!(session.host().icon_highlight(ToolbarIcon::Remove), Some("#ff0000"));

    simulate_click(&mut session, home);
    assert!(!session.host().document().is_connected(home));

    simulate_click(&mut session, undo_icon);
    assert!(session.host().document().is_connected(home));

    simulate_click(&mut session, edit_icon);
    assert_eq!(session.mode(), Mode::Edit);
    assert_eq!(session.host().icon_highlight(ToolbarIcon::Remove), Some("transparent"));
    assert_eq!(session.host().icon_highlight(ToolbarIcon::Edit), Some("#00ff00"));

    simulate_click(&mut session, close_icon);
    assert!(!session.is_active());
    assert!(session.host().document().get_element_by_id("element-editor-bar").is_none());
}

#[test]
fn test_deactivation_resets_everything() {
    let mut session = active_session();
    session.select_mode(Mode::Remove);
    let home = node(&session, "home");
    session.handle_click(&home);

    session.toggle_activation();

    assert!(!session.is_active());
    assert_eq!(session.mode(), Mode::None);
    assert_eq!(session.host().cursor(), Cursor::Default);
    assert_eq!(session.host().click_interceptors(), 0);
    assert!(session.log().is_empty());

    // Applied changes stay applied
    assert!(!session.host().document().is_connected(home));

    // Reactivating starts unarmed
    session.toggle_activation();
    assert_eq!(session.mode(), Mode::None);
    assert_eq!(session.handle_click(&node(&session, "about")), ClickDisposition::PassThrough);
}

#[test]
fn test_deactivation_commits_pending_edit() {
    let mut session = EditSession::with_config(
        HeadlessHost::new(page()),
        EditorConfig {
            retain_history_on_close: true,
            ..EditorConfig::default()
        },
    );
    session.toggle_activation();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    session.host_mut().type_text(title, "Bye").unwrap();
    session.toggle_activation();

    assert_eq!(session.host().total_edit_listeners(), 0);
    assert_eq!(session.log().len(), 1);

    // Retained history can still be undone after close
    assert_eq!(session.undo(), Some(ChangeKind::TextEdit));
    assert_eq!(session.host().document().text_content(title), "Welcome");
}

#[test]
fn test_mode_switch_commits_pending_edit() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    session.host_mut().type_text(title, "Switched").unwrap();
    session.select_mode(Mode::Remove);

    assert_eq!(session.editing(), None);
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.host().click_interceptors(), 1);
}

#[test]
fn test_undo_during_edit_reverts_that_edit() {
    let mut session = active_session();
    session.select_mode(Mode::Edit);
    let title = node(&session, "title");

    session.handle_click(&title);
    session.host_mut().type_text(title, "Draft").unwrap();

    assert_eq!(session.undo(), Some(ChangeKind::TextEdit));
    assert_eq!(session.host().document().text_content(title), "Welcome");
    assert!(session.log().is_empty());
}

#[test]
fn test_removing_root_level_body_is_noop() {
    let mut session = active_session();
    session.select_mode(Mode::Remove);
    let body = session.host().document().body();
    let before = session.host().document().to_html();

    assert_eq!(session.handle_click(&body), ClickDisposition::Consumed);
    assert_eq!(session.host().document().to_html(), before);
    assert!(session.log().is_empty());
}

#[test]
fn test_notifications_use_configured_duration() {
    let mut session = EditSession::with_config(
        HeadlessHost::new(page()),
        EditorConfig {
            notification_duration_ms: 750,
            ..EditorConfig::default()
        },
    );
    session.toggle_activation();
    session.select_mode(Mode::Remove);
    let home = node(&session, "home");
    session.handle_click(&home);

    let shown = &session.host().notifications().history()[0];
    assert_eq!(shown.duration.as_millis(), 750);
}

fn rich_text_session() -> EditSession<HeadlessHost> {
    let page = Document::from_page(&[PageNode::element("p")
        .with_attr("id", "p")
        .with_child(PageNode::text("Hello "))
        .with_child(PageNode::element("b").with_attr("id", "bold").with_child(PageNode::text("world")))]);
    let mut session = EditSession::new(HeadlessHost::new(page));
    session.toggle_activation();
    session.select_mode(Mode::Edit);
    session
}

#[test]
fn test_click_inside_edited_element_keeps_edit() {
    let mut session = rich_text_session();
    let p = node(&session, "p");
    let bold = node(&session, "bold");

    session.handle_click(&p);
    assert_eq!(session.handle_click(&bold), ClickDisposition::Consumed);

    assert_eq!(session.editing(), Some(&p));
    assert_eq!(session.host().edit_listeners_on(p), 1);
    assert_eq!(session.host().edit_listeners_on(bold), 0);
    assert!(session.log().is_empty());
}

#[test]
fn test_text_undo_restores_text_not_markup() {
    let mut session = rich_text_session();
    let p = node(&session, "p");

    session.handle_click(&p);
    session.host_mut().type_text(p, "Bye").unwrap();
    session.handle_keydown(&p, &KeyInput::new("Enter", false));
    session.undo();

    // Undo restores the text a user saw, inline markup is flattened
    let doc = session.host().document();
    assert_eq!(doc.text_content(p), "Hello world");
    assert_eq!(doc.node_html(p), r#"<p id="p">Hello world</p>"#);
    assert!(doc.get_element_by_id("bold").is_none());
}
