//! Browser implementation of the editor host traits.
//!
//! Event listener closures are created once per host and only ever
//! added to or removed from targets. A closure may remove itself while
//! it runs (Enter ends an edit, Close unmounts the toolbar), which is
//! safe as long as the closure itself is not dropped mid-call.

use element_editor::{Cursor, Dom, DomError, Host, Notification, Toolbar, ToolbarIcon};
use js_sys::Function;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, FocusEvent, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent,
    Node,
};

/// Page events routed back to the session
pub enum PageEvent {
    /// Document-level click while a mode is armed
    Click(MouseEvent),
    /// Click on a toolbar icon
    Icon(ToolbarIcon),
    /// Focus left the element being edited
    Blur(Node),
    /// Keydown inside the element being edited
    KeyDown(Node, KeyboardEvent),
}

pub type Dispatch = Rc<dyn Fn(PageEvent)>;

struct Listeners {
    click: Closure<dyn FnMut(MouseEvent)>,
    icon: Closure<dyn FnMut(MouseEvent)>,
    blur: Closure<dyn FnMut(FocusEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Listeners {
    fn new(dispatch: Dispatch) -> Self {
        let on_click = dispatch.clone();
        let click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            on_click(PageEvent::Click(event));
        });

        let on_icon = dispatch.clone();
        let icon = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let icon = current_element(&event)
                .and_then(|element| ToolbarIcon::from_element_id(&element.id()));
            if let Some(icon) = icon {
                on_icon(PageEvent::Icon(icon));
            }
        });

        let on_blur = dispatch.clone();
        let blur = Closure::<dyn FnMut(FocusEvent)>::new(move |event: FocusEvent| {
            if let Some(element) = current_element(&event) {
                on_blur(PageEvent::Blur(element.into()));
            }
        });

        let on_key = dispatch;
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(element) = current_element(&event) {
                on_key(PageEvent::KeyDown(element.into(), event));
            }
        });

        Self {
            click,
            icon,
            blur,
            keydown,
        }
    }
}

fn current_element(event: &Event) -> Option<Element> {
    event.current_target()?.dyn_into::<Element>().ok()
}

fn callback<T: ?Sized>(closure: &Closure<T>) -> &Function {
    closure.as_ref().unchecked_ref()
}

fn backend(e: JsValue) -> DomError {
    DomError::Backend(format!("{:?}", e))
}

/// [`Host`] over the live page
pub struct WebHost {
    document: Document,
    listeners: Listeners,
}

impl WebHost {
    pub fn new(document: Document, dispatch: Dispatch) -> Self {
        Self {
            document,
            listeners: Listeners::new(dispatch),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn create(&self, tag: &str) -> Result<HtmlElement, DomError> {
        self.document
            .create_element(tag)
            .map_err(backend)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Backend(format!("<{}> is not an HTML element", tag)))
    }

    fn icon_element(&self, icon: ToolbarIcon) -> Result<HtmlElement, DomError> {
        let span = self.create("span")?;
        span.set_id(icon.element_id());
        span.set_title(icon.title());
        span.set_text_content(Some(icon.glyph()));
        set_styles(&span, &[("cursor", "pointer"), ("padding", "4px"), ("border-radius", "4px")])?;
        span.add_event_listener_with_callback("click", callback(&self.listeners.icon))
            .map_err(backend)?;
        Ok(span)
    }
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), DomError> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value).map_err(backend)?;
    }
    Ok(())
}

impl Dom for WebHost {
    type Node = Node;

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn next_sibling(&self, node: &Node) -> Option<Node> {
        node.next_sibling()
    }

    fn remove_child(&mut self, parent: &Node, child: &Node) -> Result<(), DomError> {
        parent.remove_child(child).map(|_| ()).map_err(backend)
    }

    fn insert_before(&mut self, parent: &Node, child: &Node, reference: Option<&Node>) -> Result<(), DomError> {
        parent.insert_before(child, reference).map(|_| ()).map_err(backend)
    }

    fn contains(&self, ancestor: &Node, node: &Node) -> bool {
        ancestor.contains(Some(node))
    }

    fn is_image(&self, node: &Node) -> bool {
        node.dyn_ref::<HtmlImageElement>().is_some()
    }

    fn image_src(&self, node: &Node) -> Result<String, DomError> {
        node.dyn_ref::<HtmlImageElement>()
            .map(HtmlImageElement::src)
            .ok_or(DomError::NotAnImage)
    }

    fn set_image_src(&mut self, node: &Node, src: &str) -> Result<(), DomError> {
        let image = node.dyn_ref::<HtmlImageElement>().ok_or(DomError::NotAnImage)?;
        image.set_src(src);
        Ok(())
    }

    fn text_content(&self, node: &Node) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text_content(&mut self, node: &Node, text: &str) -> Result<(), DomError> {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
        Ok(())
    }

    fn set_editable(&mut self, node: &Node, editable: bool) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            element.set_content_editable(if editable { "true" } else { "false" });
        }
    }

    fn focus(&mut self, node: &Node) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }
}

impl Host for WebHost {
    fn set_cursor(&mut self, cursor: Cursor) {
        if let Some(body) = self.body() {
            let _ = body.style().set_property("cursor", cursor.css_value());
        }
    }

    fn install_click_interceptor(&mut self) {
        let _ = self
            .document
            .add_event_listener_with_callback("click", callback(&self.listeners.click));
    }

    fn remove_click_interceptor(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("click", callback(&self.listeners.click));
    }

    fn install_edit_listeners(&mut self, node: &Node) {
        let _ = node.add_event_listener_with_callback("blur", callback(&self.listeners.blur));
        let _ = node.add_event_listener_with_callback("keydown", callback(&self.listeners.keydown));
    }

    fn remove_edit_listeners(&mut self, node: &Node) {
        let _ = node.remove_event_listener_with_callback("blur", callback(&self.listeners.blur));
        let _ = node.remove_event_listener_with_callback("keydown", callback(&self.listeners.keydown));
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        web_sys::window()?
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }

    fn notify(&mut self, notification: Notification) {
        let Some(body) = self.body() else {
            return;
        };
        let Ok(toast) = self.create("div") else {
            return;
        };

        toast.set_text_content(Some(&notification.message));
        let _ = set_styles(
            &toast,
            &[
                ("position", "fixed"),
                ("top", "60px"),
                ("right", "10px"),
                ("padding", "10px"),
                ("background-color", "rgba(0, 0, 0, 0.7)"),
                ("color", "white"),
                ("border-radius", "5px"),
                ("z-index", "10000"),
            ],
        );
        if body.append_child(&toast).is_err() {
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let dismiss = Closure::once_into_js(move || toast.remove());
        let timeout = i32::try_from(notification.duration.as_millis()).unwrap_or(i32::MAX);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(dismiss.unchecked_ref(), timeout);
    }

    fn mount_toolbar(&mut self, toolbar: &Toolbar) -> Result<Node, DomError> {
        let body = self.body().ok_or(DomError::Detached)?;

        let bar = self.create("div")?;
        bar.set_id(toolbar.id);
        set_styles(
            &bar,
            &[
                ("position", "fixed"),
                ("top", "10px"),
                ("right", "10px"),
                ("display", "flex"),
                ("align-items", "center"),
                ("gap", "8px"),
                ("padding", "6px 10px"),
                ("background-color", "white"),
                ("border", "1px solid #ccc"),
                ("border-radius", "6px"),
                ("box-shadow", "0 2px 6px rgba(0, 0, 0, 0.2)"),
                ("z-index", "10001"),
                ("font-size", "18px"),
            ],
        )?;

        let group = self.create("div")?;
        group.set_id(toolbar.icons_id);
        set_styles(&group, &[("display", "flex"), ("gap", "4px")])?;
        bar.append_child(&group).map_err(backend)?;

        for icon in toolbar.grouped_icons() {
            let el = self.icon_element(icon)?;
            group.append_child(&el).map_err(backend)?;
        }
        for icon in toolbar.trailing_icons() {
            let el = self.icon_element(icon)?;
            bar.append_child(&el).map_err(backend)?;
        }

        body.append_child(&bar).map_err(backend)?;
        Ok(bar.into())
    }

    fn unmount_toolbar(&mut self, root: &Node) {
        if let Some(element) = root.dyn_ref::<Element>() {
            element.remove();
        }
    }

    fn highlight_icon(&mut self, icon: ToolbarIcon, color: Option<&str>) {
        if let Some(element) = self.html_element(icon.element_id()) {
            let _ = element
                .style()
                .set_property("background-color", color.unwrap_or("transparent"));
        }
    }
}
