//! `web_sys` implementation of the engine's [`Page`] trait.
//!
//! Every fallible DOM call maps its `JsValue` exception into a [`PageError`]
//! carrying the exception message, so engine logs read the same whether the
//! failure came from a fake or from the browser.

use engine::event::{EventKind, SyntheticEvent};
use engine::page::{ComputedStyle, Page, PageError, Rect, Scope};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, Window};

/// The live document of the current window.
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// `None` outside a window with a document (e.g. in a worker).
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn build_event(&self, event: &SyntheticEvent) -> Result<Event, JsValue> {
        let (x, y) = client_coords(event);
        match event.kind {
            EventKind::Pointer => {
                let init = web_sys::PointerEventInit::new();
                init.set_bubbles(event.bubbles);
                init.set_cancelable(event.cancelable);
                init.set_view(Some(&self.window));
                init.set_client_x(x);
                init.set_client_y(y);
                init.set_pointer_id(1);
                init.set_pointer_type("mouse");
                init.set_is_primary(true);
                web_sys::PointerEvent::new_with_event_init_dict(event.name, &init).map(Event::from)
            }
            EventKind::Mouse => {
                let init = web_sys::MouseEventInit::new();
                init.set_bubbles(event.bubbles);
                init.set_cancelable(event.cancelable);
                init.set_view(Some(&self.window));
                init.set_client_x(x);
                init.set_client_y(y);
                web_sys::MouseEvent::new_with_mouse_event_init_dict(event.name, &init).map(Event::from)
            }
            EventKind::Keyboard => {
                let init = web_sys::KeyboardEventInit::new();
                init.set_bubbles(event.bubbles);
                init.set_cancelable(event.cancelable);
                if let Some(key) = event.key {
                    init.set_key(key);
                    init.set_code(key);
                }
                web_sys::KeyboardEvent::new_with_keyboard_event_init_dict(event.name, &init).map(Event::from)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn client_coords(event: &SyntheticEvent) -> (i32, i32) {
    (event.at.x.round() as i32, event.at.y.round() as i32)
}

/// Best-effort human-readable message for a thrown value.
fn js_reason(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn selector_error(selector: &str) -> impl Fn(JsValue) -> PageError + '_ {
    move |err| PageError::Selector { selector: selector.to_string(), reason: js_reason(&err) }
}

impl Page for BrowserPage {
    type Node = Element;

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn query(&self, scope: Scope<'_, Element>, selector: &str) -> Result<Option<Element>, PageError> {
        match scope {
            Scope::Document => self.document.query_selector(selector),
            Scope::Node(node) => node.query_selector(selector),
        }
        .map_err(selector_error(selector))
    }

    fn query_all(&self, scope: Scope<'_, Element>, selector: &str) -> Result<Vec<Element>, PageError> {
        let list = match scope {
            Scope::Document => self.document.query_selector_all(selector),
            Scope::Node(node) => node.query_selector_all(selector),
        }
        .map_err(selector_error(selector))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn closest(&self, node: &Element, selector: &str) -> Result<Option<Element>, PageError> {
        node.closest(selector).map_err(selector_error(selector))
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn style(&self, node: &Element) -> Result<ComputedStyle, PageError> {
        let declaration = self
            .window
            .get_computed_style(node)
            .map_err(|err| PageError::Style(js_reason(&err)))?
            .ok_or_else(|| PageError::Style("no computed style".into()))?;
        let property = |name: &str| {
            declaration
                .get_property_value(name)
                .map_err(|err| PageError::Style(format!("{name}: {}", js_reason(&err))))
        };
        Ok(ComputedStyle {
            background_color: property("background-color")?,
            background_image: property("background-image")?,
            display: property("display")?,
            visibility: property("visibility")?,
            opacity: property("opacity")?,
        })
    }

    fn rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn dispatch(&self, target: Scope<'_, Element>, event: &SyntheticEvent) -> Result<(), PageError> {
        let dispatch_error = |err: JsValue| PageError::Dispatch { event: event.name, reason: js_reason(&err) };
        let built = self.build_event(event).map_err(dispatch_error)?;
        let sent = match target {
            Scope::Document => self.document.dispatch_event(&built),
            Scope::Node(node) => node.dispatch_event(&built),
        };
        // `false` only means a listener called preventDefault.
        sent.map(|_| ()).map_err(dispatch_error)
    }
}
