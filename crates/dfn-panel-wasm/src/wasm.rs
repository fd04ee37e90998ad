#![forbid(unsafe_code)]

//! `wasm-bindgen` exports and the `web_sys` document binding.
//!
//! Only compiled on `wasm32` targets.

use std::cell::Cell;

use dfn_panel::{PanelDom, Rect, ScrollOffset};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Node, Window};

use super::host_core::{InstallGuard, PanelHost};

thread_local! {
    static INSTALL_GUARD: Cell<InstallGuard> = const { Cell::new(InstallGuard::new()) };
}

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// [`PanelDom`] over the live page.
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Bind to the global `window` and its `document`.
    pub fn from_global() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    /// Elements carrying `class`, in document order.
    ///
    /// Matches by class token, so no selector is ever built from config
    /// strings.
    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }
}

impl PanelDom for WebDom {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn has_tag(&self, node: &Element, tag: &str) -> bool {
        node.tag_name() == tag
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn id(&self, node: &Element) -> String {
        node.id()
    }

    fn panels_with_any_class(&self, panel_class: &str, states: &[&str]) -> Vec<Element> {
        self.elements_with_class(panel_class)
            .into_iter()
            .filter(|panel| {
                let classes = panel.class_list();
                states.iter().any(|state| classes.contains(state))
            })
            .collect()
    }

    fn find_panel_for(&self, panel_class: &str, attr: &str, value: &str) -> Option<Element> {
        // Compare attributes directly so ids never need CSS escaping.
        self.elements_with_class(panel_class)
            .into_iter()
            .find(|panel| panel.get_attribute(attr).as_deref() == Some(value))
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
    }

    fn set_inline_position(&mut self, node: &Element, left: Option<&str>, top: Option<&str>) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        for (property, value) in [("left", left), ("top", top)] {
            let _ = match value {
                Some(value) => style.set_property(property, value),
                None => style.remove_property(property).map(drop),
            };
        }
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(
            self.window.scroll_x().unwrap_or_default(),
            self.window.scroll_y().unwrap_or_default(),
        )
    }

    fn scroll_width(&self) -> f64 {
        self.document
            .body()
            .map_or(0.0, |body| f64::from(body.scroll_width()))
    }
}

/// Nearest element for an event target; text nodes resolve to their parent.
fn target_element(event: &Event) -> Option<Element> {
    let node = event.target()?.dyn_into::<Node>().ok()?;
    match node.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(node) => node.parent_element(),
    }
}

fn install(host: PanelHost) -> Result<bool, JsValue> {
    install_panic_hook();

    if INSTALL_GUARD.with(|guard| guard.get().is_installed()) {
        return Ok(false);
    }

    let mut dom = WebDom::from_global()?;
    let body = dom
        .document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = target_element(&event) else {
            return;
        };
        let dispatch = host.dispatch(&mut dom, &target);
        for line in &dispatch.console {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    });
    body.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    // The listener lives for the rest of the page.
    listener.forget();

    INSTALL_GUARD.with(|guard| {
        let mut state = guard.get();
        state.mark_installed();
        guard.set(state);
    });
    Ok(true)
}

/// Attach the click listener with the default markup contract.
///
/// Returns `false` when a listener was already installed.
#[wasm_bindgen(js_name = installDfnPanels)]
pub fn install_dfn_panels() -> Result<bool, JsValue> {
    install(PanelHost::default())
}

/// Attach the click listener with a JSON `PanelConfig`.
///
/// Missing keys keep their defaults. Invalid JSON or an invalid config is
/// reported as an error string.
#[wasm_bindgen(js_name = installDfnPanelsWithConfig)]
pub fn install_dfn_panels_with_config(json: &str) -> Result<bool, JsValue> {
    let host = PanelHost::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    install(host)
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_dfn_panels().map(drop)
}
