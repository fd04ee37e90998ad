#![forbid(unsafe_code)]

//! Document access seam.
//!
//! [`PanelDom`] is the narrow slice of the DOM the controller needs. The
//! browser binding implements it over `web_sys`; [`crate::MemoryDocument`]
//! implements it for native tests.

use crate::geometry::{Rect, ScrollOffset};

/// Host document operations used by the click controller.
///
/// Nodes are cheap handles (`web_sys::Element`, arena indices). Mutating
/// methods take `&mut self` so in-memory hosts can own their tree; browser
/// hosts mutate through the handle and ignore the exclusivity.
pub trait PanelDom {
    /// Element handle.
    type Node: Clone;

    /// Parent element of `node`, if any (`Node.parentElement`).
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node`'s `tagName` equals `tag` exactly (e.g. `A`).
    ///
    /// Case-sensitive: HTML elements report uppercase names, while SVG and
    /// other foreign elements keep their source case.
    fn has_tag(&self, node: &Self::Node, tag: &str) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Element `id`; the empty string when the attribute is absent.
    fn id(&self, node: &Self::Node) -> String;

    /// Elements carrying `panel_class` plus at least one of `states`, in
    /// document order (`.panel.on, .panel.activated`).
    fn panels_with_any_class(&self, panel_class: &str, states: &[&str]) -> Vec<Self::Node>;

    /// First element carrying `panel_class` whose `attr` equals `value`
    /// (`.panel[data-for='value']`).
    fn find_panel_for(&self, panel_class: &str, attr: &str, value: &str) -> Option<Self::Node>;

    /// Viewport-relative bounding box (`Element.getBoundingClientRect()`).
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Set or clear inline `style.left` / `style.top`. `None` removes the
    /// property so the stylesheet value applies again.
    fn set_inline_position(&mut self, node: &Self::Node, left: Option<&str>, top: Option<&str>);

    /// `window.scrollX` / `window.scrollY`.
    fn scroll_offset(&self) -> ScrollOffset;

    /// `document.body.scrollWidth`.
    fn scroll_width(&self) -> f64;
}
