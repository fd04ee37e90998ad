#![forbid(unsafe_code)]

//! In-memory [`PanelDom`] for native tests and simulated hosts.
//!
//! Elements live in an arena addressed by [`NodeId`]. Layout is supplied by
//! the caller: each element has a configured bounding rect, and an element
//! with an inline `left`/`top` is measured at that position (minus scroll)
//! with its configured size, the way an absolutely positioned panel moves
//! when its style is written.

use std::collections::BTreeMap;

use crate::dom::PanelDom;
use crate::geometry::{Rect, ScrollOffset};

/// Arena index of an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    rect: Rect,
}

impl ElementData {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            parent,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            rect: Rect::default(),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_style(&mut self, property: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.style.insert(property.to_owned(), value.to_owned());
            }
            None => {
                self.style.remove(property);
            }
        }
    }
}

/// Deterministic document tree with caller-controlled layout.
///
/// A fresh document holds `HTML > BODY`. Everything else is appended below.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<ElementData>,
    scroll: ScrollOffset,
    scroll_width: f64,
}

impl MemoryDocument {
    /// Create `HTML > BODY` with the given `document.body.scrollWidth`.
    #[must_use]
    pub fn new(scroll_width: f64) -> Self {
        let mut doc = Self {
            nodes: vec![ElementData::new("HTML", None)],
            scroll: ScrollOffset::default(),
            scroll_width,
        };
        let root = doc.root();
        doc.append_element(root, "BODY");
        doc
    }

    /// The `<html>` element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId(1)
    }

    /// Append a new element with `tag` as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData::new(tag, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attr(node, "id", id);
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].add_class(class);
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].has_class(class)
    }

    /// Class list in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    /// Inline style property, e.g. `inline_style(panel, "left") == Some("255px")`.
    #[must_use]
    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    /// Set the element's laid-out box (viewport-relative, unscrolled).
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].rect = rect;
    }

    /// Resize the element, keeping its configured origin.
    pub fn set_size(&mut self, node: NodeId, width: f64, height: f64) {
        let rect = self.nodes[node.0].rect;
        self.nodes[node.0].rect = Rect::from_origin_size(rect.left, rect.top, width, height);
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    pub fn set_scroll_width(&mut self, scroll_width: f64) {
        self.scroll_width = scroll_width;
    }

    /// Elements in document (pre-order) order.
    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        order
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.trim().parse().ok()
}

impl PanelDom for MemoryDocument {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn has_tag(&self, node: &NodeId, tag: &str) -> bool {
        self.nodes[node.0].tag == tag
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].has_class(class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].add_class(class);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].remove_class(class);
    }

    fn id(&self, node: &NodeId) -> String {
        self.attr(*node, "id").unwrap_or_default().to_owned()
    }

    fn panels_with_any_class(&self, panel_class: &str, states: &[&str]) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|node| {
                let data = &self.nodes[node.0];
                data.has_class(panel_class) && states.iter().any(|s| data.has_class(s))
            })
            .collect()
    }

    fn find_panel_for(&self, panel_class: &str, attr: &str, value: &str) -> Option<NodeId> {
        self.document_order().into_iter().find(|node| {
            let data = &self.nodes[node.0];
            data.has_class(panel_class) && data.attrs.get(attr).is_some_and(|v| v == value)
        })
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let data = &self.nodes[node.0];
        let left = data
            .style
            .get("left")
            .and_then(|v| parse_px(v))
            .map_or(data.rect.left, |left| left - self.scroll.x);
        let top = data
            .style
            .get("top")
            .and_then(|v| parse_px(v))
            .map_or(data.rect.top, |top| top - self.scroll.y);
        Rect::from_origin_size(left, top, data.rect.width(), data.rect.height())
    }

    fn set_inline_position(&mut self, node: &NodeId, left: Option<&str>, top: Option<&str>) {
        let data = &mut self.nodes[node.0];
        data.set_style("left", left);
        data.set_style("top", top);
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }
}
