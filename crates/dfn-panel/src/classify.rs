#![forbid(unsafe_code)]

//! Click classification by ancestor walk.

use crate::config::PanelConfig;
use crate::dom::PanelDom;

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside an element carrying the term class.
    Term,
    /// Inside an element carrying the panel class.
    Panel,
    /// Neither: page background or unrelated UI.
    Background,
}

impl ClickTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Term => "term",
            Self::Panel => "panel",
            Self::Background => "background",
        }
    }
}

/// Result of walking from the event target toward the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<N> {
    pub target: ClickTarget,
    /// The term or panel element that stopped the walk.
    pub node: Option<N>,
    /// A link element was visited before (or at) the stopping element.
    pub hit_link: bool,
}

/// Walk from `start` up through its ancestors.
///
/// Only nodes that still have a parent are inspected, so the document root
/// never classifies. The term class wins over the panel class on the same
/// node. Link detection covers every inspected node up to and including the
/// one that stopped the walk.
pub fn classify<D: PanelDom>(
    dom: &D,
    config: &PanelConfig,
    start: &D::Node,
) -> Classification<D::Node> {
    let mut hit_link = false;
    let mut current = start.clone();

    while let Some(parent) = dom.parent(&current) {
        if dom.has_tag(&current, &config.link_tag) {
            hit_link = true;
        }

        if dom.has_class(&current, &config.term_class) {
            return Classification {
                target: ClickTarget::Term,
                node: Some(current),
                hit_link,
            };
        }

        if dom.has_class(&current, &config.panel_class) {
            return Classification {
                target: ClickTarget::Panel,
                node: Some(current),
                hit_link,
            };
        }

        current = parent;
    }

    Classification {
        target: ClickTarget::Background,
        node: None,
        hit_link,
    }
}
