#![forbid(unsafe_code)]

//! Click controller for definition panels.
//!
//! One call to [`PanelController::handle_click`] per click event on the
//! document body:
//!
//! 1. classify the event target ([`crate::classify`]);
//! 2. unless the click landed inside a panel, close every panel that is open
//!    or pinned;
//! 3. open the clicked term's panel (unless a link was on the click path), or
//!    pin the clicked panel.
//!
//! A term whose panel cannot be found is reported as
//! [`ClickOutcome::PanelMissing`] and logged at `warn`; nothing else fails.

use crate::classify::{Classification, ClickTarget, classify};
use crate::config::PanelConfig;
use crate::dom::PanelDom;
use crate::placement::{Placement, initial_placement, overflow_correction};

/// What a click did after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The term's panel was opened at `placement`.
    Opened {
        term_id: String,
        placement: Placement,
    },
    /// The clicked panel was pinned.
    Pinned,
    /// The term has no panel with a matching `data-for`.
    PanelMissing { term_id: String },
    /// A link on the click path suppressed opening the term's panel.
    LinkFollowed,
    /// Background click: only the dismissal step ran.
    Dismissed,
}

impl ClickOutcome {
    /// Console line the host should print, if any.
    #[must_use]
    pub fn diagnostic(&self, config: &PanelConfig) -> Option<String> {
        match self {
            Self::PanelMissing { term_id } => Some(format!(
                "Couldn't find .{}[{}='{term_id}']",
                config.panel_class, config.panel_for_attr
            )),
            _ => None,
        }
    }
}

/// Full record of one dispatched click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickReport<N> {
    pub classification: Classification<N>,
    /// Panels that lost their open/pinned state during dismissal.
    pub closed: usize,
    pub outcome: ClickOutcome,
}

/// Applies the open / pin / dismiss rules to a [`PanelDom`].
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    config: PanelConfig,
}

impl PanelController {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Dispatch one click whose event target is `target`.
    pub fn handle_click<D: PanelDom>(&self, dom: &mut D, target: &D::Node) -> ClickReport<D::Node> {
        let classification = classify(dom, &self.config, target);
        let span = tracing::debug_span!(
            "dfn_panel.click",
            click = classification.target.as_str(),
            hit_link = classification.hit_link,
            closed = tracing::field::Empty
        );
        let _guard = span.enter();

        let closed = if classification.target == ClickTarget::Panel {
            0
        } else {
            self.dismiss_all(dom)
        };
        span.record("closed", closed);

        let outcome = match (&classification.target, &classification.node) {
            (ClickTarget::Term, Some(_)) if classification.hit_link => ClickOutcome::LinkFollowed,
            (ClickTarget::Term, Some(term)) => self.open_for(dom, term),
            (ClickTarget::Panel, Some(panel)) => {
                self.pin(dom, panel);
                ClickOutcome::Pinned
            }
            _ => ClickOutcome::Dismissed,
        };

        ClickReport {
            classification,
            closed,
            outcome,
        }
    }

    /// Remove the open and pinned classes from every panel carrying either.
    ///
    /// Returns how many panels were affected.
    pub fn dismiss_all<D: PanelDom>(&self, dom: &mut D) -> usize {
        let config = &self.config;
        let panels = dom.panels_with_any_class(
            &config.panel_class,
            &[config.open_class.as_str(), config.pinned_class.as_str()],
        );
        for panel in &panels {
            dom.remove_class(panel, &config.open_class);
            dom.remove_class(panel, &config.pinned_class);
        }
        panels.len()
    }

    /// Open the panel belonging to `term` and position it beside the term.
    pub fn open_for<D: PanelDom>(&self, dom: &mut D, term: &D::Node) -> ClickOutcome {
        let config = &self.config;
        let term_id = dom.id(term);
        let Some(panel) = dom.find_panel_for(&config.panel_class, &config.panel_for_attr, &term_id)
        else {
            tracing::warn!(term_id = %term_id, "no panel for term");
            return ClickOutcome::PanelMissing { term_id };
        };

        dom.add_class(&panel, &config.open_class);

        let term_rect = dom.bounding_rect(term);
        let scroll = dom.scroll_offset();
        let mut placement = initial_placement(term_rect, scroll, config.gutter_px);
        apply_placement(dom, &panel, &placement);

        let panel_rect = dom.bounding_rect(&panel);
        if let Some(flipped) = overflow_correction(
            term_rect,
            panel_rect,
            scroll,
            dom.scroll_width(),
            config.gutter_px,
        ) {
            // Same top edge; only `left` changes.
            apply_placement(dom, &panel, &flipped);
            placement = flipped;
        }

        tracing::debug!(
            term_id = %term_id,
            side = placement.side.as_str(),
            left = placement.left,
            top = placement.top,
            "panel opened"
        );
        ClickOutcome::Opened { term_id, placement }
    }

    /// Pin `panel` and hand its position back to the stylesheet.
    pub fn pin<D: PanelDom>(&self, dom: &mut D, panel: &D::Node) {
        dom.add_class(panel, &self.config.pinned_class);
        dom.set_inline_position(panel, None, None);
        tracing::debug!("panel pinned");
    }
}

fn apply_placement<D: PanelDom>(dom: &mut D, panel: &D::Node, placement: &Placement) {
    let left = placement.left_css();
    let top = placement.top_css();
    dom.set_inline_position(panel, Some(&left), Some(&top));
}
