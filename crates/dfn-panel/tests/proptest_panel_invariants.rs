//! Property-based invariant tests for panel placement and click dispatch.
//!
//! 1. A panel is placed either right of its term or, after one flip, left of it
//! 2. A flip only happens when the right side overflows and the left has room
//! 3. After a non-panel click at most one panel is open or pinned
//! 4. A click whose path crosses a link never opens a panel
//! 5. Pinned panels never carry an inline position

use dfn_panel::{
    ClickOutcome, ClickTarget, MemoryDocument, NodeId, PanelController, PanelDom, PanelSide,
    Rect, ScrollOffset, initial_placement, overflow_correction,
};
use proptest::prelude::*;

const GUTTER: f64 = 5.0;
const TERMS: usize = 4;

// ── Strategies ──────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u32..2000, 0u32..4000, 1u32..300, 1u32..60).prop_map(|(left, top, width, height)| {
        Rect::from_origin_size(
            f64::from(left),
            f64::from(top),
            f64::from(width),
            f64::from(height),
        )
    })
}

fn scroll_strategy() -> impl Strategy<Value = ScrollOffset> {
    (0u32..500, 0u32..5000).prop_map(|(x, y)| ScrollOffset::new(f64::from(x), f64::from(y)))
}

// ── Fixture ─────────────────────────────────────────────────────────────

struct Page {
    doc: MemoryDocument,
    /// Click targets: terms, links inside terms, panels, background.
    targets: Vec<NodeId>,
    panels: Vec<NodeId>,
}

fn page(scroll_width: f64, term_rects: &[Rect], panel_widths: &[u32]) -> Page {
    let mut doc = MemoryDocument::new(scroll_width);
    let body = doc.body();
    let para = doc.append_element(body, "P");
    let mut targets = vec![body, para];
    let mut panels = Vec::new();

    for (i, rect) in term_rects.iter().enumerate() {
        let term = doc.append_element(para, "DFN");
        doc.set_id(term, &format!("term-{i}"));
        doc.add_class(term, "dfn-paneled");
        doc.set_rect(term, *rect);
        let link = doc.append_element(term, "A");
        targets.push(term);
        targets.push(link);
    }

    for (i, width) in panel_widths.iter().enumerate() {
        let panel = doc.append_element(body, "ASIDE");
        doc.add_class(panel, "dfn-panel");
        doc.set_attr(panel, "data-for", &format!("term-{i}"));
        doc.set_rect(panel, Rect::from_origin_size(0.0, 0.0, f64::from(*width), 100.0));
        let item = doc.append_element(panel, "LI");
        targets.push(panel);
        targets.push(item);
        panels.push(panel);
    }

    Page {
        doc,
        targets,
        panels,
    }
}

fn lit_panels(page: &Page) -> usize {
    page.panels
        .iter()
        .filter(|&&panel| page.doc.has_class(panel, "on") || page.doc.has_class(panel, "activated"))
        .count()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn placement_is_right_or_flipped_left(
        term in rect_strategy(),
        panel_width in 1u32..600,
        scroll in scroll_strategy(),
        scroll_width in 100u32..3000,
    ) {
        let scroll_width = f64::from(scroll_width);
        let panel_width = f64::from(panel_width);
        let initial = initial_placement(term, scroll, GUTTER);
        prop_assert_eq!(initial.side, PanelSide::Right);
        prop_assert_eq!(initial.left, scroll.x + term.right + GUTTER);
        prop_assert_eq!(initial.top, scroll.y + term.top);

        let measured = Rect::from_origin_size(
            initial.left - scroll.x,
            initial.top - scroll.y,
            panel_width,
            50.0,
        );
        match overflow_correction(term, measured, scroll, scroll_width, GUTTER) {
            Some(flipped) => {
                prop_assert_eq!(flipped.side, PanelSide::Left);
                prop_assert!(measured.right > scroll_width);
                prop_assert!(flipped.left - scroll.x > 0.0);
                prop_assert_eq!(flipped.left + panel_width + GUTTER, scroll.x + term.left);
                prop_assert_eq!(flipped.top, initial.top);
            }
            None => {
                prop_assert!(
                    measured.right <= scroll_width
                        || term.left - (panel_width + GUTTER) <= 0.0
                );
            }
        }
    }

    #[test]
    fn click_sequences_keep_panel_state_consistent(
        term_rects in proptest::collection::vec(rect_strategy(), TERMS),
        panel_widths in proptest::collection::vec(1u32..400, 0..=TERMS),
        scroll_width in 100u32..3000,
        clicks in proptest::collection::vec(any::<prop::sample::Index>(), 1..40),
    ) {
        let mut page = page(f64::from(scroll_width), &term_rects, &panel_widths);
        let controller = PanelController::default();

        for click in clicks {
            let target = page.targets[click.index(page.targets.len())];
            let lit_before = lit_panels(&page);
            let report = controller.handle_click(&mut page.doc, &target);

            match report.classification.target {
                ClickTarget::Panel => {
                    prop_assert_eq!(report.closed, 0);
                    prop_assert!(lit_panels(&page) >= lit_before);
                }
                ClickTarget::Term | ClickTarget::Background => {
                    prop_assert_eq!(report.closed, lit_before);
                    prop_assert!(lit_panels(&page) <= 1);
                }
            }

            if report.classification.hit_link && report.classification.target == ClickTarget::Term {
                prop_assert_eq!(&report.outcome, &ClickOutcome::LinkFollowed);
                prop_assert_eq!(lit_panels(&page), 0);
            }

            if let ClickOutcome::Opened { term_id, .. } = &report.outcome {
                let panel = page
                    .doc
                    .find_panel_for("dfn-panel", "data-for", term_id)
                    .expect("opened panel exists");
                prop_assert!(page.doc.has_class(panel, "on"));
                prop_assert!(page.doc.inline_style(panel, "left").is_some());
            }

            for &panel in &page.panels {
                if page.doc.has_class(panel, "activated") {
                    prop_assert_eq!(page.doc.inline_style(panel, "left"), None);
                    prop_assert_eq!(page.doc.inline_style(panel, "top"), None);
                }
            }
        }
    }
}
