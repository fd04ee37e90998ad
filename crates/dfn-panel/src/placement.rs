#![forbid(unsafe_code)]

//! Panel placement next to its term.
//!
//! A panel opens to the right of its term, top-aligned, separated by a
//! gutter. After the panel has been moved there and re-measured, a single
//! correction may flip it to the left of the term when it overflows the
//! document's scrollable width and the left side has room.
//!
//! Only one flip is attempted. A panel that would overflow on both sides
//! stays on the right.

use crate::geometry::{Rect, ScrollOffset};

/// Which side of the term the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Right,
    Left,
}

impl PanelSide {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

/// Absolute document position for a panel, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub side: PanelSide,
}

impl Placement {
    /// Inline `left` value, e.g. `"255px"`.
    #[must_use]
    pub fn left_css(&self) -> String {
        css_px(self.left)
    }

    /// Inline `top` value, e.g. `"100px"`.
    #[must_use]
    pub fn top_css(&self) -> String {
        css_px(self.top)
    }
}

/// Place the panel just right of `term`, offset by the current scroll.
#[must_use]
pub fn initial_placement(term: Rect, scroll: ScrollOffset, gutter: f64) -> Placement {
    Placement {
        left: scroll.x + term.right + gutter,
        top: scroll.y + term.top,
        side: PanelSide::Right,
    }
}

/// Decide whether a panel measured at `panel` must flip to the left of `term`.
///
/// `panel` is the viewport rect after [`initial_placement`] was applied. The
/// flip happens when its right edge exceeds `scroll_width` and the left-side
/// position (`term.left - (width + gutter)`) is strictly positive. The
/// returned placement keeps the top edge of the initial placement.
#[must_use]
pub fn overflow_correction(
    term: Rect,
    panel: Rect,
    scroll: ScrollOffset,
    scroll_width: f64,
    gutter: f64,
) -> Option<Placement> {
    let panel_width = panel.width();
    let left_of_term = term.left - (panel_width + gutter);
    if panel.right > scroll_width && left_of_term > 0.0 {
        Some(Placement {
            left: scroll.x + left_of_term,
            top: scroll.y + term.top,
            side: PanelSide::Left,
        })
    } else {
        None
    }
}

/// Format a CSS pixel length the way a JS number concatenates into a string.
///
/// Integral values print without a fraction (`255px`), fractional values keep
/// their shortest round-trip digits (`45.5px`), and negative zero prints as
/// `0px`. Magnitudes of at least `1e21` or below `1e-6` switch to exponent
/// form (`1e+21px`, `1e-7px`), and non-finite values print as `NaN` or
/// `Infinity`.
#[must_use]
pub fn css_px(value: f64) -> String {
    format!("{}px", js_number(value))
}

fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    // Shortest digits in exponent form; JS always signs the exponent.
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}
