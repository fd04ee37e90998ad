#![forbid(unsafe_code)]

//! `dfn-panel` implements the click behavior of definition panels.
//!
//! A document marks definition terms with `dfn-paneled` and ships one
//! `aside.dfn-panel[data-for=<term id>]` per term. One delegated click
//! listener then:
//! - opens a term's panel next to the term (`on`),
//! - pins a panel the user clicked inside (`activated`), and
//! - closes every open or pinned panel on any other click.
//!
//! Design goals:
//! - **Host-agnostic**: the document is reached through [`PanelDom`], so the
//!   same controller drives `web_sys` in the browser and [`MemoryDocument`]
//!   in native tests.
//! - **Deterministic**: placement is pure arithmetic over bounding rects and
//!   scroll offsets supplied by the host.
//! - **Side-effect only**: the single failure mode (a term without a panel)
//!   is reported in [`ClickOutcome`] and logged, never raised.

pub mod classify;
pub mod config;
pub mod controller;
pub mod dom;
pub mod geometry;
pub mod memory;
pub mod placement;

pub use classify::{Classification, ClickTarget, classify};
pub use config::{PanelConfig, PanelConfigError};
pub use controller::{ClickOutcome, ClickReport, PanelController};
pub use dom::PanelDom;
pub use geometry::{Rect, ScrollOffset};
pub use memory::{MemoryDocument, NodeId};
pub use placement::{PanelSide, Placement, css_px, initial_placement, overflow_correction};
