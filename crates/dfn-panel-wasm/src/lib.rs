#![forbid(unsafe_code)]

//! Browser installer for definition panels.
//!
//! Exposes `installDfnPanels()` / `installDfnPanelsWithConfig(json)` to
//! JavaScript. Either call attaches one delegated click listener to
//! `document.body` that forwards every click to
//! [`dfn_panel::PanelController`] through a `web_sys`-backed
//! [`dfn_panel::PanelDom`]. Later calls are no-ops and return `false`.
//!
//! With the `autostart` feature the default installer runs when the module
//! is instantiated, matching a plain `<script>` include.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{WebDom, install_dfn_panels, install_dfn_panels_with_config};

// Host core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod host_core;
