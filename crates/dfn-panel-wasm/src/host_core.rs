#![forbid(unsafe_code)]

//! Host-side policy shared by the browser binding and native tests.
//!
//! [`PanelHost`] owns the controller and turns each dispatched click into the
//! console lines the page should see. [`InstallGuard`] keeps the delegated
//! listener to a single registration per page.

use dfn_panel::{ClickOutcome, PanelConfig, PanelConfigError, PanelController, PanelDom};

/// Result of one click as seen by the embedding page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HostDispatch {
    /// Read by native tests; the page only needs the console lines.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub(crate) outcome: ClickOutcome,
    /// Lines to print with `console.log`.
    pub(crate) console: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PanelHost {
    controller: PanelController,
}

impl PanelHost {
    pub(crate) fn new(config: PanelConfig) -> Result<Self, PanelConfigError> {
        Ok(Self {
            controller: PanelController::new(config.validated()?),
        })
    }

    /// Build from a JSON [`PanelConfig`]; absent keys keep their defaults.
    pub(crate) fn from_json(json: &str) -> Result<Self, PanelConfigError> {
        Self::new(PanelConfig::from_json_str(json)?)
    }

    pub(crate) fn config(&self) -> &PanelConfig {
        self.controller.config()
    }

    pub(crate) fn dispatch<D: PanelDom>(&self, dom: &mut D, target: &D::Node) -> HostDispatch {
        let report = self.controller.handle_click(dom, target);
        let console = report
            .outcome
            .diagnostic(self.config())
            .into_iter()
            .collect();
        HostDispatch {
            outcome: report.outcome,
            console,
        }
    }
}

/// One-shot registration flag for the page-wide listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct InstallGuard {
    installed: bool,
}

impl InstallGuard {
    pub(crate) const fn new() -> Self {
        Self { installed: false }
    }

    pub(crate) const fn is_installed(self) -> bool {
        self.installed
    }

    /// Record a successful registration.
    pub(crate) fn mark_installed(&mut self) {
        self.installed = true;
    }
}
