#![forbid(unsafe_code)]

//! Markup contract and placement tuning for definition panels.
//!
//! [`PanelConfig::default()`] is the contract emitted by the document
//! generator: terms tagged `dfn-paneled`, panels tagged `dfn-panel` and
//! linked through `data-for`, state classes `on` and `activated`, and a 5px
//! gutter between a term and its panel.
//!
//! With the `panel-config` feature the same struct loads from TOML or JSON.
//! Missing keys fall back to the defaults.
//!
//! ```toml
//! term_class = "glossary-term"
//! gutter_px = 8.0
//! ```

#[cfg(feature = "panel-config")]
use std::path::Path;

#[cfg(feature = "panel-config")]
use serde::{Deserialize, Serialize};

/// Class names, attribute names and placement constants used by the
/// controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "panel-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "panel-config", serde(default))]
pub struct PanelConfig {
    /// Class marking a term that owns a panel.
    pub term_class: String,
    /// Class marking a panel.
    pub panel_class: String,
    /// State class: panel visible and positioned near its term.
    pub open_class: String,
    /// State class: panel pinned by a click inside it.
    pub pinned_class: String,
    /// Panel attribute holding the id of its term.
    pub panel_for_attr: String,
    /// Tag name whose presence on the click path suppresses opening.
    pub link_tag: String,
    /// Horizontal gap between the term and its panel, in CSS pixels.
    pub gutter_px: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            term_class: "dfn-paneled".into(),
            panel_class: "dfn-panel".into(),
            open_class: "on".into(),
            pinned_class: "activated".into(),
            panel_for_attr: "data-for".into(),
            link_tag: "A".into(),
            gutter_px: 5.0,
        }
    }
}

impl PanelConfig {
    /// Load from a TOML string.
    #[cfg(feature = "panel-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PanelConfigError> {
        toml::from_str(s).map_err(PanelConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "panel-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PanelConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PanelConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "panel-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PanelConfigError> {
        serde_json::from_str(s).map_err(PanelConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "panel-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PanelConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PanelConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check that class names are usable and distinct and the gutter is a
    /// finite, non-negative length.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let classes = [
            ("term_class", &self.term_class),
            ("panel_class", &self.panel_class),
            ("open_class", &self.open_class),
            ("pinned_class", &self.pinned_class),
        ];
        for (field, value) in classes {
            if value.is_empty() {
                errors.push(format!("{field} must not be empty"));
            } else if !is_css_identifier(value) {
                errors.push(format!("{field} must be a CSS identifier, got {value:?}"));
            }
        }

        if self.panel_for_attr.is_empty() {
            errors.push("panel_for_attr must not be empty".into());
        } else if !is_attribute_name(&self.panel_for_attr) {
            errors.push(format!(
                "panel_for_attr must be an attribute name, got {:?}",
                self.panel_for_attr
            ));
        }

        if self.link_tag.is_empty() {
            errors.push("link_tag must not be empty".into());
        } else if !is_tag_name(&self.link_tag) {
            errors.push(format!("link_tag must be a tag name, got {:?}", self.link_tag));
        }

        for (i, (field_a, a)) in classes.iter().enumerate() {
            for (field_b, b) in &classes[i + 1..] {
                if !a.is_empty() && a == b {
                    errors.push(format!("{field_a} and {field_b} must differ, both are {a:?}"));
                }
            }
        }

        if !self.gutter_px.is_finite() || self.gutter_px < 0.0 {
            errors.push(format!("gutter_px must be finite and >= 0, got {}", self.gutter_px));
        }

        errors
    }

    /// Consume the config, returning it only if [`Self::validate`] is clean.
    pub fn validated(self) -> Result<Self, PanelConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PanelConfigError::Validation(errors))
        }
    }
}

/// CSS `<ident-token>` without escapes: `-?` followed by a name-start
/// character (or a second `-`), then name characters. Non-ASCII counts as a
/// name character.
fn is_css_identifier(value: &str) -> bool {
    let rest = value.strip_prefix('-').unwrap_or(value);
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts = first == '-' || first == '_' || first.is_ascii_alphabetic() || !first.is_ascii();
    starts && chars.all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii())
}

fn is_attribute_name(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| matches!(c, '-' | '_' | '.' | ':') || c.is_ascii_alphanumeric())
}

fn is_tag_name(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c == '-' || c.is_ascii_alphanumeric())
}

/// Errors that can occur when loading a panel configuration.
#[derive(Debug)]
pub enum PanelConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "panel-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "panel-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PanelConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "panel-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "panel-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PanelConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "panel-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "panel-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
