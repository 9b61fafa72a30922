//! Host-supplied configuration for the button element.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::ButtonElement;
use crate::markup::MarkupPolicy;

/// Name the element is registered under when the host supplies none.
pub const DEFAULT_ELEMENT_NAME: &str = "my-button";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
/// Registration name and render options for button instances.
pub struct ElementConfig {
    /// Hyphenated custom element name.
    pub name: String,
    /// Interpolation policy for attribute values.
    pub markup_policy: MarkupPolicy,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ELEMENT_NAME.to_string(),
            markup_policy: MarkupPolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
/// Configuration load failures.
pub enum ConfigError {
    /// The payload is not a valid config document.
    #[error("invalid element config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ElementConfig {
    /// Parses a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Constructs a detached element using these options.
    pub fn build(&self) -> ButtonElement {
        ButtonElement::new().with_policy(self.markup_policy)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ElementConfig::from_json("{}").expect("config");
        assert_eq!(config, ElementConfig::default());
        assert_eq!(config.name, "my-button");
        assert_eq!(config.markup_policy, MarkupPolicy::Raw);
    }

    #[test]
    fn kebab_case_fields_are_read() {
        let config =
            ElementConfig::from_json(r#"{ "name": "ac-button", "markup-policy": "escaped" }"#)
                .expect("config");
        assert_eq!(config.name, "ac-button");
        assert_eq!(config.build().policy(), MarkupPolicy::Escaped);
    }

    #[test]
    fn malformed_document_is_reported() {
        let err = ElementConfig::from_json(r#"{ "markup-policy": "loud" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid element config"));
    }
}
