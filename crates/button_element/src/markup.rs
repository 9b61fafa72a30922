//! Render engine: builds the element's displayed markup from its attribute bag.
//!
//! Every function here is a pure function of the bag. Output is deterministic so two
//! passes over the same attributes produce byte-identical markup.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeBag;

/// Base class carried by the rendered control.
pub const BASE_CLASS: &str = "my-button";

/// Class list of the text container.
pub const TEXT_CLASS: &str = "my-button__text text-action";

/// Style rules injected ahead of the control. Custom property values are supplied by
/// the host page.
pub const STYLE_BLOCK: &str = r#"<style>
/* defaults */
:root {
  --button-height: var(--base-space-4);
  --button-border-color: var(--neutral-200A);
  --button-border: inset 0px 0px 0px 1px var(--button-border-color);
  --button-box-shadow-active: inset 0 1px 3px 0 rgba(0, 0, 0, 0.32);
  --button-border-radius: var(--border-radius-double);
  --button-side-padding: var(--base-space-2);
  --button-icon-size: 14px;
}
.my-button {
  display: flex;
  align-items: center;
  justify-content: center;
  height: var(--button-height);
  padding-left: var(--button-side-padding);
  padding-right: var(--button-side-padding);
  color: inherit;
  text-decoration: none;
  border-radius: var(--button-border-radius);
  transition: var(--transition);
  will-change: background-color;
  cursor: pointer;
}
.my-button__icon {
  width: var(--button-icon-size);
  height: var(--button-icon-size);
}
.my-button__text {
  color: inherit;
  text-decoration: none;
}
.my-button__text:empty {
  display: none;
}
.is-rotating {
  animation: my-button-rotate 1s linear infinite;
}
@keyframes my-button-rotate {
  to { transform: rotate(360deg); }
}
/* themes */
.my-button--primary {
  background-image: var(--gradient-purple);
  box-shadow: var(--button-border);
  color: var(--white);
}
.my-button--primary:hover {
  background-image: linear-gradient(to bottom, var(--color-app), var(--purple-800));
}
.my-button--primary svg {
  fill: currentColor;
}
.my-button--secondary {
  color: var(--neutral-900A);
  background-image: var(--gradient-grey);
  box-shadow: inset 0px 0px 0px 1px var(--neutral-200A);
}
.my-button--secondary svg {
  fill: var(--neutral-700A);
}
.my-button--secondary:hover {
  box-shadow: inset 0px 0px 0px 1px var(--neutral-300A);
  background-image: linear-gradient(to bottom, var(--neutral-050), var(--neutral-400));
}
/* sizes */
.my-button--tiny {
  --button-height: var(--base-space-3);
  --button-side-padding: calc(var(--base-space-1) + (var(--base-space-1) / 2));
}
.my-button--small {
  --button-icon-size: 12px;
  --button-height: calc(var(--base-space-3) + (var(--base-space-1) / 2));
}
.my-button--large {
  --button-height: var(--base-space-6);
}
.my-button--full-width {
  justify-content: center;
  width: 100%;
}
</style>"#;

/// Rotating spinner shown while the element is loading.
pub const LOADING_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16" class="my-button__icon is-rotating"><path d="M8 16c-2.137 0-4.146-.832-5.657-2.343s-2.343-3.52-2.343-5.657c0-1.513.425-2.986 1.228-4.261.781-1.239 1.885-2.24 3.193-2.895l.672 1.341c-1.063.533-1.961 1.347-2.596 2.354-.652 1.034-.997 2.231-.997 3.461 0 3.584 2.916 6.5 6.5 6.5s6.5-2.916 6.5-6.5c0-1.23-.345-2.426-.997-3.461-.635-1.008-1.533-1.822-2.596-2.354l.672-1.341c1.308.655 2.412 1.656 3.193 2.895.803 1.274 1.228 2.748 1.228 4.261 0 2.137-.832 4.146-2.343 5.657s-3.52 2.343-5.657 2.343z"/></svg>"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How attribute values are interpolated into generated markup.
pub enum MarkupPolicy {
    /// Values are inserted verbatim. Callers must supply markup-safe values.
    #[default]
    Raw,
    /// Text is HTML-escaped and class modifiers are attribute-escaped.
    Escaped,
}

impl MarkupPolicy {
    fn text<'a>(self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Self::Raw => Cow::Borrowed(raw),
            Self::Escaped => html_escape::encode_text(raw),
        }
    }

    fn attribute<'a>(self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Self::Raw => Cow::Borrowed(raw),
            Self::Escaped => html_escape::encode_double_quoted_attribute(raw),
        }
    }
}

/// Returns the element style block.
pub fn build_style() -> &'static str {
    STYLE_BLOCK
}

/// Composes the control class list from `look` and `size`.
///
/// Values are not checked against the known themes; an unknown value yields a
/// modifier class with no matching rule. Missing or empty values add no modifier.
pub fn class_list(attributes: &AttributeBag, policy: MarkupPolicy) -> String {
    let mut class = BASE_CLASS.to_string();
    for modifier in [attributes.look(), attributes.size()]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
    {
        class.push(' ');
        class.push_str(BASE_CLASS);
        class.push_str("--");
        class.push_str(&policy.attribute(modifier));
    }
    class
}

/// Renders the control content: the spinner while loading, the text container otherwise.
pub fn render_content(attributes: &AttributeBag, policy: MarkupPolicy) -> String {
    if attributes.loading() {
        return LOADING_ICON.to_string();
    }
    let text = attributes.text().unwrap_or_default();
    format!(r#"<span class="{TEXT_CLASS}">{}</span>"#, policy.text(text))
}

/// Runs one full render pass.
pub fn render(attributes: &AttributeBag, policy: MarkupPolicy) -> String {
    format!(
        r#"{}<button type="button" class="{}">{}</button>"#,
        build_style(),
        class_list(attributes, policy),
        render_content(attributes, policy)
    )
}
