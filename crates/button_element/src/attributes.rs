//! Attribute bag and the fixed set of attributes the button element observes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute tokens whose mutation triggers a render pass.
pub const OBSERVED_ATTRIBUTES: [&str; 6] = ["look", "text", "size", "icon", "is-loading", "tag"];

/// Only literal `is-loading` value that selects the spinner branch.
pub const LOADING_TOKEN: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Observed button attributes.
pub enum AttributeName {
    /// Visual theme selector.
    Look,
    /// Label shown while not loading.
    Text,
    /// Height/padding modifier.
    Size,
    /// Reserved icon source; not rendered.
    Icon,
    /// String-typed loading flag.
    IsLoading,
    /// Reserved host tag override; not rendered.
    Tag,
}

impl AttributeName {
    /// All observed attributes in declaration order.
    pub const ALL: [AttributeName; 6] = [
        Self::Look,
        Self::Text,
        Self::Size,
        Self::Icon,
        Self::IsLoading,
        Self::Tag,
    ];

    /// Returns the markup attribute name.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Text => "text",
            Self::Size => "size",
            Self::Icon => "icon",
            Self::IsLoading => "is-loading",
            Self::Tag => "tag",
        }
    }

    /// Resolves a markup attribute name, or `None` when the name is not observed.
    pub fn from_token(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.token() == raw)
    }
}

impl std::fmt::Display for AttributeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Returns whether mutations of `name` should re-render the element.
pub fn is_observed(name: &str) -> bool {
    AttributeName::from_token(name).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Themes that have rules in the element style block.
pub enum Look {
    /// Emphasized gradient theme.
    Primary,
    /// Grey secondary theme.
    Secondary,
    /// Neutral theme.
    Neutral,
}

impl Look {
    /// Returns the attribute value for this theme.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Neutral => "neutral",
        }
    }
}

impl From<Look> for String {
    fn from(look: Look) -> Self {
        look.token().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Size modifiers that have rules in the element style block.
pub enum Size {
    /// Compact height with tight side padding.
    Tiny,
    /// Reduced height and icon size.
    Small,
    /// Tall button.
    Large,
    /// Stretches to the container width.
    FullWidth,
}

impl Size {
    /// Returns the attribute value for this size.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Large => "large",
            Self::FullWidth => "full-width",
        }
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.token().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// String key/value attributes held by one element instance.
///
/// The bag accepts any name; only [`OBSERVED_ATTRIBUTES`] drive rendering. Values are
/// stored verbatim with no validation.
pub struct AttributeBag {
    values: BTreeMap<String, String>,
}

impl AttributeBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an attribute by markup name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Writes an attribute and returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Removes an attribute and returns the value it held.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Returns whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of attributes present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no attribute is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn observed(&self, name: AttributeName) -> Option<&str> {
        self.get(name.token())
    }

    /// Current `look` value.
    pub fn look(&self) -> Option<&str> {
        self.observed(AttributeName::Look)
    }

    /// Current `text` value.
    pub fn text(&self) -> Option<&str> {
        self.observed(AttributeName::Text)
    }

    /// Current `size` value.
    pub fn size(&self) -> Option<&str> {
        self.observed(AttributeName::Size)
    }

    /// Current `icon` value.
    pub fn icon(&self) -> Option<&str> {
        self.observed(AttributeName::Icon)
    }

    /// Current raw `is-loading` value.
    pub fn is_loading(&self) -> Option<&str> {
        self.observed(AttributeName::IsLoading)
    }

    /// Current `tag` value.
    pub fn tag(&self) -> Option<&str> {
        self.observed(AttributeName::Tag)
    }

    /// Whether the spinner branch is selected. Only the exact literal `"true"` counts.
    pub fn loading(&self) -> bool {
        self.is_loading() == Some(LOADING_TOKEN)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
