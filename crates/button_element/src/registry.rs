//! Process-local registry associating custom element names with element definitions.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use leptos::logging;
use thiserror::Error;

use crate::attributes::OBSERVED_ATTRIBUTES;
use crate::config::ElementConfig;
use crate::element::ButtonElement;

/// Names the HTML standard reserves and never accepts as custom element names.
const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Registration failures.
pub enum RegistryError {
    /// The host environment has no custom element support.
    #[error("custom elements are not supported in this environment")]
    Unsupported,
    /// The name is already bound to a definition.
    #[error("the name `{name}` has already been used with this registry")]
    AlreadyDefined {
        /// Name that collided.
        name: String,
    },
    /// The name is not a valid custom element name.
    #[error("`{name}` is not a valid custom element name")]
    InvalidName {
        /// Rejected name.
        name: String,
    },
}

impl RegistryError {
    /// Whether execution may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AlreadyDefined { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a registration that did not fail fatally.
pub enum Registration {
    /// The name was bound by this call.
    Defined,
    /// The name was bound earlier; the existing definition is kept.
    AlreadyDefined,
}

/// Constructor invoked for each element instance created from markup.
pub type ElementConstructor = Rc<dyn Fn() -> ButtonElement>;

#[derive(Clone)]
/// Behavior bound to a custom element name.
pub struct ElementDefinition {
    observed_attributes: &'static [&'static str],
    constructor: ElementConstructor,
}

impl fmt::Debug for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDefinition")
            .field("observed_attributes", &self.observed_attributes)
            .finish_non_exhaustive()
    }
}

impl ElementDefinition {
    /// Creates a definition with a custom constructor.
    pub fn new(
        observed_attributes: &'static [&'static str],
        constructor: impl Fn() -> ButtonElement + 'static,
    ) -> Self {
        Self {
            observed_attributes,
            constructor: Rc::new(constructor),
        }
    }

    /// Definition of the button element built from `config`.
    pub fn button(config: &ElementConfig) -> Self {
        let config = config.clone();
        Self::new(&OBSERVED_ATTRIBUTES, move || config.build())
    }

    /// Attribute names whose mutation notifies instances.
    pub fn observed_attributes(&self) -> &'static [&'static str] {
        self.observed_attributes
    }

    /// Constructs a fresh detached instance notified for the observed attributes.
    pub fn construct(&self) -> ButtonElement {
        (self.constructor)().with_observed_attributes(self.observed_attributes)
    }
}

/// Returns whether `name` is a valid custom element name.
///
/// Names start with a lowercase ASCII letter, contain at least one hyphen, and use
/// only lowercase letters, digits, `-`, `.` and `_`.
pub fn is_valid_element_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };
    if !first.is_ascii_lowercase() || !name.contains('-') {
        return false;
    }
    if RESERVED_NAMES.contains(&name) {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'.' | b'_'))
}

#[derive(Debug, Clone)]
/// Name-to-definition table. Each name can be bound once.
pub struct ElementRegistry {
    supported: bool,
    definitions: Rc<RefCell<BTreeMap<String, ElementDefinition>>>,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRegistry {
    /// Creates an empty registry for an environment with custom element support.
    pub fn new() -> Self {
        Self {
            supported: true,
            definitions: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    /// Creates a registry for an environment without custom element support.
    /// Every definition attempt fails with [`RegistryError::Unsupported`].
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Binds `name` to `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unsupported`] on unsupported environments,
    /// [`RegistryError::InvalidName`] for malformed names and
    /// [`RegistryError::AlreadyDefined`] when `name` is already bound.
    pub fn define(
        &self,
        name: &str,
        definition: ElementDefinition,
    ) -> Result<(), RegistryError> {
        if !self.supported {
            return Err(RegistryError::Unsupported);
        }
        if !is_valid_element_name(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }
        let mut definitions = self.definitions.borrow_mut();
        if definitions.contains_key(name) {
            return Err(RegistryError::AlreadyDefined {
                name: name.to_string(),
            });
        }
        definitions.insert(name.to_string(), definition);
        Ok(())
    }

    /// Returns whether `name` is bound.
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.borrow().contains_key(name)
    }

    /// Returns the definition bound to `name`.
    pub fn get(&self, name: &str) -> Option<ElementDefinition> {
        self.definitions.borrow().get(name).cloned()
    }

    /// Constructs a detached instance of the element bound to `name`.
    pub fn create(&self, name: &str) -> Option<ButtonElement> {
        self.get(name).map(|definition| definition.construct())
    }
}

thread_local! {
    static GLOBAL_REGISTRY: ElementRegistry = ElementRegistry::new();
}

/// Returns the process-local registry instance.
pub fn element_registry() -> ElementRegistry {
    GLOBAL_REGISTRY.with(|registry| registry.clone())
}

/// Registers the button element on `registry` under `config.name`.
///
/// A name collision is logged and reported as [`Registration::AlreadyDefined`].
///
/// # Errors
///
/// Propagates [`RegistryError::Unsupported`] and [`RegistryError::InvalidName`].
pub fn define_button(
    registry: &ElementRegistry,
    config: &ElementConfig,
) -> Result<Registration, RegistryError> {
    match registry.define(&config.name, ElementDefinition::button(config)) {
        Ok(()) => Ok(Registration::Defined),
        Err(err) if err.is_recoverable() => {
            logging::error!("button element registration skipped: {err}");
            Ok(Registration::AlreadyDefined)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::element::LifecycleState;
    use crate::markup::MarkupPolicy;

    #[test]
    fn element_names_follow_custom_element_rules() {
        for name in ["my-button", "ac-button", "x-1", "my-button.v2", "a_b-c"] {
            assert!(is_valid_element_name(name), "`{name}` should be valid");
        }
        for name in ["", "button", "My-button", "1-button", "-button", "my button", "font-face"] {
            assert!(!is_valid_element_name(name), "`{name}` should be invalid");
        }
    }

    #[test]
    fn second_definition_under_same_name_is_rejected() {
        let registry = ElementRegistry::new();
        let config = ElementConfig::default();
        registry
            .define("my-button", ElementDefinition::button(&config))
            .expect("first define");

        let err = registry
            .define("my-button", ElementDefinition::button(&config))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyDefined {
                name: "my-button".to_string()
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn define_button_recovers_from_duplicate() {
        let registry = ElementRegistry::new();
        let config = ElementConfig::default();

        assert_eq!(define_button(&registry, &config), Ok(Registration::Defined));
        assert_eq!(
            define_button(&registry, &config),
            Ok(Registration::AlreadyDefined)
        );
        assert!(registry.is_defined("my-button"));
    }

    #[test]
    fn define_button_propagates_fatal_errors() {
        let config = ElementConfig::default();
        assert_eq!(
            define_button(&ElementRegistry::unsupported(), &config),
            Err(RegistryError::Unsupported)
        );

        let bad = ElementConfig {
            name: "button".to_string(),
            ..ElementConfig::default()
        };
        let err = define_button(&ElementRegistry::new(), &bad).unwrap_err();
        assert!(!err.is_recoverable());
        assert_eq!(
            err,
            RegistryError::InvalidName {
                name: "button".to_string()
            }
        );
    }

    #[test]
    fn create_builds_detached_instances_from_definition() {
        let registry = ElementRegistry::new();
        assert!(registry.create("my-button").is_none());

        let config = ElementConfig {
            markup_policy: MarkupPolicy::Escaped,
            ..ElementConfig::default()
        };
        define_button(&registry, &config).expect("define");

        let element = registry.create("my-button").expect("instance");
        assert_eq!(element.state(), LifecycleState::Detached);
        assert_eq!(element.render_count(), 0);
        assert_eq!(element.policy(), MarkupPolicy::Escaped);
        assert_eq!(
            registry.get("my-button").expect("definition").observed_attributes(),
            &OBSERVED_ATTRIBUTES
        );
    }

    #[test]
    fn definition_observed_list_reaches_instances() {
        let registry = ElementRegistry::new();
        registry
            .define("text-button", ElementDefinition::new(&["text"], ButtonElement::new))
            .expect("define");

        let mut element = registry.create("text-button").expect("instance");
        assert_eq!(element.observed_attributes(), &["text"]);
        element.connected();
        element.set_look("primary");
        assert_eq!(element.render_count(), 1);
        element.set_text("Go");
        assert_eq!(element.render_count(), 2);
    }

    #[test]
    fn global_registry_is_shared_per_thread() {
        let name = "shared-button";
        define_button(
            &element_registry(),
            &ElementConfig {
                name: name.to_string(),
                ..ElementConfig::default()
            },
        )
        .expect("define");
        assert!(element_registry().is_defined(name));
    }
}
