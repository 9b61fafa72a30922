//! Attribute-driven button element.
//!
//! A [`ButtonElement`] keeps its rendered markup synchronized with a small attribute
//! bag (`look`, `text`, `size`, `icon`, `is-loading`, `tag`): it renders on attach,
//! re-renders in full on every observed attribute write, and releases its click
//! listener on detach. Hosts bind the element to a name through the
//! [`ElementRegistry`] and may mount it in a Leptos view with [`MyButton`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod attributes;
mod component;
mod config;
mod element;
mod markup;
mod registry;

pub use attributes::{
    is_observed, AttributeBag, AttributeName, Look, Size, LOADING_TOKEN, OBSERVED_ATTRIBUTES,
};
pub use component::MyButton;
pub use config::{ConfigError, ElementConfig, DEFAULT_ELEMENT_NAME};
pub use element::{ButtonElement, ClickEvent, ClickHandler, LifecycleState};
pub use markup::{
    build_style, class_list, render, render_content, MarkupPolicy, BASE_CLASS, LOADING_ICON,
    STYLE_BLOCK, TEXT_CLASS,
};
pub use registry::{
    define_button, element_registry, is_valid_element_name, ElementConstructor,
    ElementDefinition, ElementRegistry, Registration, RegistryError,
};

/// Convenience imports for host crates.
pub mod prelude {
    pub use crate::{
        define_button, element_registry, AttributeBag, AttributeName, ButtonElement,
        ElementConfig, ElementRegistry, LifecycleState, Look, MarkupPolicy, MyButton,
        Registration, RegistryError, Size,
    };
}
