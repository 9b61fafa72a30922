//! Leptos host for [`ButtonElement`].

use std::{cell::RefCell, rc::Rc};

use leptos::ev::MouseEvent;
use leptos::*;

use crate::attributes::AttributeName;
use crate::config::ElementConfig;
use crate::element::ButtonElement;

/// Mirrors one prop value into the element. Empty values remove the attribute.
fn sync_attribute(element: &mut ButtonElement, name: AttributeName, value: &str) {
    let token = name.token();
    if value.is_empty() {
        element.remove_attribute(token);
    } else if element.get_attribute(token) != Some(value) {
        element.set_attribute(token, value);
    }
}

#[component]
/// Button element mounted in a Leptos view.
///
/// The element attaches while the view is built, before the host `<div>` is in the
/// document; its first markup is the host's initial `inner_html`. Each prop change
/// is written through as an attribute and cleanup detaches it. An empty prop is an
/// absent attribute, so `text=""` and `is_loading=""` render like unset props.
/// `on_click` runs once per click that reached the element's listener.
pub fn MyButton(
    #[prop(optional, into)] look: MaybeSignal<String>,
    #[prop(optional, into)] text: MaybeSignal<String>,
    #[prop(optional, into)] size: MaybeSignal<String>,
    #[prop(optional, into)] icon: MaybeSignal<String>,
    #[prop(optional, into)] is_loading: MaybeSignal<String>,
    #[prop(optional, into)] tag: MaybeSignal<String>,
    #[prop(optional)] config: Option<ElementConfig>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let element = Rc::new(RefCell::new(config.build()));
    let bindings = [
        (AttributeName::Look, look),
        (AttributeName::Text, text),
        (AttributeName::Size, size),
        (AttributeName::Icon, icon),
        (AttributeName::IsLoading, is_loading),
        (AttributeName::Tag, tag),
    ];

    let markup = {
        let mut element = element.borrow_mut();
        for (name, value) in &bindings {
            sync_attribute(&mut element, *name, &value.get_untracked());
        }
        element.connected();
        create_rw_signal(element.inner_html().to_string())
    };

    for (name, value) in bindings {
        let element = Rc::clone(&element);
        create_effect(move |_| {
            let value = value.get();
            let mut element = element.borrow_mut();
            let before = element.render_count();
            sync_attribute(&mut element, name, &value);
            if element.render_count() != before {
                markup.set(element.inner_html().to_string());
            }
        });
    }

    on_cleanup({
        let element = Rc::clone(&element);
        move || element.borrow_mut().disconnected()
    });

    let on_host_click = move |ev: MouseEvent| {
        let delivered = element.borrow_mut().dispatch_click();
        if delivered == 0 {
            return;
        }
        if let Some(on_click) = on_click.as_ref() {
            on_click.call(ev);
        }
    };

    view! {
        <div
            class="my-button-host"
            data-ui-element=config.name
            inner_html=move || markup.get()
            on:click=on_host_click
        />
    }
}
