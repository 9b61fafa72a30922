//! Button element instance and its attach/detach/attribute-change lifecycle.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use leptos::logging;

use crate::attributes::{AttributeBag, AttributeName, LOADING_TOKEN, OBSERVED_ATTRIBUTES};
use crate::markup::{self, MarkupPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Observable lifecycle states of a button element.
pub enum LifecycleState {
    /// Constructed and never inserted into a document.
    Detached,
    /// Inserted into a live document; renders on every observed change.
    Attached,
    /// Removed from the document; the click listener has been released.
    Disposed,
}

impl LifecycleState {
    pub(crate) const fn token(self) -> &'static str {
        match self {
            Self::Detached => "detached",
            Self::Attached => "attached",
            Self::Disposed => "disposed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Click delivered to a listener on the rendered control.
pub struct ClickEvent {
    /// Ordinal of the click on this element, starting at 1.
    pub sequence: u64,
}

/// Side effect invoked for each click while the element is attached.
pub type ClickHandler = Rc<dyn Fn(&ClickEvent)>;

type ListenerEntries = RefCell<Vec<(u64, ClickHandler)>>;

#[derive(Default)]
struct ListenerSet {
    entries: Rc<ListenerEntries>,
    next_id: Cell<u64>,
}

impl ListenerSet {
    fn add(&self, handler: ClickHandler) -> ListenerGuard {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, handler));
        ListenerGuard {
            id,
            entries: Rc::downgrade(&self.entries),
        }
    }

    fn dispatch(&self, event: &ClickEvent) -> usize {
        // Handlers run outside the borrow so one may touch the set.
        let handlers: Vec<ClickHandler> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Registration of one click listener. Dropping the guard unregisters it.
struct ListenerGuard {
    id: u64,
    entries: Weak<ListenerEntries>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

fn diagnostic_click(_: &ClickEvent) {
    logging::log!("click");
}

/// A button element whose rendered markup tracks its attribute bag.
///
/// Construction does not render. [`ButtonElement::connected`] renders once and
/// registers the click listener, every observed attribute write re-renders in full,
/// and [`ButtonElement::disconnected`] releases the listener.
pub struct ButtonElement {
    attributes: AttributeBag,
    observed: &'static [&'static str],
    state: LifecycleState,
    policy: MarkupPolicy,
    inner_html: String,
    render_count: u64,
    clicks: u64,
    on_click: ClickHandler,
    listeners: ListenerSet,
    click_listener: Option<ListenerGuard>,
}

impl Default for ButtonElement {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ButtonElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonElement")
            .field("attributes", &self.attributes)
            .field("observed", &self.observed)
            .field("state", &self.state)
            .field("policy", &self.policy)
            .field("render_count", &self.render_count)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ButtonElement {
    /// Creates a detached element with no attributes and the diagnostic click handler.
    pub fn new() -> Self {
        Self {
            attributes: AttributeBag::new(),
            observed: &OBSERVED_ATTRIBUTES,
            state: LifecycleState::Detached,
            policy: MarkupPolicy::default(),
            inner_html: String::new(),
            render_count: 0,
            clicks: 0,
            on_click: Rc::new(diagnostic_click),
            listeners: ListenerSet::default(),
            click_listener: None,
        }
    }

    /// Creates a detached element holding `attributes`, as parsed from markup.
    pub fn with_attributes(attributes: AttributeBag) -> Self {
        Self {
            attributes,
            ..Self::new()
        }
    }

    /// Replaces the interpolation policy used by later render passes.
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the attribute names whose writes notify the element.
    pub fn with_observed_attributes(mut self, observed: &'static [&'static str]) -> Self {
        self.observed = observed;
        self
    }

    /// Replaces the click side effect. Takes effect on the next attach.
    pub fn with_click_handler(mut self, handler: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_click = Rc::new(handler);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Attribute names whose writes notify the element.
    pub fn observed_attributes(&self) -> &'static [&'static str] {
        self.observed
    }

    /// Interpolation policy.
    pub fn policy(&self) -> MarkupPolicy {
        self.policy
    }

    /// Attribute bag backing the element.
    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Markup produced by the last render pass; empty before the first attach.
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Number of render passes run so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Number of click listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Insertion into a live document.
    ///
    /// Detached and disposed elements render once and register the click listener.
    /// Already attached elements are left untouched.
    pub fn connected(&mut self) {
        if self.state == LifecycleState::Attached {
            logging::warn!(
                "button element connected while {}; ignoring",
                self.state.token()
            );
            return;
        }
        self.state = LifecycleState::Attached;
        self.render();
        self.click_listener = Some(self.listeners.add(Rc::clone(&self.on_click)));
    }

    /// Removal from the document. Releases the click listener; no render follows.
    pub fn disconnected(&mut self) {
        if self.state != LifecycleState::Attached {
            return;
        }
        self.state = LifecycleState::Disposed;
        self.click_listener = None;
    }

    /// Attribute-change notification for `name`.
    ///
    /// Re-renders when the element is attached and `name` is in its observed list.
    /// Returns whether a render pass ran.
    pub fn attribute_changed(&mut self, name: &str) -> bool {
        if self.state != LifecycleState::Attached || !self.observed.contains(&name) {
            return false;
        }
        self.render();
        true
    }

    /// Writes an attribute verbatim, then notifies.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.attributes.set(name.clone(), value);
        self.attribute_changed(&name);
    }

    /// Removes an attribute, then notifies if it was present.
    pub fn remove_attribute(&mut self, name: &str) {
        if self.attributes.remove(name).is_some() {
            self.attribute_changed(name);
        }
    }

    /// Reads an attribute by markup name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Simulates a click on the rendered control. Returns the number of listeners reached.
    pub fn dispatch_click(&mut self) -> usize {
        self.clicks += 1;
        let event = ClickEvent {
            sequence: self.clicks,
        };
        self.listeners.dispatch(&event)
    }

    fn render(&mut self) {
        self.inner_html = markup::render(&self.attributes, self.policy);
        self.render_count += 1;
    }

    fn set_observed(&mut self, name: AttributeName, value: impl Into<String>) {
        self.set_attribute(name.token(), value);
    }

    /// Current `look`.
    pub fn look(&self) -> Option<&str> {
        self.attributes.look()
    }

    /// Sets `look`.
    pub fn set_look(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::Look, value);
    }

    /// Current `text`.
    pub fn text(&self) -> Option<&str> {
        self.attributes.text()
    }

    /// Sets `text`.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::Text, value);
    }

    /// Current `size`.
    pub fn size(&self) -> Option<&str> {
        self.attributes.size()
    }

    /// Sets `size`.
    pub fn set_size(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::Size, value);
    }

    /// Current `icon`.
    pub fn icon(&self) -> Option<&str> {
        self.attributes.icon()
    }

    /// Sets `icon`.
    pub fn set_icon(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::Icon, value);
    }

    /// Current raw `is-loading`.
    pub fn is_loading(&self) -> Option<&str> {
        self.attributes.is_loading()
    }

    /// Sets `is-loading` verbatim. Only `"true"` selects the spinner.
    pub fn set_is_loading(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::IsLoading, value);
    }

    /// Sets `is-loading` to the literal `"true"` or `"false"`.
    pub fn set_loading(&mut self, loading: bool) {
        self.set_is_loading(if loading { LOADING_TOKEN } else { "false" });
    }

    /// Current `tag`.
    pub fn tag(&self) -> Option<&str> {
        self.attributes.tag()
    }

    /// Sets `tag`.
    pub fn set_tag(&mut self, value: impl Into<String>) {
        self.set_observed(AttributeName::Tag, value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::attributes::{Look, Size};
    use crate::markup::LOADING_ICON;

    fn counting_element() -> (ButtonElement, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let element =
            ButtonElement::new().with_click_handler(move |_| counter.set(counter.get() + 1));
        (element, hits)
    }

    #[test]
    fn construction_does_not_render() {
        let element = ButtonElement::new();
        assert_eq!(element.state(), LifecycleState::Detached);
        assert_eq!(element.render_count(), 0);
        assert_eq!(element.inner_html(), "");
        assert_eq!(element.listener_count(), 0);
    }

    #[test]
    fn attach_renders_once_and_registers_listener() {
        let mut element = ButtonElement::new();
        element.set_text("Go");
        assert_eq!(element.render_count(), 0);

        element.connected();
        assert_eq!(element.state(), LifecycleState::Attached);
        assert_eq!(element.render_count(), 1);
        assert_eq!(element.listener_count(), 1);
        assert!(element.inner_html().contains(">Go</span>"));

        element.connected();
        assert_eq!(element.render_count(), 1);
        assert_eq!(element.listener_count(), 1);
    }

    #[test]
    fn each_observed_attribute_triggers_one_render() {
        let mut element = ButtonElement::new();
        element.connected();

        for (step, name) in AttributeName::ALL.iter().enumerate() {
            element.set_attribute(name.token(), "value");
            assert_eq!(element.render_count(), step as u64 + 2, "after `{name}`");
        }
    }

    #[test]
    fn unobserved_attribute_does_not_render() {
        let mut element = ButtonElement::new();
        element.connected();
        element.set_attribute("data-id", "42");
        element.remove_attribute("data-id");
        element.set_attribute("isLoading", "true");

        assert_eq!(element.render_count(), 1);
        assert_eq!(element.get_attribute("isLoading"), Some("true"));
        assert!(!element.inner_html().contains(LOADING_ICON));
    }

    #[test]
    fn write_is_visible_before_setter_returns() {
        let mut element = ButtonElement::new();
        element.connected();
        element.set_look(Look::Secondary);
        element.set_size(Size::Tiny);

        assert!(element
            .inner_html()
            .contains(r#"class="my-button my-button--secondary my-button--tiny""#));
        assert_eq!(
            element.inner_html(),
            markup::render(element.attributes(), MarkupPolicy::Raw)
        );
    }

    #[test]
    fn remove_observed_attribute_rerenders_without_it() {
        let mut element = ButtonElement::new();
        element.set_look("primary");
        element.connected();
        element.remove_attribute("look");

        assert_eq!(element.render_count(), 2);
        assert!(!element.inner_html().contains("my-button--primary\""));
    }

    #[test]
    fn set_loading_writes_literal_tokens() {
        let mut element = ButtonElement::new();
        element.set_loading(true);
        assert_eq!(element.is_loading(), Some("true"));
        element.set_loading(false);
        assert_eq!(element.is_loading(), Some("false"));
    }

    #[test]
    fn clicks_reach_handler_only_while_attached() {
        let (mut element, hits) = counting_element();
        assert_eq!(element.dispatch_click(), 0);

        element.connected();
        assert_eq!(element.dispatch_click(), 1);
        assert_eq!(hits.get(), 1);

        element.disconnected();
        assert_eq!(element.state(), LifecycleState::Disposed);
        assert_eq!(element.listener_count(), 0);
        assert_eq!(element.dispatch_click(), 0);
        assert_eq!(hits.get(), 1);

        element.connected();
        element.dispatch_click();
        element.dispatch_click();
        assert_eq!(hits.get(), 3);
        assert_eq!(element.listener_count(), 1);
    }

    #[test]
    fn disposed_element_ignores_attribute_changes() {
        let mut element = ButtonElement::new();
        element.set_text("Save");
        element.connected();
        element.disconnected();
        let markup_before = element.inner_html().to_string();

        element.set_text("Saved");
        assert_eq!(element.render_count(), 1);
        assert_eq!(element.inner_html(), markup_before);
        assert_eq!(element.text(), Some("Saved"));

        element.connected();
        assert_eq!(element.render_count(), 2);
        assert!(element.inner_html().contains(">Saved</span>"));
    }

    #[test]
    fn click_events_carry_sequence() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut element =
            ButtonElement::new().with_click_handler(move |ev| sink.borrow_mut().push(ev.sequence));
        element.dispatch_click();
        element.connected();
        element.dispatch_click();
        element.dispatch_click();

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn custom_observed_list_limits_rerenders() {
        let mut element = ButtonElement::new().with_observed_attributes(&["text"]);
        element.connected();
        element.set_look("primary");
        assert_eq!(element.render_count(), 1);
        assert!(!element.inner_html().contains("my-button--primary\""));

        element.set_text("Go");
        assert_eq!(element.render_count(), 2);
        assert!(element
            .inner_html()
            .contains(r#"class="my-button my-button--primary""#));
    }

    #[test]
    fn lifecycle_tokens_are_stable() {
        assert_eq!(LifecycleState::Detached.token(), "detached");
        assert_eq!(LifecycleState::Attached.token(), "attached");
        assert_eq!(LifecycleState::Disposed.token(), "disposed");
    }
}
