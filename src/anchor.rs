//! The element a picker instance is bound to.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// The element a picker is attached to, typically a text input.
///
/// Rendering layers implement this for their concrete element type so the
/// engine can honor `respect_disabled_read_only` and write formatted
/// selections back. The defaults describe an element that is always
/// writable and keeps no value.
pub trait Anchor: Send + Sync {
    /// True when the element carries a disabled attribute.
    fn is_disabled(&self) -> bool {
        false
    }

    /// True when the element carries a read-only attribute.
    fn is_read_only(&self) -> bool {
        false
    }

    /// Writes the formatted selection into the element. An empty string
    /// clears it.
    fn set_value(&self, _text: &str) {}

    /// Reads the element's current value.
    fn value(&self) -> String {
        String::new()
    }
}

/// An in-memory [`Anchor`] for tests and headless embedders.
#[derive(Default)]
pub struct PlainAnchor {
    disabled: bool,
    read_only: bool,
    value: Mutex<String>,
}

impl PlainAnchor {
    /// Creates a writable anchor with no value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the anchor disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Marks the anchor read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

impl Anchor for PlainAnchor {
    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_value(&self, text: &str) {
        *self.value.lock() = text.to_owned();
    }

    fn value(&self) -> String {
        self.value.lock().clone()
    }
}

/// How [`crate::Registry::create`] finds the anchor for a new instance.
///
/// Mirrors the two ways a widget is usually attached: by a name previously
/// registered with the registry, or by handing the element over directly.
pub enum Selector {
    /// Look the anchor up by its registered name.
    Name(String),
    /// Use this anchor directly.
    Handle(Arc<dyn Anchor>),
}

impl Selector {
    /// Wraps a concrete anchor into a selector.
    pub fn handle(anchor: impl Anchor + 'static) -> Self {
        Self::Handle(Arc::new(anchor))
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Arc<dyn Anchor>> for Selector {
    fn from(anchor: Arc<dyn Anchor>) -> Self {
        Self::Handle(anchor)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_anchor_defaults_are_writable() {
        let anchor = PlainAnchor::new();
        assert!(!anchor.is_disabled());
        assert!(!anchor.is_read_only());
        assert_eq!(anchor.value(), "");
    }

    #[test]
    fn plain_anchor_stores_value() {
        let anchor = PlainAnchor::new();
        anchor.set_value("2024-02-12");
        assert_eq!(anchor.value(), "2024-02-12");
        anchor.set_value("");
        assert_eq!(anchor.value(), "");
    }

    #[test]
    fn plain_anchor_flags() {
        let anchor = PlainAnchor::new().disabled(true).read_only(true);
        assert!(anchor.is_disabled());
        assert!(anchor.is_read_only());
    }

    #[test]
    fn selector_from_str_is_a_name() {
        let selector = Selector::from("date-input");
        assert!(matches!(selector, Selector::Name(ref name) if name == "date-input"));
    }

    #[test]
    fn selector_handle_wraps_anchor() {
        let selector = Selector::handle(PlainAnchor::new());
        assert!(matches!(selector, Selector::Handle(_)));
        assert_eq!(format!("{selector:?}"), "Handle(..)");
    }
}
