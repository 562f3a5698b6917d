//! Custom element registry.
//!
//! A table from reserved tag name to element factory, consulted by the tree
//! builder when it materializes a start tag. Unregistered tags always resolve
//! to [`ElementData::element`]. The built-in table registers the control-flow
//! elements `<if>`, `<else>` and `<for>`.
//!
//! The process-wide instance ([`CustomElementRegistry::global`]) is assembled
//! once on first use and is read-only afterwards, so concurrent compilations
//! can share it.

use std::collections::HashMap;
use std::sync::LazyLock;

use strum::IntoEnumIterator;

use crate::{AttributesMap, ElementData, ElementKind};

/// Builds the element data for a start tag: `(tag_name, attributes)`.
pub type ElementFactory = fn(String, AttributesMap) -> ElementData;

/// The process-wide registry holding the built-in definitions.
static GLOBAL_REGISTRY: LazyLock<CustomElementRegistry> =
    LazyLock::new(CustomElementRegistry::builtin);

/// Append-only mapping from tag name to [`ElementFactory`].
#[derive(Debug, Clone, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, ElementFactory>,
}

impl CustomElementRegistry {
    /// An empty registry. Every tag resolves to a plain element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry holding one definition per control-flow [`ElementKind`].
    #[must_use]
    pub fn builtin() -> Self {
        ElementKind::iter()
            .filter_map(|kind| Some((kind.reserved_tag()?, kind.factory())))
            .fold(Self::new(), |registry, (tag, factory)| {
                registry.define(tag, factory)
            })
    }

    /// The shared, read-only built-in registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Register `factory` for `tag` (matched ASCII case-insensitively).
    ///
    /// Definitions are never replaced: if `tag` is already defined the
    /// existing factory is kept.
    #[must_use]
    pub fn define(mut self, tag: &str, factory: ElementFactory) -> Self {
        let _ = self
            .definitions
            .entry(tag.to_ascii_lowercase())
            .or_insert(factory);
        self
    }

    /// Look up the factory registered for `tag`.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<ElementFactory> {
        self.definitions.get(tag).copied()
    }

    /// Returns true if `tag` has a definition.
    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Create the element data for a start tag, falling back to a plain
    /// element for unregistered tags.
    #[must_use]
    pub fn create_element(&self, tag_name: &str, attrs: AttributesMap) -> ElementData {
        let factory = self.lookup(tag_name).unwrap_or(ElementData::element);
        factory(tag_name.to_string(), attrs)
    }
}
