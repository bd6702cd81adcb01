use std::collections::BTreeMap;

use crate::foundation::error::{LessonError, LessonResult};
use crate::widget::contract::WidgetFactory;

/// Teaching area a widget belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptFamily {
    /// What CSS is and how it attaches to HTML.
    CssBasics,
    /// Selectors and the cascade.
    Selectors,
    /// The box model.
    BoxModel,
    /// Flexbox and grid layout.
    Layout,
    /// HTTP and the browser/server round trip.
    Networking,
}

impl ConceptFamily {
    /// Stable name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CssBasics => "css_basics",
            Self::Selectors => "selectors",
            Self::BoxModel => "box_model",
            Self::Layout => "layout",
            Self::Networking => "networking",
        }
    }
}

impl std::fmt::Display for ConceptFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One type key paired with the widget it mounts.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct RegistryEntry {
    /// Type key as written in `data-type`.
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Concept family.
    pub family: ConceptFamily,
    #[serde(skip)]
    factory: WidgetFactory,
}

impl RegistryEntry {
    /// Pair a key with its factory.
    pub const fn new(
        key: &'static str,
        title: &'static str,
        family: ConceptFamily,
        factory: WidgetFactory,
    ) -> Self {
        Self {
            key,
            title,
            family,
            factory,
        }
    }

    /// Constructor for fresh, independent instances.
    pub fn factory(&self) -> WidgetFactory {
        self.factory
    }
}

/// Immutable type-key → widget table.
///
/// Lookups are exact and case-sensitive; there is no alias or fuzzy resolution. A miss is an
/// ordinary `None`.
#[derive(Clone, Debug, Default)]
pub struct VisualizationRegistry {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl VisualizationRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolve a type key.
    pub fn lookup(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Registered entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects entries, rejecting blank and duplicate keys.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl RegistryBuilder {
    /// Add one entry.
    pub fn register(mut self, entry: RegistryEntry) -> LessonResult<Self> {
        if entry.key.trim().is_empty() {
            return Err(LessonError::validation("registry key must be non-empty"));
        }
        if self.entries.contains_key(entry.key) {
            return Err(LessonError::validation(format!(
                "duplicate registry key '{}'",
                entry.key
            )));
        }
        self.entries.insert(entry.key, entry);
        Ok(self)
    }

    /// Add several entries.
    pub fn register_all(
        self,
        entries: impl IntoIterator<Item = RegistryEntry>,
    ) -> LessonResult<Self> {
        entries.into_iter().try_fold(self, Self::register)
    }

    /// Freeze the table.
    pub fn build(self) -> VisualizationRegistry {
        VisualizationRegistry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/table.rs"]
mod tests;
