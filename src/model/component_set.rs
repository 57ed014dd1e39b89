//! Deduplicating collection of resolved components.

use super::{Component, ComponentKey};
use indexmap::IndexMap;

/// Components keyed by identity.
///
/// The first component inserted under a key is retained; later inserts with
/// the same key are counted as duplicates and dropped. Equality ignores
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    components: IndexMap<ComponentKey, Component>,
    duplicate_count: usize,
}

impl ComponentSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component.
    ///
    /// Returns `false` when a component with the same identity was already
    /// present, in which case the existing one is kept.
    pub fn insert(&mut self, component: Component) -> bool {
        let key = component.key();
        if self.contains(&key) {
            tracing::debug!("Duplicate component {} ignored", key);
            self.duplicate_count += 1;
            return false;
        }
        self.components.insert(key, component);
        true
    }

    /// Number of distinct components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of inserts absorbed as duplicates
    #[must_use]
    pub const fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    #[must_use]
    pub fn contains(&self, key: &ComponentKey) -> bool {
        self.components.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &ComponentKey) -> Option<&Component> {
        self.components.get(key)
    }

    /// Iterate components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Components sorted by name, then version
    #[must_use]
    pub fn sorted(&self) -> Vec<&Component> {
        let mut components: Vec<_> = self.components.values().collect();
        components.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.version.cmp(&b.version))
                .then_with(|| a.key().cmp(&b.key()))
        });
        components
    }
}

impl PartialEq for ComponentSet {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for ComponentSet {}

impl Extend<Component> for ComponentSet {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        for component in iter {
            self.insert(component);
        }
    }
}

impl FromIterator<Component> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ComponentSet {
    type Item = Component;
    type IntoIter = indexmap::map::IntoValues<ComponentKey, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_values()
    }
}
