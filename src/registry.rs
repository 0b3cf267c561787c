use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionId};

/// Opaque wire identifier for one [`Action`].
///
/// Only the key string crosses the network; the full action object stays on
/// the defining side and is looked up again at click time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(String);

impl ActionKey {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ActionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Bidirectional mapping between actions and their wire keys.
///
/// Keys come from a counter scoped to this registry instance, so two
/// registries mint overlapping key strings — a key is only meaningful to
/// the registry that produced it. Entries are never evicted: every key
/// ever minted stays resolvable for the registry's lifetime, and a key is
/// never reassigned to a different action.
#[derive(Debug, Default)]
pub struct ActionKeyRegistry {
    last_key: u64,
    by_id: HashMap<ActionId, ActionKey>,
    by_key: IndexMap<ActionKey, Action>,
}

impl ActionKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a key to `action`, or return the key it already has.
    ///
    /// Idempotent per action identity: minting the same action twice
    /// returns the same key; distinct actions always get distinct keys.
    pub fn mint(&mut self, action: &Action) -> ActionKey {
        if let Some(key) = self.by_id.get(&action.id()) {
            return key.clone();
        }
        self.last_key += 1;
        let key = ActionKey(self.last_key.to_string());
        self.by_id.insert(action.id(), key.clone());
        self.by_key.insert(key.clone(), action.clone());
        key
    }

    /// Look an action back up by its wire key.
    ///
    /// `None` means the key was never minted by this registry — a
    /// protocol or version mismatch between the two sides, never a normal
    /// outcome. Callers must treat it as an error, not substitute a
    /// default action.
    pub fn resolve(&self, key: &str) -> Option<&Action> {
        self.by_key.get(key)
    }

    /// Number of distinct actions known to this registry.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionCatalog, ActionDef, IconRef};

    fn catalog(n: usize) -> ActionCatalog {
        ActionCatalog::new(
            (0..n)
                .map(|i| ActionDef::described(IconRef::new(format!("icon-{i}")), format!("a{i}")))
                .collect(),
        )
    }

    #[test]
    fn mint_then_resolve_returns_the_same_action() {
        let catalog = catalog(3);
        let mut registry = ActionKeyRegistry::new();
        for action in catalog.iter() {
            let key = registry.mint(action);
            assert_eq!(registry.resolve(key.as_str()), Some(action));
        }
    }

    #[test]
    fn mint_is_idempotent_per_action() {
        let catalog = catalog(1);
        let action = catalog.get(0).unwrap();
        let mut registry = ActionKeyRegistry::new();
        let first = registry.mint(action);
        let second = registry.mint(action);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn keys_are_pairwise_distinct() {
        let catalog = catalog(8);
        let mut registry = ActionKeyRegistry::new();
        let keys: Vec<ActionKey> = catalog.iter().map(|a| registry.mint(a)).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_key_resolves_to_none() {
        let registry = ActionKeyRegistry::new();
        assert!(registry.resolve("99").is_none());
    }
}
