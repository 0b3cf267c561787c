use std::collections::HashMap;

use thiserror::Error;

use crate::protocol::{ClickEvent, ClickMessage};
use crate::registry::ActionKeyRegistry;

/// Why a click message could not be resolved to an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The key was never minted by the registry on this side — a
    /// protocol or version mismatch between the two sides.
    #[error("unknown action key {key:?}")]
    UnknownActionKey { key: String },

    /// The row ordinal points past the end of the current data snapshot.
    /// Happens legitimately when the backing collection shrank between
    /// render and click; rows are addressed by position, not identity.
    #[error("row ordinal {ordinal} out of range for snapshot of {len} items")]
    RowOutOfRange { ordinal: usize, len: usize },
}

/// Handle returned by [`ClickResolver::add_click_listener`], used to
/// remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn Fn(&ClickEvent<T>) + Send>;

/// Defining-side resolution of click messages.
///
/// Turns the wire-level `(row ordinal, action key)` pair back into a
/// concrete `(item, action)` pair against a data snapshot taken fresh at
/// resolve time, and fans the resulting event out to listeners in
/// registration order.
///
/// Listeners live in registration-ordered slots; removal tombstones a
/// slot in place rather than shifting later entries, and the slot vector
/// is compacted once tombstones outnumber live listeners. Both
/// registration and removal are O(1) amortized.
pub struct ClickResolver<T> {
    slots: Vec<Option<(ListenerId, Listener<T>)>>,
    by_id: HashMap<ListenerId, usize>,
    next_listener: u64,
}

impl<T> Default for ClickResolver<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            by_id: HashMap::new(),
            next_listener: 0,
        }
    }
}

impl<T: Clone> ClickResolver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click listener. Listeners are invoked in registration
    /// order, once per resolved click.
    pub fn add_click_listener(
        &mut self,
        listener: impl Fn(&ClickEvent<T>) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.by_id.insert(id, self.slots.len());
        self.slots.push(Some((id, Box::new(listener))));
        id
    }

    /// Remove a previously registered listener. Returns `false` if it was
    /// already removed. Delivery order of the remaining listeners is
    /// unchanged.
    pub fn remove_click_listener(&mut self, id: ListenerId) -> bool {
        let Some(slot) = self.by_id.remove(&id) else {
            return false;
        };
        self.slots[slot] = None;
        if self.slots.len() - self.by_id.len() > self.by_id.len() {
            self.compact();
        }
        true
    }

    /// Drop tombstoned slots and remap the surviving listeners' indexes.
    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some((id, _)) = entry {
                self.by_id.insert(*id, slot);
            }
        }
    }

    /// Resolve one click message against the registry and a data snapshot.
    ///
    /// Both failure modes are surfaced, never defaulted: an unknown key
    /// can only come from a mismatch between the two sides, and an
    /// out-of-range ordinal means the collection shrank since the row was
    /// rendered.
    pub fn resolve(
        &self,
        registry: &ActionKeyRegistry,
        msg: &ClickMessage,
        snapshot: &[T],
    ) -> Result<ClickEvent<T>, ResolveError> {
        let action = registry
            .resolve(msg.action_key.as_str())
            .ok_or_else(|| ResolveError::UnknownActionKey {
                key: msg.action_key.as_str().to_owned(),
            })?;

        let item = snapshot
            .get(msg.row_ordinal)
            .ok_or(ResolveError::RowOutOfRange {
                ordinal: msg.row_ordinal,
                len: snapshot.len(),
            })?;

        Ok(ClickEvent {
            item: item.clone(),
            action: action.clone(),
            pointer: msg.pointer,
        })
    }

    /// Deliver one event to every listener, in registration order.
    pub fn dispatch(&self, event: &ClickEvent<T>) {
        for (_, listener) in self.slots.iter().flatten() {
            listener(event);
        }
    }

    /// Resolve and dispatch in one step: exactly one event is delivered on
    /// success, none on failure.
    pub fn handle(
        &self,
        registry: &ActionKeyRegistry,
        msg: &ClickMessage,
        snapshot: &[T],
    ) -> Result<(), ResolveError> {
        let event = self.resolve(registry, msg, snapshot)?;
        self.dispatch(&event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::action::{ActionCatalog, ActionDef, IconRef};
    use crate::protocol::PointerMetadata;
    use crate::registry::ActionKey;

    fn setup() -> (ActionKeyRegistry, ActionCatalog) {
        let catalog = ActionCatalog::new(vec![
            ActionDef::described(IconRef::new("user"), "user"),
            ActionDef::described(IconRef::new("gear"), "settings"),
        ]);
        let mut registry = ActionKeyRegistry::new();
        for action in catalog.iter() {
            registry.mint(action);
        }
        (registry, catalog)
    }

    fn msg(key: &ActionKey, row_ordinal: usize) -> ClickMessage {
        ClickMessage {
            row_ordinal,
            action_key: key.clone(),
            pointer: PointerMetadata::default(),
        }
    }

    #[test]
    fn resolves_item_and_action() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(1).unwrap());
        let resolver = ClickResolver::<String>::new();
        let snapshot: Vec<String> = (0..10).map(|i| format!("item-{i}")).collect();

        let event = resolver
            .resolve(&registry, &msg(&key, 4), &snapshot)
            .unwrap();
        assert_eq!(event.item, "item-4");
        assert_eq!(&event.action, catalog.get(1).unwrap());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let (registry, _catalog) = setup();
        let resolver = ClickResolver::<String>::new();
        let unknown = ActionKey::new("999");

        let err = resolver
            .resolve(&registry, &msg(&unknown, 0), &["row".to_owned()])
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownActionKey {
                key: "999".to_owned()
            }
        );
    }

    #[test]
    fn out_of_range_ordinal_is_an_error() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(0).unwrap());
        let resolver = ClickResolver::<String>::new();
        let snapshot: Vec<String> = (0..10).map(|i| format!("item-{i}")).collect();

        let err = resolver
            .resolve(&registry, &msg(&key, 12), &snapshot)
            .unwrap_err();
        assert_eq!(err, ResolveError::RowOutOfRange { ordinal: 12, len: 10 });
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(0).unwrap());
        let mut resolver = ClickResolver::<String>::new();

        let (tx, rx) = mpsc::channel();
        for tag in ["first", "second", "third"] {
            let tx = tx.clone();
            resolver.add_click_listener(move |_event| {
                tx.send(tag).unwrap();
            });
        }

        resolver
            .handle(&registry, &msg(&key, 0), &["row".to_owned()])
            .unwrap();
        let order: Vec<&str> = rx.try_iter().collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn removed_listener_no_longer_fires() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(0).unwrap());
        let mut resolver = ClickResolver::<String>::new();

        let (tx, rx) = mpsc::channel();
        let keep_tx = tx.clone();
        let removed = resolver.add_click_listener(move |_| tx.send("removed").unwrap());
        resolver.add_click_listener(move |_| keep_tx.send("kept").unwrap());

        assert!(resolver.remove_click_listener(removed));
        assert!(!resolver.remove_click_listener(removed));

        resolver
            .handle(&registry, &msg(&key, 0), &["row".to_owned()])
            .unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), ["kept"]);
    }

    #[test]
    fn removing_oldest_listeners_keeps_remaining_order() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(0).unwrap());
        let mut resolver = ClickResolver::<String>::new();

        let (tx, rx) = mpsc::channel();
        let ids: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|tag| {
                let tx = tx.clone();
                resolver.add_click_listener(move |_| tx.send(tag).unwrap())
            })
            .collect();

        // Oldest-first removal must stay cheap and must not disturb the
        // delivery order of the survivors.
        assert!(resolver.remove_click_listener(ids[0]));
        assert!(resolver.remove_click_listener(ids[1]));

        resolver
            .handle(&registry, &msg(&key, 0), &["row".to_owned()])
            .unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), ["c", "d", "e"]);
    }

    #[test]
    fn removal_still_works_after_slot_compaction() {
        let (mut registry, catalog) = setup();
        let key = registry.mint(catalog.get(0).unwrap());
        let mut resolver = ClickResolver::<String>::new();

        let (tx, rx) = mpsc::channel();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|tag| {
                let tx = tx.clone();
                resolver.add_click_listener(move |_| tx.send(tag).unwrap())
            })
            .collect();

        // Removing three of four pushes tombstones past the live count,
        // forcing a compaction that remaps the surviving slot.
        assert!(resolver.remove_click_listener(ids[0]));
        assert!(resolver.remove_click_listener(ids[1]));
        assert!(resolver.remove_click_listener(ids[2]));

        let late_tx = tx.clone();
        resolver.add_click_listener(move |_| late_tx.send("e").unwrap());

        resolver
            .handle(&registry, &msg(&key, 0), &["row".to_owned()])
            .unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), ["d", "e"]);

        // The survivor's id must still resolve to its new slot.
        assert!(resolver.remove_click_listener(ids[3]));
        assert!(!resolver.remove_click_listener(ids[3]));
    }

    #[test]
    fn failed_resolution_delivers_no_event() {
        let (registry, _catalog) = setup();
        let mut resolver = ClickResolver::<String>::new();
        let (tx, rx) = mpsc::channel();
        resolver.add_click_listener(move |_| tx.send(()).unwrap());

        let unknown = ActionKey::new("999");
        assert!(
            resolver
                .handle(&registry, &msg(&unknown, 0), &["row".to_owned()])
                .is_err()
        );
        assert!(rx.try_recv().is_err());
    }
}
