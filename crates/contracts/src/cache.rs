//! In-memory cache of live contract instances.
//!
//! Every (kind, address) key is either ready, holding an instance that is
//! never evicted or replaced, or pending, while one caller's factory is in
//! flight. Callers arriving on a pending key subscribe to that flight and
//! receive its result, error included. A failed flight leaves no entry
//! behind, so a later call runs a new factory. The word registry has a
//! single key regardless of address.

use crate::error::ContractResult;
use crate::sdk::SharedInstance;
use crate::types::{ContractAddress, ContractKind};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

type FlightResult = Option<ContractResult<SharedInstance>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: ContractKind,
    /// `None` for singleton kinds.
    address: Option<ContractAddress>,
}

impl CacheKey {
    fn new(kind: ContractKind, address: &ContractAddress) -> Self {
        let address = (!kind.is_singleton()).then(|| address.clone());
        Self { kind, address }
    }
}

enum Slot {
    Ready(SharedInstance),
    Pending(watch::Receiver<FlightResult>),
}

enum Flight {
    Lead(watch::Sender<FlightResult>),
    Join(watch::Receiver<FlightResult>),
}

/// Removes a pending entry whose leader went away without finishing.
struct PendingGuard<'a> {
    entries: &'a DashMap<CacheKey, Slot>,
    key: &'a CacheKey,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.entries
                .remove_if(self.key, |_, slot| matches!(slot, Slot::Pending(_)));
        }
    }
}

/// Cache of contract handles.
#[derive(Default)]
pub struct InstanceCache {
    entries: DashMap<CacheKey, Slot>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached instance for `(kind, address)`, if any.
    pub fn get(&self, kind: ContractKind, address: &ContractAddress) -> Option<SharedInstance> {
        let key = CacheKey::new(kind, address);
        self.entries.get(&key).and_then(|slot| match slot.value() {
            Slot::Ready(instance) => Some(Arc::clone(instance)),
            Slot::Pending(_) => None,
        })
    }

    pub fn contains(&self, kind: ContractKind, address: &ContractAddress) -> bool {
        self.get(kind, address).is_some()
    }

    /// Returns the cached instance or runs `factory` to create it.
    ///
    /// Only one factory runs per key at a time; concurrent callers share its
    /// outcome. Failures are returned to every sharer and are not cached.
    pub async fn get_or_init<F, Fut>(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
        factory: F,
    ) -> ContractResult<SharedInstance>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ContractResult<SharedInstance>>,
    {
        let key = CacheKey::new(kind, address);

        loop {
            // the entry guard must be gone before any await
            let flight = match self.entries.entry(key.clone()) {
                Entry::Occupied(entry) => match entry.get() {
                    Slot::Ready(instance) => {
                        debug!(%kind, %address, "instance cache hit");
                        return Ok(Arc::clone(instance));
                    }
                    Slot::Pending(receiver) => Flight::Join(receiver.clone()),
                },
                Entry::Vacant(entry) => {
                    let (sender, receiver) = watch::channel(None);
                    entry.insert(Slot::Pending(receiver));
                    Flight::Lead(sender)
                }
            };

            match flight {
                Flight::Join(mut receiver) => {
                    debug!(%kind, %address, "joining in-flight lookup");
                    loop {
                        let outcome = receiver.borrow_and_update().clone();
                        if let Some(result) = outcome {
                            return result;
                        }
                        if receiver.changed().await.is_err() {
                            // leader dropped without an outcome; take over
                            break;
                        }
                    }
                }
                Flight::Lead(sender) => {
                    debug!(%kind, %address, "instance cache miss");
                    let mut guard = PendingGuard {
                        entries: &self.entries,
                        key: &key,
                        armed: true,
                    };
                    let result = factory().await;
                    let result = self.settle(&key, result);
                    guard.armed = false;
                    sender.send_replace(Some(result.clone()));
                    return result;
                }
            }
        }
    }

    /// Stores the outcome of a finished flight.
    fn settle(
        &self,
        key: &CacheKey,
        result: ContractResult<SharedInstance>,
    ) -> ContractResult<SharedInstance> {
        match result {
            Ok(instance) => match self.entries.entry(key.clone()) {
                Entry::Occupied(mut entry) => {
                    if let Slot::Ready(existing) = entry.get() {
                        return Ok(Arc::clone(existing));
                    }
                    entry.insert(Slot::Ready(Arc::clone(&instance)));
                    Ok(instance)
                }
                Entry::Vacant(entry) => {
                    entry.insert(Slot::Ready(Arc::clone(&instance)));
                    Ok(instance)
                }
            },
            Err(err) => {
                self.entries
                    .remove_if(key, |_, slot| matches!(slot, Slot::Pending(_)));
                Err(err)
            }
        }
    }

    /// Stores a freshly deployed instance.
    ///
    /// If the key is already ready the existing instance is kept and
    /// returned.
    pub fn register(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
        instance: SharedInstance,
    ) -> SharedInstance {
        match self.entries.entry(CacheKey::new(kind, address)) {
            Entry::Occupied(mut entry) => {
                if let Slot::Ready(existing) = entry.get() {
                    warn!(%kind, %address, "instance already cached, keeping existing handle");
                    return Arc::clone(existing);
                }
                entry.insert(Slot::Ready(Arc::clone(&instance)));
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot::Ready(Arc::clone(&instance)));
            }
        }
        instance
    }

    /// Addresses with a cached instance of `kind`.
    pub fn addresses(&self, kind: ContractKind) -> Vec<ContractAddress> {
        let mut addresses: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.key().kind == kind)
            .filter_map(|entry| match (entry.value(), &entry.key().address) {
                (Slot::Ready(_), Some(address)) => Some(address.clone()),
                (Slot::Ready(instance), None) => instance.address(),
                (Slot::Pending(_), _) => None,
            })
            .collect();
        addresses.sort();
        addresses
    }

    /// Number of cached instances, singleton included.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups currently in flight.
    pub fn in_flight(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Pending(_)))
            .count()
    }
}
