//! Nullable badge catalog and event registry.

use podium_catalog::{BadgeCatalog, BadgeDefinition, CatalogError, EventRecord, EventRegistry};
use podium_types::{BadgeId, EventId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory badge catalog with a switch to simulate outages.
#[derive(Default)]
pub struct NullCatalog {
    badges: Mutex<HashMap<BadgeId, BadgeDefinition>>,
    unavailable: AtomicBool,
}

impl NullCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, badge: BadgeDefinition) {
        self.badges.lock().unwrap().insert(badge.id.clone(), badge);
    }

    pub fn remove(&self, id: &BadgeId) {
        self.badges.lock().unwrap().remove(id);
    }

    /// When set, every lookup fails with `CatalogError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl BadgeCatalog for NullCatalog {
    fn badge(&self, id: &BadgeId) -> Result<BadgeDefinition, CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("catalog offline".into()));
        }
        self.badges
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

/// In-memory event registry with a switch to simulate outages.
#[derive(Default)]
pub struct NullRegistry {
    events: Mutex<HashMap<EventId, EventRecord>>,
    unavailable: AtomicBool,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, event: EventRecord) {
        self.events.lock().unwrap().insert(event.id.clone(), event);
    }

    /// When set, every lookup fails with `CatalogError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl EventRegistry for NullRegistry {
    fn event(&self, id: &EventId) -> Result<EventRecord, CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("registry offline".into()));
        }
        self.events
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn events_assigning_badge(&self, badge: &BadgeId) -> Result<Vec<EventId>, CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("registry offline".into()));
        }
        Ok(self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.assigns(badge))
            .map(|e| e.id.clone())
            .collect())
    }
}
