/// The page-wide "outside click" and "viewport resize" listener set. A picker
/// acquires a scope while its popup is open; dropping the guard releases it,
/// so a destroyed picker can never keep receiving events.
use log::trace;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    OutsideClick,
    Resize,
}

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    scopes: Arc<RwLock<BTreeMap<String, Vec<ListenerKind>>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both listener kinds for `id` until the guard is dropped
    pub fn acquire(&self, id: &str) -> ListenerGuard {
        let mut scopes = self.scopes.write().unwrap_or_else(PoisonError::into_inner);
        scopes.insert(
            id.to_string(),
            vec![ListenerKind::OutsideClick, ListenerKind::Resize],
        );
        trace!("Listeners acquired for {}", id);
        ListenerGuard {
            registry: self.clone(),
            id: id.to_string(),
        }
    }

    /// Ids currently listening for `kind`, in id order
    pub fn listening(&self, kind: ListenerKind) -> Vec<String> {
        self.scopes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, kinds)| kinds.contains(&kind))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn is_listening(&self, id: &str, kind: ListenerKind) -> bool {
        self.scopes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn len(&self) -> usize {
        self.scopes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, id: &str) {
        self.scopes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        trace!("Listeners released for {}", id);
    }
}

#[derive(Debug)]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    id: String,
}

impl ListenerGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}
