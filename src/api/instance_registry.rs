use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{debug, warn};

/// Identity-keyed index of live charts shared by every engine on a page.
///
/// Entries hold weak references: the registry indexes charts but never keeps
/// one alive. Engines remain the only place where charts are created and
/// destroyed.
pub struct InstanceRegistry<H> {
    entries: Rc<RefCell<IndexMap<String, Weak<RefCell<H>>>>>,
}

impl<H> InstanceRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Indexes `handle` under `id`. Returns `true` when a different live
    /// chart was already registered under the same id.
    pub fn register(&self, id: impl Into<String>, handle: &Rc<RefCell<H>>) -> bool {
        let id = id.into();
        let previous = self
            .entries
            .borrow_mut()
            .insert(id.clone(), Rc::downgrade(handle));
        let collided = previous
            .and_then(|entry| entry.upgrade())
            .is_some_and(|existing| !Rc::ptr_eq(&existing, handle));
        if collided {
            warn!(surface_id = %id, "replacing a live chart registered under the same id");
        } else {
            debug!(surface_id = %id, "registered chart");
        }
        collided
    }

    /// Removes the entry for `id`. Returns `true` when an entry existed.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.entries.borrow_mut().shift_remove(id).is_some();
        if removed {
            debug!(surface_id = %id, "unregistered chart");
        }
        removed
    }

    /// Removes the entry for `id` only when it still points at `handle`.
    pub fn unregister_handle(&self, id: &str, handle: &Rc<RefCell<H>>) -> bool {
        let matches = self
            .entries
            .borrow()
            .get(id)
            .is_some_and(|entry| entry.ptr_eq(&Rc::downgrade(handle)));
        matches && self.unregister(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rc<RefCell<H>>> {
        self.entries.borrow().get(id).and_then(Weak::upgrade)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Registered ids in registration order, including stale entries.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops entries whose chart no longer exists. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.strong_count() > 0);
        before - entries.len()
    }
}

impl<H> Clone for InstanceRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<H> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for InstanceRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
