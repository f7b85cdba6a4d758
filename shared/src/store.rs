use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;
use crate::models::Voter;

type Listener = Rc<dyn Fn(Rc<Vec<Voter>>)>;

#[derive(Default)]
struct StoreInner {
    voters: Rc<Vec<Voter>>,
    primed: bool,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
}

/// Session-wide list of voters. Clones share the same list; `set_voters`
/// is the only mutation and every change is pushed to the subscribers.
#[derive(Clone, Default)]
pub struct VoterStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl PartialEq for VoterStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for VoterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VoterStore")
            .field("voters", &inner.voters.len())
            .field("primed", &inner.primed)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl VoterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voters(&self) -> Rc<Vec<Voter>> {
        self.inner.borrow().voters.clone()
    }

    /// True once the list has been written at least once.
    pub fn is_primed(&self) -> bool {
        self.inner.borrow().primed
    }

    pub fn set_voters(&self, voters: Vec<Voter>) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.voters = Rc::new(voters);
            inner.primed = true;
            let listeners: Vec<Listener> = inner.listeners.iter()
                .map(|(_, listener)| listener.clone())
                .collect();
            (inner.voters.clone(), listeners)
        };
        debug!(count = snapshot.len(), listeners = listeners.len(), "voter list replaced");
        for listener in listeners {
            listener(snapshot.clone());
        }
    }

    pub fn subscribe(&self, listener: impl Fn(Rc<Vec<Voter>>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription { store: Rc::downgrade(&self.inner), id }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Keeps a store listener attached until dropped.
#[must_use = "dropping a Subscription detaches the listener"]
pub struct Subscription {
    store: Weak<RefCell<StoreInner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
