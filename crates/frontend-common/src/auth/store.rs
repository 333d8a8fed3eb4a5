//! Injectable container for the session state

use super::state::{SessionAction, SessionState};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use yew::{Callback, Reducible};

#[derive(Debug)]
struct StoreInner {
    state: RefCell<Rc<SessionState>>,
    listeners: RefCell<Vec<(usize, Callback<Rc<SessionState>>)>>,
    next_listener: Cell<usize>,
}

/// Single source of truth for the session.
///
/// State only changes through [`SessionStore::dispatch`]; every change is
/// pushed to subscribers. Clones share the same state.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial)),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> Rc<SessionState> {
        self.inner.state.borrow().clone()
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// Apply a transition and notify subscribers
    pub fn dispatch(&self, action: SessionAction) {
        tracing::debug!(action = action.name(), "session transition");

        let next = self.state().reduce(action);
        *self.inner.state.borrow_mut() = next;

        // Listeners may dispatch or unsubscribe, so notify from a copy and
        // always hand out the latest snapshot
        let listeners: Vec<_> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener.emit(self.state());
        }
    }

    /// Receive every new state until the returned guard is dropped
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: Callback<Rc<SessionState>>) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Live subscription to a [`SessionStore`]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
