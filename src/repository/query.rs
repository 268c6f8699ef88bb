use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Membership shared between a [`QueryResult`] and the repository that issued it
#[derive(Debug, Default)]
pub(crate) struct QueryState {
    ids: BTreeSet<String>,
    terminated: bool,
}

impl QueryState {
    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Drop `id` from the membership; returns whether it was present
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        !self.terminated && self.ids.remove(id)
    }

    pub(crate) fn terminate(&mut self) {
        if !self.terminated {
            self.ids.clear();
        }
        self.terminated = true;
    }
}

/// The ids answering a repository query.
///
/// A query result never grows. While it is attached to its repository, every
/// sequence removed from the repository is also removed from the result, so
/// it never names a sequence the repository no longer holds.
///
/// Query results are created by
/// [`SequenceRepository`](crate::repository::store::SequenceRepository) queries
/// only. The repository keeps a weak reference for notification; dropping the
/// result is enough to stop notifications.
pub struct QueryResult {
    state: Rc<RefCell<QueryState>>,
}

impl QueryResult {
    pub(crate) fn from_ids(ids: BTreeSet<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(QueryState {
                ids,
                terminated: false,
            })),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<QueryState>> {
        Rc::downgrade(&self.state)
    }

    /// Check whether `handle` refers to this result's state
    pub(crate) fn is_handle(&self, handle: &Weak<RefCell<QueryState>>) -> bool {
        std::ptr::eq(Rc::as_ptr(&self.state), handle.as_ptr())
    }

    pub fn is_terminated(&self) -> bool {
        self.state.borrow().is_terminated()
    }

    /// Terminate this result: its membership is cleared and it ignores all
    /// further notifications. Terminating twice has no effect.
    pub fn terminate(&self) {
        self.state.borrow_mut().terminate();
    }

    /// Notification hook called by the repository when a sequence is removed
    pub fn on_removed(&self, id: &str) {
        self.state.borrow_mut().remove(id);
    }

    /// Snapshot of the current membership
    pub fn ids(&self) -> BTreeSet<String> {
        self.state.borrow().ids.clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.borrow().ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().ids.is_empty()
    }
}

impl std::fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("QueryResult")
            .field("ids", &state.ids)
            .field("terminated", &state.terminated)
            .finish()
    }
}
