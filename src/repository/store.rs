use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Weak;
use tracing::{debug, warn};

use crate::core::alphabet::AlphabetKind;
use crate::core::error::{Result, SequenceError};
use crate::core::sequence::Sequence;
use crate::repository::query::{QueryResult, QueryState};

/// In-memory store of sequences keyed by id
#[derive(Debug, Default)]
pub struct SequenceRepository {
    /// Sequence id -> sequence; every value's id equals its key
    sequences: HashMap<String, Sequence>,

    /// Query results issued by this repository, notified on removal
    queries: RefCell<Vec<Weak<RefCell<QueryState>>>>,

    terminated: bool,
}

impl SequenceRepository {
    /// Create an empty, active repository
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn ensure_active(&self) -> Result<()> {
        if self.terminated {
            Err(SequenceError::AlreadyTerminated("repository"))
        } else {
            Ok(())
        }
    }

    /// Terminate this repository.
    ///
    /// All sequences are dropped and every attached query result is
    /// terminated and detached. Terminating twice has no effect.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }

        self.sequences.clear();
        for handle in self.queries.get_mut().drain(..) {
            if let Some(state) = handle.upgrade() {
                state.borrow_mut().terminate();
            }
        }
        self.terminated = true;
        debug!("Repository terminated");
    }

    /// Add a sequence.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is
    /// terminated, or `SequenceError::DuplicateId` if a sequence with the same
    /// id is already stored.
    pub fn add(&mut self, sequence: Sequence) -> Result<()> {
        self.ensure_active()?;
        if self.sequences.contains_key(sequence.id()) {
            return Err(SequenceError::DuplicateId(sequence.id().to_string()));
        }

        debug!(
            id = sequence.id(),
            alphabet = %sequence.alphabet(),
            "Adding sequence"
        );
        self.sequences.insert(sequence.id().to_string(), sequence);
        Ok(())
    }

    /// Remove a sequence, identified by its id.
    ///
    /// # Errors
    ///
    /// See [`SequenceRepository::remove_id`].
    pub fn remove(&mut self, sequence: &Sequence) -> Result<Sequence> {
        self.remove_id(sequence.id())
    }

    /// Remove the sequence with the given id and return it.
    ///
    /// Every attached query result drops the id before this returns.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is
    /// terminated, or `SequenceError::NotFound` if no sequence has this id.
    pub fn remove_id(&mut self, id: &str) -> Result<Sequence> {
        self.ensure_active()?;
        let removed = self
            .sequences
            .remove(id)
            .ok_or_else(|| SequenceError::NotFound(id.to_string()))?;

        self.notify_removed(id);
        Ok(removed)
    }

    /// Fan a removal out to every live query result, pruning dead or
    /// terminated ones along the way
    fn notify_removed(&self, id: &str) {
        let mut queries = self.queries.borrow_mut();
        let mut affected = 0;

        queries.retain(|handle| {
            let Some(state) = handle.upgrade() else {
                return false;
            };
            let mut state = state.borrow_mut();
            if state.is_terminated() {
                return false;
            }
            if state.remove(id) {
                affected += 1;
            }
            true
        });

        debug!(
            id,
            affected,
            attached = queries.len(),
            "Notified query results of removal"
        );
    }

    /// Get a sequence by id.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidId` if `id` is empty.
    pub fn get(&self, id: &str) -> Result<Option<&Sequence>> {
        if !Sequence::is_valid_id(id) {
            return Err(SequenceError::InvalidId(
                "a sequence id cannot be empty".to_string(),
            ));
        }
        Ok(self.sequences.get(id))
    }

    /// Check whether a sequence with this id is stored.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidId` if `id` is empty.
    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Number of stored sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Iterate over stored sequences in no particular order
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.values()
    }

    /// Number of query results still receiving notifications
    pub fn attached_queries(&self) -> usize {
        self.queries
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|state| !state.borrow().is_terminated())
            .count()
    }

    /// Ids of all sequences using an alphabet of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is terminated.
    pub fn all_ids_of(&self, kind: &AlphabetKind) -> Result<QueryResult> {
        self.query(kind, |_| true)
    }

    /// Ids of all sequences from `organism` using an alphabet of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is terminated.
    pub fn ids_for_organism(&self, organism: &str, kind: &AlphabetKind) -> Result<QueryResult> {
        self.query(kind, |sequence| sequence.organism() == organism)
    }

    /// Ids of all sequences containing `subsequence` and using an alphabet of
    /// the given kind.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is terminated.
    pub fn ids_for_subsequence(
        &self,
        subsequence: &str,
        kind: &AlphabetKind,
    ) -> Result<QueryResult> {
        self.query(kind, |sequence| sequence.contains_subsequence(subsequence))
    }

    /// Snapshot the matching ids into a new query result and attach it
    fn query<F>(&self, kind: &AlphabetKind, predicate: F) -> Result<QueryResult>
    where
        F: Fn(&Sequence) -> bool,
    {
        self.ensure_active()?;

        let ids: BTreeSet<String> = self
            .sequences
            .values()
            .filter(|sequence| sequence.alphabet().kind() == kind && predicate(*sequence))
            .map(|sequence| sequence.id().to_string())
            .collect();

        debug!(kind = %kind, matches = ids.len(), "Query complete");

        let result = QueryResult::from_ids(ids);
        let mut queries = self.queries.borrow_mut();
        queries.retain(|handle| {
            handle
                .upgrade()
                .is_some_and(|state| !state.borrow().is_terminated())
        });
        queries.push(result.downgrade());
        Ok(result)
    }

    /// Stop notifying `query` and terminate it.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::AlreadyTerminated` if the repository is
    /// terminated, or `SequenceError::InvalidInput` if `query` was not issued
    /// by this repository (or was already detached).
    pub fn detach(&self, query: &QueryResult) -> Result<()> {
        self.ensure_active()?;

        let mut queries = self.queries.borrow_mut();
        let Some(position) = queries.iter().position(|handle| query.is_handle(handle)) else {
            warn!("Attempted to detach a query result not attached to this repository");
            return Err(SequenceError::InvalidInput(
                "the query result is not attached to this repository".to_string(),
            ));
        };

        queries.swap_remove(position);
        drop(queries);
        query.terminate();
        Ok(())
    }
}
