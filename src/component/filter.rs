//! Ordered argument filters attached to a component

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// A transformation over a whole argument list.
///
/// Filters may add, remove or rewrite entries. An `Err` stops the chain and is
/// returned to the caller of the component unchanged.
pub type Filter<A, E> = Arc<dyn Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync>;

/// Position of a filter in a chain.
///
/// Explicit priorities sort before every auto-assigned slot; within each
/// scheme keys compare numerically and need not be contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    /// Caller-chosen priority
    Explicit(i64),
    /// Slot handed out by [`FilterChain::push`]
    Auto(u64),
}

impl From<i64> for FilterKey {
    fn from(priority: i64) -> Self {
        FilterKey::Explicit(priority)
    }
}

impl From<i32> for FilterKey {
    fn from(priority: i32) -> Self {
        FilterKey::Explicit(i64::from(priority))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::Explicit(p) => write!(f, "{}", p),
            FilterKey::Auto(n) => write!(f, "auto#{}", n),
        }
    }
}

/// Filters keyed by [`FilterKey`], applied in ascending key order
pub struct FilterChain<A, E> {
    filters: BTreeMap<FilterKey, Filter<A, E>>,
    // `None` once `Auto(u64::MAX)` has been handed out or inserted
    next_auto: Option<u64>,
}

impl<A, E> FilterChain<A, E> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            filters: BTreeMap::new(),
            next_auto: Some(0),
        }
    }

    /// Insert a filter at an explicit priority, replacing any filter there
    pub fn set<F>(&mut self, priority: i64, filter: F)
    where
        F: Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync + 'static,
    {
        self.filters
            .insert(FilterKey::Explicit(priority), Arc::new(filter));
    }

    /// Append a filter after every filter currently in the chain.
    ///
    /// Returns `None`, leaving the chain unchanged, when the last auto slot
    /// is already taken.
    pub fn push<F>(&mut self, filter: F) -> Option<FilterKey>
    where
        F: Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync + 'static,
    {
        self.push_shared(Arc::new(filter))
    }

    /// Append an already shared filter
    pub fn push_shared(&mut self, filter: Filter<A, E>) -> Option<FilterKey> {
        let Some(n) = self.next_auto else {
            debug!("auto filter slots exhausted, refusing to append");
            return None;
        };
        let key = FilterKey::Auto(n);
        self.next_auto = n.checked_add(1);
        self.filters.insert(key, filter);
        Some(key)
    }

    /// Insert a shared filter at any key
    pub fn insert(&mut self, key: FilterKey, filter: Filter<A, E>) -> Option<Filter<A, E>> {
        if let FilterKey::Auto(n) = key {
            // keep later pushes after this slot
            self.next_auto = match (self.next_auto, n.checked_add(1)) {
                (Some(next), Some(after)) => Some(next.max(after)),
                _ => None,
            };
        }
        self.filters.insert(key, filter)
    }

    pub fn get(&self, key: impl Into<FilterKey>) -> Option<&Filter<A, E>> {
        self.filters.get(&key.into())
    }

    pub fn remove(&mut self, key: impl Into<FilterKey>) -> Option<Filter<A, E>> {
        self.filters.remove(&key.into())
    }

    pub fn contains(&self, key: impl Into<FilterKey>) -> bool {
        self.filters.contains_key(&key.into())
    }

    /// Remove every filter and restart auto-assigned slots from zero
    pub fn clear(&mut self) {
        self.filters.clear();
        self.next_auto = Some(0);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Keys in application order
    pub fn keys(&self) -> impl Iterator<Item = FilterKey> + '_ {
        self.filters.keys().copied()
    }

    /// Run `args` through every filter in ascending key order
    pub fn apply(&self, args: Vec<A>) -> Result<Vec<A>, E> {
        self.filters
            .values()
            .try_fold(args, |args, filter| filter(args))
    }
}

impl<A, E> Default for FilterChain<A, E> {
    fn default() -> Self {
        Self::new()
    }
}

// Filters are immutable once stored, so copying the map is a full copy of the
// chain's mutable state.
impl<A, E> Clone for FilterChain<A, E> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            next_auto: self.next_auto,
        }
    }
}

impl<A, E> fmt::Debug for FilterChain<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("keys", &self.filters.keys().collect::<Vec<_>>())
            .field("next_auto", &self.next_auto)
            .finish()
    }
}
