//! Cached, cancellable reads. The view keeps a [`QueryState`], the
//! [`QueryClient`] keeps the last good value per key.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use crate::client::ClientError;
use crate::error::Error;

pub const VOTERS_KEY: &str = "voters";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(Error),
    Success(Rc<T>),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&Rc<T>> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            QueryState::Error(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefetchPolicy {
    /// Every mount issues one fetch.
    #[default]
    OnMount,
    /// A cached value younger than the duration is reused without a fetch.
    StaleAfter(Duration),
}

/// Cancelled by the view on unmount; a cancelled query never reports back.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct CacheEntry<T> {
    value: Rc<T>,
    fetched_at: OffsetDateTime,
}

pub struct QueryClient<T> {
    cache: Rc<RefCell<HashMap<String, CacheEntry<T>>>>,
    policy: RefetchPolicy,
}

impl<T> Clone for QueryClient<T> {
    fn clone(&self) -> Self {
        Self { cache: self.cache.clone(), policy: self.policy }
    }
}

impl<T> PartialEq for QueryClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cache, &other.cache) && self.policy == other.policy
    }
}

impl<T> fmt::Debug for QueryClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("keys", &self.cache.borrow().len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T> Default for QueryClient<T> {
    fn default() -> Self {
        Self::new(RefetchPolicy::default())
    }
}

impl<T> QueryClient<T> {
    pub fn new(policy: RefetchPolicy) -> Self {
        Self { cache: Rc::new(RefCell::new(HashMap::new())), policy }
    }

    pub fn cached(&self, key: &str) -> Option<Rc<T>> {
        self.cache.borrow().get(key).map(|entry| entry.value.clone())
    }

    /// What a freshly mounted view shows before its fetch settles.
    pub fn initial_state(&self, key: &str) -> QueryState<T> {
        match self.cached(key) {
            Some(value) => QueryState::Success(value),
            None => QueryState::Loading,
        }
    }

    pub fn is_fresh(&self, key: &str, now: OffsetDateTime) -> bool {
        let cache = self.cache.borrow();
        match (self.policy, cache.get(key)) {
            (RefetchPolicy::StaleAfter(max_age), Some(entry)) => now - entry.fetched_at < max_age,
            _ => false,
        }
    }

    /// Runs `request` unless the cached value is still fresh. Returns `None` when
    /// `token` was cancelled while the request was in flight.
    pub async fn fetch<F>(&self, key: &str, token: &CancelToken, request: F) -> Option<QueryState<T>>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if self.is_fresh(key, OffsetDateTime::now_utc()) {
            debug!(key, "serving fresh cached query");
            return self.cached(key).map(QueryState::Success);
        }

        info!(key, "fetching");
        let state = match request.await {
            Ok(value) => {
                let value = Rc::new(value);
                self.cache.borrow_mut().insert(key.to_string(), CacheEntry {
                    value: value.clone(),
                    fetched_at: OffsetDateTime::now_utc(),
                });
                QueryState::Success(value)
            }
            Err(e) => {
                warn!(key, error = %e, "query failed");
                QueryState::Error(Error::fetch(e))
            }
        };

        if token.is_cancelled() {
            debug!(key, "query settled after its view went away");
            return None;
        }
        Some(state)
    }
}
