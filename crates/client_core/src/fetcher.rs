//! Generic whole-collection fetcher with a loading flag.
//!
//! A [`ListFetcher`] issues exactly one read per activation and publishes
//! its progress through a watch channel. Failures are logged and kept as
//! [`FetchState::Failed`]; the legacy `(items, is_loading)` view reports them
//! as an empty, finished collection.

use std::sync::Arc;

use shared::{
    error::FetchError,
    query::{CollectionQuery, OrderBy, SortDirection},
    record::Record,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info};

use crate::store::RemoteStore;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> FetchState<T> {
    /// Empty while loading and after a failure.
    pub fn items(&self) -> &[T] {
        match self {
            FetchState::Loaded(items) => items,
            FetchState::Loading | FetchState::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// State tagged with the activation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub activation: u64,
    pub state: FetchState<T>,
}

/// Reads, decodes and orders a whole collection.
pub async fn fetch_collection<T: Record>(
    store: &dyn RemoteStore,
    query: &CollectionQuery,
) -> Result<Vec<T>, FetchError> {
    let rows = store.select_all(query).await?;
    let mut items = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value::<T>(row).map_err(|err| {
                FetchError::decode(query.collection.clone(), format!("row {index}: {err}"))
            })
        })
        .collect::<Result<Vec<T>, _>>()?;
    sort_records(&mut items, &query.order);
    Ok(items)
}

/// Stable sort on the query's order field. Ties, and fields the record type
/// cannot compare, keep the store's order.
pub fn sort_records<T: Record>(items: &mut [T], order: &OrderBy) {
    items.sort_by(|a, b| {
        let ordering = a
            .compare_by(b, &order.field)
            .unwrap_or(std::cmp::Ordering::Equal);
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub struct ListFetcher<T: Record> {
    store: Arc<dyn RemoteStore>,
    query: CollectionQuery,
    state: Arc<watch::Sender<FetchSnapshot<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Record> ListFetcher<T> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self::with_query(store, T::default_query())
    }

    pub fn with_query(store: Arc<dyn RemoteStore>, query: CollectionQuery) -> Self {
        let (state, _) = watch::channel(FetchSnapshot {
            activation: 0,
            state: FetchState::Loading,
        });
        Self {
            store,
            query,
            state: Arc::new(state),
            task: None,
        }
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }

    /// Starts a new activation on the current tokio runtime. Any read still in
    /// flight from a previous activation is aborted and its result dropped.
    pub fn activate(&mut self) {
        self.abort_in_flight();

        let mut activation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.activation += 1;
            snapshot.state = FetchState::Loading;
            activation = snapshot.activation;
        });

        let store = Arc::clone(&self.store);
        let query = self.query.clone();
        let state = Arc::clone(&self.state);
        self.task = Some(tokio::spawn(async move {
            let next = match fetch_collection::<T>(store.as_ref(), &query).await {
                Ok(items) => {
                    info!(
                        collection = %query.collection,
                        count = items.len(),
                        "collection loaded"
                    );
                    FetchState::Loaded(items)
                }
                Err(error) => {
                    error!(collection = %query.collection, %error, "error fetching collection");
                    FetchState::Failed(error.failure.to_string())
                }
            };
            // A newer activation or a deactivate owns the slot now.
            state.send_if_modified(|snapshot| {
                if snapshot.activation != activation {
                    return false;
                }
                snapshot.state = next;
                true
            });
        }));
    }

    /// Tears down the current activation. State stays where it was and a late
    /// response is discarded.
    pub fn deactivate(&mut self) {
        self.abort_in_flight();
        self.state.send_modify(|snapshot| snapshot.activation += 1);
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().state.clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().state.items().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().state.is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot<T>> {
        self.state.subscribe()
    }

    /// Waits for the current activation to finish. Never returns for a fetcher
    /// that was not activated or whose read hangs.
    pub async fn wait_ready(&self) -> FetchState<T> {
        let mut receiver = self.state.subscribe();
        let state = match receiver
            .wait_for(|snapshot| !snapshot.state.is_loading())
            .await
        {
            Ok(snapshot) => snapshot.state.clone(),
            Err(_) => self.state(),
        };
        state
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T: Record> Drop for ListFetcher<T> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
