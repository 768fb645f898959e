use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::data::Dataset;

/// Process-lifetime registry of ingested datasets.
///
/// Write-once, read-many: a dataset is inserted exactly once, never updated
/// or evicted, and read concurrently by any number of queries. Ids start at 1
/// and are allocated by an atomic counter, so concurrent inserts never
/// collide. The dataset is fully built before it is published under the lock,
/// so readers observe either the whole dataset or `None`.
#[derive(Debug, Default)]
pub struct DatasetStore {
    next_id: AtomicU64,
    datasets: RwLock<HashMap<u64, Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a dataset and return its freshly allocated id.
    pub fn insert(&self, dataset: Dataset) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("storing dataset {} ({} rows)", id, dataset.len());
        self.datasets.write().insert(id, Arc::new(dataset));
        id
    }

    /// Look up a dataset by id. Never blocks other readers.
    pub fn get(&self, id: u64) -> Option<Arc<Dataset>> {
        self.datasets.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.datasets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
