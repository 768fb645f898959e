use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::data::Dataset;
use crate::engine;
use crate::error::VizError;
use crate::query::{BarChart, BarQuery};
use crate::store::DatasetStore;

/// What ingestion reports back: the dataset's id, how many usable rows it
/// has, and which headers act as grouping keys versus aggregation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub dataset_id: u64,
    pub count: usize,
    pub category_fields: Vec<String>,
    pub measure_fields: Vec<String>,
}

/// The two operations exposed to transport collaborators: register a dataset
/// once, then answer any number of bar-chart queries against it.
#[derive(Debug, Default)]
pub struct VizService {
    store: DatasetStore,
}

impl VizService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize and publish a dataset. The caller has already dropped
    /// rows containing blank fields; if nothing is left, that is `EmptyInput`.
    pub fn ingest(
        &self,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<IngestSummary, VizError> {
        if rows.is_empty() {
            return Err(VizError::EmptyInput);
        }

        let dataset = Dataset::new(headers, rows);
        let classification = classify(&dataset);
        let count = dataset.len();
        let dataset_id = self.store.insert(dataset);
        info!(
            "ingested dataset {} ({} rows, {} measures)",
            dataset_id,
            count,
            classification.measure_fields.len()
        );

        Ok(IngestSummary {
            dataset_id,
            count,
            category_fields: classification.category_fields,
            measure_fields: classification.measure_fields,
        })
    }

    /// Run one query against a stored dataset.
    pub fn query(&self, dataset_id: u64, query: &BarQuery) -> Result<BarChart, VizError> {
        let dataset = self
            .store
            .get(dataset_id)
            .ok_or(VizError::DatasetNotFound(dataset_id))?;
        debug!(
            "querying dataset {} by '{}'",
            dataset_id, query.category_field
        );
        engine::run(&dataset, query)
    }
}
