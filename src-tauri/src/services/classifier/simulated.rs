use super::result_table::ResultTable;
use super::Classifier;
use crate::error::AnalysisError;
use crate::models::scan_types::{Category, ResultRecord, SelectedFile};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Stand-in for a real model: waits out a fixed latency, then draws a label
/// from the result table.
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    latency: Duration,
    table: ResultTable,
}

impl SimulatedClassifier {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            table: ResultTable::default(),
        }
    }

    pub fn with_table(mut self, table: ResultTable) -> Self {
        self.table = table;
        self
    }

    // Kept out of `classify` so the thread-local rng never lives across an await.
    fn draw(&self, category: Category) -> Result<String, AnalysisError> {
        self.table.pick(category, &mut rand::thread_rng())
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl Classifier for SimulatedClassifier {
    async fn classify(
        &self,
        file: &SelectedFile,
        category: Category,
    ) -> Result<ResultRecord, AnalysisError> {
        debug!(
            "Simulating analysis of {} as {} ({:?})",
            file.name(),
            category,
            self.latency
        );
        tokio::time::sleep(self.latency).await;
        let predicted_class = self.draw(category)?;
        Ok(ResultRecord::new(category, predicted_class))
    }
}
