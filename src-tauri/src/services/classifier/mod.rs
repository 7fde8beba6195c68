pub mod result_table;
pub mod simulated;

use crate::error::AnalysisError;
use crate::models::scan_types::{Category, ResultRecord, SelectedFile};
use async_trait::async_trait;

/// Anything that can turn a scan and a category into a prediction.
///
/// The simulated classifier is the only implementation today; a network-backed
/// one would implement this trait and nothing upstream would change.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        file: &SelectedFile,
        category: Category,
    ) -> Result<ResultRecord, AnalysisError>;
}
