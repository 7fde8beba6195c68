use crate::error::AnalysisError;
use crate::models::scan_types::Category;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Candidate predicted labels per category.
#[derive(Debug, Clone)]
pub struct ResultTable {
    labels: HashMap<Category, Vec<String>>,
}

impl ResultTable {
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    pub fn with_labels<I, S>(mut self, category: Category, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels
            .insert(category, labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn labels(&self, category: Category) -> &[String] {
        self.labels
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Picks one of `category`'s labels uniformly at random.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        category: Category,
        rng: &mut R,
    ) -> Result<String, AnalysisError> {
        self.labels(category)
            .choose(rng)
            .cloned()
            .ok_or(AnalysisError::NoCandidates(category))
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::empty()
            .with_labels(Category::BrainTumor, ["Glioma", "Meningioma", "No Tumor"])
            .with_labels(
                Category::AlzheimersDisease,
                ["Mild", "Moderate", "No Alzheimer's"],
            )
            .with_labels(
                Category::MultipleSclerosis,
                ["Active Lesions", "Inactive Lesions", "No MS Detected"],
            )
    }
}
