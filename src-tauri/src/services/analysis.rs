use crate::error::AnalysisError;
use crate::models::scan_types::{Category, ResultRecord, SessionSnapshot};
use crate::services::classifier::simulated::SimulatedClassifier;
use crate::services::classifier::Classifier;
use crate::services::session::{AnalysisTicket, Session};
use crate::services::session_manager::SessionManager;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

/// Drives one analysis run: Running, classify, then Succeeded or Failed.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn Classifier>,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn simulated(latency: Duration) -> Self {
        Self::new(Arc::new(SimulatedClassifier::new(latency)))
    }

    /// Runs against an owned session and hands it back. With no file held the
    /// session comes back untouched.
    pub async fn run_analysis(&self, mut session: Session) -> Session {
        let Some(ticket) = session.begin_analysis() else {
            return session;
        };
        let outcome = self.classify(&ticket).await;
        session.finish_analysis(&ticket, outcome);
        session
    }

    /// Runs against the shared session. `on_started` sees the Running snapshot
    /// before the classifier is awaited; the lock is not held meanwhile.
    /// Returns `None` if nothing was started.
    ///
    /// The run lives on its own task, so it still reaches Succeeded or Failed
    /// when the caller stops waiting for it.
    pub async fn run_shared<F>(
        &self,
        manager: &SessionManager,
        on_started: F,
    ) -> Option<SessionSnapshot>
    where
        F: FnOnce(&SessionSnapshot) + Send,
    {
        let (ticket, running) = manager.begin_analysis().await?;
        on_started(&running);

        let analyzer = self.clone();
        let shared = manager.clone();
        let run = tokio::spawn(async move {
            let outcome = analyzer.classify(&ticket).await;
            shared.finish_analysis(&ticket, outcome).await
        });

        match run.await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("Analysis run failed to complete: {}", e);
                Some(manager.snapshot().await)
            }
        }
    }

    async fn classify(&self, ticket: &AnalysisTicket) -> Result<ResultRecord, AnalysisError> {
        info!(
            "Analyzing {} as {} (run {})",
            ticket.file.name(),
            ticket.category,
            ticket.run
        );

        // Spawned so a panicking classifier comes back as an error instead of
        // leaving the session Running.
        let classifier = self.classifier.clone();
        let job = ticket.clone();
        let outcome = tokio::spawn(async move {
            classifier
                .classify(&job.file, job.category)
                .await
                .and_then(|record| ensure_category(record, job.category))
        })
        .await
        .map_err(|e| AnalysisError::Backend(format!("Analysis task failed: {}", e)))
        .and_then(|outcome| outcome);

        match &outcome {
            Ok(record) => info!(
                "Run {} finished: {} / {}",
                ticket.run, record.disease, record.predicted_class
            ),
            Err(e) => error!("Error analyzing image {}: {}", ticket.file.name(), e),
        }
        outcome
    }
}

fn ensure_category(
    record: ResultRecord,
    expected: Category,
) -> Result<ResultRecord, AnalysisError> {
    if record.disease == expected {
        Ok(record)
    } else {
        Err(AnalysisError::CategoryMismatch {
            expected,
            actual: record.disease,
        })
    }
}
