use crate::error::{AnalysisError, UploadError};
use crate::models::scan_types::{Category, ResultRecord, SessionSnapshot};
use crate::services::session::{AnalysisTicket, Session};
use crate::services::upload;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the window's session, managed as app state.
#[derive(Clone, Default)]
pub struct SessionManager {
    session: Arc<Mutex<Session>>,
}

impl SessionManager {
    pub fn new(category: Category) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(category))),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Snapshot carrying the image preview, for a renderer that has none yet.
    pub async fn full_snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot_with_preview()
    }

    pub async fn select_category(&self, category: Category) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.select_category(category);
        session.snapshot()
    }

    pub async fn submit_file(
        &self,
        name: String,
        bytes: Vec<u8>,
        declared_type: &str,
    ) -> Result<SessionSnapshot, UploadError> {
        let mut session = self.session.lock().await;
        upload::submit_file(&mut session, name, bytes, declared_type)?;
        Ok(session.snapshot_with_preview())
    }

    pub async fn submit_path(&self, path: &Path) -> Result<SessionSnapshot, UploadError> {
        // Read before locking so a slow disk never blocks the session.
        let pending = upload::load_scan(path).await?;
        let mut session = self.session.lock().await;
        pending.submit(&mut session)?;
        Ok(session.snapshot_with_preview())
    }

    pub(crate) async fn begin_analysis(&self) -> Option<(AnalysisTicket, SessionSnapshot)> {
        let mut session = self.session.lock().await;
        let ticket = session.begin_analysis()?;
        Some((ticket, session.snapshot()))
    }

    pub(crate) async fn finish_analysis(
        &self,
        ticket: &AnalysisTicket,
        outcome: Result<ResultRecord, AnalysisError>,
    ) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.finish_analysis(ticket, outcome);
        session.snapshot()
    }
}
