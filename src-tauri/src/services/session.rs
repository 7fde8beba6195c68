use crate::error::{AnalysisError, UploadError};
use crate::models::scan_types::{
    AnalysisState, Category, FileSummary, ResultRecord, SelectedFile, SessionSnapshot,
};

/// Message shown in the error panel. The underlying cause only goes to the log.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while analyzing the image. Please try again.";

/// Handed out by [`Session::begin_analysis`] and required to finish the same run.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub run: u64,
    pub file: SelectedFile,
    pub category: Category,
}

/// All UI state for one window: held file, chosen category and analysis state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    file: Option<SelectedFile>,
    category: Category,
    state: AnalysisState,
    run: u64,
}

impl Session {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn can_analyze(&self) -> bool {
        self.file.is_some() && !self.is_running()
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Swaps in a new scan and drops any stale result or error.
    pub fn replace_file(&mut self, file: SelectedFile) -> Result<(), UploadError> {
        if self.is_running() {
            return Err(UploadError::Busy);
        }
        self.file = Some(file);
        self.state = AnalysisState::Idle;
        Ok(())
    }

    /// Moves to `Running`. Returns `None` without touching anything when there is
    /// no file or a run is already in flight.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if !self.can_analyze() {
            return None;
        }
        let file = self.file.clone()?;
        self.run += 1;
        self.state = AnalysisState::Running;
        Some(AnalysisTicket {
            run: self.run,
            file,
            category: self.category,
        })
    }

    /// Applies the outcome of the run `ticket` was issued for. Returns false when
    /// the ticket no longer matches the in-flight run.
    pub fn finish_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<ResultRecord, AnalysisError>,
    ) -> bool {
        if !self.is_running() || ticket.run != self.run {
            return false;
        }
        self.state = match outcome {
            Ok(record) => AnalysisState::Succeeded(record),
            Err(_) => AnalysisState::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
        };
        true
    }

    /// State-only view. Leaves the image preview out.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            file: self.file.as_ref().map(FileSummary::from),
            preview: None,
            category: self.category,
            state: self.state.clone(),
            loading: self.is_running(),
            can_analyze: self.can_analyze(),
        }
    }

    /// Full view including the held file's `data:` preview.
    pub fn snapshot_with_preview(&self) -> SessionSnapshot {
        SessionSnapshot {
            preview: self.file.as_ref().map(|f| f.preview_data_url().to_string()),
            ..self.snapshot()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn scan(name: &str) -> SelectedFile {
        SelectedFile::new(
            name.to_string(),
            "image/png".to_string(),
            Arc::from(&[0u8, 1, 2][..]),
        )
    }

    #[test]
    fn test_begin_without_file_is_noop() {
        let mut session = Session::default();
        assert!(session.begin_analysis().is_none());
        assert_eq!(session.state(), &AnalysisState::Idle);
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_begin_while_running_is_noop() {
        let mut session = Session::default();
        session.replace_file(scan("a.png")).unwrap();

        let first = session.begin_analysis();
        assert!(first.is_some());
        assert!(session.is_running());
        assert!(session.begin_analysis().is_none());
        assert!(session.is_running());
    }

    #[test]
    fn test_ticket_captures_category_at_trigger() {
        let mut session = Session::new(Category::MultipleSclerosis);
        session.replace_file(scan("a.png")).unwrap();

        let ticket = session.begin_analysis().unwrap();
        session.select_category(Category::BrainTumor);

        assert_eq!(ticket.category, Category::MultipleSclerosis);
        assert_eq!(ticket.file.name(), "a.png");
    }

    #[test]
    fn test_success_then_new_file_resets_to_idle() {
        let mut session = Session::default();
        session.replace_file(scan("a.png")).unwrap();
        let ticket = session.begin_analysis().unwrap();
        let record = ResultRecord::new(Category::BrainTumor, "Glioma");

        assert!(session.finish_analysis(&ticket, Ok(record.clone())));
        assert_eq!(session.state().result(), Some(&record));

        session.replace_file(scan("b.png")).unwrap();
        assert_eq!(session.state(), &AnalysisState::Idle);
        assert_eq!(session.file().map(|f| f.name()), Some("b.png"));
    }

    #[test]
    fn test_failure_uses_generic_message_and_is_recoverable() {
        let mut session = Session::default();
        session.replace_file(scan("a.png")).unwrap();
        let ticket = session.begin_analysis().unwrap();

        session.finish_analysis(&ticket, Err(AnalysisError::Backend("boom".to_string())));
        assert_eq!(session.state().error(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(session.can_analyze());

        let retry = session.begin_analysis().unwrap();
        assert!(retry.run > ticket.run);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut session = Session::default();
        session.replace_file(scan("a.png")).unwrap();
        let first = session.begin_analysis().unwrap();
        session.finish_analysis(&first, Ok(ResultRecord::new(Category::BrainTumor, "Glioma")));

        let second = session.begin_analysis().unwrap();
        let applied = session.finish_analysis(
            &first,
            Ok(ResultRecord::new(Category::BrainTumor, "Meningioma")),
        );

        assert!(!applied);
        assert!(session.is_running());
        assert!(session.finish_analysis(
            &second,
            Ok(ResultRecord::new(Category::BrainTumor, "No Tumor"))
        ));
    }

    #[test]
    fn test_replace_file_refused_while_running() {
        let mut session = Session::default();
        session.replace_file(scan("a.png")).unwrap();
        session.begin_analysis().unwrap();

        let err = session.replace_file(scan("b.png")).unwrap_err();
        assert!(matches!(err, UploadError::Busy));
        assert_eq!(session.file().map(|f| f.name()), Some("a.png"));
    }

    #[test]
    fn test_snapshot_flags() {
        let mut session = Session::default();
        let empty = session.snapshot();
        assert!(empty.file.is_none());
        assert!(!empty.loading);
        assert!(!empty.can_analyze);

        session.replace_file(scan("a.png")).unwrap();
        assert!(session.snapshot().can_analyze);

        session.begin_analysis().unwrap();
        let running = session.snapshot();
        assert!(running.loading);
        assert!(!running.can_analyze);
        assert_eq!(running.file.unwrap().name, "a.png");
    }

    #[test]
    fn test_preview_only_in_full_snapshot() {
        let mut session = Session::default();
        assert!(session.snapshot_with_preview().preview.is_none());

        session.replace_file(scan("a.png")).unwrap();
        let full = session.snapshot_with_preview();
        assert_eq!(full.preview.as_deref(), Some("data:image/png;base64,AAEC"));

        let update = session.snapshot();
        assert!(update.preview.is_none());
        assert_eq!(update.file, full.file);

        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("preview").is_none());
    }
}
