use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Disease category the user picks before running an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Brain Tumor")]
    BrainTumor,
    #[serde(rename = "Alzheimer's Disease")]
    AlzheimersDisease,
    #[serde(rename = "Multiple Sclerosis")]
    MultipleSclerosis,
}

impl Category {
    /// All categories in the order the select control shows them.
    pub const ALL: [Category; 3] = [
        Category::BrainTumor,
        Category::AlzheimersDisease,
        Category::MultipleSclerosis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::BrainTumor => "Brain Tumor",
            Category::AlzheimersDisease => "Alzheimer's Disease",
            Category::MultipleSclerosis => "Multiple Sclerosis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The scan currently held by the session. Bytes and the encoded preview are
/// shared, so clones are cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
    preview: Arc<str>,
}

impl SelectedFile {
    pub(crate) fn new(name: String, mime_type: String, bytes: Arc<[u8]>) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let preview = format!("data:{};base64,{}", mime_type, encoded).into();
        Self {
            name,
            mime_type,
            bytes,
            preview,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `data:` URL the front end can drop straight into an `<img src>`.
    /// Encoded once when the file is accepted.
    pub fn preview_data_url(&self) -> &str {
        &self.preview
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub disease: Category,
    pub predicted_class: String,
}

impl ResultRecord {
    pub fn new(disease: Category, predicted_class: impl Into<String>) -> Self {
        Self {
            disease,
            predicted_class: predicted_class.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Running,
    Succeeded(ResultRecord),
    Failed(String),
}

impl AnalysisState {
    pub fn is_running(&self) -> bool {
        matches!(self, AnalysisState::Running)
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        match self {
            AnalysisState::Succeeded(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub mime_type: String,
    pub size: usize,
}

impl From<&SelectedFile> for FileSummary {
    fn from(file: &SelectedFile) -> Self {
        Self {
            name: file.name().to_string(),
            mime_type: file.mime_type().to_string(),
            size: file.size(),
        }
    }
}

/// Read-only view of the session handed to the renderer.
///
/// `preview` is only filled in when the held file changed or the renderer asks
/// for the full view; state updates leave it out and the renderer keeps the
/// image it already has.
#[derive(Debug, Serialize, Clone)]
pub struct SessionSnapshot {
    pub file: Option<FileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub category: Category,
    pub state: AnalysisState,
    pub loading: bool,
    pub can_analyze: bool,
}
