use crate::error::UploadError;
use crate::models::scan_types::SelectedFile;
use crate::services::session::Session;
use base64::Engine;
use log::{info, warn};
use mime_guess::mime;
use std::path::Path;
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A scan read from disk that has not been handed to a session yet.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub declared_type: String,
}

/// True for any declared type under `image/*`.
pub fn is_image_type(declared_type: &str) -> bool {
    declared_type
        .trim()
        .parse::<mime::Mime>()
        .map(|m| m.type_().as_str().eq_ignore_ascii_case(mime::IMAGE.as_str()))
        .unwrap_or(false)
}

/// Guesses the declared type of a picked file from its extension.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}

/// Decodes a dropped file's contents sent by the renderer as base64. A leading
/// `data:<type>;base64,` header is tolerated.
pub fn decode_payload(name: &str, payload: &str) -> Result<Vec<u8>, UploadError> {
    let encoded = match payload.split_once(";base64,") {
        Some((header, body)) if header.starts_with("data:") => body,
        _ => payload,
    };
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|source| UploadError::Encoding {
            name: name.to_string(),
            source,
        })
}

/// Accepts `bytes` as the session's scan if `declared_type` is an image type.
/// A rejected file leaves the session exactly as it was.
pub fn submit_file(
    session: &mut Session,
    name: impl Into<String>,
    bytes: impl Into<Arc<[u8]>>,
    declared_type: &str,
) -> Result<SelectedFile, UploadError> {
    let name = name.into();
    if !is_image_type(declared_type) {
        warn!("Rejected upload {} with declared type {:?}", name, declared_type);
        return Err(UploadError::RejectedFile {
            name,
            mime_type: declared_type.to_string(),
        });
    }

    let file = SelectedFile::new(name, declared_type.trim().to_string(), bytes.into());
    session.replace_file(file.clone())?;
    info!("Accepted scan {} ({}, {} bytes)", file.name(), file.mime_type(), file.size());
    Ok(file)
}

/// Reads a picked file from disk. Non-image extensions are refused before any
/// bytes are read.
pub async fn load_scan(path: &Path) -> Result<PendingUpload, UploadError> {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let declared_type = guess_mime_type(path);

    if !is_image_type(&declared_type) {
        return Err(UploadError::RejectedFile {
            name,
            mime_type: declared_type,
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(PendingUpload {
        name,
        bytes,
        declared_type,
    })
}

impl PendingUpload {
    pub fn submit(self, session: &mut Session) -> Result<SelectedFile, UploadError> {
        submit_file(session, self.name, self.bytes, &self.declared_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan_types::{AnalysisState, Category, ResultRecord};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_image_type_matching() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("IMAGE/WEBP"));
        assert!(is_image_type(" image/svg+xml "));
        assert!(is_image_type("image/*"));

        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type("imagepng"));
        assert!(!is_image_type(""));
    }

    #[test]
    fn test_submit_image_stores_file() {
        let mut session = Session::default();
        let file = submit_file(&mut session, "scan.png", vec![1u8, 2, 3], "image/png").unwrap();

        assert_eq!(file.name(), "scan.png");
        assert_eq!(session.file(), Some(&file));
        assert!(session.can_analyze());
    }

    #[test]
    fn test_submit_non_image_is_rejected() {
        let mut session = Session::default();
        let result = submit_file(&mut session, "notes.txt", vec![1u8], "text/plain");

        assert!(matches!(result, Err(UploadError::RejectedFile { .. })));
        assert!(session.file().is_none());
        assert_eq!(session.state(), &AnalysisState::Idle);
    }

    #[test]
    fn test_rejection_keeps_previous_file_and_result() {
        let mut session = Session::default();
        submit_file(&mut session, "scan.png", vec![1u8], "image/png").unwrap();
        let ticket = session.begin_analysis().unwrap();
        let record = ResultRecord::new(Category::BrainTumor, "Meningioma");
        session.finish_analysis(&ticket, Ok(record.clone()));

        let result = submit_file(&mut session, "report.pdf", vec![2u8], "application/pdf");

        assert!(result.is_err());
        assert_eq!(session.file().map(|f| f.name()), Some("scan.png"));
        assert_eq!(session.state().result(), Some(&record));
    }

    #[test]
    fn test_new_file_clears_failure() {
        let mut session = Session::default();
        submit_file(&mut session, "a.png", vec![1u8], "image/png").unwrap();
        let ticket = session.begin_analysis().unwrap();
        session.finish_analysis(&ticket, Err(crate::error::AnalysisError::Backend("x".into())));
        assert!(session.state().error().is_some());

        submit_file(&mut session, "b.jpg", vec![2u8], "image/jpeg").unwrap();
        assert_eq!(session.state(), &AnalysisState::Idle);
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload("a.png", "YWJj").unwrap(), b"abc");
        assert_eq!(
            decode_payload("a.png", "data:image/png;base64,YWJj").unwrap(),
            b"abc"
        );
        assert!(decode_payload("a.png", "").unwrap().is_empty());

        let err = decode_payload("a.png", "not base64!").unwrap_err();
        assert!(matches!(err, UploadError::Encoding { .. }));
        assert!(err.to_string().contains("a.png"));
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("scan.PNG")), "image/png");
        assert_eq!(guess_mime_type(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("scan")), FALLBACK_MIME);
    }

    #[tokio::test]
    async fn test_load_scan_reads_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mri.png");
        fs::write(&path, b"png-bytes").unwrap();

        let pending = load_scan(&path).await.unwrap();
        assert_eq!(pending.name, "mri.png");
        assert_eq!(pending.declared_type, "image/png");
        assert_eq!(pending.bytes, b"png-bytes");

        let mut session = Session::default();
        pending.submit(&mut session).unwrap();
        assert_eq!(session.file().map(|f| f.bytes()), Some(&b"png-bytes"[..]));
    }

    #[tokio::test]
    async fn test_load_scan_rejects_non_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let result = load_scan(&path).await;
        assert!(matches!(result, Err(UploadError::RejectedFile { .. })));
    }

    #[tokio::test]
    async fn test_load_scan_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_scan(&dir.path().join("missing.png")).await;
        assert!(matches!(result, Err(UploadError::Io { .. })));
    }
}
