use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::prompts::RESUME_CLOSE_TAG;

/// Extracted text of one resume file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeText {
    pub file_name: String,
    pub text: String,
}

/// Every resume of a run, in file-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub resumes: Vec<ResumeText>,
}

impl ResumeDocument {
    pub fn is_empty(&self) -> bool {
        self.resumes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resumes.len()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.resumes.iter().any(|r| r.file_name == file_name)
    }

    /// Renders the upload: `<name.pdf>\n{text}\n</resume>` per resume, concatenated.
    pub fn tagged(&self) -> String {
        self.resumes
            .iter()
            .map(|r| format!("<{}>\n{}\n{RESUME_CLOSE_TAG}", r.file_name, r.text))
            .collect()
    }
}

/// Lists the `.pdf` files directly inside `dir`, sorted by name.
/// The extension check is exact: `resume.PDF` is skipped.
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("pdf") {
            paths.push(path);
        } else {
            debug!("Skipping non-PDF entry {}", path.display());
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

pub fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path).map_err(|e| AppError::io(path, e))?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| AppError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads every PDF in `dir` into one document. Any unreadable PDF fails the load.
pub fn load_resume_dir(dir: &Path) -> Result<ResumeDocument, AppError> {
    let mut resumes = Vec::new();

    for path in list_pdf_files(dir)? {
        let text = extract_pdf_text(&path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Extracted {} chars from {}", text.len(), file_name);
        resumes.push(ResumeText { file_name, text });
    }

    Ok(ResumeDocument { resumes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn resume(name: &str, text: &str) -> ResumeText {
        ResumeText {
            file_name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_tagged_concatenates_blocks() {
        let doc = ResumeDocument {
            resumes: vec![resume("a.pdf", "Alice"), resume("b.pdf", "Bob")],
        };
        assert_eq!(
            doc.tagged(),
            "<a.pdf>\nAlice\n</resume><b.pdf>\nBob\n</resume>"
        );
        assert!(doc.contains("b.pdf"));
        assert!(!doc.contains("c.pdf"));
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(ResumeDocument::default().tagged(), "");
    }

    #[test]
    fn test_list_pdf_files_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["zed.pdf", "amy.pdf", "notes.txt", "upper.PDF"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<_> = list_pdf_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["amy.pdf", "zed.pdf"]);
    }

    #[test]
    fn test_empty_dir_loads_empty_document() {
        let dir = tempdir().unwrap();
        assert!(load_resume_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_resume_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_invalid_pdf_is_pdf_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        let err = load_resume_dir(dir.path()).unwrap_err();
        match err {
            AppError::Pdf { path, .. } => assert!(path.ends_with("broken.pdf")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
