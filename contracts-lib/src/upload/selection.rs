//! Files picked for upload and their progress

use uuid::Uuid;

use super::UploadFile;
use super::UploadRules;
use crate::error::UploadError;

/// Where a selected file is in the upload flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Ready,
    /// Percent sent, 0 to 100.
    Uploading(u8),
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub id: Uuid,
    pub file: UploadFile,
    pub status: FileStatus,
}

/// The upload form's file list.
///
/// # Example
///
/// ```
/// use contracts_lib::upload::{UploadFile, UploadSelection};
///
/// let mut selection = UploadSelection::default();
/// let id = selection.add(UploadFile::new("nda.pdf", b"%PDF".to_vec())).unwrap();
/// assert_eq!(selection.pending().count(), 1);
/// selection.remove(id).unwrap();
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UploadSelection {
    rules: UploadRules,
    files: Vec<SelectedFile>,
}

impl UploadSelection {
    pub fn new(rules: UploadRules) -> Self {
        Self {
            rules,
            files: Vec::new(),
        }
    }

    pub fn rules(&self) -> &UploadRules {
        &self.rules
    }

    /// Validates `file` and adds it as [`FileStatus::Ready`].
    pub fn add(&mut self, file: UploadFile) -> Result<Uuid, UploadError> {
        if self.files.len() >= self.rules.max_files {
            return Err(UploadError::TooManyFiles {
                max: self.rules.max_files,
            });
        }
        self.rules.check(&file)?;

        let id = Uuid::new_v4();
        log::debug!("selected {} ({id})", file.name);
        self.files.push(SelectedFile {
            id,
            file,
            status: FileStatus::Ready,
        });
        Ok(id)
    }

    /// Drops a file along with its progress.
    pub fn remove(&mut self, id: Uuid) -> Result<SelectedFile, UploadError> {
        let index = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| UploadError::UnknownFile(id.to_string()))?;
        Ok(self.files.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&SelectedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Files still to send: everything not yet uploaded successfully.
    pub fn pending(&self) -> impl Iterator<Item = &SelectedFile> {
        self.files.iter().filter(|f| f.status != FileStatus::Success)
    }

    pub fn set_status(&mut self, id: Uuid, status: FileStatus) -> Result<(), UploadError> {
        let file = self
            .files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| UploadError::UnknownFile(id.to_string()))?;
        file.status = status;
        Ok(())
    }

    /// Records progress, capped at 100.
    pub fn set_progress(&mut self, id: Uuid, percent: u8) -> Result<(), UploadError> {
        self.set_status(id, FileStatus::Uploading(percent.min(100)))
    }

    pub fn is_uploading(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.status, FileStatus::Uploading(_)))
    }

    pub fn has_errors(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.status, FileStatus::Error(_)))
    }

    pub fn has_successes(&self) -> bool {
        self.files.iter().any(|f| f.status == FileStatus::Success)
    }
}
