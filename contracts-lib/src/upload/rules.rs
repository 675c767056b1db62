//! What the upload form accepts

use std::path::Path;

use super::format_file_size;
use crate::error::Error;
use crate::error::UploadError;

/// A file picked for upload, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    /// MIME type reported by the picker, if any.
    pub mime: Option<String>,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: None,
            data,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk, naming it after the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("not a file: {}", path.display())))?;
        Ok(Self::new(name, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lower-cased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// One accepted file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedType {
    pub mime: &'static str,
    pub extension: &'static str,
}

pub const PDF: AcceptedType = AcceptedType {
    mime: "application/pdf",
    extension: "pdf",
};
pub const TXT: AcceptedType = AcceptedType {
    mime: "text/plain",
    extension: "txt",
};
pub const DOCX: AcceptedType = AcceptedType {
    mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    extension: "docx",
};

/// Type, size and count limits for an upload selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    /// Default: PDF, TXT and DOCX.
    pub accepted: Vec<AcceptedType>,
    /// Default: 10 MiB.
    pub max_size: u64,
    /// Default: 1.
    pub max_files: usize,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self {
            accepted: vec![PDF, TXT, DOCX],
            max_size: 10 * 1024 * 1024,
            max_files: 1,
        }
    }
}

impl UploadRules {
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn with_max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// The accepted type matching the file's MIME type or, failing that, its
    /// extension.
    pub fn accepted_type(&self, file: &UploadFile) -> Option<&AcceptedType> {
        let by_mime = file
            .mime
            .as_deref()
            .and_then(|mime| self.accepted.iter().find(|t| t.mime.eq_ignore_ascii_case(mime)));
        by_mime.or_else(|| {
            let ext = file.extension()?;
            self.accepted.iter().find(|t| t.extension == ext)
        })
    }

    /// Checks type then size.
    pub fn check(&self, file: &UploadFile) -> Result<(), UploadError> {
        if self.accepted_type(file).is_none() {
            return Err(UploadError::InvalidType {
                name: file.name.clone(),
                accepted: self.accepted_list(),
            });
        }
        if file.size() > self.max_size {
            return Err(UploadError::FileTooLarge {
                name: file.name.clone(),
                max: format_file_size(self.max_size),
            });
        }
        Ok(())
    }

    /// MIME type to send for `file`.
    pub fn mime_for(&self, file: &UploadFile) -> String {
        match (&file.mime, self.accepted_type(file)) {
            (Some(mime), _) => mime.clone(),
            (None, Some(accepted)) => accepted.mime.to_string(),
            (None, None) => "application/octet-stream".to_string(),
        }
    }

    /// `PDF, TXT, or DOCX`.
    fn accepted_list(&self) -> String {
        let names: Vec<String> = self
            .accepted
            .iter()
            .map(|t| t.extension.to_uppercase())
            .collect();
        match names.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [a, b] => format!("{a} or {b}"),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_by_mime_or_extension() {
        let rules = UploadRules::default();
        assert!(rules.check(&UploadFile::new("lease.PDF", vec![1])).is_ok());
        assert!(rules
            .check(&UploadFile::new("blob", vec![1]).with_mime("text/plain"))
            .is_ok());
        assert_eq!(rules.mime_for(&UploadFile::new("a.docx", vec![])), DOCX.mime);
    }

    #[test]
    fn rejects_unknown_types() {
        let err = UploadRules::default()
            .check(&UploadFile::new("photo.png", vec![1]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File photo.png is not a supported format. Please upload PDF, TXT, or DOCX files."
        );
    }

    #[test]
    fn rejects_large_files() {
        let rules = UploadRules::default().with_max_size(4);
        let err = rules.check(&UploadFile::new("a.txt", vec![0; 5])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File a.txt is too large. Maximum size is 4 Bytes."
        );
    }
}
