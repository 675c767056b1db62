//! Upload rejection errors

/// Why a file was refused before it reached the API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("File {name} is too large. Maximum size is {max}.")]
    FileTooLarge { name: String, max: String },

    #[error("File {name} is not a supported format. Please upload {accepted} files.")]
    InvalidType { name: String, accepted: String },

    #[error("Only {max} file(s) can be uploaded at once.")]
    TooManyFiles { max: usize },

    #[error("Please select at least one file to upload")]
    NothingSelected,

    #[error("No selected file with id {0}")]
    UnknownFile(String),
}
