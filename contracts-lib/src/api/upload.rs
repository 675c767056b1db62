//! Contract upload and processing status

use std::collections::HashMap;

use reqwest::Method;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::ContractsClient;
use crate::client::Auth;
use crate::error::Error;
use crate::error::UploadError;
use crate::model::Value;
use crate::upload::FileStatus;
use crate::upload::UploadFile;
use crate::upload::UploadSelection;

/// Optional form fields sent with an upload. Blank values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadMetadata {
    pub contract_name: Option<String>,
    pub parties: Option<String>,
}

impl UploadMetadata {
    fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("contract_name", self.contract_name.as_deref()),
            ("parties", self.parties.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.map(str::trim).filter(|v| !v.is_empty())?;
            Some((key, value))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub doc_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Body of `/api/upload/status/{doc_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadStatus {
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub processing_status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UploadStatus {
    /// Processing state, preferring `processing_status` over `status`.
    pub fn state(&self) -> Option<&str> {
        self.processing_status.as_deref().or(self.status.as_deref())
    }

    pub fn is_complete(&self) -> bool {
        self.state()
            .is_some_and(|s| s.eq_ignore_ascii_case("completed"))
    }

    pub fn is_failed(&self) -> bool {
        self.state()
            .is_some_and(|s| s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error"))
    }
}

/// Result of sending one file from an [`UploadSelection`].
#[derive(Debug)]
pub struct UploadOutcome {
    pub id: Uuid,
    pub name: String,
    pub result: Result<UploadResponse, Error>,
}

impl ContractsClient {
    /// Sends one file as `multipart/form-data`.
    pub async fn upload_contract(
        &self,
        file: &UploadFile,
        mime: &str,
        metadata: &UploadMetadata,
    ) -> Result<UploadResponse, Error> {
        let part = Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(mime)
            .map_err(|e| Error::InvalidInput(format!("invalid MIME type {mime}: {e}")))?;

        let mut form = Form::new().part("file", part);
        for (key, value) in metadata.fields() {
            form = form.text(key, value.to_string());
        }

        let url = self.endpoint(&["api", "upload"])?;
        let request = self.request(Method::POST, url, Auth::Bearer).await?;
        let response: UploadResponse = self.send(request.multipart(form), Auth::Bearer).await?;
        log::info!("uploaded {} as {}", file.name, response.doc_id);
        Ok(response)
    }

    /// Uploads every pending file in `selection`, one at a time, updating
    /// each file's status. Files already uploaded are skipped.
    ///
    /// A failed file is marked [`FileStatus::Error`] and the rest still go.
    pub async fn upload_selection(
        &self,
        selection: &mut UploadSelection,
        metadata: &UploadMetadata,
    ) -> Result<Vec<UploadOutcome>, Error> {
        if selection.is_empty() {
            return Err(UploadError::NothingSelected.into());
        }

        let pending: Vec<(Uuid, UploadFile, String)> = selection
            .pending()
            .map(|f| (f.id, f.file.clone(), selection.rules().mime_for(&f.file)))
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        for (id, file, mime) in pending {
            selection.set_progress(id, 0)?;
            let result = self.upload_contract(&file, &mime, metadata).await;
            let status = match &result {
                Ok(_) => FileStatus::Success,
                Err(err) => FileStatus::Error(err.user_messages().join("; ")),
            };
            selection.set_status(id, status)?;
            outcomes.push(UploadOutcome {
                id,
                name: file.name,
                result,
            });
        }
        Ok(outcomes)
    }

    pub async fn upload_status(&self, doc_id: &str) -> Result<UploadStatus, Error> {
        let url = self.endpoint(&["api", "upload", "status", doc_id])?;
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        self.send(request, Auth::Bearer).await
    }
}
