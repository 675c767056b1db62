//! Contract listing, detail, deletion and chunks

use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use crate::ContractsClient;
use crate::client::Auth;
use crate::error::Error;
use crate::model::Contract;
use crate::model::Value;

/// One page of `/api/contracts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractList {
    #[serde(default)]
    pub documents: Vec<Contract>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

/// A clause the analysis pipeline extracted from a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// 0.0 to 1.0.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Risk,
    Recommendation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type", default = "other_kind")]
    pub kind: InsightKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `low`, `medium` or `high` for risks.
    #[serde(default)]
    pub severity: Option<String>,
}

fn other_kind() -> InsightKind {
    InsightKind::Other
}

/// Body of `/api/contracts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDetail {
    pub document: Contract,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub total_chunks: u64,
}

impl ContractDetail {
    pub fn risks(&self) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(|i| i.kind == InsightKind::Risk)
    }

    pub fn recommendations(&self) -> impl Iterator<Item = &Insight> {
        self.insights
            .iter()
            .filter(|i| i.kind == InsightKind::Recommendation)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A text chunk indexed for question answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub chunk_id: Option<String>,
    #[serde(default, alias = "text")]
    pub text_chunk: Option<String>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// One page of `/api/contracts/{id}/chunks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkList {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

impl ContractsClient {
    /// Lists contracts, one server page at a time.
    pub async fn list_contracts(&self, page: u32, per_page: u32) -> Result<ContractList, Error> {
        let mut url = self.endpoint(&["api", "contracts"])?;
        paginate(&mut url, page, per_page);
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        let list: ContractList = self.send(request, Auth::Bearer).await?;
        log::debug!("fetched {} of {} contracts", list.documents.len(), list.total);
        Ok(list)
    }

    pub async fn get_contract(&self, doc_id: &str) -> Result<ContractDetail, Error> {
        let url = self.endpoint(&["api", "contracts", doc_id])?;
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        self.send(request, Auth::Bearer).await
    }

    pub async fn delete_contract(&self, doc_id: &str) -> Result<DeleteResponse, Error> {
        let url = self.endpoint(&["api", "contracts", doc_id])?;
        let request = self.request(Method::DELETE, url, Auth::Bearer).await?;
        let body = self.send_raw(request, Auth::Bearer).await?;
        log::info!("deleted contract {doc_id}");
        // Some deployments answer 204 with no body.
        if body.trim().is_empty() {
            return Ok(DeleteResponse::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn contract_chunks(
        &self,
        doc_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ChunkList, Error> {
        let mut url = self.endpoint(&["api", "contracts", doc_id, "chunks"])?;
        paginate(&mut url, page, per_page);
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        self.send(request, Auth::Bearer).await
    }
}

fn paginate(url: &mut url::Url, page: u32, per_page: u32) {
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &per_page.to_string());
}
