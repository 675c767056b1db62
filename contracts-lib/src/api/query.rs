//! Question answering over uploaded contracts

use std::collections::HashMap;
use std::collections::VecDeque;

use chrono::DateTime;
use chrono::Utc;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use crate::ContractsClient;
use crate::client::Auth;
use crate::error::Error;
use crate::model::Value;

/// Result count requested when the caller does not pick one.
pub const DEFAULT_ASK_LIMIT: usize = 5;

/// Entries kept by [`QueryHistory`].
pub const HISTORY_CAPACITY: usize = 10;

const BLANK_QUESTION: &str = "Please enter a question";

#[derive(Debug, Clone, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    limit: usize,
}

/// How well a passage matched, by `relevance_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relevance {
    /// 0.8 and above.
    High,
    /// 0.6 up to 0.8.
    Medium,
    Low,
}

impl Relevance {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One passage backing an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub chunk_id: Option<String>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub text_chunk: String,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl QueryResult {
    pub fn relevance(&self) -> Relevance {
        Relevance::from_score(self.relevance_score)
    }

    /// Score as a whole percentage.
    pub fn relevance_percent(&self) -> u32 {
        (self.relevance_score * 100.0).round().clamp(0.0, 100.0) as u32
    }

    /// Contract name, or a generic label when the passage has none.
    pub fn source_name(&self) -> &str {
        self.contract_name.as_deref().unwrap_or("Contract Document")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<QueryResult>,
    #[serde(default)]
    pub total_results: u64,
}

/// A previously asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub results_count: Option<u64>,
}

#[derive(Deserialize)]
struct SuggestionsBody {
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Deserialize)]
struct HistoryBody {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// Questions asked in this session, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryHistory {
    entries: VecDeque<HistoryEntry>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a question, dropping the oldest past [`HISTORY_CAPACITY`].
    pub fn record(&mut self, question: impl Into<String>, results_count: u64) {
        self.push(HistoryEntry {
            question: question.into(),
            timestamp: Some(Utc::now()),
            results_count: Some(results_count),
        });
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContractsClient {
    /// Asks a question with the default result limit.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, Error> {
        self.ask_with_limit(question, DEFAULT_ASK_LIMIT).await
    }

    /// Asks a question, returning at most `limit` supporting passages.
    ///
    /// Blank questions are refused without a request.
    pub async fn ask_with_limit(&self, question: &str, limit: usize) -> Result<AskResponse, Error> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput(BLANK_QUESTION.to_string()));
        }

        let url = self.endpoint(&["api", "ask"])?;
        let request = self.request(Method::POST, url, Auth::Bearer).await?;
        let body = AskRequest { question, limit };
        let response: AskResponse = self.send(request.json(&body), Auth::Bearer).await?;
        log::debug!("question answered with {} results", response.total_results);
        Ok(response)
    }

    /// Asks a question and records it in `history` on success.
    pub async fn ask_recorded(
        &self,
        question: &str,
        limit: usize,
        history: &mut QueryHistory,
    ) -> Result<AskResponse, Error> {
        let response = self.ask_with_limit(question, limit).await?;
        history.record(question, response.total_results);
        Ok(response)
    }

    /// Example questions tailored to the user's contracts.
    pub async fn suggestions(&self) -> Result<Vec<String>, Error> {
        let url = self.endpoint(&["api", "ask", "suggestions"])?;
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        let body: SuggestionsBody = self.send(request, Auth::Bearer).await?;
        Ok(body.suggestions)
    }

    /// Questions the server remembers for this user.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, Error> {
        let url = self.endpoint(&["api", "ask", "history"])?;
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        let body: HistoryBody = self.send(request, Auth::Bearer).await?;
        Ok(body.history)
    }
}
